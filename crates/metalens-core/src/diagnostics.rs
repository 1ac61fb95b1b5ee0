//! Per-category verdicts on a page's search and social metadata
//!
//! Each category is judged independently from the [`MetadataRecord`] (and,
//! for the social image, an optional size measurement). The `overall`
//! verdict is the worst of the seven.

use serde::{Deserialize, Serialize};

use crate::image::{ImageAnalysis, ImageFit};
use crate::rules::{
    DESCRIPTION_MAX_CHARS, DESCRIPTION_MIN_CHARS, IMAGE_MIN_SIZE, IMAGE_RECOMMENDED_SIZE,
    TITLE_MAX_CHARS,
};
use crate::types::MetadataRecord;
use crate::url_utils::{differs_only_by_trailing_slash, is_absolute_http_url};

/// Traffic-light status; ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticStatus {
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticResult {
    pub status: DiagnosticStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl DiagnosticResult {
    fn green(message: impl Into<String>) -> Self {
        Self {
            status: DiagnosticStatus::Green,
            message: message.into(),
            suggestion: None,
        }
    }

    fn yellow(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            status: DiagnosticStatus::Yellow,
            message: message.into(),
            suggestion: Some(suggestion.into()),
        }
    }

    fn red(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            status: DiagnosticStatus::Red,
            message: message.into(),
            suggestion: Some(suggestion.into()),
        }
    }
}

/// The seven diagnosed categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Title,
    Description,
    OgTags,
    OgImage,
    TwitterCard,
    Canonical,
    Robots,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Title,
        Category::Description,
        Category::OgTags,
        Category::OgImage,
        Category::TwitterCard,
        Category::Canonical,
        Category::Robots,
    ];

    /// Human-readable name
    pub fn label(self) -> &'static str {
        match self {
            Category::Title => "Title",
            Category::Description => "Description",
            Category::OgTags => "Open Graph",
            Category::OgImage => "OG Image",
            Category::TwitterCard => "Twitter Card",
            Category::Canonical => "Canonical URL",
            Category::Robots => "Robots",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub title: DiagnosticResult,
    pub description: DiagnosticResult,
    pub og_tags: DiagnosticResult,
    pub og_image: DiagnosticResult,
    pub twitter_card: DiagnosticResult,
    pub canonical: DiagnosticResult,
    pub robots: DiagnosticResult,
    pub overall: DiagnosticResult,
}

impl Diagnostics {
    pub fn get(&self, category: Category) -> &DiagnosticResult {
        match category {
            Category::Title => &self.title,
            Category::Description => &self.description,
            Category::OgTags => &self.og_tags,
            Category::OgImage => &self.og_image,
            Category::TwitterCard => &self.twitter_card,
            Category::Canonical => &self.canonical,
            Category::Robots => &self.robots,
        }
    }

    /// The seven category results in display order (without `overall`)
    pub fn categories(&self) -> impl Iterator<Item = (Category, &DiagnosticResult)> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Evaluate `tags` against the per-category rules
pub fn generate_diagnostics(tags: &MetadataRecord, image: Option<&ImageAnalysis>) -> Diagnostics {
    let title = check_title(tags);
    let description = check_description(tags);
    let og_tags = check_og_tags(tags);
    let og_image = check_og_image(tags, image);
    let twitter_card = check_twitter_card(tags);
    let canonical = check_canonical(tags);
    let robots = check_robots(tags);

    let categories = [
        &title,
        &description,
        &og_tags,
        &og_image,
        &twitter_card,
        &canonical,
        &robots,
    ];
    let overall = summarize(&categories);

    log::debug!("diagnostics overall: {:?}", overall.status);

    Diagnostics {
        title,
        description,
        og_tags,
        og_image,
        twitter_card,
        canonical,
        robots,
        overall,
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn check_title(tags: &MetadataRecord) -> DiagnosticResult {
    let Some(title) = &tags.title else {
        return DiagnosticResult::red(
            "No <title> tag found",
            format!("Add a <title> of up to {TITLE_MAX_CHARS} characters that describes the page"),
        );
    };

    let len = char_len(title);
    if len > TITLE_MAX_CHARS {
        return DiagnosticResult::yellow(
            format!(
                "Title is {len} characters, {} over the {TITLE_MAX_CHARS}-character limit, so search results will truncate it",
                len - TITLE_MAX_CHARS
            ),
            format!("Shorten the title to {TITLE_MAX_CHARS} characters or fewer"),
        );
    }

    DiagnosticResult::green(format!("Title length is good ({len} characters)"))
}

fn check_description(tags: &MetadataRecord) -> DiagnosticResult {
    let Some(description) = &tags.description else {
        return DiagnosticResult::red(
            "No meta description found",
            format!(
                "Add <meta name=\"description\"> with {DESCRIPTION_MIN_CHARS} to {DESCRIPTION_MAX_CHARS} characters summarising the page"
            ),
        );
    };

    let len = char_len(description);
    if len > DESCRIPTION_MAX_CHARS {
        return DiagnosticResult::yellow(
            format!(
                "Description is {len} characters, {} over the {DESCRIPTION_MAX_CHARS}-character limit",
                len - DESCRIPTION_MAX_CHARS
            ),
            format!("Trim the description to {DESCRIPTION_MAX_CHARS} characters or fewer"),
        );
    }
    if len < DESCRIPTION_MIN_CHARS {
        return DiagnosticResult::yellow(
            format!("Description is only {len} characters; aim for at least {DESCRIPTION_MIN_CHARS}"),
            "Expand the description so it summarises the page content",
        );
    }

    DiagnosticResult::green(format!("Description length is good ({len} characters)"))
}

fn check_og_tags(tags: &MetadataRecord) -> DiagnosticResult {
    let og = &tags.open_graph;
    let missing: Vec<&str> = [
        ("og:title", og.title.is_some()),
        ("og:description", og.description.is_some()),
        ("og:image", og.image.is_some()),
    ]
    .into_iter()
    .filter(|(_, present)| !present)
    .map(|(name, _)| name)
    .collect();

    match missing.len() {
        0 => DiagnosticResult::green("og:title, og:description and og:image are all present"),
        1 => DiagnosticResult::yellow(
            format!("Missing Open Graph tag: {}", missing[0]),
            format!("Add <meta property=\"{}\"> for complete social previews", missing[0]),
        ),
        _ => DiagnosticResult::red(
            format!("Missing Open Graph tags: {}", missing.join(", ")),
            "Add og:title, og:description and og:image so links render as rich previews",
        ),
    }
}

fn check_og_image(tags: &MetadataRecord, image: Option<&ImageAnalysis>) -> DiagnosticResult {
    let Some(url) = &tags.open_graph.image else {
        return DiagnosticResult::red(
            "No og:image set; shared links will show no image",
            format!(
                "Add <meta property=\"og:image\"> pointing to a {}x{}px image",
                IMAGE_RECOMMENDED_SIZE.0, IMAGE_RECOMMENDED_SIZE.1
            ),
        );
    };

    // A measured image is classified by its size alone; the URL shape only
    // matters when nothing was measured
    let measured = image.and_then(|a| a.overall_status.map(|fit| (a.width, a.height, fit)));

    match measured {
        Some((width, height, ImageFit::Issues)) => DiagnosticResult::red(
            format!(
                "Image is {width}x{height}px, below the {}x{}px minimum",
                IMAGE_MIN_SIZE.0, IMAGE_MIN_SIZE.1
            ),
            format!(
                "Use an image of at least {}x{}px ({}x{}px recommended)",
                IMAGE_MIN_SIZE.0, IMAGE_MIN_SIZE.1, IMAGE_RECOMMENDED_SIZE.0, IMAGE_RECOMMENDED_SIZE.1
            ),
        ),
        Some((width, height, ImageFit::Acceptable)) => DiagnosticResult::yellow(
            format!(
                "Image is {width}x{height}px, below the recommended {}x{}px",
                IMAGE_RECOMMENDED_SIZE.0, IMAGE_RECOMMENDED_SIZE.1
            ),
            format!(
                "Use a {}x{}px image for crisp large previews",
                IMAGE_RECOMMENDED_SIZE.0, IMAGE_RECOMMENDED_SIZE.1
            ),
        ),
        Some((width, height, _)) => {
            DiagnosticResult::green(format!("Image is {width}x{height}px and meets the recommended size"))
        }
        None if !is_absolute_http_url(url) => DiagnosticResult::yellow(
            format!("og:image is not an absolute URL ({url})"),
            "Use a full URL starting with https:// so every platform can fetch the image",
        ),
        None => DiagnosticResult::green("og:image is set with an absolute URL"),
    }
}

fn check_twitter_card(tags: &MetadataRecord) -> DiagnosticResult {
    if let Some(card) = &tags.twitter.card {
        return DiagnosticResult::green(format!("Twitter card type: {card}"));
    }

    if tags.open_graph.has_core_tags() {
        return DiagnosticResult::red(
            "twitter:card is missing, so X/Twitter will not render a large preview",
            "Add <meta name=\"twitter:card\" content=\"summary_large_image\">",
        );
    }

    DiagnosticResult::green("No Open Graph tags present, so a Twitter card is optional")
}

fn check_canonical(tags: &MetadataRecord) -> DiagnosticResult {
    let Some(canonical) = &tags.canonical else {
        return DiagnosticResult::red(
            "No canonical URL set",
            "Add <link rel=\"canonical\"> to tell search engines the preferred URL",
        );
    };

    if let Some(og_url) = &tags.open_graph.url
        && differs_only_by_trailing_slash(canonical, og_url)
    {
        return DiagnosticResult::yellow(
            format!("Canonical URL ({canonical}) and og:url ({og_url}) differ by a trailing slash"),
            "Use the exact same URL for the canonical link and og:url",
        );
    }

    DiagnosticResult::green(format!("Canonical URL: {canonical}"))
}

fn check_robots(tags: &MetadataRecord) -> DiagnosticResult {
    let Some(robots) = &tags.robots else {
        return DiagnosticResult::green("No robots meta tag; search engines index the page by default");
    };

    if robots.to_ascii_lowercase().contains("noindex") {
        return DiagnosticResult::yellow(
            "Page is marked noindex and will be excluded from search results",
            "Remove noindex from the robots meta tag if this page should be searchable",
        );
    }

    DiagnosticResult::green(format!("Robots directives allow indexing ({robots})"))
}

fn summarize(categories: &[&DiagnosticResult]) -> DiagnosticResult {
    let worst = categories
        .iter()
        .map(|r| r.status)
        .max()
        .unwrap_or(DiagnosticStatus::Green);
    let count = |status: DiagnosticStatus| categories.iter().filter(|r| r.status == status).count();

    match worst {
        DiagnosticStatus::Green => DiagnosticResult::green("All metadata checks passed"),
        DiagnosticStatus::Yellow => DiagnosticResult::yellow(
            format!("{} check(s) have warnings", count(DiagnosticStatus::Yellow)),
            "Review the warnings to polish how the page appears when shared",
        ),
        DiagnosticStatus::Red => DiagnosticResult::red(
            format!(
                "{} check(s) failing, {} with warnings",
                count(DiagnosticStatus::Red),
                count(DiagnosticStatus::Yellow)
            ),
            "Fix the failing checks first; they affect how the page is indexed and shared",
        ),
    }
}
