//! HTML meta tag extraction
//!
//! Walks the `<meta>`, `<link>` and `<script>` elements of a document once and
//! builds a [`MetadataRecord`]. Parsing never fails: html5ever recovers from
//! any markup, and unusable values simply leave their field empty.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value as JsonValue;

use crate::types::{
    Apple, Article, Facebook, MetadataRecord, Microsoft, OpenGraph, Pinterest, Twitter,
};

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("invalid title selector"));
static META: Lazy<Selector> = Lazy::new(|| Selector::parse("meta").expect("invalid meta selector"));
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("link").expect("invalid link selector"));
static SCRIPT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script").expect("invalid script selector"));

/// Which attribute of a `<meta>` element carries its key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MetaAttr {
    Name,
    Property,
    HttpEquiv,
}

use MetaAttr::{HttpEquiv, Name, Property};

/// First occurrence of each meta key, with its document position.
///
/// Keys are lowercased. A first match without a usable `content` still wins,
/// so a later duplicate never fills the field.
#[derive(Default)]
struct MetaIndex {
    first: HashMap<(MetaAttr, String), (usize, Option<String>)>,
    article_tags: Vec<String>,
}

impl MetaIndex {
    fn build(document: &Html) -> Self {
        let mut index = Self::default();

        for (position, element) in document.select(&META).enumerate() {
            let meta = element.value();
            let content = meta.attr("content").and_then(non_empty);

            for (attr, attr_name) in [(Name, "name"), (Property, "property"), (HttpEquiv, "http-equiv")] {
                let Some(key) = meta.attr(attr_name) else {
                    continue;
                };
                let key = key.trim().to_ascii_lowercase();

                if attr == Property
                    && key == "article:tag"
                    && let Some(tag) = &content
                {
                    index.article_tags.push(tag.clone());
                }

                index
                    .first
                    .entry((attr, key))
                    .or_insert_with(|| (position, content.clone()));
            }
        }

        index
    }

    fn get(&self, attr: MetaAttr, key: &str) -> Option<String> {
        self.first
            .get(&(attr, key.to_string()))
            .and_then(|(_, content)| content.clone())
    }

    /// Earliest element in document order matching any of `keys`
    fn first_of(&self, keys: &[(MetaAttr, &str)]) -> Option<String> {
        keys.iter()
            .filter_map(|(attr, key)| self.first.get(&(*attr, key.to_string())))
            .min_by_key(|(position, _)| *position)
            .and_then(|(_, content)| content.clone())
    }
}

/// First `href` per `rel` value, with document position
#[derive(Default)]
struct LinkIndex {
    first: HashMap<String, (usize, Option<String>)>,
}

impl LinkIndex {
    fn build(document: &Html) -> Self {
        let mut index = Self::default();

        for (position, element) in document.select(&LINK).enumerate() {
            let link = element.value();
            let Some(rel) = link.attr("rel") else {
                continue;
            };
            let href = link.attr("href").and_then(non_empty);
            index
                .first
                .entry(rel.trim().to_ascii_lowercase())
                .or_insert((position, href));
        }

        index
    }

    fn first_of(&self, rels: &[&str]) -> Option<String> {
        rels.iter()
            .filter_map(|rel| self.first.get(*rel))
            .min_by_key(|(position, _)| *position)
            .and_then(|(_, href)| href.clone())
    }
}

/// Parse an HTML document (or a bare `<head>` fragment) into a metadata record
pub fn parse_meta_tags(html: &str) -> MetadataRecord {
    let document = Html::parse_document(html);
    let meta = MetaIndex::build(&document);
    let links = LinkIndex::build(&document);

    let title = document
        .select(&TITLE)
        .next()
        .map(|element| element.text().collect::<String>())
        .and_then(|text| non_empty(text.trim()));

    let html_lang = document
        .root_element()
        .value()
        .attr("lang")
        .and_then(non_empty);

    let structured_data = parse_json_ld_blocks(&extract_json_ld_blocks(&document));

    let record = MetadataRecord {
        title,
        description: meta.get(Name, "description"),
        viewport: meta.get(Name, "viewport"),
        robots: meta.get(Name, "robots"),
        canonical: links.first_of(&["canonical"]),
        favicon: links.first_of(&["icon", "shortcut icon"]),
        theme_color: meta.get(Name, "theme-color"),
        author: meta.get(Name, "author"),
        keywords: meta.get(Name, "keywords"),
        language: meta.first_of(&[(Name, "language"), (HttpEquiv, "content-language")]),
        generator: meta.get(Name, "generator"),
        html_lang,
        open_graph: OpenGraph {
            title: meta.get(Property, "og:title"),
            description: meta.get(Property, "og:description"),
            og_type: meta.get(Property, "og:type"),
            url: meta.get(Property, "og:url"),
            image: meta.get(Property, "og:image"),
            image_alt: meta.get(Property, "og:image:alt"),
            image_width: meta.get(Property, "og:image:width"),
            image_height: meta.get(Property, "og:image:height"),
            image_type: meta.get(Property, "og:image:type"),
            site_name: meta.get(Property, "og:site_name"),
            locale: meta.get(Property, "og:locale"),
            updated_time: meta.get(Property, "og:updated_time"),
            video: meta.get(Property, "og:video"),
            audio: meta.get(Property, "og:audio"),
        },
        facebook: Facebook {
            app_id: meta.get(Property, "fb:app_id"),
            admins: meta.get(Property, "fb:admins"),
        },
        article: Article {
            author: meta.get(Property, "article:author"),
            published_time: meta.get(Property, "article:published_time"),
            modified_time: meta.get(Property, "article:modified_time"),
            section: meta.get(Property, "article:section"),
            tags: meta.article_tags.clone(),
        },
        twitter: Twitter {
            card: meta.get(Name, "twitter:card"),
            site: meta.get(Name, "twitter:site"),
            creator: meta.get(Name, "twitter:creator"),
            title: meta.get(Name, "twitter:title"),
            description: meta.get(Name, "twitter:description"),
            image: meta.get(Name, "twitter:image"),
            image_alt: meta.get(Name, "twitter:image:alt"),
            label1: meta.get(Name, "twitter:label1"),
            data1: meta.get(Name, "twitter:data1"),
            label2: meta.get(Name, "twitter:label2"),
            data2: meta.get(Name, "twitter:data2"),
        },
        pinterest: Pinterest {
            description: meta.first_of(&[
                (Name, "pinterest-rich-pin-description"),
                (Name, "pinterest:description"),
            ]),
        },
        apple: Apple {
            mobile_web_app_capable: meta.get(Name, "apple-mobile-web-app-capable"),
            mobile_web_app_title: meta.get(Name, "apple-mobile-web-app-title"),
            mobile_web_app_status_bar_style: meta.get(Name, "apple-mobile-web-app-status-bar-style"),
            touch_icon: links.first_of(&["apple-touch-icon"]),
        },
        microsoft: Microsoft {
            tile_image: meta.get(Name, "msapplication-tileimage"),
            tile_color: meta.get(Name, "msapplication-tilecolor"),
        },
        structured_data,
    };

    log::debug!(
        "parsed metadata: title={}, {} JSON-LD block(s), {} article tag(s)",
        record.title.is_some(),
        record.structured_data.len(),
        record.article.tags.len()
    );

    record
}

/// Raw text of every `<script type="application/ld+json">` block
fn extract_json_ld_blocks(document: &Html) -> Vec<String> {
    document
        .select(&SCRIPT)
        .filter(is_json_ld_script)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .collect()
}

fn is_json_ld_script(element: &ElementRef<'_>) -> bool {
    element
        .value()
        .attr("type")
        .map(|t| t.trim().to_ascii_lowercase())
        // Also catches "application/ld+json; charset=utf-8"
        .is_some_and(|t| t.contains("ld+json"))
}

/// Parse each block as JSON, dropping any that fail
fn parse_json_ld_blocks(blocks: &[String]) -> Vec<JsonValue> {
    blocks
        .iter()
        .enumerate()
        .filter_map(|(i, block)| match serde_json::from_str::<JsonValue>(block) {
            Ok(value) => Some(value),
            Err(e) => {
                log::debug!("skipping malformed JSON-LD block #{i}: {e}");
                None
            }
        })
        .collect()
}

/// Whitespace-only values count as missing
fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_empty_record() {
        let tags = parse_meta_tags("");
        assert_eq!(tags, MetadataRecord::default());
        assert!(tags.structured_data.is_empty());
        assert!(tags.article.tags.is_empty());
    }

    #[test]
    fn test_garbage_input_does_not_panic() {
        let tags = parse_meta_tags("<<<>>><meta <title <script type=\"application/ld+json\">{");
        assert!(tags.description.is_none());
        assert!(tags.structured_data.is_empty());
    }

    #[test]
    fn test_title_and_html_lang() {
        let html = r#"<html lang="en-GB"><head><title>
            Hello World
        </title><title>Second</title></head></html>"#;

        let tags = parse_meta_tags(html);
        assert_eq!(tags.title.as_deref(), Some("Hello World"));
        assert_eq!(tags.html_lang.as_deref(), Some("en-GB"));
    }

    #[test]
    fn test_empty_title_is_absent() {
        let tags = parse_meta_tags("<title>   </title>");
        assert!(tags.title.is_none());
    }

    #[test]
    fn test_head_fragment_is_accepted() {
        let html = r#"
            <meta name="description" content="Fragment description">
            <meta property="og:title" content="Fragment">
        "#;

        let tags = parse_meta_tags(html);
        assert_eq!(tags.description.as_deref(), Some("Fragment description"));
        assert_eq!(tags.open_graph.title.as_deref(), Some("Fragment"));
        assert!(tags.html_lang.is_none());
    }

    #[test]
    fn test_first_meta_match_wins() {
        let html = r#"
            <meta name="description" content="first">
            <meta name="description" content="second">
        "#;

        let tags = parse_meta_tags(html);
        assert_eq!(tags.description.as_deref(), Some("first"));
    }

    #[test]
    fn test_empty_content_is_absent() {
        let html = r#"<meta name="author" content=""><meta name="robots">"#;

        let tags = parse_meta_tags(html);
        assert!(tags.author.is_none());
        assert!(tags.robots.is_none());
    }

    #[test]
    fn test_whitespace_content_is_absent() {
        let html = r#"
            <meta name="description" content="   ">
            <meta name="description" content="later">
            <link rel="canonical" href="  ">
        "#;

        let tags = parse_meta_tags(html);
        assert!(tags.description.is_none());
        assert!(tags.canonical.is_none());
    }

    #[test]
    fn test_open_graph_and_twitter_groups() {
        let html = r#"
            <meta property="og:title" content="OG Title">
            <meta property="og:type" content="article">
            <meta property="og:image" content="https://example.com/a.png">
            <meta property="og:image:width" content="1200">
            <meta property="og:image:height" content="630">
            <meta property="og:site_name" content="Example">
            <meta property="fb:app_id" content="12345">
            <meta name="twitter:card" content="summary_large_image">
            <meta name="twitter:site" content="@example">
            <meta name="twitter:label1" content="Reading time">
            <meta name="twitter:data1" content="4 min">
        "#;

        let tags = parse_meta_tags(html);
        assert_eq!(tags.open_graph.title.as_deref(), Some("OG Title"));
        assert_eq!(tags.open_graph.og_type.as_deref(), Some("article"));
        assert_eq!(tags.open_graph.image_width.as_deref(), Some("1200"));
        assert_eq!(tags.open_graph.image_height.as_deref(), Some("630"));
        assert_eq!(tags.open_graph.site_name.as_deref(), Some("Example"));
        assert_eq!(tags.facebook.app_id.as_deref(), Some("12345"));
        assert_eq!(tags.twitter.card.as_deref(), Some("summary_large_image"));
        assert_eq!(tags.twitter.site.as_deref(), Some("@example"));
        assert_eq!(tags.twitter.label1.as_deref(), Some("Reading time"));
        assert_eq!(tags.twitter.data1.as_deref(), Some("4 min"));
        assert!(tags.twitter.title.is_none());
    }

    #[test]
    fn test_selector_attribute_is_respected() {
        // og:* is read from `property`, twitter:* from `name`
        let html = r#"
            <meta name="og:title" content="wrong attribute">
            <meta property="twitter:card" content="wrong attribute">
        "#;

        let tags = parse_meta_tags(html);
        assert!(tags.open_graph.title.is_none());
        assert!(tags.twitter.card.is_none());
    }

    #[test]
    fn test_article_tags_collect_all_in_order() {
        let html = r#"
            <meta property="article:tag" content="rust">
            <meta property="article:section" content="Engineering">
            <meta property="article:tag" content="seo">
            <meta property="article:tag" content="">
            <meta property="article:tag" content="html">
        "#;

        let tags = parse_meta_tags(html);
        assert_eq!(tags.article.tags, vec!["rust", "seo", "html"]);
        assert_eq!(tags.article.section.as_deref(), Some("Engineering"));
    }

    #[test]
    fn test_links() {
        let html = r#"
            <link rel="shortcut icon" href="/favicon.ico">
            <link rel="icon" href="/icon.png">
            <link rel="canonical" href="https://example.com/page">
            <link rel="apple-touch-icon" href="/apple.png">
        "#;

        let tags = parse_meta_tags(html);
        // First in document order among the icon rels
        assert_eq!(tags.favicon.as_deref(), Some("/favicon.ico"));
        assert_eq!(tags.canonical.as_deref(), Some("https://example.com/page"));
        assert_eq!(tags.apple.touch_icon.as_deref(), Some("/apple.png"));
    }

    #[test]
    fn test_icon_before_shortcut_icon() {
        let html = r#"
            <link rel="icon" href="/icon.png">
            <link rel="shortcut icon" href="/favicon.ico">
        "#;

        let tags = parse_meta_tags(html);
        assert_eq!(tags.favicon.as_deref(), Some("/icon.png"));
    }

    #[test]
    fn test_language_union_uses_document_order() {
        let html = r#"
            <meta http-equiv="Content-Language" content="nl">
            <meta name="language" content="English">
        "#;

        let tags = parse_meta_tags(html);
        assert_eq!(tags.language.as_deref(), Some("nl"));
    }

    #[test]
    fn test_pinterest_description_fallback() {
        let html = r#"<meta name="pinterest:description" content="Pin this">"#;
        let tags = parse_meta_tags(html);
        assert_eq!(tags.pinterest.description.as_deref(), Some("Pin this"));
    }

    #[test]
    fn test_apple_and_microsoft_groups() {
        let html = r##"
            <meta name="apple-mobile-web-app-capable" content="yes">
            <meta name="apple-mobile-web-app-title" content="App">
            <meta name="apple-mobile-web-app-status-bar-style" content="black">
            <meta name="msapplication-TileImage" content="/tile.png">
            <meta name="msapplication-TileColor" content="#ffffff">
            <meta name="theme-color" content="#000000">
        "##;

        let tags = parse_meta_tags(html);
        assert_eq!(tags.apple.mobile_web_app_capable.as_deref(), Some("yes"));
        assert_eq!(tags.apple.mobile_web_app_title.as_deref(), Some("App"));
        assert_eq!(tags.apple.mobile_web_app_status_bar_style.as_deref(), Some("black"));
        assert_eq!(tags.microsoft.tile_image.as_deref(), Some("/tile.png"));
        assert_eq!(tags.microsoft.tile_color.as_deref(), Some("#ffffff"));
        assert_eq!(tags.theme_color.as_deref(), Some("#000000"));
    }

    #[test]
    fn test_json_ld_malformed_blocks_are_skipped() {
        let html = r#"
            <script type="application/ld+json">{"@type": "Organization", "name": "First"}</script>
            <script type="application/ld+json">{"@type": "Product",</script>
            <script type="application/ld+json"></script>
            <script type="application/ld+json">[{"@type": "Person"}]</script>
            <script type="text/javascript">{"@type": "NotJsonLd"}</script>
        "#;

        let tags = parse_meta_tags(html);
        assert_eq!(tags.structured_data.len(), 2);
        assert_eq!(tags.structured_data[0]["name"], "First");
        assert!(tags.structured_data[1].is_array());
    }

    #[test]
    fn test_json_ld_with_charset_and_case() {
        let html = r#"
            <script type="APPLICATION/LD+JSON; charset=utf-8">{"@type": "WebPage"}</script>
        "#;

        let tags = parse_meta_tags(html);
        assert_eq!(tags.structured_data.len(), 1);
        assert_eq!(tags.structured_data[0]["@type"], "WebPage");
    }

    #[test]
    fn test_parse_is_deterministic() {
        let html = r#"<title>Same</title><meta property="article:tag" content="a">"#;
        assert_eq!(parse_meta_tags(html), parse_meta_tags(html));
    }
}
