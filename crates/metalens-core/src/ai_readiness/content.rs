//! Checks that only need the page's own metadata

use serde_json::{Map, Value as JsonValue};

use super::{AiReadinessCheck, CheckStatus};
use crate::rules::{AI_DESCRIPTION_PASS_CHARS, AI_DESCRIPTION_WARN_CHARS, AI_OPT_OUT_DIRECTIVES};
use crate::types::MetadataRecord;

/// The seven content checks, in report order
pub fn content_checks(tags: &MetadataRecord) -> Vec<AiReadinessCheck> {
    let nodes = structured_nodes(&tags.structured_data);

    vec![
        check_json_ld(&tags.structured_data, &nodes),
        check_authorship(tags, &nodes),
        check_freshness(tags, &nodes),
        check_canonical(tags),
        check_language(tags),
        check_description_quality(tags),
        check_ai_crawl_directives(tags),
    ]
}

type JsonObject = Map<String, JsonValue>;

/// Every JSON-LD object worth probing: top-level objects, objects inside a
/// top-level array, and the members of any `@graph` array on those.
fn structured_nodes(data: &[JsonValue]) -> Vec<&JsonObject> {
    fn push_with_graph<'a>(object: &'a JsonObject, nodes: &mut Vec<&'a JsonObject>) {
        nodes.push(object);
        if let Some(JsonValue::Array(graph)) = object.get("@graph") {
            nodes.extend(graph.iter().filter_map(JsonValue::as_object));
        }
    }

    let mut nodes = Vec::new();
    for entry in data {
        match entry {
            JsonValue::Object(object) => push_with_graph(object, &mut nodes),
            JsonValue::Array(items) => {
                for object in items.iter().filter_map(JsonValue::as_object) {
                    push_with_graph(object, &mut nodes);
                }
            }
            _ => {}
        }
    }
    nodes
}

/// First non-empty string value of `key` across the nodes
fn find_string<'a>(nodes: &[&'a JsonObject], key: &str) -> Option<&'a str> {
    nodes
        .iter()
        .copied()
        .filter_map(|node| node.get(key))
        .filter_map(JsonValue::as_str)
        .find(|value| !value.trim().is_empty())
}

/// Fails only when no block parsed at all; blocks without objects still count as present
fn check_json_ld(data: &[JsonValue], nodes: &[&JsonObject]) -> AiReadinessCheck {
    const ID: &str = "json-ld";
    const LABEL: &str = "Structured Data (JSON-LD)";

    if data.is_empty() {
        return AiReadinessCheck::new(ID, LABEL, CheckStatus::Fail, "No JSON-LD structured data found")
            .with_suggestion(
                "Add a <script type=\"application/ld+json\"> block describing the page (e.g. Article, Product, Organization)",
            );
    }

    let types: Vec<String> = nodes
        .iter()
        .filter_map(|node| node.get("@type"))
        .map(|value| match value {
            JsonValue::String(s) => s.clone(),
            JsonValue::Array(items) => items
                .iter()
                .filter_map(JsonValue::as_str)
                .collect::<Vec<_>>()
                .join("/"),
            other => other.to_string(),
        })
        .collect();

    if types.is_empty() {
        return AiReadinessCheck::new(
            ID,
            LABEL,
            CheckStatus::Warn,
            "JSON-LD found, but no entry declares an @type",
        )
        .with_suggestion("Give each JSON-LD entity a schema.org @type so AI systems know what it describes");
    }

    AiReadinessCheck::new(
        ID,
        LABEL,
        CheckStatus::Pass,
        format!("JSON-LD found with type(s): {}", types.join(", ")),
    )
}

/// Any string, object or array counts; the shape is not validated further
fn is_author_value(value: &JsonValue) -> bool {
    matches!(
        value,
        JsonValue::String(_) | JsonValue::Object(_) | JsonValue::Array(_)
    )
}

fn check_authorship(tags: &MetadataRecord, nodes: &[&JsonObject]) -> AiReadinessCheck {
    const ID: &str = "authorship";
    const LABEL: &str = "Authorship";

    let source = if let Some(author) = &tags.author {
        Some(format!("meta author tag ({author})"))
    } else if let Some(author) = &tags.article.author {
        Some(format!("article:author ({author})"))
    } else if nodes
        .iter()
        .any(|node| node.get("author").is_some_and(is_author_value))
    {
        Some("structured data".to_string())
    } else {
        None
    };

    match source {
        Some(source) => AiReadinessCheck::new(
            ID,
            LABEL,
            CheckStatus::Pass,
            format!("Author declared via {source}"),
        ),
        None => AiReadinessCheck::new(ID, LABEL, CheckStatus::Fail, "No author information found")
            .with_suggestion(
                "Add <meta name=\"author\">, article:author, or an author property in JSON-LD so AI answers can attribute the content",
            ),
    }
}

fn check_freshness(tags: &MetadataRecord, nodes: &[&JsonObject]) -> AiReadinessCheck {
    const ID: &str = "freshness";
    const LABEL: &str = "Content Freshness";

    let published = tags
        .article
        .published_time
        .as_deref()
        .or_else(|| find_string(nodes, "datePublished"));
    let modified = tags
        .article
        .modified_time
        .as_deref()
        .or(tags.open_graph.updated_time.as_deref())
        .or_else(|| find_string(nodes, "dateModified"));

    match (published, modified) {
        (Some(published), Some(modified)) => AiReadinessCheck::new(
            ID,
            LABEL,
            CheckStatus::Pass,
            format!("Published {published}, last modified {modified}"),
        ),
        (Some(published), None) => AiReadinessCheck::new(
            ID,
            LABEL,
            CheckStatus::Warn,
            format!("Publish date found ({published}) but no modified date"),
        )
        .with_suggestion("Add article:modified_time or dateModified so AI systems can judge how current the page is"),
        (None, Some(modified)) => AiReadinessCheck::new(
            ID,
            LABEL,
            CheckStatus::Warn,
            format!("Modified date found ({modified}) but no publish date"),
        )
        .with_suggestion("Add article:published_time or datePublished"),
        (None, None) => AiReadinessCheck::new(ID, LABEL, CheckStatus::Fail, "No publish or modified dates found")
            .with_suggestion(
                "Add article:published_time and article:modified_time, or datePublished and dateModified in JSON-LD",
            ),
    }
}

fn check_canonical(tags: &MetadataRecord) -> AiReadinessCheck {
    const ID: &str = "canonical";
    const LABEL: &str = "Canonical URL";

    match &tags.canonical {
        Some(canonical) => AiReadinessCheck::new(
            ID,
            LABEL,
            CheckStatus::Pass,
            format!("Canonical URL declared ({canonical})"),
        ),
        None => AiReadinessCheck::new(ID, LABEL, CheckStatus::Fail, "No canonical URL declared")
            .with_suggestion("Add <link rel=\"canonical\"> so AI systems cite one URL for this content"),
    }
}

fn check_language(tags: &MetadataRecord) -> AiReadinessCheck {
    const ID: &str = "language";
    const LABEL: &str = "Language";

    match tags.html_lang.as_ref().or(tags.language.as_ref()) {
        Some(lang) => AiReadinessCheck::new(
            ID,
            LABEL,
            CheckStatus::Pass,
            format!("Language declared ({lang})"),
        ),
        None => AiReadinessCheck::new(ID, LABEL, CheckStatus::Fail, "No document language declared")
            .with_suggestion("Add a lang attribute to the <html> element, e.g. <html lang=\"en\">"),
    }
}

fn check_description_quality(tags: &MetadataRecord) -> AiReadinessCheck {
    const ID: &str = "description-quality";
    const LABEL: &str = "Description Quality";

    let Some(description) = tags
        .description
        .as_ref()
        .or(tags.open_graph.description.as_ref())
    else {
        return AiReadinessCheck::new(ID, LABEL, CheckStatus::Fail, "No description found")
            .with_suggestion("Add a meta description that summarises the page in a sentence or two");
    };

    let len = description.chars().count();
    if len >= AI_DESCRIPTION_PASS_CHARS {
        AiReadinessCheck::new(
            ID,
            LABEL,
            CheckStatus::Pass,
            format!("Description is descriptive enough ({len} characters)"),
        )
    } else if len >= AI_DESCRIPTION_WARN_CHARS {
        AiReadinessCheck::new(
            ID,
            LABEL,
            CheckStatus::Warn,
            format!("Description is a little short ({len} characters)"),
        )
        .with_suggestion(format!(
            "Expand the description to at least {AI_DESCRIPTION_PASS_CHARS} characters"
        ))
    } else {
        AiReadinessCheck::new(
            ID,
            LABEL,
            CheckStatus::Fail,
            format!("Description is too short to summarise the page ({len} characters)"),
        )
        .with_suggestion(format!(
            "Write a description of at least {AI_DESCRIPTION_PASS_CHARS} characters"
        ))
    }
}

fn check_ai_crawl_directives(tags: &MetadataRecord) -> AiReadinessCheck {
    const ID: &str = "ai-crawl-directives";
    const LABEL: &str = "AI Crawl Directives";

    let robots = tags.robots.as_deref().unwrap_or_default().to_ascii_lowercase();
    let found: Vec<&str> = AI_OPT_OUT_DIRECTIVES
        .into_iter()
        .filter(|directive| robots.contains(directive))
        .collect();

    if found.is_empty() {
        AiReadinessCheck::new(
            ID,
            LABEL,
            CheckStatus::Pass,
            "No AI opt-out directives in the robots meta tag",
        )
    } else {
        AiReadinessCheck::new(
            ID,
            LABEL,
            CheckStatus::Fail,
            format!("Robots meta tag opts out of AI use: {}", found.join(", ")),
        )
        .with_suggestion("Remove noai/noimageai if AI systems should be able to use this page")
    }
}
