//! Metadata record produced by the tag extractor
//!
//! Every scalar is `Option<String>` and is `None` when the tag is missing or
//! carries no value. Nested groups are plain structs rather than options, so a
//! caller can always write `tags.open_graph.image` without unwrapping a group.

use serde::Serialize;
use serde_json::Value as JsonValue;

/// Snapshot of one document's metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    pub title: Option<String>,
    pub description: Option<String>,
    pub viewport: Option<String>,
    pub robots: Option<String>,
    pub canonical: Option<String>,
    pub favicon: Option<String>,
    pub theme_color: Option<String>,
    pub author: Option<String>,
    pub keywords: Option<String>,
    pub language: Option<String>,
    pub generator: Option<String>,
    pub html_lang: Option<String>,

    pub open_graph: OpenGraph,
    pub facebook: Facebook,
    pub article: Article,
    pub twitter: Twitter,
    pub pinterest: Pinterest,
    pub apple: Apple,
    pub microsoft: Microsoft,

    /// Parsed JSON-LD blocks in document order; malformed blocks are dropped
    pub structured_data: Vec<JsonValue>,
}

/// `og:*` properties
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub og_type: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    pub image_width: Option<String>,
    pub image_height: Option<String>,
    pub image_type: Option<String>,
    pub site_name: Option<String>,
    pub locale: Option<String>,
    pub updated_time: Option<String>,
    pub video: Option<String>,
    pub audio: Option<String>,
}

impl OpenGraph {
    /// True when at least one of `og:title`, `og:description`, `og:image` is set
    pub fn has_core_tags(&self) -> bool {
        self.title.is_some() || self.description.is_some() || self.image.is_some()
    }
}

/// `fb:*` properties
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facebook {
    pub app_id: Option<String>,
    pub admins: Option<String>,
}

/// `article:*` properties
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub author: Option<String>,
    pub published_time: Option<String>,
    pub modified_time: Option<String>,
    pub section: Option<String>,
    /// Every `article:tag` value, in document order
    pub tags: Vec<String>,
}

/// `twitter:*` names
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Twitter {
    pub card: Option<String>,
    pub site: Option<String>,
    pub creator: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    pub label1: Option<String>,
    pub data1: Option<String>,
    pub label2: Option<String>,
    pub data2: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pinterest {
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Apple {
    pub mobile_web_app_capable: Option<String>,
    pub mobile_web_app_title: Option<String>,
    pub mobile_web_app_status_bar_style: Option<String>,
    pub touch_icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Microsoft {
    pub tile_image: Option<String>,
    pub tile_color: Option<String>,
}
