//! # metalens-core
//!
//! Core library for auditing the metadata of an HTML page.
//!
//! This library provides:
//! - Tag extraction into a flat [`MetadataRecord`]
//! - Per-category diagnostics with green/yellow/red verdicts
//! - A weighted 0-100 score with letter grade
//! - An AI readiness assessment over the page, its `robots.txt` and `llms.txt`
//!
//! Everything here is synchronous and side-effect free. Fetching the page
//! and its well-known files is left to the caller.
//!
//! ## Example
//!
//! ```
//! use metalens_core::{AnalyzeOptions, analyze};
//!
//! let html = r#"<html lang="en"><head><title>Example</title></head></html>"#;
//! let report = analyze(html, &AnalyzeOptions::default());
//!
//! assert_eq!(report.tags.title.as_deref(), Some("Example"));
//! assert!(report.score.overall < 60);
//! ```

pub mod ai_readiness;
pub mod diagnostics;
pub mod image;
pub mod parser;
pub mod rules;
pub mod score;
pub mod types;
pub mod url_utils;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use ai_readiness::{
    AiReadinessCheck, AiReadinessOptions, AiReadinessResult, CheckStatus, Verdict,
    assess_ai_readiness,
};
pub use diagnostics::{
    Category, DiagnosticResult, DiagnosticStatus, Diagnostics, generate_diagnostics,
};
pub use image::{ImageAnalysis, ImageFit};
pub use parser::parse_meta_tags;
pub use score::{Grade, MetaScore, compute_score};
pub use types::MetadataRecord;

/// Everything `analyze` needs besides the HTML itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeOptions {
    /// Measured size of the `og:image`, when the caller loaded it
    pub image: Option<ImageAnalysis>,
    pub ai_readiness: AiReadinessOptions,
}

/// Full result of one audit
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaReport {
    pub tags: MetadataRecord,
    pub diagnostics: Diagnostics,
    pub score: MetaScore,
    pub ai_readiness: AiReadinessResult,
}

/// Parse, diagnose, score and assess a document in one pass
pub fn analyze(html: &str, options: &AnalyzeOptions) -> MetaReport {
    let tags = parse_meta_tags(html);
    let diagnostics = generate_diagnostics(&tags, options.image.as_ref());
    let score = compute_score(&diagnostics);
    let ai_readiness = assess_ai_readiness(&tags, &options.ai_readiness);

    log::debug!(
        "Analyzed document: score {} ({}), {} issue(s), AI readiness {:?}",
        score.overall,
        score.grade,
        score.total_issues,
        ai_readiness.verdict
    );

    MetaReport {
        tags,
        diagnostics,
        score,
        ai_readiness,
    }
}
