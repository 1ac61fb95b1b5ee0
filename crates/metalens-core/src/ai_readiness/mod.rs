//! AI readiness checking functionality
//!
//! This module checks whether AI crawlers and LLM-based answer engines can
//! find, attribute and date a page. Seven checks look at the page's own
//! metadata; two look at the site's `robots.txt` and `llms.txt`, which the
//! caller fetches and passes in as text.

pub mod content;
pub mod llms_txt;
pub mod robots_txt;

use serde::{Deserialize, Serialize};

use crate::rules::{NOT_READY_MIN_FAILS, PARTIAL_MIN_WARNS};
use crate::types::MetadataRecord;

const PASTE_MODE_MESSAGE: &str = "Not available in paste mode";

/// Outcome of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
    /// Not applicable; excluded from the verdict
    Na,
}

/// Overall AI readiness verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    Ready,
    Partial,
    NotReady,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AiReadinessCheck {
    /// Stable identifier, e.g. `json-ld`
    pub id: &'static str,
    pub label: &'static str,
    pub status: CheckStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl AiReadinessCheck {
    pub fn new(
        id: &'static str,
        label: &'static str,
        status: CheckStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id,
            label,
            status,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AiReadinessResult {
    pub verdict: Verdict,
    pub checks: Vec<AiReadinessCheck>,
}

impl AiReadinessResult {
    pub fn check(&self, id: &str) -> Option<&AiReadinessCheck> {
        self.checks.iter().find(|c| c.id == id)
    }
}

/// Inputs that come from outside the document itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiReadinessOptions {
    /// The HTML was pasted rather than fetched, so there is no site to query
    pub paste_mode: bool,
    /// Body of `{origin}/robots.txt`; `None` when it could not be fetched
    pub robots_txt: Option<String>,
    /// Body of `{origin}/llms.txt`; `None` when it could not be fetched
    pub llms_txt: Option<String>,
}

/// Run all nine checks and derive the verdict
pub fn assess_ai_readiness(tags: &MetadataRecord, options: &AiReadinessOptions) -> AiReadinessResult {
    let mut checks = content::content_checks(tags);

    if options.paste_mode {
        checks.push(AiReadinessCheck::new(
            robots_txt::CHECK_ID,
            robots_txt::CHECK_LABEL,
            CheckStatus::Na,
            PASTE_MODE_MESSAGE,
        ));
        checks.push(AiReadinessCheck::new(
            llms_txt::CHECK_ID,
            llms_txt::CHECK_LABEL,
            CheckStatus::Na,
            PASTE_MODE_MESSAGE,
        ));
    } else {
        checks.push(robots_txt::check_robots_txt(options.robots_txt.as_deref()));
        checks.push(llms_txt::check_llms_txt(options.llms_txt.as_deref()));
    }

    let verdict = compute_verdict(&checks);
    log::debug!("AI readiness verdict: {verdict:?}");

    AiReadinessResult { verdict, checks }
}

/// Derive the verdict from fail and warn counts, ignoring `na` checks
pub fn compute_verdict(checks: &[AiReadinessCheck]) -> Verdict {
    let fails = checks.iter().filter(|c| c.status == CheckStatus::Fail).count();
    let warns = checks.iter().filter(|c| c.status == CheckStatus::Warn).count();

    if fails >= NOT_READY_MIN_FAILS {
        Verdict::NotReady
    } else if fails >= 1 || warns >= PARTIAL_MIN_WARNS {
        Verdict::Partial
    } else {
        Verdict::Ready
    }
}
