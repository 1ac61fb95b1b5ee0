//! Fixed rule tables shared by the diagnostics, scoring and AI readiness passes

use crate::diagnostics::{Category, DiagnosticStatus};
use crate::score::{Grade, ScoreStatus};

/// Longest title (in characters) that search results show without truncation
pub const TITLE_MAX_CHARS: usize = 60;

pub const DESCRIPTION_MIN_CHARS: usize = 50;
pub const DESCRIPTION_MAX_CHARS: usize = 160;

/// Description length at which the AI readiness check passes outright
pub const AI_DESCRIPTION_PASS_CHARS: usize = 80;
/// Below this the AI readiness description check fails
pub const AI_DESCRIPTION_WARN_CHARS: usize = 50;

/// Category weights; they sum to 100
pub const CATEGORY_WEIGHTS: [(Category, u8); 7] = [
    (Category::Title, 15),
    (Category::Description, 15),
    (Category::OgTags, 25),
    (Category::OgImage, 20),
    (Category::TwitterCard, 10),
    (Category::Canonical, 10),
    (Category::Robots, 5),
];

/// Points awarded per diagnostic status
pub const STATUS_SCORES: [(DiagnosticStatus, u8, ScoreStatus); 3] = [
    (DiagnosticStatus::Green, 100, ScoreStatus::Pass),
    (DiagnosticStatus::Yellow, 60, ScoreStatus::Warning),
    (DiagnosticStatus::Red, 0, ScoreStatus::Fail),
];

pub const MAX_CATEGORY_SCORE: u8 = 100;

/// Inclusive lower bounds, checked top-down; anything lower is an F
pub const GRADE_THRESHOLDS: [(u8, Grade); 4] = [
    (90, Grade::A),
    (80, Grade::B),
    (70, Grade::C),
    (60, Grade::D),
];

/// Crawlers that collect training or answer-engine data
pub const AI_BOTS: [&str; 8] = [
    "GPTBot",
    "ChatGPT-User",
    "Google-Extended",
    "Anthropic-AI",
    "ClaudeBot",
    "CCBot",
    "PerplexityBot",
    "Bytespider",
];

/// Robots meta directives that opt a page out of AI use
pub const AI_OPT_OUT_DIRECTIVES: [&str; 2] = ["noai", "noimageai"];

/// Smallest image (width, height) social platforms will render
pub const IMAGE_MIN_SIZE: (u32, u32) = (200, 200);
/// Image size (width, height) that renders crisply everywhere
pub const IMAGE_RECOMMENDED_SIZE: (u32, u32) = (1200, 630);

/// Failed checks at which a page is not ready for AI consumers
pub const NOT_READY_MIN_FAILS: usize = 3;
/// Warnings at which a page with no failures is only partially ready
pub const PARTIAL_MIN_WARNS: usize = 2;

pub fn weight_of(category: Category) -> u8 {
    CATEGORY_WEIGHTS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, weight)| *weight)
        .unwrap_or(0)
}

pub fn score_of(status: DiagnosticStatus) -> (u8, ScoreStatus) {
    STATUS_SCORES
        .iter()
        .find(|(s, _, _)| *s == status)
        .map(|(_, points, score_status)| (*points, *score_status))
        .unwrap_or((0, ScoreStatus::Fail))
}

pub fn grade_for(score: u8) -> Grade {
    GRADE_THRESHOLDS
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, grade)| *grade)
        .unwrap_or(Grade::F)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_weights_sum_to_100() {
        let total: u32 = CATEGORY_WEIGHTS.iter().map(|(_, w)| u32::from(*w)).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_every_category_has_a_weight() {
        for category in Category::ALL {
            assert!(weight_of(category) > 0, "{category:?} has no weight");
        }
    }

    #[rstest]
    #[case(Category::Title, 15)]
    #[case(Category::Description, 15)]
    #[case(Category::OgTags, 25)]
    #[case(Category::OgImage, 20)]
    #[case(Category::TwitterCard, 10)]
    #[case(Category::Canonical, 10)]
    #[case(Category::Robots, 5)]
    fn test_weight_table(#[case] category: Category, #[case] weight: u8) {
        assert_eq!(weight_of(category), weight);
    }

    #[rstest]
    #[case(DiagnosticStatus::Green, 100, ScoreStatus::Pass)]
    #[case(DiagnosticStatus::Yellow, 60, ScoreStatus::Warning)]
    #[case(DiagnosticStatus::Red, 0, ScoreStatus::Fail)]
    fn test_status_scores(
        #[case] status: DiagnosticStatus,
        #[case] points: u8,
        #[case] score_status: ScoreStatus,
    ) {
        assert_eq!(score_of(status), (points, score_status));
    }

    #[rstest]
    #[case(100, Grade::A)]
    #[case(90, Grade::A)]
    #[case(89, Grade::B)]
    #[case(80, Grade::B)]
    #[case(79, Grade::C)]
    #[case(70, Grade::C)]
    #[case(69, Grade::D)]
    #[case(60, Grade::D)]
    #[case(59, Grade::F)]
    #[case(0, Grade::F)]
    fn test_grade_boundaries(#[case] score: u8, #[case] grade: Grade) {
        assert_eq!(grade_for(score), grade);
    }

    #[test]
    fn test_ai_bot_roster() {
        assert_eq!(AI_BOTS.len(), 8);
        assert!(AI_BOTS.contains(&"GPTBot"));
        assert!(AI_BOTS.contains(&"Anthropic-AI"));
    }
}
