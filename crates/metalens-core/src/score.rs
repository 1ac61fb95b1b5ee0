//! Weighted 0-100 score and letter grade derived from diagnostics

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Category, Diagnostics};
use crate::rules::{MAX_CATEGORY_SCORE, grade_for, score_of, weight_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreStatus {
    Pass,
    Warning,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: Category,
    pub name: &'static str,
    pub score: u8,
    pub max_score: u8,
    pub status: ScoreStatus,
    pub weight: u8,
    /// The diagnostic message when the category is not passing
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaScore {
    pub overall: u8,
    pub grade: Grade,
    pub total_issues: usize,
    pub categories: Vec<CategoryScore>,
}

/// Map each category's status to points and combine them by weight
pub fn compute_score(diagnostics: &Diagnostics) -> MetaScore {
    let categories: Vec<CategoryScore> = diagnostics
        .categories()
        .map(|(category, result)| {
            let (score, status) = score_of(result.status);
            let issues = if status == ScoreStatus::Pass {
                Vec::new()
            } else {
                vec![result.message.clone()]
            };

            CategoryScore {
                category,
                name: category.label(),
                score,
                max_score: MAX_CATEGORY_SCORE,
                status,
                weight: weight_of(category),
                issues,
            }
        })
        .collect();

    let weighted: u32 = categories
        .iter()
        .map(|c| u32::from(c.score) * u32::from(c.weight))
        .sum();
    // Weights sum to 100, so this is a rounded weighted mean in 0..=100
    let overall = ((weighted + 50) / 100).min(u32::from(MAX_CATEGORY_SCORE)) as u8;

    let total_issues = categories
        .iter()
        .filter(|c| c.status != ScoreStatus::Pass)
        .count();

    MetaScore {
        overall,
        grade: grade_for(overall),
        total_issues,
        categories,
    }
}
