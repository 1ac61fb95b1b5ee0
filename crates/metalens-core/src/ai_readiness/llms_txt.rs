//! llms.txt presence check

use super::{AiReadinessCheck, CheckStatus};

pub const CHECK_ID: &str = "llms-txt";
pub const CHECK_LABEL: &str = "llms.txt";

const SUGGESTION: &str =
    "Publish /llms.txt with a short Markdown summary of the site and links to its key pages";

pub fn check_llms_txt(content: Option<&str>) -> AiReadinessCheck {
    match content {
        None => AiReadinessCheck::new(CHECK_ID, CHECK_LABEL, CheckStatus::Fail, "llms.txt not found")
            .with_suggestion(SUGGESTION),
        Some(text) if text.trim().is_empty() => {
            AiReadinessCheck::new(CHECK_ID, CHECK_LABEL, CheckStatus::Fail, "llms.txt is empty")
                .with_suggestion(SUGGESTION)
        }
        Some(text) => AiReadinessCheck::new(
            CHECK_ID,
            CHECK_LABEL,
            CheckStatus::Pass,
            format!("llms.txt found ({} lines)", text.trim().lines().count()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_empty_differ() {
        let missing = check_llms_txt(None);
        let empty = check_llms_txt(Some(""));
        let blank = check_llms_txt(Some("  \n\t\n"));

        assert_eq!(missing.status, CheckStatus::Fail);
        assert_eq!(empty.status, CheckStatus::Fail);
        assert_eq!(blank.status, CheckStatus::Fail);
        assert!(missing.message.contains("not found"));
        assert!(empty.message.contains("empty"));
        assert_eq!(empty.message, blank.message);
    }

    #[test]
    fn test_content_passes() {
        let check = check_llms_txt(Some("# Example\n\n> A site about examples\n"));
        assert_eq!(check.status, CheckStatus::Pass);
        assert_eq!(check.message, "llms.txt found (3 lines)");
        assert!(check.suggestion.is_none());
    }
}
