//! Robots.txt parser and AI crawler block detection
//!
//! Only a bare `Disallow: /` counts as a block. Partial-path rules are
//! parsed and kept on the group but do not affect the check.

use serde::Serialize;

use super::{AiReadinessCheck, CheckStatus};
use crate::rules::AI_BOTS;

pub const CHECK_ID: &str = "robots-txt";
pub const CHECK_LABEL: &str = "robots.txt AI Access";

/// Rules shared by a run of consecutive `User-agent` lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentGroup {
    /// Agent names as written in the file
    pub user_agents: Vec<String>,
    pub disallow: Vec<String>,
    pub allow: Vec<String>,
}

impl AgentGroup {
    /// Matches the agent by name (case-insensitive) or via `*`
    pub fn applies_to(&self, agent: &str) -> bool {
        self.user_agents
            .iter()
            .any(|ua| ua == "*" || ua.eq_ignore_ascii_case(agent))
    }

    pub fn blocks_all(&self) -> bool {
        self.disallow.iter().any(|path| path == "/")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RobotsTxt {
    pub groups: Vec<AgentGroup>,
}

impl RobotsTxt {
    /// Roster bots hit by a root `Disallow`, in roster order
    pub fn blocked_ai_bots(&self) -> Vec<&'static str> {
        AI_BOTS
            .into_iter()
            .filter(|bot| {
                self.groups
                    .iter()
                    .any(|group| group.blocks_all() && group.applies_to(bot))
            })
            .collect()
    }
}

/// Parse robots.txt content, skipping lines that are not `directive: value`
pub fn parse_robots_txt(content: &str) -> RobotsTxt {
    let mut groups: Vec<AgentGroup> = Vec::new();
    // True while the last directive seen was a User-agent line
    let mut collecting_agents = false;

    for line in content.lines() {
        let line = match line.split_once('#') {
            Some((before, _)) => before,
            None => line,
        }
        .trim();

        if line.is_empty() {
            continue;
        }

        let Some((directive, value)) = line.split_once(':') else {
            log::trace!("Skipping malformed robots.txt line: {line}");
            continue;
        };
        let directive = directive.trim().to_ascii_lowercase();
        let value = value.trim();

        match directive.as_str() {
            "user-agent" => {
                if !collecting_agents || groups.is_empty() {
                    groups.push(AgentGroup::default());
                }
                if let Some(group) = groups.last_mut() {
                    group.user_agents.push(value.to_string());
                }
                collecting_agents = true;
            }
            "disallow" | "allow" => {
                collecting_agents = false;
                // Rules before any User-agent line belong to no group
                let Some(group) = groups.last_mut() else {
                    continue;
                };
                if value.is_empty() {
                    continue;
                }
                if directive == "disallow" {
                    group.disallow.push(value.to_string());
                } else {
                    group.allow.push(value.to_string());
                }
            }
            _ => collecting_agents = false,
        }
    }

    RobotsTxt { groups }
}

/// `None` means the file could not be fetched, which is not the page's fault
pub fn check_robots_txt(content: Option<&str>) -> AiReadinessCheck {
    let Some(content) = content else {
        return AiReadinessCheck::new(
            CHECK_ID,
            CHECK_LABEL,
            CheckStatus::Na,
            "robots.txt could not be retrieved",
        );
    };

    let blocked = parse_robots_txt(content).blocked_ai_bots();
    let total = AI_BOTS.len();

    if blocked.is_empty() {
        AiReadinessCheck::new(
            CHECK_ID,
            CHECK_LABEL,
            CheckStatus::Pass,
            format!("robots.txt allows all {total} known AI crawlers"),
        )
    } else if blocked.len() == total {
        AiReadinessCheck::new(
            CHECK_ID,
            CHECK_LABEL,
            CheckStatus::Fail,
            format!("robots.txt blocks all {total} known AI crawlers"),
        )
        .with_suggestion("Allow at least the AI crawlers whose answer engines you want to appear in")
    } else {
        AiReadinessCheck::new(
            CHECK_ID,
            CHECK_LABEL,
            CheckStatus::Warn,
            format!(
                "robots.txt blocks {} of {total} AI crawlers: {}",
                blocked.len(),
                blocked.join(", ")
            ),
        )
        .with_suggestion("Check that blocking these crawlers is intentional")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_bot_block() {
        let check = check_robots_txt(Some("User-agent: GPTBot\nDisallow: /"));
        assert_eq!(check.status, CheckStatus::Warn);
        assert_eq!(check.message, "robots.txt blocks 1 of 8 AI crawlers: GPTBot");
    }

    #[test]
    fn test_missing_file_is_na() {
        assert_eq!(check_robots_txt(None).status, CheckStatus::Na);
    }

    #[test]
    fn test_empty_file_passes() {
        assert_eq!(check_robots_txt(Some("")).status, CheckStatus::Pass);
    }

    #[test]
    fn test_wildcard_block_fails() {
        let check = check_robots_txt(Some("User-agent: *\nDisallow: /\n"));
        assert_eq!(check.status, CheckStatus::Fail);
    }

    #[test]
    fn test_all_bots_named_individually_fails() {
        let content: String = AI_BOTS
            .iter()
            .map(|bot| format!("User-agent: {bot}\nDisallow: /\n\n"))
            .collect();
        assert_eq!(check_robots_txt(Some(content.as_str())).status, CheckStatus::Fail);
    }

    #[test]
    fn test_consecutive_agents_share_a_group() {
        let content = "\
User-agent: GPTBot
User-agent: claudebot
Disallow: /

User-agent: CCBot
Disallow: /private/
";
        let robots = parse_robots_txt(content);
        assert_eq!(robots.groups.len(), 2);
        assert_eq!(robots.groups[0].user_agents, vec!["GPTBot", "claudebot"]);
        assert_eq!(robots.blocked_ai_bots(), vec!["GPTBot", "ClaudeBot"]);
    }

    #[test]
    fn test_partial_disallow_is_not_a_block() {
        let content = "User-agent: *\nDisallow: /admin/\nAllow: /admin/public/\n";
        let robots = parse_robots_txt(content);
        assert_eq!(robots.groups[0].disallow, vec!["/admin/"]);
        assert_eq!(robots.groups[0].allow, vec!["/admin/public/"]);
        assert!(robots.blocked_ai_bots().is_empty());
    }

    #[test]
    fn test_directives_are_case_insensitive() {
        let robots = parse_robots_txt("USER-AGENT: anthropic-ai\nDISALLOW: /");
        assert_eq!(robots.blocked_ai_bots(), vec!["Anthropic-AI"]);
    }

    #[test]
    fn test_comments_and_junk_are_ignored() {
        let content = "\
# block OpenAI
User-agent: GPTBot # trailing comment
this line has no colon
Disallow: / # everything
Crawl-delay: 10
";
        let robots = parse_robots_txt(content);
        assert_eq!(robots.groups.len(), 1);
        assert_eq!(robots.groups[0].user_agents, vec!["GPTBot"]);
        assert_eq!(robots.blocked_ai_bots(), vec!["GPTBot"]);
    }

    #[test]
    fn test_empty_disallow_allows_everything() {
        let robots = parse_robots_txt("User-agent: *\nDisallow:\n");
        assert!(robots.groups[0].disallow.is_empty());
        assert!(robots.blocked_ai_bots().is_empty());
    }

    #[test]
    fn test_rules_before_any_agent_are_dropped() {
        let robots = parse_robots_txt("Disallow: /\nUser-agent: GPTBot\nAllow: /\n");
        assert_eq!(robots.groups.len(), 1);
        assert!(robots.blocked_ai_bots().is_empty());
    }

    #[test]
    fn test_agent_after_other_directive_starts_new_group() {
        let content = "User-agent: GPTBot\nCrawl-delay: 5\nUser-agent: CCBot\nDisallow: /\n";
        let robots = parse_robots_txt(content);
        assert_eq!(robots.groups.len(), 2);
        assert_eq!(robots.blocked_ai_bots(), vec!["CCBot"]);
    }
}
