//! Command-text recognition for channel utterances.
//!
//! Patterns are compiled once per runtime. The bot identity pattern is
//! configurable so deployments can rename the bot without code changes.

use anyhow::{Context, Result};
use regex::Regex;

use crate::monitor_contract::MonitorCommand;

/// Pattern recognizing utterances addressed to the bot by name.
pub const DEFAULT_BOT_IDENT_PATTERN: &str = r"[Vv]igil(?:,\s?|:\s?|\s)";

/// Once-compiled recognizers mapping channel utterances to monitor commands.
pub struct CommandMatcher {
    relay_report: Regex,
    report: Regex,
    reset_topic: Regex,
    pull_from_topic: Regex,
    status_query: Regex,
}

impl CommandMatcher {
    /// Compiles the recognizer set for the given bot identity pattern.
    pub fn new(bot_ident_pattern: &str) -> Result<Self> {
        let ident = bot_ident_pattern;
        Ok(Self {
            relay_report: compile(&format!(r"^(?:{ident})[Rr]eporting:\s?(.*)$"))?,
            report: compile(r"^(?:[Rr]eport|[Rr]eporting):\s?(.*)$")?,
            reset_topic: compile(&format!(r"^(?:{ident})?[Cc]le(?:an|ar)\s+topic[!.]*$"))?,
            pull_from_topic: compile(&format!(
                r"^(?:{ident})?[Tt]opic\s+event\s+started[!?.]*$"
            ))?,
            status_query: compile(&format!(r"^(?:{ident})?(?:room\s+)?[Ss]tatus[?!.]*$"))?,
        })
    }

    /// Maps one utterance to a command, or `None` when nothing matches.
    pub fn parse(&self, text: &str) -> Option<MonitorCommand> {
        let text = text.trim();
        if let Some(captures) = self.relay_report.captures(text) {
            return Some(MonitorCommand::SubmitRelayReport {
                text: capture_payload(&captures),
            });
        }
        if let Some(captures) = self.report.captures(text) {
            return Some(MonitorCommand::SubmitReport {
                text: capture_payload(&captures),
            });
        }
        if self.reset_topic.is_match(text) {
            return Some(MonitorCommand::ResetTopic);
        }
        if self.pull_from_topic.is_match(text) {
            return Some(MonitorCommand::PullFromTopic);
        }
        if self.status_query.is_match(text) {
            return Some(MonitorCommand::StatusQuery);
        }
        None
    }
}

fn capture_payload(captures: &regex::Captures<'_>) -> String {
    captures
        .get(1)
        .map(|payload| payload.as_str().trim().to_string())
        .unwrap_or_default()
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("failed to compile command pattern '{pattern}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> CommandMatcher {
        CommandMatcher::new(DEFAULT_BOT_IDENT_PATTERN).expect("compile default matcher")
    }

    #[test]
    fn unit_primary_report_captures_payload() {
        assert_eq!(
            matcher().parse("Report: soldering workshop"),
            Some(MonitorCommand::SubmitReport {
                text: "soldering workshop".to_string()
            })
        );
        assert_eq!(
            matcher().parse("reporting: late session"),
            Some(MonitorCommand::SubmitReport {
                text: "late session".to_string()
            })
        );
    }

    #[test]
    fn unit_primary_report_with_empty_payload_yields_empty_text() {
        assert_eq!(
            matcher().parse("Report:"),
            Some(MonitorCommand::SubmitReport {
                text: String::new()
            })
        );
    }

    #[test]
    fn unit_relay_report_extracts_text_after_marker_phrase() {
        assert_eq!(
            matcher().parse("Vigil, Reporting: movie night"),
            Some(MonitorCommand::SubmitRelayReport {
                text: "movie night".to_string()
            })
        );
    }

    #[test]
    fn unit_reset_pull_and_status_match_expected_spellings() {
        let matcher = matcher();
        assert_eq!(
            matcher.parse("Clean topic!"),
            Some(MonitorCommand::ResetTopic)
        );
        assert_eq!(
            matcher.parse("vigil: clear topic"),
            Some(MonitorCommand::ResetTopic)
        );
        assert_eq!(
            matcher.parse("Topic event started!"),
            Some(MonitorCommand::PullFromTopic)
        );
        assert_eq!(
            matcher.parse("room status?"),
            Some(MonitorCommand::StatusQuery)
        );
        assert_eq!(matcher.parse("Status"), Some(MonitorCommand::StatusQuery));
    }

    #[test]
    fn regression_unrelated_chatter_matches_nothing() {
        let matcher = matcher();
        assert_eq!(matcher.parse("statistics look great"), None);
        assert_eq!(matcher.parse("my report is due tomorrow"), None);
        assert_eq!(matcher.parse(""), None);
    }

    #[test]
    fn regression_invalid_ident_pattern_is_rejected() {
        assert!(CommandMatcher::new("(unclosed").is_err());
    }
}
