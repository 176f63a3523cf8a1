use vigil_core::{OccupancyState, ReportStore};

use crate::topic_segments::{join_topic, split_topic, DEFAULT_TOPIC_DELIMITER};

/// Literal leading the bot-owned status segment unless configured otherwise.
pub const DEFAULT_TOPIC_HEADER: &str = "Current activity";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Enumerates supported `TopicSyncMode` values.
pub enum TopicSyncMode {
    SubmitReport,
    PullFromTopic,
    Reset,
}

impl TopicSyncMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SubmitReport => "submit_report",
            Self::PullFromTopic => "pull_from_topic",
            Self::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of one synchronization pass over the live topic.
pub enum TopicSyncOutcome {
    /// The canonical topic was rebuilt and should be published.
    Updated { topic: String },
    /// A pull was requested but the topic carries no annotation segments.
    NoMarkedEvents,
    /// Submit/pull requested while occupancy is closed; nothing was touched.
    StateGated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Header literal and delimiter the engine composes topics with.
pub struct TopicSyncConfig {
    pub header: String,
    pub delimiter: String,
}

impl Default for TopicSyncConfig {
    fn default() -> Self {
        Self {
            header: DEFAULT_TOPIC_HEADER.to_string(),
            delimiter: DEFAULT_TOPIC_DELIMITER.to_string(),
        }
    }
}

/// Counts the events marked inside submitted report text: one per delimiter
/// occurrence. Events are counted in the free text, never in the topic.
pub fn count_report_events(text: &str, delimiter: &str) -> u64 {
    if delimiter.is_empty() {
        return 0;
    }
    u64::try_from(text.matches(delimiter).count()).unwrap_or(u64::MAX)
}

/// Merges the live topic with the report store for the requested mode and
/// returns the canonical topic to publish.
///
/// Store mutation and topic composition are two separate steps: submit
/// expects the caller to have written the new report (text plus incremented
/// event counter) before the merge, pull writes the extracted annotation
/// into the store itself, and reset clears the store after consuming the
/// pending annotation segments.
///
/// While occupancy is closed the engine only honors `Reset`, which strips
/// the status segment and passes every annotation through untouched without
/// touching the store; the close path owns clearing the report.
pub fn synchronize(
    current_topic: &str,
    store: &mut ReportStore,
    occupancy: OccupancyState,
    mode: TopicSyncMode,
    now_stamp: &str,
    config: &TopicSyncConfig,
) -> TopicSyncOutcome {
    let segments = split_topic(current_topic, &config.delimiter);

    if !occupancy.is_open() {
        return match mode {
            TopicSyncMode::Reset => TopicSyncOutcome::Updated {
                topic: join_topic(annotations(&segments, 1), &config.delimiter),
            },
            TopicSyncMode::SubmitReport | TopicSyncMode::PullFromTopic => {
                TopicSyncOutcome::StateGated
            }
        };
    }

    match mode {
        TopicSyncMode::SubmitReport => {
            let text = store.current_report().text;
            TopicSyncOutcome::Updated {
                topic: compose_topic(config, &text, annotations(&segments, 1)),
            }
        }
        TopicSyncMode::PullFromTopic => {
            if segments.len() < 2 {
                return TopicSyncOutcome::NoMarkedEvents;
            }
            let extracted = segments[1].clone();
            let pending = store.pending_event_count().saturating_sub(1);
            store.set_report(&extracted, now_stamp, pending);
            TopicSyncOutcome::Updated {
                topic: compose_topic(config, &extracted, annotations(&segments, 2)),
            }
        }
        TopicSyncMode::Reset => {
            let consumed = usize::try_from(store.pending_event_count())
                .unwrap_or(usize::MAX)
                .saturating_add(1);
            store.clear_report();
            TopicSyncOutcome::Updated {
                topic: compose_topic(config, "", annotations(&segments, consumed)),
            }
        }
    }
}

fn annotations(segments: &[String], from: usize) -> &[String] {
    segments.get(from..).unwrap_or(&[])
}

/// Composes the canonical topic: header literal, colon, report text (may be
/// empty), then the preserved annotation segments.
fn compose_topic(config: &TopicSyncConfig, report_text: &str, rest: &[String]) -> String {
    if rest.is_empty() {
        format!("{}: {report_text}", config.header)
    } else {
        format!(
            "{}: {report_text}{}{}",
            config.header,
            config.delimiter,
            join_topic(rest, &config.delimiter)
        )
    }
}
