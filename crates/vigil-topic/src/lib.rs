//! Topic segmentation and the merge protocol for the bot-owned status segment.
//!
//! The channel topic is a shared mutable string segmented by a delimiter.
//! Segment 0 belongs to the bot; later segments are member-authored
//! annotations. This crate rebuilds the canonical topic for report
//! submission, topic-driven report extraction, and resets, preserving the
//! trailing segments the bot does not own.

pub mod topic_segments;
pub mod topic_sync;

pub use topic_segments::{join_topic, split_topic, DEFAULT_TOPIC_DELIMITER};
pub use topic_sync::{
    count_report_events, synchronize, TopicSyncConfig, TopicSyncMode, TopicSyncOutcome,
    DEFAULT_TOPIC_HEADER,
};
