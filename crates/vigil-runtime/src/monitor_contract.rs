//! Contract between the monitor core and its chat host.
//!
//! Defines the inbound trigger events the runtime consumes and the outbound
//! surface it needs from a transport. The wire protocol itself is out of
//! scope; hosts adapt their network client to this trait.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Origin of a recognized command: the channel it arrived on and its sender.
pub struct CommandOrigin {
    pub channel: String,
    pub sender: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Enumerates supported `MonitorCommand` values.
pub enum MonitorCommand {
    /// Primary-channel report submission with its free-text payload.
    SubmitReport { text: String },
    /// Relay-flavor submission: payload extracted after the marker phrase.
    SubmitRelayReport { text: String },
    /// Adopt the first annotation segment of the topic as the report.
    PullFromTopic,
    /// Clear the bot's changes from the topic and drop the current report.
    ResetTopic,
    /// Ask what is currently happening.
    StatusQuery,
}

impl MonitorCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubmitReport { .. } => "submit_report",
            Self::SubmitRelayReport { .. } => "submit_relay_report",
            Self::PullFromTopic => "pull_from_topic",
            Self::ResetTopic => "reset_topic",
            Self::StatusQuery => "status_query",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Enumerates supported `MonitorInboundEvent` values.
pub enum MonitorInboundEvent {
    /// A recognized command utterance.
    Command {
        origin: CommandOrigin,
        command: MonitorCommand,
    },
    /// The channel topic changed. `bot_initiated` distinguishes the bot's
    /// own republication from an external hand edit.
    TopicChanged {
        channel: String,
        topic: String,
        bot_initiated: bool,
    },
    /// The doorbell signal fired.
    DoorbellSignal,
}

#[derive(Debug, Error)]
/// Failure surfaced by a transport collaborator.
///
/// Never fatal to the runtime: callers log the failure and retry at the next
/// natural sync point instead of queueing.
pub enum TransportError {
    #[error("failed to send to {target}: {reason}")]
    Send { target: String, reason: String },
    #[error("failed to publish topic on {channel}: {reason}")]
    TopicPublish { channel: String, reason: String },
    #[error("failed to read topic on {channel}: {reason}")]
    TopicFetch { channel: String, reason: String },
}

#[async_trait]
/// Trait contract for `ChatTransport` behavior.
pub trait ChatTransport: Send + Sync {
    /// Delivers a message to every channel the bot has joined.
    async fn broadcast(&self, message: &str) -> Result<(), TransportError>;

    /// Sends a message to one channel.
    async fn say(&self, channel: &str, message: &str) -> Result<(), TransportError>;

    /// Replies to the sender of a command.
    async fn reply(&self, origin: &CommandOrigin, message: &str) -> Result<(), TransportError>;

    /// Replaces the topic of `channel`.
    async fn publish_topic(&self, channel: &str, topic: &str) -> Result<(), TransportError>;

    /// Returns the current raw topic of `channel`.
    async fn channel_topic(&self, channel: &str) -> Result<String, TransportError>;
}
