//! Monitor runtime for the Vigil occupancy bot.
//!
//! Hosts the transport contract, the presence/phrase/sound collaborator
//! seams, command recognition, the diagnostics status snapshot, and the
//! single-actor event loop that merges occupancy transitions and chat
//! commands into the channel topic.

pub mod commands;
pub mod dry_run_transport;
pub mod monitor_contract;
pub mod monitor_runtime;
pub mod phrase;
pub mod presence;
pub mod sound;
pub mod status_snapshot;

pub use commands::{CommandMatcher, DEFAULT_BOT_IDENT_PATTERN};
pub use dry_run_transport::DryRunTransport;
pub use monitor_contract::{
    ChatTransport, CommandOrigin, MonitorCommand, MonitorInboundEvent, TransportError,
};
pub use monitor_runtime::{
    start_monitor_runtime, MonitorCycleReport, MonitorRuntime, MonitorRuntimeConfig,
    MonitorRuntimeHandle,
};
pub use phrase::{
    default_alert_phrases, default_unknown_activity_phrases, PhrasePicker, RandomPhrasePicker,
    DEFAULT_ALERT_PHRASES, DEFAULT_UNKNOWN_ACTIVITY_PHRASES,
};
pub use presence::{FileMarkerProbe, PresenceProbe};
pub use sound::{AplaySoundPlayer, NoopSoundPlayer, SoundPlayer};
pub use status_snapshot::{
    inspect_status_snapshot, persist_status_snapshot, MonitorStatusSnapshot,
    MONITOR_STATUS_SCHEMA_VERSION,
};
