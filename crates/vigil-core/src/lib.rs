//! Foundational state primitives and low-level utilities shared across Vigil crates.
//!
//! Provides the activity report store, the occupancy state machine, atomic
//! file-write helpers, and the timestamp formats used by transition logs and
//! report acknowledgements.

pub mod atomic_io;
pub mod occupancy;
pub mod report_store;
pub mod time_utils;

pub use atomic_io::write_text_atomic;
pub use occupancy::{OccupancyMonitor, OccupancyState, OccupancyTransition};
pub use report_store::{ActivityReport, ReportStore};
pub use time_utils::{current_unix_timestamp_ms, report_clock_stamp, transition_log_stamp};
