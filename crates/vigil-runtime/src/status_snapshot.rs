//! Diagnostics snapshot persisted for operators.
//!
//! Write-only: the runtime never reads a snapshot back at startup, so a
//! process restart still resets all monitor state.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use vigil_core::{current_unix_timestamp_ms, write_text_atomic, ActivityReport, OccupancyState};

pub const MONITOR_STATUS_SCHEMA_VERSION: u32 = 1;

fn monitor_status_schema_version() -> u32 {
    MONITOR_STATUS_SCHEMA_VERSION
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Public struct `MonitorStatusSnapshot` used across Vigil components.
pub struct MonitorStatusSnapshot {
    #[serde(default = "monitor_status_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub updated_unix_ms: u64,
    #[serde(default)]
    pub occupancy: String,
    #[serde(default)]
    pub report_text: String,
    #[serde(default)]
    pub reported_at: String,
    #[serde(default)]
    pub pending_event_count: u64,
    #[serde(default)]
    pub tick_count: u64,
    #[serde(default)]
    pub last_transition_unix_ms: u64,
}

impl MonitorStatusSnapshot {
    pub fn capture(
        occupancy: OccupancyState,
        report: &ActivityReport,
        tick_count: u64,
        last_transition_unix_ms: u64,
    ) -> Self {
        Self {
            schema_version: MONITOR_STATUS_SCHEMA_VERSION,
            updated_unix_ms: current_unix_timestamp_ms(),
            occupancy: occupancy.as_str().to_string(),
            report_text: report.text.clone(),
            reported_at: report.reported_at.clone(),
            pending_event_count: report.pending_event_count,
            tick_count,
            last_transition_unix_ms,
        }
    }
}

/// Persists the snapshot as pretty JSON through an atomic rename.
pub fn persist_status_snapshot(state_path: &Path, snapshot: &MonitorStatusSnapshot) -> Result<()> {
    let payload = serde_json::to_string_pretty(snapshot)
        .context("failed to serialize monitor status snapshot")?;
    write_text_atomic(state_path, &payload)
}

/// Reads a previously persisted snapshot for inspection.
pub fn inspect_status_snapshot(state_path: &Path) -> Result<MonitorStatusSnapshot> {
    let raw = std::fs::read_to_string(state_path)
        .with_context(|| format!("failed to read {}", state_path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", state_path.display()))
}
