use chrono::Local;

/// Returns the current Unix timestamp in milliseconds.
pub fn current_unix_timestamp_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        .try_into()
        .unwrap_or(u64::MAX)
}

/// Clock stamp stored alongside a report, e.g. `[18:42]`.
pub fn report_clock_stamp() -> String {
    Local::now().format("[%H:%M]").to_string()
}

/// Stamp prefixed to transition console logs, e.g. `[05 Aug, 18:42]`.
pub fn transition_log_stamp() -> String {
    Local::now().format("[%d %b, %H:%M]").to_string()
}
