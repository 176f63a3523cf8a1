#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Snapshot of the currently filed activity report.
pub struct ActivityReport {
    pub text: String,
    pub reported_at: String,
    pub pending_event_count: u64,
}

#[derive(Debug, Default)]
/// Owner of the report triple; all mutation goes through these accessors.
///
/// The triple is replaced in a single assignment, so a snapshot read can
/// never observe a partially written report.
pub struct ReportStore {
    current: ActivityReport,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole report triple at once.
    pub fn set_report(&mut self, text: &str, reported_at: &str, pending_event_count: u64) {
        self.current = ActivityReport {
            text: text.to_string(),
            reported_at: reported_at.to_string(),
            pending_event_count,
        };
    }

    pub fn clear_report(&mut self) {
        self.current = ActivityReport::default();
    }

    /// True when a report has been filed (non-empty text).
    pub fn is_reported(&self) -> bool {
        !self.current.text.is_empty()
    }

    /// Cloned snapshot of the current report.
    pub fn current_report(&self) -> ActivityReport {
        self.current.clone()
    }

    pub fn pending_event_count(&self) -> u64 {
        self.current.pending_event_count
    }
}
