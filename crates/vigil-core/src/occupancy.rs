#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Enumerates supported `OccupancyState` values.
pub enum OccupancyState {
    Closed,
    Open,
}

impl OccupancyState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Edge produced by a presence sample that changed the occupancy state.
pub enum OccupancyTransition {
    Opened,
    Closed,
}

#[derive(Debug)]
/// Two-state occupancy machine driven by periodic marker samples.
///
/// Transitions are edge-triggered: a sample that confirms the current state
/// returns `None`, so side effects fire once per change rather than per tick.
pub struct OccupancyMonitor {
    state: OccupancyState,
}

impl OccupancyMonitor {
    pub fn new() -> Self {
        Self {
            state: OccupancyState::Closed,
        }
    }

    pub fn state(&self) -> OccupancyState {
        self.state
    }

    /// Applies one marker sample. Returns `Some` only when the state changed.
    pub fn sample(&mut self, marker_present: bool) -> Option<OccupancyTransition> {
        match (self.state, marker_present) {
            (OccupancyState::Closed, true) => {
                self.state = OccupancyState::Open;
                Some(OccupancyTransition::Opened)
            }
            (OccupancyState::Open, false) => {
                self.state = OccupancyState::Closed;
                Some(OccupancyTransition::Closed)
            }
            _ => None,
        }
    }
}

impl Default for OccupancyMonitor {
    fn default() -> Self {
        Self::new()
    }
}
