use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Alert phrases broadcast when the room opens.
pub const DEFAULT_ALERT_PHRASES: [&str; 2] = ["Activity detected", "Activity started"];

/// Replies to a status query when the room is open but nothing was reported.
pub const DEFAULT_UNKNOWN_ACTIVITY_PHRASES: [&str; 2] =
    ["Activity started", "Something is happening"];

/// Trait contract for `PhrasePicker` behavior.
///
/// Injected so tests can pin the selection; the runtime never reaches for a
/// global random source directly.
pub trait PhrasePicker: Send + Sync {
    /// Picks one phrase from the set. Returns `None` on an empty set.
    fn pick<'a>(&mut self, phrases: &'a [String]) -> Option<&'a str>;
}

/// Seedable picker backed by `StdRng`; seeded construction keeps selection
/// deterministic for tests and reproducible deployments.
pub struct RandomPhrasePicker {
    rng: StdRng,
}

impl RandomPhrasePicker {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PhrasePicker for RandomPhrasePicker {
    fn pick<'a>(&mut self, phrases: &'a [String]) -> Option<&'a str> {
        phrases.choose(&mut self.rng).map(String::as_str)
    }
}

/// Returns the default alert phrase set as owned strings.
pub fn default_alert_phrases() -> Vec<String> {
    DEFAULT_ALERT_PHRASES.iter().map(|s| s.to_string()).collect()
}

/// Returns the default unknown-activity phrase set as owned strings.
pub fn default_unknown_activity_phrases() -> Vec<String> {
    DEFAULT_UNKNOWN_ACTIVITY_PHRASES
        .iter()
        .map(|s| s.to_string())
        .collect()
}
