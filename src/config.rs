//! Engine configuration.

use std::time::Duration;

/// Search depth used when the caller does not pick one
pub const DEFAULT_DEPTH: u32 = 4;

/// Default wall-clock budget per move
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Wall-clock budget for one `select_move` call
    pub time_limit: Duration,
    /// Consult the opening book before searching
    pub use_opening_book: bool,
    /// Order moves before searching them
    pub move_ordering: bool,
    /// Maximum transposition table entries (None = unbounded)
    pub tt_capacity: Option<usize>,
    /// Seed for the book's random choice (None = seeded from the OS)
    pub book_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            time_limit: DEFAULT_TIME_LIMIT,
            use_opening_book: true,
            move_ordering: true,
            tt_capacity: None,
            book_seed: None,
        }
    }
}

impl EngineConfig {
    /// Create a time-limited config
    #[must_use]
    pub fn time(time_limit: Duration) -> Self {
        EngineConfig {
            time_limit,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_opening_book(mut self, enabled: bool) -> Self {
        self.use_opening_book = enabled;
        self
    }

    #[must_use]
    pub fn with_move_ordering(mut self, enabled: bool) -> Self {
        self.move_ordering = enabled;
        self
    }

    /// Bound the transposition table
    #[must_use]
    pub fn with_tt_capacity(mut self, capacity: usize) -> Self {
        self.tt_capacity = Some(capacity);
        self
    }

    /// Make book choices reproducible
    #[must_use]
    pub fn with_book_seed(mut self, seed: u64) -> Self {
        self.book_seed = Some(seed);
        self
    }
}
