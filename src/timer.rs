//! Wall-clock budget for a single top-level search.
//!
//! One `SearchBudget` is created per `select_move` call and shared by
//! reference across the whole recursion. A `StopFlag` lets another thread cut
//! the budget short.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::Aborted;

/// Stop request shared between a search and whoever may cancel it.
/// Clones observe the same request.
#[derive(Clone, Debug, Default)]
pub struct StopFlag {
    requested: Arc<AtomicBool>,
}

impl StopFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the search to unwind at its next budget check.
    pub fn request(&self) {
        self.requested.store(true, Ordering::Relaxed);
    }

    /// Withdraw a pending request before a new search starts.
    pub fn clear(&self) {
        self.requested.store(false, Ordering::Relaxed);
    }

    #[inline]
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Relaxed)
    }
}

/// Deadline relative to the start of a search, plus an external stop flag.
#[derive(Clone, Debug)]
pub struct SearchBudget {
    start: Instant,
    limit: Duration,
    stop: StopFlag,
}

impl SearchBudget {
    /// Start a budget of `limit` from now.
    #[must_use]
    pub fn new(limit: Duration) -> Self {
        Self::with_stop(limit, StopFlag::new())
    }

    /// Start a budget of `limit` from now that also honours `stop`.
    #[must_use]
    pub fn with_stop(limit: Duration, stop: StopFlag) -> Self {
        SearchBudget {
            start: Instant::now(),
            limit,
            stop,
        }
    }

    /// A budget that never expires on its own.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::new(Duration::MAX)
    }

    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[inline]
    #[must_use]
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Whether the deadline has passed or a stop was requested.
    #[inline]
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.stop.is_requested() || self.elapsed() > self.limit
    }

    /// Per-node check used by the search core.
    #[inline]
    pub fn check(&self) -> Result<(), Aborted> {
        if self.is_exhausted() {
            Err(Aborted)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_budget_expires() {
        let budget = SearchBudget::new(Duration::from_millis(20));
        assert!(budget.check().is_ok());

        thread::sleep(Duration::from_millis(40));
        assert_eq!(budget.check(), Err(Aborted));
    }

    #[test]
    fn test_zero_budget_is_exhausted() {
        let budget = SearchBudget::new(Duration::ZERO);
        thread::sleep(Duration::from_millis(1));
        assert!(budget.is_exhausted());
    }

    #[test]
    fn test_stop_request_aborts_unlimited_budget() {
        let stop = StopFlag::new();
        let budget = SearchBudget::with_stop(Duration::MAX, stop.clone());
        assert!(budget.check().is_ok());

        stop.request();
        assert_eq!(budget.check(), Err(Aborted));

        stop.clear();
        assert!(budget.check().is_ok());
    }

    #[test]
    fn test_stop_request_from_another_thread() {
        let stop = StopFlag::new();
        let budget = SearchBudget::with_stop(Duration::MAX, stop.clone());

        thread::spawn(move || stop.request())
            .join()
            .expect("stopper thread");
        assert!(budget.is_exhausted());
    }
}
