//! Search module implementing alpha-beta with iterative deepening.
//!
//! Features:
//! - Iterative deepening under a wall-clock budget
//! - Fail-soft alpha-beta over the `Rules` collaborator
//! - Move ordering (MVV-LVA, checks, castling, promotions, center)
//! - Transposition table cutoffs with bound types
//!
//! Scores are centipawns from White's point of view; the side being
//! searched is carried by the `maximizing` flag.

mod alphabeta;
mod iterative;
mod move_order;

use std::sync::Arc;
use std::time::Duration;

use crate::eval::MATE_SCORE;

pub use alphabeta::SearchContext;
pub use move_order::{move_priority, order_moves};

/// Deepest ply the search will ever reach.
pub const MAX_PLY: i32 = 128;

/// Scores with absolute value >= this are checkmate scores
pub const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY;

/// Larger than any reachable score.
pub const INFINITY: i32 = 32_000;

/// Where the deepening loop stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeepeningState {
    #[default]
    Idle,
    Searching(u32),
    Completed(u32),
    /// The budget ran out inside a depth; that depth's result was discarded.
    Aborted,
}

/// Statistics tracked during search
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    pub nodes: u64,
    pub tt_hits: u64,
    pub tt_entries: usize,
    /// Deepest fully searched depth; 0 when none completed.
    pub completed_depth: u32,
    /// Root score of `completed_depth`.
    pub score: i32,
    pub elapsed: Duration,
    pub state: DeepeningState,
    pub book_move: bool,
}

impl SearchStats {
    pub fn reset_search(&mut self) {
        *self = SearchStats::default();
    }
}

/// Information about a completed search iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationInfo {
    pub depth: u32,
    pub score: i32,
    pub nodes: u64,
    pub time_ms: u64,
    /// Coordinate notation of the iteration's best move.
    pub best_move: String,
}

impl IterationInfo {
    /// Moves until mate, positive when White mates.
    #[must_use]
    pub fn mate_in(&self) -> Option<i32> {
        mate_in(self.score)
    }
}

/// Callback invoked after each completed iteration.
pub type IterationCallback = Arc<dyn Fn(&IterationInfo) + Send + Sync>;

/// Best root move and its score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootResult<M> {
    pub best_move: Option<M>,
    pub score: i32,
}

/// Full moves to mate for a mate score, signed from White's side.
#[must_use]
pub fn mate_in(score: i32) -> Option<i32> {
    if score >= MATE_THRESHOLD {
        Some((MATE_SCORE - score + 1) / 2)
    } else if score <= -MATE_THRESHOLD {
        Some(-(MATE_SCORE + score + 1) / 2)
    } else {
        None
    }
}

/// Static score at `ply`; mates found closer to the root score higher.
pub(crate) fn leaf_score(eval: i32, ply: u32) -> i32 {
    if eval >= MATE_SCORE {
        eval - ply as i32
    } else if eval <= -MATE_SCORE {
        eval + ply as i32
    } else {
        eval
    }
}

/// Convert a root-relative mate score to node-relative for storage.
pub(crate) fn score_to_tt(score: i32, ply: u32) -> i32 {
    if score >= MATE_THRESHOLD {
        score + ply as i32
    } else if score <= -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

/// Convert a stored node-relative mate score back to root-relative.
pub(crate) fn score_from_tt(score: i32, ply: u32) -> i32 {
    if score >= MATE_THRESHOLD {
        score - ply as i32
    } else if score <= -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}
