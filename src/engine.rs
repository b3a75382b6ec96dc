//! Engine facade: opening book, transposition table and iterative deepening
//! behind one `select_move` call.

use std::time::Duration;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::book::OpeningBook;
use crate::config::EngineConfig;
use crate::eval::Evaluator;
use crate::rules::Rules;
use crate::search::{IterationCallback, SearchContext, SearchStats};
use crate::timer::{SearchBudget, StopFlag};
use crate::tt::TranspositionTable;

/// A chess engine instance. Independent engines share no state.
pub struct Engine {
    config: EngineConfig,
    evaluator: Evaluator,
    tt: TranspositionTable,
    book: OpeningBook,
    rng: StdRng,
    stats: SearchStats,
    stop: StopFlag,
    info_callback: Option<IterationCallback>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// Engine with the standard opening book.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_book(config, OpeningBook::standard())
    }

    #[must_use]
    pub fn with_book(config: EngineConfig, book: OpeningBook) -> Self {
        let tt = match config.tt_capacity {
            Some(capacity) => TranspositionTable::with_capacity(capacity),
            None => TranspositionTable::new(),
        };
        let rng = match config.book_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Engine {
            config,
            evaluator: Evaluator::new(),
            tt,
            book,
            rng,
            stats: SearchStats::default(),
            stop: StopFlag::new(),
            info_callback: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_time_limit(&mut self, time_limit: Duration) {
        self.config.time_limit = time_limit;
    }

    /// Called after every completed depth of subsequent searches.
    pub fn set_info_callback(&mut self, callback: Option<IterationCallback>) {
        self.info_callback = callback;
    }

    /// Handle for stopping a running search from another thread.
    pub fn stop_flag(&self) -> StopFlag {
        self.stop.clone()
    }

    /// Statistics of the most recent `select_move`.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn clear_transposition_table(&mut self) {
        self.tt.clear();
        trace!("transposition table cleared");
    }

    /// Static evaluation in pawns, positive when White is better.
    pub fn evaluate<R: Rules + ?Sized>(&self, rules: &R) -> f64 {
        self.evaluator.evaluate(rules)
    }

    /// Pick a move for the side to move.
    ///
    /// Returns `None` for a finished game, or when the time budget ran out
    /// before depth 1 completed. The position is unchanged on return.
    pub fn select_move<R: Rules>(&mut self, rules: &mut R, max_depth: u32) -> Option<R::Move> {
        self.stats.reset_search();

        if rules.is_game_over() {
            debug!("no move: game is over");
            return None;
        }

        if self.config.use_opening_book {
            if let Some(mv) = self.book_move(rules) {
                info!("book move {}", rules.move_notation(&mv));
                self.stats.book_move = true;
                return Some(mv);
            }
        }

        self.clear_transposition_table();
        self.stop.clear();

        let budget = SearchBudget::with_stop(self.config.time_limit, self.stop.clone());
        let best = SearchContext::new(&self.evaluator, &mut self.tt, &budget, &mut self.stats)
            .with_move_ordering(self.config.move_ordering)
            .with_info_callback(self.info_callback.clone())
            .iterative_deepening(rules, max_depth);

        debug!(
            "search finished: depth {} score {} nodes {} tt entries {} in {} ms",
            self.stats.completed_depth,
            self.stats.score,
            self.stats.nodes,
            self.stats.tt_entries,
            self.stats.elapsed.as_millis()
        );
        best
    }

    /// A random legal book move for this position. Book entries that are
    /// not legal here are skipped.
    fn book_move<R: Rules>(&mut self, rules: &R) -> Option<R::Move> {
        let candidates = self.book.lookup(&rules.position_key());
        if candidates.is_empty() {
            return None;
        }

        let legal = rules.legal_moves();
        let playable: Vec<&R::Move> = candidates
            .iter()
            .filter_map(|notation| legal.iter().find(|mv| rules.move_notation(mv) == *notation))
            .collect();

        playable.choose(&mut self.rng).map(|mv| (*mv).clone())
    }
}
