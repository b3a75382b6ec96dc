use log::debug;

use super::{DeepeningState, IterationInfo, SearchContext, MATE_THRESHOLD};
use crate::rules::Rules;

impl SearchContext<'_> {
    /// Iterative deepening under the context's budget.
    ///
    /// Searches depth 1, 2, ... `max_depth`. Only a depth that completes
    /// replaces the best move; a depth cut short by the budget is thrown
    /// away. Returns `None` when not even depth 1 finished.
    pub fn iterative_deepening<R: Rules>(
        &mut self,
        rules: &mut R,
        max_depth: u32,
    ) -> Option<R::Move> {
        let mut best_move: Option<R::Move> = None;

        for depth in 1..=max_depth {
            if self.budget.is_exhausted() {
                debug!(
                    "budget exhausted before depth {depth} ({} ms)",
                    self.budget.elapsed().as_millis()
                );
                break;
            }

            self.stats.state = DeepeningState::Searching(depth);

            let result = match self.search_root(rules, depth) {
                Ok(result) => result,
                Err(aborted) => {
                    debug!("depth {depth} discarded: {aborted}");
                    self.stats.state = DeepeningState::Aborted;
                    break;
                }
            };

            self.stats.state = DeepeningState::Completed(depth);
            self.stats.completed_depth = depth;
            self.stats.score = result.score;

            let Some(mv) = result.best_move else {
                break;
            };

            let info = IterationInfo {
                depth,
                score: result.score,
                nodes: self.stats.nodes,
                time_ms: self.budget.elapsed().as_millis() as u64,
                best_move: rules.move_notation(&mv),
            };
            debug!(
                "depth {} score {} nodes {} time {} ms best {}",
                info.depth, info.score, info.nodes, info.time_ms, info.best_move
            );
            if let Some(callback) = &self.info_callback {
                callback(&info);
            }

            best_move = Some(mv);

            // A forced mate will not change with more depth
            if result.score.abs() >= MATE_THRESHOLD {
                break;
            }
        }

        self.stats.tt_entries = self.tt.len();
        self.stats.elapsed = self.budget.elapsed();
        best_move
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;
    use crate::eval::Evaluator;
    use crate::rules::Game;
    use crate::search::{IterationCallback, SearchStats};
    use crate::timer::{SearchBudget, StopFlag};
    use crate::tt::TranspositionTable;

    fn run(
        game: &mut Game,
        budget: &SearchBudget,
        max_depth: u32,
        callback: Option<IterationCallback>,
    ) -> (Option<shakmaty::Move>, SearchStats) {
        let evaluator = Evaluator::new();
        let mut tt = TranspositionTable::new();
        let mut stats = SearchStats::default();
        let best = SearchContext::new(&evaluator, &mut tt, budget, &mut stats)
            .with_info_callback(callback)
            .iterative_deepening(game, max_depth);
        (best, stats)
    }

    #[test]
    fn test_completes_all_depths() {
        let mut g = Game::new();
        let (best, stats) = run(&mut g, &SearchBudget::unlimited(), 2, None);

        let best = best.expect("a move");
        assert!(g.legal_moves().contains(&best));
        assert_eq!(stats.completed_depth, 2);
        assert_eq!(stats.state, DeepeningState::Completed(2));
        assert!(stats.tt_entries > 0);
    }

    #[test]
    fn test_reports_each_iteration() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: IterationCallback = Arc::new(move |info: &IterationInfo| {
            sink.lock().expect("lock").push(info.depth);
        });

        let mut g = Game::new();
        run(&mut g, &SearchBudget::unlimited(), 3, Some(callback));
        assert_eq!(*seen.lock().expect("lock"), vec![1, 2, 3]);
    }

    #[test]
    fn test_stopped_before_first_depth() {
        let stop = StopFlag::new();
        stop.request();
        let budget = SearchBudget::with_stop(Duration::MAX, stop);

        let mut g = Game::new();
        let (best, stats) = run(&mut g, &budget, 4, None);
        assert!(best.is_none());
        assert_eq!(stats.completed_depth, 0);
        assert_eq!(stats.state, DeepeningState::Idle);
    }

    #[test]
    fn test_aborted_depth_is_discarded() {
        let mut g = Game::new();
        let before = g.fen();
        let budget = SearchBudget::new(Duration::from_millis(200));
        let (best, stats) = run(&mut g, &budget, 30, None);

        assert!(matches!(
            stats.state,
            DeepeningState::Aborted | DeepeningState::Completed(_)
        ));
        assert!(stats.completed_depth < 30);
        if stats.completed_depth > 0 {
            assert!(best.is_some());
        }
        assert_eq!(g.fen(), before);
    }

    #[test]
    fn test_stops_on_mate() {
        let mut g = Game::from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1").expect("valid fen");
        let (best, stats) = run(&mut g, &SearchBudget::unlimited(), 6, None);

        let best = best.expect("a move");
        assert_eq!(g.move_notation(&best), "e1e8");
        assert_eq!(stats.completed_depth, 1);
    }
}
