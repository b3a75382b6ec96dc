//! Core search implementation.
//!
//! Fail-soft alpha-beta over any `Rules` implementation. Moves are applied
//! under an `Applied` guard, so a budget abort unwinding through `?` reverts
//! every frame on its way out.

use shakmaty::Color;

use super::move_order::order_moves;
use super::{
    leaf_score, score_from_tt, score_to_tt, IterationCallback, RootResult, SearchStats, INFINITY,
};
use crate::error::Aborted;
use crate::eval::Evaluator;
use crate::rules::Rules;
use crate::timer::SearchBudget;
use crate::tt::{BoundType, TranspositionTable};

/// Search context for a single top-level search
pub struct SearchContext<'a> {
    pub(super) evaluator: &'a Evaluator,
    pub(super) tt: &'a mut TranspositionTable,
    pub(super) budget: &'a SearchBudget,
    pub(super) stats: &'a mut SearchStats,
    move_ordering: bool,
    /// Optional callback for reporting iteration info
    pub(super) info_callback: Option<IterationCallback>,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        evaluator: &'a Evaluator,
        tt: &'a mut TranspositionTable,
        budget: &'a SearchBudget,
        stats: &'a mut SearchStats,
    ) -> Self {
        SearchContext {
            evaluator,
            tt,
            budget,
            stats,
            move_ordering: true,
            info_callback: None,
        }
    }

    #[must_use]
    pub fn with_move_ordering(mut self, enabled: bool) -> Self {
        self.move_ordering = enabled;
        self
    }

    #[must_use]
    pub fn with_info_callback(mut self, callback: Option<IterationCallback>) -> Self {
        self.info_callback = callback;
        self
    }

    fn moves<R: Rules>(&self, rules: &R) -> Vec<R::Move> {
        let moves = rules.legal_moves();
        if self.move_ordering {
            order_moves(rules, moves)
        } else {
            moves
        }
    }

    /// Minimax value of the position `depth` plies deep, White's view.
    ///
    /// `ply` is the distance from the root, used to rank mates by length.
    pub fn search<R: Rules>(
        &mut self,
        rules: &mut R,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        ply: u32,
    ) -> Result<i32, Aborted> {
        self.budget.check()?;
        self.stats.nodes += 1;

        let key = rules.position_key();
        if let Some(entry) = self.tt.get(&key) {
            if entry.depth() >= depth {
                let score = score_from_tt(entry.score(), ply);
                if entry.bound_type().cuts(score, alpha, beta) {
                    self.stats.tt_hits += 1;
                    return Ok(score);
                }
            }
        }

        if depth == 0 || rules.is_game_over() {
            return Ok(self.leaf(rules, &key, depth, ply));
        }

        let moves = self.moves(rules);
        if moves.is_empty() {
            return Ok(self.leaf(rules, &key, depth, ply));
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let mut best = if maximizing { -INFINITY } else { INFINITY };

        for mv in &moves {
            let score = {
                let mut child = rules.apply(mv);
                self.search(&mut *child, depth - 1, alpha, beta, !maximizing, ply + 1)?
            };

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        let bound = BoundType::classify(best, alpha_orig, beta_orig);
        self.tt.put(&key, depth, score_to_tt(best, ply), bound);
        Ok(best)
    }

    /// Best move for the side to move, searched `depth` plies deep.
    ///
    /// The first move reaching the best score wins ties.
    pub fn search_root<R: Rules>(
        &mut self,
        rules: &mut R,
        depth: u32,
    ) -> Result<RootResult<R::Move>, Aborted> {
        self.budget.check()?;
        self.stats.nodes += 1;

        let maximizing = rules.turn() == Color::White;
        let child_depth = depth.saturating_sub(1);
        let mut alpha = -INFINITY;
        let mut beta = INFINITY;
        let mut best_move = None;
        let mut best_score = if maximizing { -INFINITY } else { INFINITY };

        for mv in self.moves(rules) {
            self.budget.check()?;

            let score = {
                let mut child = rules.apply(&mv);
                self.search(&mut *child, child_depth, alpha, beta, !maximizing, 1)?
            };

            let improved = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if improved || best_move.is_none() {
                best_score = score;
                best_move = Some(mv);
            }

            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        Ok(RootResult {
            best_move,
            score: best_score,
        })
    }

    fn leaf<R: Rules>(&mut self, rules: &R, key: &str, depth: u32, ply: u32) -> i32 {
        let score = leaf_score(self.evaluator.evaluate_cp(rules), ply);
        self.tt
            .put(key, depth, score_to_tt(score, ply), BoundType::Exact);
        score
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::eval::MATE_SCORE;
    use crate::rules::Game;

    fn game(fen: &str) -> Game {
        Game::from_fen(fen).expect("valid fen")
    }

    /// Plain minimax without pruning or caching.
    fn minimax(game: &mut Game, evaluator: &Evaluator, depth: u32, maximizing: bool, ply: u32) -> i32 {
        if depth == 0 || game.is_game_over() {
            return leaf_score(evaluator.evaluate_cp(game), ply);
        }
        let scores = game.legal_moves().into_iter().map(|mv| {
            let mut child = game.apply(&mv);
            minimax(&mut child, evaluator, depth - 1, !maximizing, ply + 1)
        });
        let scores: Vec<i32> = scores.collect();
        if maximizing {
            scores.into_iter().max().unwrap_or(0)
        } else {
            scores.into_iter().min().unwrap_or(0)
        }
    }

    fn root_minimax(game: &mut Game, evaluator: &Evaluator, depth: u32) -> i32 {
        let maximizing = game.turn() == Color::White;
        minimax(game, evaluator, depth, maximizing, 0)
    }

    struct Harness {
        evaluator: Evaluator,
        tt: TranspositionTable,
        budget: SearchBudget,
        stats: SearchStats,
    }

    impl Harness {
        fn new() -> Self {
            Harness {
                evaluator: Evaluator::new(),
                tt: TranspositionTable::new(),
                budget: SearchBudget::unlimited(),
                stats: SearchStats::default(),
            }
        }

        fn context(&mut self) -> SearchContext<'_> {
            SearchContext::new(&self.evaluator, &mut self.tt, &self.budget, &mut self.stats)
        }
    }

    #[test]
    fn test_matches_minimax() {
        let cases = [
            ("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3", 2),
            ("rnb1kbnr/pppp1ppp/8/4p3/3qP3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3", 2),
            ("8/5pk1/6p1/3P4/8/2K5/5P2/8 b - - 0 40", 3),
            ("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", 3),
        ];

        for (fen, depth) in cases {
            let mut g = game(fen);
            let expected = root_minimax(&mut g, &Evaluator::new(), depth);

            let mut harness = Harness::new();
            let result = harness.context().search_root(&mut g, depth).expect("no budget");
            assert_eq!(result.score, expected, "mismatch for {fen} at depth {depth}");
            assert!(result.best_move.is_some());
        }
    }

    #[test]
    fn test_stale_shallow_entries_ignored() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let mut g = game(fen);

        let mut clean = Harness::new();
        let expected = clean.context().search_root(&mut g, 2).expect("no budget").score;

        // Seed every child with a nonsense depth-0 score
        let mut seeded = Harness::new();
        for mv in g.legal_moves() {
            let child = g.apply(&mv);
            seeded
                .tt
                .put(&child.position_key(), 0, 9_000, BoundType::Exact);
        }
        let score = seeded.context().search_root(&mut g, 2).expect("no budget").score;
        assert_eq!(score, expected);
    }

    #[test]
    fn test_ordering_keeps_score_and_saves_nodes() {
        let mut g = game("rnb1kbnr/pppp1ppp/8/4p3/3qP3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");

        let mut ordered = Harness::new();
        let with_order = ordered.context().search_root(&mut g, 3).expect("no budget");

        let mut unordered = Harness::new();
        let without_order = unordered
            .context()
            .with_move_ordering(false)
            .search_root(&mut g, 3)
            .expect("no budget");

        assert_eq!(with_order.score, without_order.score);
        assert!(
            ordered.stats.nodes <= unordered.stats.nodes,
            "ordered {} > unordered {}",
            ordered.stats.nodes,
            unordered.stats.nodes
        );
    }

    #[test]
    fn test_abort_restores_position() {
        let mut g = Game::new();
        let before = g.fen();

        let mut harness = Harness::new();
        harness.budget = SearchBudget::new(Duration::from_millis(5));
        let result = harness.context().search_root(&mut g, 8);

        assert_eq!(result, Err(Aborted));
        assert_eq!(g.fen(), before);
        assert_eq!(g.ply(), 0);
    }

    #[test]
    fn test_prefers_shortest_mate() {
        let mut g = game("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1");
        let mut harness = Harness::new();
        let result = harness.context().search_root(&mut g, 3).expect("no budget");

        assert_eq!(result.score, MATE_SCORE - 1);
        let best = result.best_move.expect("a move");
        assert_eq!(g.move_notation(&best), "e1e8");
    }

    #[test]
    fn test_black_to_move_minimizes() {
        // Fool's mate available for Black
        let mut g = game("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq g3 0 2");
        let mut harness = Harness::new();
        let result = harness.context().search_root(&mut g, 2).expect("no budget");

        assert_eq!(result.score, -MATE_SCORE + 1);
        let best = result.best_move.expect("a move");
        assert_eq!(g.move_notation(&best), "d8h4");
    }

    #[test]
    fn test_counts_nodes_and_fills_table() {
        let mut g = Game::new();
        let mut harness = Harness::new();
        harness.context().search_root(&mut g, 2).expect("no budget");

        assert!(harness.stats.nodes > 20);
        assert!(!harness.tt.is_empty());
    }
}
