//! Move ordering utilities for search.

use std::cmp::Reverse;

use shakmaty::Square;

use crate::eval::Evaluator;
use crate::eval_terms::tables::CENTER_SQUARES;
use crate::rules::Rules;

/// Multiplier on the captured piece's value (MVV-LVA)
pub const CAPTURE_VICTIM_MULTIPLIER: i32 = 10;
pub const CHECK_BONUS: i32 = 50;
pub const CASTLE_BONUS: i32 = 30;
pub const PROMOTION_BONUS: i32 = 100;
pub const CENTER_DESTINATION_BONUS: i32 = 10;

/// Heuristic priority of `mv`; higher is searched first.
pub fn move_priority<R: Rules + ?Sized>(rules: &R, mv: &R::Move) -> i32 {
    let mut score = 0;

    if rules.is_capture(mv) {
        let victim = rules.captured_role(mv).map_or(0, Evaluator::piece_value);
        let attacker = Evaluator::piece_value(rules.moving_role(mv));
        score += victim * CAPTURE_VICTIM_MULTIPLIER - attacker;
    }
    if rules.gives_check(mv) {
        score += CHECK_BONUS;
    }
    if rules.is_castle(mv) {
        score += CASTLE_BONUS;
    }
    if rules.promotion(mv).is_some() {
        score += PROMOTION_BONUS;
    }
    if is_center(rules.destination(mv)) {
        score += CENTER_DESTINATION_BONUS;
    }

    score
}

/// Sort `moves` by descending priority. Equal priorities keep their input
/// order.
pub fn order_moves<R: Rules + ?Sized>(rules: &R, moves: Vec<R::Move>) -> Vec<R::Move> {
    let mut scored: Vec<(i32, R::Move)> = moves
        .into_iter()
        .map(|mv| (move_priority(rules, &mv), mv))
        .collect();
    scored.sort_by_key(|(priority, _)| Reverse(*priority));
    scored.into_iter().map(|(_, mv)| mv).collect()
}

#[inline]
fn is_center(square: Square) -> bool {
    CENTER_SQUARES.contains(&square)
}
