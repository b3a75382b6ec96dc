//! Mobility: difference in legal move counts.

use shakmaty::Color;

use super::tables::MOBILITY_WEIGHT;
use crate::rules::Rules;

/// Returns a score from white's perspective.
///
/// The side not to move is counted through the collaborator's turn override.
/// When that override is impossible (the side to move is in check) the term
/// is left out for both sides.
pub fn eval_mobility<R: Rules + ?Sized>(rules: &R) -> i32 {
    match (rules.mobility(Color::White), rules.mobility(Color::Black)) {
        (Some(white), Some(black)) => (white as i32 - black as i32) * MOBILITY_WEIGHT,
        _ => 0,
    }
}
