//! King safety.
//!
//! Middlegame: pawns sheltering the king. Endgame: the king should come to
//! the center.

use shakmaty::{Color, Role};

use super::helpers::{file_of, rank_of, sign, PieceMap};
use super::tables::{KING_ACTIVITY_SCALE, PAWN_SHIELD_BONUS};

/// Returns a score from white's perspective.
pub fn eval_king_safety(pieces: &PieceMap, endgame: bool) -> i32 {
    [Color::White, Color::Black]
        .into_iter()
        .map(|color| {
            let Some(king) = pieces.king(color) else {
                return 0;
            };
            let term = if endgame {
                king_activity(file_of(king), rank_of(king))
            } else {
                pawn_shield(pieces, color, file_of(king), rank_of(king))
            };
            sign(color) * term
        })
        .sum()
}

/// Own pawns on the three squares directly in front of the king.
fn pawn_shield(pieces: &PieceMap, color: Color, file: i32, rank: i32) -> i32 {
    let front = rank + sign(color);
    let shelter = (file - 1..=file + 1)
        .filter_map(|f| pieces.at(f, front))
        .filter(|piece| piece.role == Role::Pawn && piece.color == color)
        .count() as i32;
    shelter * PAWN_SHIELD_BONUS
}

/// `(4 - d) * 5` truncated, where `d` is the smaller of the file and rank
/// distances from the board's midpoint. Computed in half-squares to stay in
/// integers.
fn king_activity(file: i32, rank: i32) -> i32 {
    let half_distance = (2 * file - 7).abs().min((2 * rank - 7).abs());
    (8 - half_distance) * KING_ACTIVITY_SCALE / 2
}
