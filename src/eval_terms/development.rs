//! Opening/middlegame bonuses: developed knights and kept castling rights.

use shakmaty::{CastlingSide, Color, Piece, Role, Square};

use super::helpers::{sign, PieceMap};
use super::tables::{
    KINGSIDE_CASTLING_BONUS, QUEENSIDE_CASTLING_BONUS, UNDEVELOPED_KNIGHT_PENALTY,
};
use crate::rules::Rules;

const KNIGHT_HOMES: [(Square, Color); 4] = [
    (Square::B1, Color::White),
    (Square::G1, Color::White),
    (Square::B8, Color::Black),
    (Square::G8, Color::Black),
];

/// Penalty for each knight still on its home square.
/// Returns a score from white's perspective.
pub fn eval_development(pieces: &PieceMap) -> i32 {
    KNIGHT_HOMES
        .iter()
        .filter(|&&(square, color)| {
            pieces.get(square)
                == Some(Piece {
                    color,
                    role: Role::Knight,
                })
        })
        .map(|&(_, color)| -sign(color) * UNDEVELOPED_KNIGHT_PENALTY)
        .sum()
}

/// Returns a score from white's perspective.
pub fn eval_castling_rights<R: Rules + ?Sized>(rules: &R) -> i32 {
    [Color::White, Color::Black]
        .into_iter()
        .map(|color| {
            let mut bonus = 0;
            if rules.has_castling_right(color, CastlingSide::KingSide) {
                bonus += KINGSIDE_CASTLING_BONUS;
            }
            if rules.has_castling_right(color, CastlingSide::QueenSide) {
                bonus += QUEENSIDE_CASTLING_BONUS;
            }
            sign(color) * bonus
        })
        .sum()
}
