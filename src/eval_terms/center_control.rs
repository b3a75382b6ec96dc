//! Occupation of the center and the ring around it.

use shakmaty::Role;

use super::helpers::{sign, PieceMap};
use super::tables::{
    CENTER_PAWN, CENTER_PIECE, CENTER_SQUARES, EXTENDED_CENTER_PAWN, EXTENDED_CENTER_PIECE,
    EXTENDED_CENTER_SQUARES,
};

/// Returns a score from white's perspective.
pub fn eval_center_control(pieces: &PieceMap) -> i32 {
    let occupancy = |squares: &[shakmaty::Square], pawn: i32, piece: i32| -> i32 {
        squares
            .iter()
            .filter_map(|&square| pieces.get(square))
            .map(|p| sign(p.color) * if p.role == Role::Pawn { pawn } else { piece })
            .sum()
    };

    occupancy(&CENTER_SQUARES, CENTER_PAWN, CENTER_PIECE)
        + occupancy(
            &EXTENDED_CENTER_SQUARES,
            EXTENDED_CENTER_PAWN,
            EXTENDED_CENTER_PIECE,
        )
}
