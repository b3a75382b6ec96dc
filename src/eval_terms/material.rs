//! Material balance and piece-square tables.

use super::helpers::{sign, PieceMap};
use super::tables::{pst_value, role_index, MATERIAL_EG, MATERIAL_MG};

/// Material plus positional table bonus for every piece on the board.
/// Returns a score from white's perspective.
pub fn eval_material(pieces: &PieceMap, endgame: bool) -> i32 {
    let values = if endgame { &MATERIAL_EG } else { &MATERIAL_MG };

    pieces
        .iter()
        .map(|(square, piece)| {
            let material = values[role_index(piece.role)];
            let positional = pst_value(piece.role, piece.color, square, endgame);
            sign(piece.color) * (material + positional)
        })
        .sum()
}
