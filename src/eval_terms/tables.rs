//! Evaluation constants and tables.
//!
//! Piece-square tables are written the way a board diagram is read: the first
//! row is rank 8 from White's side. `pst_index` maps a square onto them.

use shakmaty::{Color, Role, Square};

// ============================================================================
// MATERIAL
// ============================================================================

/// Piece values outside the endgame, indexed by `role_index`.
pub const MATERIAL_MG: [i32; 6] = [100, 320, 330, 500, 900, 20000];
/// Piece values in the endgame. Pawns gain, minor pieces lose a little.
pub const MATERIAL_EG: [i32; 6] = [120, 300, 320, 520, 880, 20000];

/// Total piece count (kings included) at or below which the endgame starts.
pub const ENDGAME_PIECE_COUNT: usize = 12;

// ============================================================================
// PAWN STRUCTURE
// ============================================================================

pub const DOUBLED_PAWN_PENALTY: i32 = 15;
pub const ISOLATED_PAWN_PENALTY: i32 = 20;
pub const PASSED_PAWN_BONUS: i32 = 30;

// ============================================================================
// KING
// ============================================================================

/// Per own pawn directly in front of the king (middlegame)
pub const PAWN_SHIELD_BONUS: i32 = 10;
/// Scale of the endgame centralization bonus
pub const KING_ACTIVITY_SCALE: i32 = 5;

// ============================================================================
// MOBILITY / CENTER / DEVELOPMENT
// ============================================================================

/// Per legal move of difference between the sides
pub const MOBILITY_WEIGHT: i32 = 2;

pub const CENTER_PAWN: i32 = 10;
pub const CENTER_PIECE: i32 = 5;
pub const EXTENDED_CENTER_PAWN: i32 = 5;
pub const EXTENDED_CENTER_PIECE: i32 = 2;

pub const CENTER_SQUARES: [Square; 4] = [Square::D4, Square::D5, Square::E4, Square::E5];

pub const EXTENDED_CENTER_SQUARES: [Square; 12] = [
    Square::C3,
    Square::C4,
    Square::C5,
    Square::C6,
    Square::D3,
    Square::D6,
    Square::E3,
    Square::E6,
    Square::F3,
    Square::F4,
    Square::F5,
    Square::F6,
];

/// Penalty for a knight still on its starting square
pub const UNDEVELOPED_KNIGHT_PENALTY: i32 = 10;
pub const KINGSIDE_CASTLING_BONUS: i32 = 15;
pub const QUEENSIDE_CASTLING_BONUS: i32 = 10;

// ============================================================================
// PIECE-SQUARE TABLES
// ============================================================================

#[rustfmt::skip]
pub const PAWN_PST: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
pub const KNIGHT_PST: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
pub const BISHOP_PST: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
pub const ROOK_PST: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
pub const QUEEN_PST: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

/// King tucked away behind its pawns
#[rustfmt::skip]
pub const KING_MG_PST: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

/// King walks to the center
#[rustfmt::skip]
pub const KING_EG_PST: [i32; 64] = [
    -50,-40,-30,-20,-20,-30,-40,-50,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-30,  0,  0,  0,  0,-30,-30,
    -50,-30,-30,-30,-30,-30,-30,-50,
];

#[inline]
#[must_use]
pub const fn role_index(role: Role) -> usize {
    match role {
        Role::Pawn => 0,
        Role::Knight => 1,
        Role::Bishop => 2,
        Role::Rook => 3,
        Role::Queen => 4,
        Role::King => 5,
    }
}

/// Index into a diagram-ordered table for a piece of `color` on `square`.
/// Black reads the same table upside down.
#[inline]
#[must_use]
pub fn pst_index(square: Square, color: Color) -> usize {
    match color {
        Color::White => square.flip_vertical() as usize,
        Color::Black => square as usize,
    }
}

/// Positional bonus for a piece; the king table depends on the phase.
#[must_use]
pub fn pst_value(role: Role, color: Color, square: Square, endgame: bool) -> i32 {
    let table = match role {
        Role::Pawn => &PAWN_PST,
        Role::Knight => &KNIGHT_PST,
        Role::Bishop => &BISHOP_PST,
        Role::Rook => &ROOK_PST,
        Role::Queen => &QUEEN_PST,
        Role::King if endgame => &KING_EG_PST,
        Role::King => &KING_MG_PST,
    };
    table[pst_index(square, color)]
}
