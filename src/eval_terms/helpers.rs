//! Board snapshot shared by the evaluation terms.
//!
//! Looking pieces up through the rules collaborator square by square is
//! comparatively slow, so the evaluator reads the board once and every term
//! works from this copy.

use shakmaty::{Color, Piece, Role, Square};

use super::tables::ENDGAME_PIECE_COUNT;
use crate::rules::Rules;

#[derive(Clone, Debug)]
pub struct PieceMap {
    squares: [Option<Piece>; 64],
    count: usize,
}

impl PieceMap {
    pub fn from_rules<R: Rules + ?Sized>(rules: &R) -> Self {
        let mut squares = [None; 64];
        let mut count = 0;
        for square in Square::ALL {
            let piece = rules.piece_at(square);
            if piece.is_some() {
                count += 1;
            }
            squares[square as usize] = piece;
        }
        PieceMap { squares, count }
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square as usize]
    }

    /// Piece at file/rank coordinates, `None` when off the board.
    #[inline]
    pub fn at(&self, file: i32, rank: i32) -> Option<Piece> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            self.squares[(rank * 8 + file) as usize]
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::ALL
            .into_iter()
            .filter_map(move |square| self.get(square).map(|piece| (square, piece)))
    }

    pub fn squares_of(&self, color: Color, role: Role) -> impl Iterator<Item = Square> + '_ {
        self.iter()
            .filter(move |(_, piece)| piece.color == color && piece.role == role)
            .map(|(square, _)| square)
    }

    pub fn king(&self, color: Color) -> Option<Square> {
        self.squares_of(color, Role::King).next()
    }

    /// Pieces on the board, kings included.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_endgame(&self) -> bool {
        self.count <= ENDGAME_PIECE_COUNT
    }
}

/// +1 for White, -1 for Black.
#[inline]
pub fn sign(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

#[inline]
pub fn file_of(square: Square) -> i32 {
    square.file() as i32
}

#[inline]
pub fn rank_of(square: Square) -> i32 {
    square.rank() as i32
}
