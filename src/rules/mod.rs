//! The rules collaborator consumed by the search.
//!
//! The search never decides legality, check or draws itself; it asks a
//! `Rules` implementation. `Game` is the shipped implementation, backed by
//! `shakmaty`.

mod game;

use std::fmt::Debug;
use std::ops::{Deref, DerefMut};

pub use game::{uci, Game};
pub use shakmaty::{CastlingSide, Color, Piece, Role, Square};

/// A mutable chess position with stack-ordered move application.
///
/// Scores elsewhere in the crate are always from White's point of view, so
/// the only side information the search needs is `turn`.
pub trait Rules {
    /// Opaque move token.
    type Move: Clone + PartialEq + Debug;

    /// All legal moves for the side to move.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Apply a legal move.
    fn push(&mut self, mv: &Self::Move);

    /// Revert the most recent `push`.
    fn pop(&mut self);

    fn turn(&self) -> Color;

    fn piece_at(&self, square: Square) -> Option<Piece>;

    fn is_check(&self) -> bool;

    fn is_checkmate(&self) -> bool;

    fn is_stalemate(&self) -> bool;

    fn is_insufficient_material(&self) -> bool;

    fn can_claim_fifty_moves(&self) -> bool;

    fn can_claim_threefold_repetition(&self) -> bool;

    /// No further play: mate, stalemate, dead position or an automatic draw.
    fn is_game_over(&self) -> bool;

    fn has_castling_right(&self, color: Color, side: CastlingSide) -> bool;

    /// Legal move count for `color`, as if it were that side's turn.
    ///
    /// The turn override must not be observable afterwards. Returns `None`
    /// when the override would produce an impossible position (the side to
    /// move is in check, so the other side could capture the king). Leaf
    /// scores for in-check positions therefore carry no mobility term.
    fn mobility(&self, color: Color) -> Option<usize>;

    /// Canonical identity of the position (board, turn, castling, en passant).
    fn position_key(&self) -> String;

    fn is_capture(&self, mv: &Self::Move) -> bool;

    fn captured_role(&self, mv: &Self::Move) -> Option<Role>;

    fn moving_role(&self, mv: &Self::Move) -> Role;

    /// Whether the opponent is in check after `mv`.
    fn gives_check(&self, mv: &Self::Move) -> bool;

    fn is_castle(&self, mv: &Self::Move) -> bool;

    fn promotion(&self, mv: &Self::Move) -> Option<Role>;

    fn destination(&self, mv: &Self::Move) -> Square;

    /// Coordinate notation, e.g. `e2e4`, `e1g1`, `e7e8q`.
    fn move_notation(&self, mv: &Self::Move) -> String;

    /// Apply `mv` for the lifetime of the returned guard.
    fn apply(&mut self, mv: &Self::Move) -> Applied<'_, Self>
    where
        Self: Sized,
    {
        Applied::new(self, mv)
    }
}

/// A move applied to a position; reverted when dropped.
///
/// Every exit from a search frame (normal return, cutoff, budget abort via
/// `?`) drops the guard, so the position always comes back intact.
pub struct Applied<'a, R: Rules + ?Sized> {
    rules: &'a mut R,
}

impl<'a, R: Rules + ?Sized> Applied<'a, R> {
    pub fn new(rules: &'a mut R, mv: &R::Move) -> Self {
        rules.push(mv);
        Applied { rules }
    }
}

impl<R: Rules + ?Sized> Deref for Applied<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.rules
    }
}

impl<R: Rules + ?Sized> DerefMut for Applied<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.rules
    }
}

impl<R: Rules + ?Sized> Drop for Applied<'_, R> {
    fn drop(&mut self) {
        self.rules.pop();
    }
}
