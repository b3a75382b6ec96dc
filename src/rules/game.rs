//! `Rules` implementation on top of `shakmaty`.
//!
//! `shakmaty` positions are immutable values, so reverting is done by keeping
//! the previous positions on a stack. Repetition claims need the history of
//! canonical keys, which is kept alongside.

use shakmaty::fen::Fen;
use shakmaty::{
    CastlingMode, CastlingSide, Chess, Color, EnPassantMode, File, Move, Piece, Position, Role,
    Square,
};

use super::Rules;
use crate::error::{FenError, MoveParseError};

/// Halfmove clock value at which a fifty-move draw can be claimed.
const FIFTY_MOVE_PLIES: u32 = 100;
/// Halfmove clock value at which the game is drawn automatically.
const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// A game in progress: the current position plus everything needed to undo
/// moves and detect repetitions.
#[derive(Clone, Debug)]
pub struct Game {
    position: Chess,
    undo: Vec<Chess>,
    /// Canonical key of every position reached, the current one last.
    keys: Vec<String>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        Self::from_position(Chess::default())
    }

    #[must_use]
    pub fn from_position(position: Chess) -> Self {
        let key = canonical_key(&position);
        Game {
            position,
            undo: Vec::new(),
            keys: vec![key],
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed: Fen = fen.trim().parse().map_err(|err| FenError::Syntax {
            fen: fen.to_string(),
            reason: format!("{err}"),
        })?;
        let position: Chess =
            parsed
                .into_position(CastlingMode::Standard)
                .map_err(|err| FenError::IllegalPosition {
                    fen: fen.to_string(),
                    reason: format!("{err}"),
                })?;
        Ok(Self::from_position(position))
    }

    #[must_use]
    pub fn position(&self) -> &Chess {
        &self.position
    }

    /// Full FEN including move counters.
    #[must_use]
    pub fn fen(&self) -> String {
        Fen::from_setup(self.position.clone().into_setup(EnPassantMode::Legal)).to_string()
    }

    /// Number of moves applied since construction.
    #[must_use]
    pub fn ply(&self) -> usize {
        self.undo.len()
    }

    /// Find the legal move written as `notation` in coordinate notation.
    pub fn parse_uci(&self, notation: &str) -> Result<Move, MoveParseError> {
        let len = notation.len();
        if !(4..=5).contains(&len) {
            return Err(MoveParseError::InvalidLength { len });
        }
        self.position
            .legal_moves()
            .into_iter()
            .find(|mv| uci(mv) == notation)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: notation.to_string(),
            })
    }

    /// Parse and apply a coordinate-notation move.
    pub fn play_uci(&mut self, notation: &str) -> Result<Move, MoveParseError> {
        let mv = self.parse_uci(notation)?;
        self.push(&mv);
        Ok(mv)
    }

    /// How many times the current position has occurred since the last
    /// irreversible move, counting the current occurrence.
    fn repetitions(&self) -> usize {
        let Some(current) = self.keys.last() else {
            return 0;
        };
        let window = (self.position.halfmoves() as usize + 1).min(self.keys.len());
        self.keys[self.keys.len() - window..]
            .iter()
            .filter(|key| *key == current)
            .count()
    }
}

/// First four FEN fields with en passant only when a capture is possible.
fn canonical_key(position: &Chess) -> String {
    let fen = Fen::from_setup(position.clone().into_setup(EnPassantMode::Legal)).to_string();
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}

/// Coordinate notation for a move. Castling is written as the king's
/// two-square step (`e1g1`), not king-takes-rook.
#[must_use]
pub fn uci(mv: &Move) -> String {
    match *mv {
        Move::Castle { king, rook } => {
            let file = if rook.file() > king.file() {
                File::G
            } else {
                File::C
            };
            format!("{}{}", king, Square::from_coords(file, king.rank()))
        }
        _ => {
            let mut out = String::with_capacity(5);
            if let Some(from) = mv.from() {
                out.push_str(&from.to_string());
            }
            out.push_str(&mv.to().to_string());
            if let Some(role) = mv.promotion() {
                out.push(role.char());
            }
            out
        }
    }
}

impl Rules for Game {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        self.position.legal_moves().into_iter().collect()
    }

    fn push(&mut self, mv: &Move) {
        self.undo.push(self.position.clone());
        self.position.play_unchecked(mv);
        self.keys.push(canonical_key(&self.position));
    }

    fn pop(&mut self) {
        if let Some(previous) = self.undo.pop() {
            self.position = previous;
            self.keys.pop();
        }
    }

    fn turn(&self) -> Color {
        self.position.turn()
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position.board().piece_at(square)
    }

    fn is_check(&self) -> bool {
        self.position.is_check()
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    fn is_insufficient_material(&self) -> bool {
        self.position.is_insufficient_material()
    }

    fn can_claim_fifty_moves(&self) -> bool {
        self.position.halfmoves() >= FIFTY_MOVE_PLIES
    }

    fn can_claim_threefold_repetition(&self) -> bool {
        self.repetitions() >= 3
    }

    fn is_game_over(&self) -> bool {
        self.position.is_game_over()
            || self.position.halfmoves() >= SEVENTY_FIVE_MOVE_PLIES
            || self.repetitions() >= 5
    }

    fn has_castling_right(&self, color: Color, side: CastlingSide) -> bool {
        self.position.castles().has(color, side)
    }

    fn mobility(&self, color: Color) -> Option<usize> {
        if color == self.position.turn() {
            return Some(self.position.legal_moves().len());
        }
        // Works on a copy; the real turn is never touched.
        self.position
            .clone()
            .swap_turn()
            .ok()
            .map(|flipped| flipped.legal_moves().len())
    }

    fn position_key(&self) -> String {
        match self.keys.last() {
            Some(key) => key.clone(),
            None => canonical_key(&self.position),
        }
    }

    fn is_capture(&self, mv: &Move) -> bool {
        mv.is_capture()
    }

    fn captured_role(&self, mv: &Move) -> Option<Role> {
        mv.capture()
    }

    fn moving_role(&self, mv: &Move) -> Role {
        mv.role()
    }

    fn gives_check(&self, mv: &Move) -> bool {
        let mut next = self.position.clone();
        next.play_unchecked(mv);
        next.is_check()
    }

    fn is_castle(&self, mv: &Move) -> bool {
        mv.is_castle()
    }

    fn promotion(&self, mv: &Move) -> Option<Role> {
        mv.promotion()
    }

    fn destination(&self, mv: &Move) -> Square {
        match *mv {
            Move::Castle { king, rook } => {
                let file = if rook.file() > king.file() {
                    File::G
                } else {
                    File::C
                };
                Square::from_coords(file, king.rank())
            }
            _ => mv.to(),
        }
    }

    fn move_notation(&self, mv: &Move) -> String {
        uci(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_KEY: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";

    #[test]
    fn test_start_position_key_drops_counters() {
        let game = Game::new();
        assert_eq!(game.position_key(), START_KEY);
        assert_eq!(game.fen(), format!("{START_KEY} 0 1"));
        assert_eq!(game.legal_moves().len(), 20);
    }

    #[test]
    fn test_key_omits_unusable_en_passant() {
        let mut game = Game::new();
        game.play_uci("e2e4").expect("legal");
        assert_eq!(
            game.position_key(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq -"
        );
    }

    #[test]
    fn test_push_pop_restores_position() {
        let mut game = Game::new();
        let before = game.fen();
        for notation in ["e2e4", "e7e5", "g1f3"] {
            game.play_uci(notation).expect("legal");
        }
        assert_eq!(game.ply(), 3);
        game.pop();
        game.pop();
        game.pop();
        assert_eq!(game.fen(), before);
        assert_eq!(game.ply(), 0);

        // Popping an empty stack is a no-op.
        game.pop();
        assert_eq!(game.fen(), before);
    }

    #[test]
    fn test_applied_guard_reverts_on_drop() {
        let mut game = Game::new();
        let before = game.position_key();
        let mv = game.parse_uci("d2d4").expect("legal");
        {
            let applied = game.apply(&mv);
            assert_eq!(applied.turn(), Color::Black);
        }
        assert_eq!(game.position_key(), before);
    }

    #[test]
    fn test_castling_notation() {
        let game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("valid fen");
        let castles: Vec<String> = game
            .legal_moves()
            .iter()
            .filter(|mv| game.is_castle(mv))
            .map(|mv| game.move_notation(mv))
            .collect();
        assert_eq!(castles.len(), 2);
        assert!(castles.contains(&"e1g1".to_string()));
        assert!(castles.contains(&"e1c1".to_string()));

        let short = game.parse_uci("e1g1").expect("castle parses");
        assert_eq!(game.destination(&short), Square::G1);
    }

    #[test]
    fn test_promotion_notation() {
        let game = Game::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").expect("valid fen");
        let mv = game.parse_uci("e7e8q").expect("promotion parses");
        assert_eq!(game.promotion(&mv), Some(Role::Queen));
        assert!(game.parse_uci("e7e8n").is_ok());
    }

    #[test]
    fn test_parse_errors() {
        let game = Game::new();
        assert_eq!(
            game.parse_uci("e2"),
            Err(MoveParseError::InvalidLength { len: 2 })
        );
        assert_eq!(
            game.parse_uci("e2e5"),
            Err(MoveParseError::IllegalMove {
                notation: "e2e5".to_string()
            })
        );
    }

    #[test]
    fn test_bad_fen() {
        assert!(matches!(
            Game::from_fen("not a fen"),
            Err(FenError::Syntax { .. })
        ));
        // Two white kings
        assert!(matches!(
            Game::from_fen("4k3/8/8/8/8/8/8/K3K3 w - - 0 1"),
            Err(FenError::IllegalPosition { .. })
        ));
    }

    #[test]
    fn test_threefold_repetition_claim() {
        let mut game = Game::new();
        assert!(!game.can_claim_threefold_repetition());
        for _ in 0..2 {
            for notation in ["g1f3", "g8f6", "f3g1", "f6g8"] {
                game.play_uci(notation).expect("legal");
            }
        }
        assert!(game.can_claim_threefold_repetition());
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_fifty_move_claim() {
        let game = Game::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 80").expect("valid fen");
        assert!(game.can_claim_fifty_moves());
        assert!(!game.is_game_over());

        let game = Game::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 150 100").expect("valid fen");
        assert!(game.is_game_over());
    }

    #[test]
    fn test_mobility_for_both_sides() {
        let game = Game::new();
        assert_eq!(game.mobility(Color::White), Some(20));
        assert_eq!(game.mobility(Color::Black), Some(20));
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn test_mobility_unavailable_when_in_check() {
        // White king in check from the rook; flipping the turn is impossible.
        let game = Game::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").expect("valid fen");
        assert!(game.is_check());
        assert!(game.mobility(Color::White).is_some());
        assert_eq!(game.mobility(Color::Black), None);
    }

    #[test]
    fn test_move_predicates() {
        let game =
            Game::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2")
                .expect("valid fen");
        let capture = game.parse_uci("e4d5").expect("legal");
        assert!(game.is_capture(&capture));
        assert_eq!(game.captured_role(&capture), Some(Role::Pawn));
        assert_eq!(game.moving_role(&capture), Role::Pawn);
        assert_eq!(game.destination(&capture), Square::D5);

        let check = game.parse_uci("f1b5").expect("legal");
        assert!(game.gives_check(&check));
        assert!(!game.is_capture(&check));
    }
}
