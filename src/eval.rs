//! Static position evaluation.
//!
//! Scores are centipawns from White's fixed perspective: positive favours
//! White regardless of whose turn it is. `evaluate` converts to pawns for
//! display.

use shakmaty::{Color, Role};

use crate::eval_terms::tables::{role_index, MATERIAL_MG};
use crate::eval_terms::{
    eval_castling_rights, eval_center_control, eval_development, eval_king_safety, eval_material,
    eval_mobility, eval_pawn_structure, PieceMap,
};
use crate::rules::Rules;

/// Score of a checkmated position, in centipawns.
pub const MATE_SCORE: i32 = 29_999;

/// Per-term contributions for a non-terminal position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvalBreakdown {
    pub endgame: bool,
    pub material: i32,
    pub king_safety: i32,
    pub pawn_structure: i32,
    pub mobility: i32,
    pub center: i32,
    pub development: i32,
    pub castling: i32,
}

impl EvalBreakdown {
    #[must_use]
    pub fn total(&self) -> i32 {
        self.material
            + self.king_safety
            + self.pawn_structure
            + self.mobility
            + self.center
            + self.development
            + self.castling
    }
}

/// Stateless hand-crafted evaluator.
#[derive(Clone, Copy, Debug, Default)]
pub struct Evaluator;

impl Evaluator {
    #[must_use]
    pub fn new() -> Self {
        Evaluator
    }

    /// Middlegame material value of a piece type.
    #[must_use]
    pub fn piece_value(role: Role) -> i32 {
        MATERIAL_MG[role_index(role)]
    }

    /// Evaluate in pawns.
    pub fn evaluate<R: Rules + ?Sized>(&self, rules: &R) -> f64 {
        f64::from(self.evaluate_cp(rules)) / 100.0
    }

    /// Evaluate in centipawns.
    ///
    /// Checkmate is `-MATE_SCORE` when White is mated and `+MATE_SCORE` when
    /// Black is. Stalemate, insufficient material and claimable draws are 0.
    pub fn evaluate_cp<R: Rules + ?Sized>(&self, rules: &R) -> i32 {
        if let Some(score) = terminal_score(rules) {
            return score;
        }
        self.terms(rules).total()
    }

    /// Per-term breakdown; `None` for terminal positions.
    pub fn breakdown<R: Rules + ?Sized>(&self, rules: &R) -> Option<EvalBreakdown> {
        match terminal_score(rules) {
            Some(_) => None,
            None => Some(self.terms(rules)),
        }
    }

    fn terms<R: Rules + ?Sized>(&self, rules: &R) -> EvalBreakdown {
        let pieces = PieceMap::from_rules(rules);
        let endgame = pieces.is_endgame();

        let (development, castling) = if endgame {
            (0, 0)
        } else {
            (eval_development(&pieces), eval_castling_rights(rules))
        };

        EvalBreakdown {
            endgame,
            material: eval_material(&pieces, endgame),
            king_safety: eval_king_safety(&pieces, endgame),
            pawn_structure: eval_pawn_structure(&pieces),
            mobility: eval_mobility(rules),
            center: eval_center_control(&pieces),
            development,
            castling,
        }
    }
}

fn terminal_score<R: Rules + ?Sized>(rules: &R) -> Option<i32> {
    if rules.is_checkmate() {
        return Some(match rules.turn() {
            Color::White => -MATE_SCORE,
            Color::Black => MATE_SCORE,
        });
    }
    if rules.is_stalemate()
        || rules.is_insufficient_material()
        || rules.can_claim_fifty_moves()
        || rules.can_claim_threefold_repetition()
    {
        return Some(0);
    }
    None
}
