//! Hand-crafted evaluation terms.
//!
//! Each term returns centipawns from White's perspective:
//! - Material and piece-square tables
//! - King safety (pawn shield, endgame centralization)
//! - Pawn structure (doubled, isolated, passed pawns)
//! - Mobility
//! - Center control
//! - Development and castling rights

mod center_control;
mod development;
mod helpers;
mod king_safety;
mod material;
mod mobility;
mod pawn_structure;
pub mod tables;

pub(crate) use center_control::eval_center_control;
pub(crate) use development::{eval_castling_rights, eval_development};
pub(crate) use helpers::PieceMap;
pub(crate) use king_safety::eval_king_safety;
pub(crate) use material::eval_material;
pub(crate) use mobility::eval_mobility;
pub(crate) use pawn_structure::eval_pawn_structure;
