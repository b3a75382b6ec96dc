pub mod book;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
mod eval_terms;
pub mod rules;
pub mod search;
pub mod timer;
pub mod tt;

pub use book::OpeningBook;
pub use config::{EngineConfig, DEFAULT_DEPTH};
pub use engine::Engine;
pub use error::{Aborted, FenError, MoveParseError};
pub use eval::{EvalBreakdown, Evaluator, MATE_SCORE};
pub use rules::{Applied, Game, Rules};
pub use search::{DeepeningState, IterationCallback, IterationInfo, SearchStats};
pub use timer::{SearchBudget, StopFlag};
pub use tt::TranspositionTable;
