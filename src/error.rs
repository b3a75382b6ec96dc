//! Error types for the rules adapter and the search.

use std::fmt;

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// The text is not syntactically valid FEN
    Syntax { fen: String, reason: String },
    /// The FEN parses but describes an impossible position
    IllegalPosition { fen: String, reason: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::Syntax { fen, reason } => {
                write!(f, "Invalid FEN '{fen}': {reason}")
            }
            FenError::IllegalPosition { fen, reason } => {
                write!(f, "Illegal position '{fen}': {reason}")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for coordinate-notation move parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Move is well formed but not legal in the current position
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "Illegal move '{notation}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// The search budget ran out (or a stop was requested) while a depth was
/// still being searched. The controller catches this and keeps the result of
/// the last completed depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aborted;

impl fmt::Display for Aborted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("search budget exceeded")
    }
}

impl std::error::Error for Aborted {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MoveParseError::InvalidLength { len: 7 };
        assert_eq!(err.to_string(), "Move must be 4-5 characters, found 7");

        let err = MoveParseError::IllegalMove {
            notation: "e2e5".to_string(),
        };
        assert_eq!(err.to_string(), "Illegal move 'e2e5'");

        assert_eq!(Aborted.to_string(), "search budget exceeded");
    }
}
