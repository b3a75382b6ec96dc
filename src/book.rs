//! Opening book: a few well-known first moves keyed by position.
//!
//! Keys are the first four FEN fields (board, side to move, castling, en
//! passant). Move clocks never take part in a lookup.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Standard book lines: (position key, moves in coordinate notation).
const STANDARD_LINES: &[(&str, &[&str])] = &[
    // Start position
    (
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
        &["e2e4", "d2d4", "g1f3", "c2c4"],
    ),
    // 1.e4
    (
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq -",
        &["e7e5", "c7c5", "e7e6"],
    ),
    // 1.d4
    (
        "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq -",
        &["d7d5", "g8f6", "c7c5"],
    ),
    // 1.Nf3
    (
        "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq -",
        &["d7d5", "g8f6", "c7c5"],
    ),
    // 1.c4
    (
        "rnbqkbnr/pppppppp/8/8/2P5/8/PP1PPPPP/RNBQKBNR b KQkq -",
        &["e7e5", "g8f6", "c7c5"],
    ),
    // 1.e4 e5
    (
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq -",
        &["g1f3", "f1c4", "b1c3"],
    ),
    // 1.e4 e5 2.Nf3
    (
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq -",
        &["b8c6", "g8f6"],
    ),
    // 1.e4 c5
    (
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq -",
        &["g1f3", "b1c3", "c2c3"],
    ),
    // 1.e4 e6
    (
        "rnbqkbnr/pppp1ppp/4p3/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq -",
        &["d2d4"],
    ),
    // 1.d4 d5
    (
        "rnbqkbnr/ppp1pppp/8/3p4/3P4/8/PPP1PPPP/RNBQKBNR w KQkq -",
        &["c2c4", "g1f3", "c1f4"],
    ),
    // 1.d4 Nf6
    (
        "rnbqkb1r/pppppppp/5n2/8/3P4/8/PPP1PPPP/RNBQKBNR w KQkq -",
        &["c2c4", "g1f3"],
    ),
];

static STANDARD_BOOK: Lazy<OpeningBook> = Lazy::new(|| {
    let mut book = OpeningBook::new();
    for (key, moves) in STANDARD_LINES {
        book.insert(key, moves.iter().map(|mv| (*mv).to_string()));
    }
    book
});

/// Reduce a FEN or position key to the four fields used for lookups.
#[must_use]
pub fn normalize_key(fen: &str) -> String {
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}

/// Position key → candidate moves, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpeningBook {
    lines: HashMap<String, Vec<String>>,
}

impl OpeningBook {
    /// An empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in book of common first moves.
    #[must_use]
    pub fn standard() -> Self {
        STANDARD_BOOK.clone()
    }

    /// Add moves for a position. The key may be a full FEN. Moves already
    /// listed for the position are skipped.
    pub fn insert<I, S>(&mut self, key: &str, moves: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let line = self.lines.entry(normalize_key(key)).or_default();
        for mv in moves {
            let mv = mv.into();
            if !line.contains(&mv) {
                line.push(mv);
            }
        }
    }

    /// Candidate moves for an exact key match; empty when unknown.
    pub fn lookup(&self, key: &str) -> &[String] {
        self.lines
            .get(&normalize_key(key))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of positions in the book.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
