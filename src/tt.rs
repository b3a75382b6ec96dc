//! Transposition table for caching search results.
//!
//! Entries are found by a 64-bit hash of the position's canonical key. Each
//! entry also keeps the key itself, so a hash collision reads as a miss
//! instead of returning another position's score.

use std::collections::hash_map::{DefaultHasher, Entry};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Score is at least this value (failed high - score >= beta)
    UpperBound, // Score is at most this value (failed low - score <= alpha)
}

impl BoundType {
    /// Classify a search result against the window it was searched with.
    #[must_use]
    pub fn classify(score: i32, alpha: i32, beta: i32) -> Self {
        if score <= alpha {
            BoundType::UpperBound
        } else if score >= beta {
            BoundType::LowerBound
        } else {
            BoundType::Exact
        }
    }

    /// Whether a stored `score` with this bound settles a node searched
    /// with window `(alpha, beta)`.
    #[must_use]
    pub fn cuts(self, score: i32, alpha: i32, beta: i32) -> bool {
        match self {
            BoundType::Exact => true,
            BoundType::LowerBound => score >= beta,
            BoundType::UpperBound => score <= alpha,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TTEntry {
    key: String,
    depth: u32,
    score: i32,
    bound_type: BoundType,
}

impl TTEntry {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn bound_type(&self) -> BoundType {
        self.bound_type
    }
}

/// Hash of a canonical position key.
#[must_use]
pub fn hash_key(key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Map from position hash to the deepest known result for that position.
///
/// Unbounded unless built with `with_capacity`. Owned by one engine and
/// cleared at the start of every top-level search.
#[derive(Clone, Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, TTEntry>,
    capacity: Option<usize>,
}

impl TranspositionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A table that stops accepting new positions after `capacity` entries.
    /// Existing slots are still updated.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TranspositionTable {
            entries: HashMap::with_capacity(capacity.min(1 << 20)),
            capacity: Some(capacity),
        }
    }

    /// Look up the entry for `key`. A slot holding a different key is a miss.
    pub fn get(&self, key: &str) -> Option<&TTEntry> {
        self.probe(hash_key(key), key)
    }

    /// Store a result for `key`.
    ///
    /// The same position is always overwritten. A different position that
    /// hashes to an occupied slot replaces it only when searched at least as
    /// deep.
    pub fn put(&mut self, key: &str, depth: u32, score: i32, bound_type: BoundType) {
        self.store(hash_key(key), key, depth, score, bound_type);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn probe(&self, hash: u64, key: &str) -> Option<&TTEntry> {
        self.entries.get(&hash).filter(|entry| entry.key == key)
    }

    fn store(&mut self, hash: u64, key: &str, depth: u32, score: i32, bound_type: BoundType) {
        let full = self
            .capacity
            .map_or(false, |capacity| self.entries.len() >= capacity);

        match self.entries.entry(hash) {
            Entry::Occupied(mut slot) => {
                let existing = slot.get();
                if existing.key == key || depth >= existing.depth {
                    slot.insert(TTEntry {
                        key: key.to_owned(),
                        depth,
                        score,
                        bound_type,
                    });
                }
            }
            Entry::Vacant(slot) => {
                if !full {
                    slot.insert(TTEntry {
                        key: key.to_owned(),
                        depth,
                        score,
                        bound_type,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";
    const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq -";

    #[test]
    fn test_store_and_get() {
        let mut tt = TranspositionTable::new();
        tt.put(START, 3, 25, BoundType::Exact);

        let entry = tt.get(START).expect("should find entry");
        assert_eq!(entry.depth(), 3);
        assert_eq!(entry.score(), 25);
        assert_eq!(entry.bound_type(), BoundType::Exact);
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn test_no_false_positives() {
        let mut tt = TranspositionTable::new();
        tt.put(START, 3, 25, BoundType::Exact);
        assert!(tt.get(AFTER_E4).is_none());
    }

    #[test]
    fn test_hash_collision_is_a_miss() {
        let mut tt = TranspositionTable::new();
        let hash = 0x1234_5678_9ABC_DEF0;
        tt.store(hash, START, 4, 10, BoundType::Exact);

        assert!(tt.probe(hash, AFTER_E4).is_none());
        assert!(tt.probe(hash, START).is_some());
    }

    #[test]
    fn test_collision_depth_preferred() {
        let mut tt = TranspositionTable::new();
        let hash = 42;
        tt.store(hash, START, 4, 10, BoundType::Exact);

        // Shallower result for another position does not evict
        tt.store(hash, AFTER_E4, 2, -5, BoundType::Exact);
        assert!(tt.probe(hash, START).is_some());

        // Deeper one does
        tt.store(hash, AFTER_E4, 5, -5, BoundType::Exact);
        assert!(tt.probe(hash, START).is_none());
        assert_eq!(tt.probe(hash, AFTER_E4).map(TTEntry::depth), Some(5));
    }

    #[test]
    fn test_same_key_always_replaced() {
        let mut tt = TranspositionTable::new();
        tt.put(START, 6, 40, BoundType::LowerBound);
        tt.put(START, 1, 12, BoundType::Exact);

        let entry = tt.get(START).expect("entry");
        assert_eq!(entry.depth(), 1);
        assert_eq!(entry.score(), 12);
    }

    #[test]
    fn test_capacity_drops_new_positions() {
        let mut tt = TranspositionTable::with_capacity(1);
        tt.put(START, 1, 0, BoundType::Exact);
        tt.put(AFTER_E4, 1, 0, BoundType::Exact);

        assert_eq!(tt.len(), 1);
        assert!(tt.get(AFTER_E4).is_none());

        // Updating a stored position still works when full
        tt.put(START, 2, 7, BoundType::Exact);
        assert_eq!(tt.get(START).map(TTEntry::score), Some(7));
    }

    #[test]
    fn test_clear() {
        let mut tt = TranspositionTable::new();
        tt.put(START, 1, 0, BoundType::Exact);
        tt.clear();
        assert!(tt.is_empty());
        assert!(tt.get(START).is_none());
    }

    #[test]
    fn test_bound_cuts() {
        assert!(BoundType::Exact.cuts(5, 10, 20));
        assert!(BoundType::LowerBound.cuts(50, 0, 40));
        assert!(!BoundType::LowerBound.cuts(50, 0, 60));
        assert!(BoundType::UpperBound.cuts(-20, -10, 10));
        assert!(!BoundType::UpperBound.cuts(-20, -30, 10));
    }

    #[test]
    fn test_classify() {
        assert_eq!(BoundType::classify(-5, 0, 10), BoundType::UpperBound);
        assert_eq!(BoundType::classify(0, 0, 10), BoundType::UpperBound);
        assert_eq!(BoundType::classify(5, 0, 10), BoundType::Exact);
        assert_eq!(BoundType::classify(10, 0, 10), BoundType::LowerBound);
    }
}
