//! Transposition Table
//!
//! A bucketed hash table of previously searched positions. Each bucket
//! holds four entries; replacement prefers slots from older searches, then
//! shallower ones. Mate scores are stored relative to the mated node and
//! shifted by ply on the way in and out.

use crate::core::moves::Move;
use crate::engine::search::types::{EVAL_MAX, EVAL_MIN};

/// Number of buckets in the table.
pub const TT_BUCKETS: usize = 500_000;
/// Entries per bucket.
pub const TT_WAYS: usize = 4;

/// Entry type in the transposition table
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum TTFlag {
    /// Exact score
    Exact = 0,
    /// Lower bound (beta cutoff)
    LowerBound = 1,
    /// Upper bound (failed low)
    UpperBound = 2,
}

/// A single entry in the transposition table
#[derive(Clone, Copy)]
pub struct TTEntry {
    /// Zobrist hash key (for verification)
    pub key: u64,
    /// Search depth the value was computed at
    pub depth: i32,
    /// Value, mate scores relative to the mated node
    pub value: i32,
    /// Best move found, if any
    pub best_move: Option<Move>,
    /// Search generation the entry was last touched in
    pub generation: u8,
    /// Entry type
    pub flag: TTFlag,
}

impl TTEntry {
    pub const EMPTY: TTEntry = TTEntry {
        key: 0,
        depth: 0,
        value: 0,
        best_move: None,
        generation: 0,
        flag: TTFlag::Exact,
    };
}

/// Shift a value into table form: mate scores become relative to the node.
#[inline]
pub fn value_to_table(value: i32, ply: i32) -> i32 {
    if value > EVAL_MAX {
        value + ply
    } else if value < EVAL_MIN {
        value - ply
    } else {
        value
    }
}

/// Shift a stored value back into search form at the probing node's ply.
#[inline]
pub fn value_from_table(value: i32, ply: i32) -> i32 {
    if value > EVAL_MAX {
        value - ply
    } else if value < EVAL_MIN {
        value + ply
    } else {
        value
    }
}

/// Transposition table
pub struct TranspositionTable {
    entries: Vec<TTEntry>,
    buckets: usize,
    generation: u8,
}

impl TranspositionTable {
    /// Create a table with the standard bucket count.
    pub fn new() -> Self {
        Self::with_buckets(TT_BUCKETS)
    }

    /// Create a table with a custom bucket count (tests use small tables).
    pub fn with_buckets(buckets: usize) -> Self {
        TranspositionTable {
            entries: vec![TTEntry::EMPTY; buckets * TT_WAYS],
            buckets,
            generation: 0,
        }
    }

    /// First entry index of the bucket for a key.
    #[inline]
    fn bucket(&self, key: u64) -> usize {
        (key % self.buckets as u64) as usize * TT_WAYS
    }

    /// Increment the generation counter (call at the start of each search)
    pub fn new_search(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Probe for an entry searched at least as deeply as `depth`. A hit is
    /// re-stamped with the current generation.
    pub fn probe(&mut self, key: u64, depth: i32) -> Option<TTEntry> {
        let base = self.bucket(key);
        let generation = self.generation;
        for entry in &mut self.entries[base..base + TT_WAYS] {
            if entry.key == key && entry.depth >= depth {
                entry.generation = generation;
                return Some(*entry);
            }
        }
        None
    }

    /// Store a search result. A slot already holding this key is reused,
    /// keeping its best move when the caller has none; otherwise the
    /// stalest, then shallowest slot is evicted.
    pub fn store(
        &mut self,
        key: u64,
        depth: i32,
        value: i32,
        ply: i32,
        flag: TTFlag,
        best_move: Option<Move>,
    ) {
        let base = self.bucket(key);
        let generation = self.generation;

        let mut slot = None;
        for i in 0..TT_WAYS {
            if self.entries[base + i].key == key {
                slot = Some(i);
                break;
            }
        }
        let best_move = match slot {
            Some(i) if best_move.is_none() => self.entries[base + i].best_move,
            _ => best_move,
        };
        let slot = slot.unwrap_or_else(|| {
            let mut victim = 0;
            let mut victim_rank = (0u8, i32::MAX);
            for i in 0..TT_WAYS {
                let entry = &self.entries[base + i];
                let staleness = generation.wrapping_sub(entry.generation);
                if staleness > victim_rank.0
                    || (staleness == victim_rank.0 && entry.depth < victim_rank.1)
                {
                    victim = i;
                    victim_rank = (staleness, entry.depth);
                }
            }
            victim
        });

        self.entries[base + slot] = TTEntry {
            key,
            depth,
            value: value_to_table(value, ply),
            best_move,
            generation,
            flag,
        };
    }

    /// Clear the table
    pub fn clear(&mut self) {
        self.entries.fill(TTEntry::EMPTY);
        self.generation = 0;
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
