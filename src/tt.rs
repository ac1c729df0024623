//! Transposition table: depth-and-age replacement, mate-distance
//! adjustment on store/probe. Bucket count is tunable and sized from
//! the UCI `Hash` option rather than fixed at compile time.

use std::mem;

use crate::moves::Move;

pub const MATE_VALUE: i32 = 30_000;
/// Scores at or beyond this magnitude are mate scores and need
/// distance-to-mate adjustment when crossing the TT boundary.
const MATE_THRESHOLD: i32 = MATE_VALUE - 1000;

const BUCKET_WAYS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy, Debug)]
struct TTEntry {
    key: u64,
    depth: i16,
    score: i32,
    bound: Bound,
    best_move: Move,
    age: u16,
}

/// Outcome of a probe: either a usable cutoff score, or a move to try
/// first even when the stored depth isn't deep enough to trust the score.
pub struct ProbeResult {
    pub cutoff: Option<i32>,
    pub best_move: Option<Move>,
}

pub struct TranspositionTable {
    table: Vec<[Option<TTEntry>; BUCKET_WAYS]>,
    mask: usize,
    age: u16,
}

fn to_tt_score(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score + ply as i32
    } else if score <= -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

fn from_tt_score(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score - ply as i32
    } else if score <= -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

impl TranspositionTable {
    #[must_use]
    pub fn with_size_mb(size_mb: usize) -> Self {
        let entry_size = mem::size_of::<[Option<TTEntry>; BUCKET_WAYS]>();
        let mut num_buckets = (size_mb.max(1) * 1024 * 1024) / entry_size.max(1);
        num_buckets = num_buckets.next_power_of_two();
        if num_buckets == 0 {
            num_buckets = 1024;
        }
        TranspositionTable {
            table: vec![[None; BUCKET_WAYS]; num_buckets],
            mask: num_buckets - 1,
            age: 0,
        }
    }

    /// Discard all entries and start a fresh age, as `ucinewgame` requires.
    pub fn clear(&mut self) {
        for bucket in &mut self.table {
            *bucket = [None; BUCKET_WAYS];
        }
        self.age = 0;
    }

    /// Advance the replacement generation. Called once per `go` so stale
    /// entries from earlier searches lose ties against fresh ones.
    pub fn new_search(&mut self) {
        self.age = self.age.wrapping_add(1);
    }

    fn index(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    #[must_use]
    pub fn probe(&self, key: u64, ply: usize, depth: i16, alpha: i32, beta: i32) -> ProbeResult {
        let bucket = &self.table[self.index(key)];
        let Some(entry) = bucket.iter().flatten().find(|e| e.key == key) else {
            return ProbeResult { cutoff: None, best_move: None };
        };
        let score = from_tt_score(entry.score, ply);
        let best_move = if entry.best_move.is_null() { None } else { Some(entry.best_move) };

        if entry.depth < depth {
            return ProbeResult { cutoff: None, best_move };
        }
        let cutoff = match entry.bound {
            Bound::Exact => Some(score),
            Bound::Lower if score >= beta => Some(beta),
            Bound::Upper if score <= alpha => Some(alpha),
            _ => None,
        };
        ProbeResult { cutoff, best_move }
    }

    pub fn store(&mut self, key: u64, ply: usize, depth: i16, score: i32, bound: Bound, best_move: Option<Move>) {
        let stored_score = to_tt_score(score, ply);
        let entry = TTEntry {
            key,
            depth,
            score: stored_score,
            bound,
            best_move: best_move.unwrap_or(Move::NULL),
            age: self.age,
        };
        let index = self.index(key);
        let bucket = &mut self.table[index];

        let mut replace_idx = 0;
        let mut worst_priority = i32::MAX;
        for (idx, slot) in bucket.iter().enumerate() {
            match slot {
                None => {
                    replace_idx = idx;
                    worst_priority = i32::MIN;
                    break;
                }
                Some(existing) if existing.key == key => {
                    replace_idx = idx;
                    worst_priority = i32::MIN;
                    break;
                }
                Some(existing) => {
                    let age_penalty = self.age.wrapping_sub(existing.age) as i32;
                    let priority = existing.depth as i32 - age_penalty * 32;
                    if priority < worst_priority {
                        worst_priority = priority;
                        replace_idx = idx;
                    }
                }
            }
        }
        bucket[replace_idx] = Some(entry);
    }

    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        let sample = self.table.len().min(1000).max(1);
        let filled: usize = self.table[..sample].iter().map(|b| b.iter().flatten().count()).sum();
        ((filled as u64 * 1000) / (sample * BUCKET_WAYS) as u64) as u32
    }
}
