//! Precomputed attack tables: leaper tables (pawn/knight/king) built
//! directly, and magic-bitboard perfect-hash tables for the sliding
//! pieces (bishop/rook; queen is the union of both).
//!
//! Magic numbers are searched for at process start with a seeded PRNG:
//! for each square, random sparse 64-bit candidates are tried until one
//! produces an injective map from relevant-blocker subsets to table
//! slots.

use std::sync::LazyLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bitboard::{pop_count, Bitboard, NOT_A, NOT_AB, NOT_GH, NOT_H};
use crate::types::{Color, Square};

const MAGIC_SEARCH_SEED: u64 = 0x1337_F00D_5EED_0001;

fn pop_lsb(bb: &mut Bitboard) -> u32 {
    let idx = bb.trailing_zeros();
    *bb &= *bb - 1;
    idx
}

// ---------------------------------------------------------------- leapers

fn pawn_attacks_from(sq: u8, color: Color) -> Bitboard {
    let bb = 1u64 << sq;
    match color {
        Color::White => ((bb << 9) & NOT_A) | ((bb << 7) & NOT_H),
        Color::Black => ((bb >> 9) & NOT_H) | ((bb >> 7) & NOT_A),
    }
}

fn knight_attacks_from(sq: u8) -> Bitboard {
    let bb = 1u64 << sq;
    let mut attacks = 0u64;
    attacks |= (bb << 17) & NOT_A;
    attacks |= (bb << 15) & NOT_H;
    attacks |= (bb << 10) & NOT_AB;
    attacks |= (bb << 6) & NOT_GH;
    attacks |= (bb >> 17) & NOT_H;
    attacks |= (bb >> 15) & NOT_A;
    attacks |= (bb >> 10) & NOT_GH;
    attacks |= (bb >> 6) & NOT_AB;
    attacks
}

fn king_attacks_from(sq: u8) -> Bitboard {
    let bb = 1u64 << sq;
    let mut attacks = 0u64;
    attacks |= (bb << 8) | (bb >> 8);
    attacks |= (bb << 1) & NOT_A;
    attacks |= (bb >> 1) & NOT_H;
    attacks |= (bb << 9) & NOT_A;
    attacks |= (bb << 7) & NOT_H;
    attacks |= (bb >> 7) & NOT_A;
    attacks |= (bb >> 9) & NOT_H;
    attacks
}

pub static PAWN_ATTACKS: LazyLock<[[Bitboard; 64]; 2]> = LazyLock::new(|| {
    let mut table = [[0u64; 64]; 2];
    for sq in 0..64u8 {
        table[Color::White.index()][sq as usize] = pawn_attacks_from(sq, Color::White);
        table[Color::Black.index()][sq as usize] = pawn_attacks_from(sq, Color::Black);
    }
    table
});

pub static KNIGHT_ATTACKS: LazyLock<[Bitboard; 64]> = LazyLock::new(|| {
    let mut table = [0u64; 64];
    for (sq, slot) in table.iter_mut().enumerate() {
        *slot = knight_attacks_from(sq as u8);
    }
    table
});

pub static KING_ATTACKS: LazyLock<[Bitboard; 64]> = LazyLock::new(|| {
    let mut table = [0u64; 64];
    for (sq, slot) in table.iter_mut().enumerate() {
        *slot = king_attacks_from(sq as u8);
    }
    table
});

#[inline(always)]
#[must_use]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index()]
}

#[inline(always)]
#[must_use]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index()]
}

#[inline(always)]
#[must_use]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index()]
}

// ------------------------------------------------------------ slider rays

const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Ray-cast attacks in the given directions from `sq`, stopping at (and
/// including) the first occupied square in each direction.
fn ray_attacks(sq: u8, occupied: Bitboard, dirs: &[(i8, i8)]) -> Bitboard {
    let rank = (sq / 8) as i8;
    let file = (sq % 8) as i8;
    let mut attacks = 0u64;
    for &(dr, df) in dirs {
        let mut r = rank + dr;
        let mut f = file + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let idx = (r * 8 + f) as u8;
            attacks |= 1u64 << idx;
            if occupied & (1u64 << idx) != 0 {
                break;
            }
            r += dr;
            f += df;
        }
    }
    attacks
}

/// Diagonal relevant-occupancy mask: since both coordinates change
/// together, excluding rank/file 0 and 7 excludes exactly the edge
/// squares (where a blocker can't matter because there's nothing beyond).
fn relevant_mask(sq: u8, dirs: &[(i8, i8)]) -> Bitboard {
    let rank = (sq / 8) as i8;
    let file = (sq % 8) as i8;
    let mut mask = 0u64;
    for &(dr, df) in dirs {
        let mut r = rank + dr;
        let mut f = file + df;
        while (1..7).contains(&r) && (1..7).contains(&f) {
            let idx = (r * 8 + f) as u8;
            mask |= 1u64 << idx;
            r += dr;
            f += df;
        }
    }
    mask
}

/// Rook relevant-occupancy mask: only one coordinate moves per direction,
/// so the edge exclusion is computed by looking one step ahead rather than
/// a fixed (1..7) range on both axes.
fn rook_relevant_mask(sq: u8) -> Bitboard {
    let rank = (sq / 8) as i8;
    let file = (sq % 8) as i8;
    let mut mask = 0u64;
    for &(dr, df) in &ROOK_DIRS {
        let mut r = rank + dr;
        let mut f = file + df;
        loop {
            let next_r = r + dr;
            let next_f = f + df;
            if !(0..8).contains(&r) || !(0..8).contains(&f) {
                break;
            }
            if !(0..8).contains(&next_r) || !(0..8).contains(&next_f) {
                // `(r, f)` is the last square before running off the
                // board; it's an edge square for this ray and is excluded.
                break;
            }
            let idx = (r * 8 + f) as u8;
            mask |= 1u64 << idx;
            r = next_r;
            f = next_f;
        }
    }
    mask
}

fn bishop_relevant_mask(sq: u8) -> Bitboard {
    relevant_mask(sq, &BISHOP_DIRS)
}

/// Enumerate every subset of `mask`'s set bits (the Carry-Rippler trick).
fn subsets(mask: Bitboard) -> Vec<Bitboard> {
    let mut out = Vec::with_capacity(1 << pop_count(mask));
    let mut subset = 0u64;
    loop {
        out.push(subset);
        if subset == mask {
            break;
        }
        subset = subset.wrapping_sub(mask) & mask;
    }
    out
}

pub struct MagicEntry {
    mask: Bitboard,
    magic: u64,
    shift: u32,
    table: Vec<Bitboard>,
}

impl MagicEntry {
    #[inline(always)]
    fn index(&self, occupied: Bitboard) -> usize {
        let blockers = occupied & self.mask;
        ((blockers.wrapping_mul(self.magic)) >> self.shift) as usize
    }

    #[inline(always)]
    fn attacks(&self, occupied: Bitboard) -> Bitboard {
        self.table[self.index(occupied)]
    }
}

/// Search for a magic number that maps every subset of `mask` injectively
/// into a table of size `1 << popcount(mask)`, then build that table.
fn find_magic(sq: u8, mask: Bitboard, dirs: &[(i8, i8)], rng: &mut StdRng) -> MagicEntry {
    let bits = pop_count(mask);
    let shift = 64 - bits;
    let blocker_subsets = subsets(mask);
    let reference: Vec<Bitboard> = blocker_subsets.iter().map(|&b| ray_attacks(sq, b, dirs)).collect();

    loop {
        // Sparse random candidates (AND of three randoms) tend to hash
        // better for this construction than a single uniform random u64.
        let candidate: u64 = rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>();
        if pop_count(mask.wrapping_mul(candidate) >> 56) < 6 {
            continue;
        }

        let mut table = vec![u64::MAX; 1 << bits];
        let mut ok = true;
        for (blockers, &attack) in blocker_subsets.iter().zip(reference.iter()) {
            let idx = ((blockers.wrapping_mul(candidate)) >> shift) as usize;
            if table[idx] == u64::MAX {
                table[idx] = attack;
            } else if table[idx] != attack {
                ok = false;
                break;
            }
        }
        if ok {
            for slot in table.iter_mut() {
                if *slot == u64::MAX {
                    *slot = 0;
                }
            }
            return MagicEntry { mask, magic: candidate, shift, table };
        }
    }
}

pub struct MagicTables {
    bishop: Vec<MagicEntry>,
    rook: Vec<MagicEntry>,
}

impl MagicTables {
    fn generate() -> Self {
        let mut rng = StdRng::seed_from_u64(MAGIC_SEARCH_SEED);
        let mut bishop = Vec::with_capacity(64);
        let mut rook = Vec::with_capacity(64);
        for sq in 0..64u8 {
            bishop.push(find_magic(sq, bishop_relevant_mask(sq), &BISHOP_DIRS, &mut rng));
            rook.push(find_magic(sq, rook_relevant_mask(sq), &ROOK_DIRS, &mut rng));
        }
        #[cfg(feature = "logging")]
        log::debug!("magic bitboard tables generated for all 64 squares (bishop + rook)");
        MagicTables { bishop, rook }
    }

    #[inline(always)]
    #[must_use]
    pub fn bishop_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.bishop[sq.index()].attacks(occupied)
    }

    #[inline(always)]
    #[must_use]
    pub fn rook_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.rook[sq.index()].attacks(occupied)
    }

    #[inline(always)]
    #[must_use]
    pub fn queen_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.bishop_attacks(sq, occupied) | self.rook_attacks(sq, occupied)
    }
}

pub static MAGICS: LazyLock<MagicTables> = LazyLock::new(MagicTables::generate);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SliderKind {
    Bishop,
    Rook,
    Queen,
}

#[must_use]
pub fn sliding_attacks(kind: SliderKind, sq: Square, occupied: Bitboard) -> Bitboard {
    match kind {
        SliderKind::Bishop => MAGICS.bishop_attacks(sq, occupied),
        SliderKind::Rook => MAGICS.rook_attacks(sq, occupied),
        SliderKind::Queen => MAGICS.queen_attacks(sq, occupied),
    }
}
