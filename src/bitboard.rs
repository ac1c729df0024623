//! Bitwise primitives over 64-bit boards.
//!
//! A bitboard is a `u64` where bit `i` represents square `i` (`rank * 8 +
//! file`, a1 = 0, h8 = 63). Everything here is a thin, inlined wrapper
//! around the handful of operations move generation actually needs:
//! population count, bit-scans, single-step compass shifts clamped to the
//! board edge, and the file/rank masks those shifts are built from.

pub type Bitboard = u64;

pub const FILE_A: Bitboard = 0x0101_0101_0101_0101;
pub const FILE_H: Bitboard = FILE_A << 7;
pub const NOT_A: Bitboard = !FILE_A;
pub const NOT_H: Bitboard = !FILE_H;
pub const NOT_AB: Bitboard = !(FILE_A | (FILE_A << 1));
pub const NOT_GH: Bitboard = !(FILE_H | (FILE_H >> 1));

pub const RANK_1: Bitboard = 0x0000_0000_0000_00FF;
pub const RANK_2: Bitboard = RANK_1 << 8;
pub const RANK_3: Bitboard = RANK_1 << 16;
pub const RANK_4: Bitboard = RANK_1 << 24;
pub const RANK_5: Bitboard = RANK_1 << 32;
pub const RANK_6: Bitboard = RANK_1 << 40;
pub const RANK_7: Bitboard = RANK_1 << 48;
pub const RANK_8: Bitboard = RANK_1 << 56;

/// Population count (number of set bits).
#[inline(always)]
#[must_use]
pub fn pop_count(bb: Bitboard) -> u32 {
    bb.count_ones()
}

/// Index of the least significant set bit. Undefined (returns 64) for zero.
#[inline(always)]
#[must_use]
pub fn bit_scan_forward(bb: Bitboard) -> u32 {
    bb.trailing_zeros()
}

/// Index of the most significant set bit. Undefined (returns 64) for zero.
#[inline(always)]
#[must_use]
pub fn bit_scan_reverse(bb: Bitboard) -> u32 {
    63 - bb.leading_zeros()
}

/// Clears and returns the index of the least significant set bit.
#[inline(always)]
pub fn pop_lsb(bb: &mut Bitboard) -> u32 {
    let idx = bit_scan_forward(*bb);
    *bb &= *bb - 1;
    idx
}

#[inline(always)]
#[must_use]
pub fn square_bb(sq: u8) -> Bitboard {
    1u64 << sq
}

/// The eight compass directions used by leaper/slider ray generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

/// Single-step shift in a compass direction, discarding bits that would
/// wrap across a file edge.
#[inline(always)]
#[must_use]
pub fn shift_one(bb: Bitboard, dir: Direction) -> Bitboard {
    match dir {
        Direction::North => bb << 8,
        Direction::South => bb >> 8,
        Direction::East => (bb << 1) & NOT_A,
        Direction::West => (bb >> 1) & NOT_H,
        Direction::NorthEast => (bb << 9) & NOT_A,
        Direction::NorthWest => (bb << 7) & NOT_H,
        Direction::SouthEast => (bb >> 7) & NOT_A,
        Direction::SouthWest => (bb >> 9) & NOT_H,
    }
}
