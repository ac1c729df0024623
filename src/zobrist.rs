//! Zobrist hashing constants: a seeded, deterministic set of 781 random
//! 64-bit keys (12x64 piece-square, 1 side-to-move, 4 castling, 8
//! en-passant file), initialized once and read-only thereafter.

use std::sync::LazyLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{CastlingRights, Color, Piece, Square};

/// Fixed seed so runs (and tests) are reproducible.
const ZOBRIST_SEED: u64 = 0x5EED_CAFE_BABE_F00D;

pub struct ZobristKeys {
    /// `piece_square[color][piece][square]`
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    /// Indexed by the four `CastlingRights` bit positions (0..4).
    castling: [u64; 4],
    en_passant_file: [u64; 8],
}

impl ZobristKeys {
    fn generate() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut piece_square = [[[0u64; 64]; 6]; 2];
        for color in piece_square.iter_mut() {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }
        let side_to_move = rng.gen();
        let mut castling = [0u64; 4];
        for key in castling.iter_mut() {
            *key = rng.gen();
        }
        let mut en_passant_file = [0u64; 8];
        for key in en_passant_file.iter_mut() {
            *key = rng.gen();
        }
        ZobristKeys { piece_square, side_to_move, castling, en_passant_file }
    }

    #[inline(always)]
    #[must_use]
    pub fn piece_square(&self, color: Color, piece: Piece, sq: Square) -> u64 {
        self.piece_square[color.index()][piece.index()][sq.index()]
    }

    #[inline(always)]
    #[must_use]
    pub fn side_to_move(&self) -> u64 {
        self.side_to_move
    }

    /// `bit` is one of `CastlingRights::{WHITE_KING, WHITE_QUEEN, ...}`.
    #[inline(always)]
    #[must_use]
    pub fn castling_bit(&self, bit: u8) -> u64 {
        self.castling[bit.trailing_zeros() as usize]
    }

    /// XOR the key for every castling right that differs between `a` and `b`.
    #[must_use]
    pub fn castling_diff(&self, a: CastlingRights, b: CastlingRights) -> u64 {
        let mut key = 0u64;
        let changed = a.0 ^ b.0;
        for bit in [
            CastlingRights::WHITE_KING,
            CastlingRights::WHITE_QUEEN,
            CastlingRights::BLACK_KING,
            CastlingRights::BLACK_QUEEN,
        ] {
            if changed & bit != 0 {
                key ^= self.castling_bit(bit);
            }
        }
        key
    }

    #[inline(always)]
    #[must_use]
    pub fn en_passant_file(&self, file: u8) -> u64 {
        self.en_passant_file[file as usize]
    }
}

pub static ZOBRIST: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::generate);
