//! Property-based tests over random move sequences: make/unmake symmetry,
//! incremental Zobrist consistency, and bitboard/mailbox agreement.

use proptest::prelude::*;
use rand::prelude::*;

use super::Position;
use crate::movegen::generate_legal_moves;

fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=40usize
}

proptest! {
    /// make_move followed by unmake_move restores the position exactly:
    /// same FEN, same ply, same zobrist key.
    #[test]
    fn prop_make_unmake_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut pos = Position::startpos();
        let mut rng = StdRng::seed_from_u64(seed);

        let initial_fen = pos.to_fen();
        let initial_zobrist = pos.zobrist();
        let initial_ply = pos.ply();

        let mut played = 0;
        for _ in 0..num_moves {
            let moves = generate_legal_moves(&mut pos);
            if moves.is_empty() {
                break;
            }
            let idx = rng.gen_range(0..moves.len());
            let mv = moves.as_slice()[idx];
            pos.make_move(mv);
            played += 1;
        }

        for _ in 0..played {
            pos.unmake_move();
        }

        prop_assert_eq!(pos.to_fen(), initial_fen);
        prop_assert_eq!(pos.zobrist(), initial_zobrist);
        prop_assert_eq!(pos.ply(), initial_ply);
    }

    /// The incrementally maintained Zobrist key always agrees with a
    /// from-scratch recompute, after every move in a random line.
    #[test]
    fn prop_zobrist_matches_recompute(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut pos = Position::startpos();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let moves = generate_legal_moves(&mut pos);
            if moves.is_empty() {
                break;
            }
            let idx = rng.gen_range(0..moves.len());
            let mv = moves.as_slice()[idx];
            pos.make_move(mv);
            prop_assert_eq!(pos.zobrist(), pos.recompute_zobrist());
        }
    }

    /// Piece bitboards, the per-color union, the combined occupancy, and
    /// the mailbox never disagree about where a piece sits.
    #[test]
    fn prop_bitboards_and_mailbox_agree(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut pos = Position::startpos();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let moves = generate_legal_moves(&mut pos);
            if moves.is_empty() {
                break;
            }
            let idx = rng.gen_range(0..moves.len());
            let mv = moves.as_slice()[idx];
            pos.make_move(mv);

            let mut union = 0u64;
            for &color in &[crate::types::Color::White, crate::types::Color::Black] {
                let mut color_union = 0u64;
                for &piece in &crate::types::ALL_PIECES {
                    let bb = pos.piece_bb(color, piece);
                    prop_assert_eq!(bb & union, 0, "piece bitboards overlap");
                    color_union |= bb;
                }
                prop_assert_eq!(color_union, pos.color_bb(color));
                union |= color_union;
            }
            prop_assert_eq!(union, pos.occupied());

            for sq in 0..64u8 {
                let sq = crate::types::Square::new(sq);
                match pos.piece_at(sq) {
                    Some((color, piece)) => {
                        prop_assert_ne!(pos.piece_bb(color, piece) & (1u64 << sq.index()), 0);
                    }
                    None => {
                        prop_assert_eq!(pos.occupied() & (1u64 << sq.index()), 0);
                    }
                }
            }
        }
    }
}
