//! Perft (performance test): recursive legal-move counting used to
//! validate the move generator.

use super::Position;
use crate::movegen::generate_legal_moves;
use crate::moves::Move;

impl Position {
    /// Count leaf positions reachable in exactly `depth` plies.
    #[must_use]
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = generate_legal_moves(self);
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0u64;
        for &mv in &moves {
            self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.unmake_move();
        }
        nodes
    }

    /// Per-root-move breakdown ("divide") backing the `perft` UCI command.
    #[must_use]
    pub fn perft_divide(&mut self, depth: u32) -> Vec<(Move, u64)> {
        let moves = generate_legal_moves(self);
        let mut out = Vec::with_capacity(moves.len());
        for &mv in &moves {
            self.make_move(mv);
            let nodes = if depth == 0 { 1 } else { self.perft(depth - 1) };
            self.unmake_move();
            out.push((mv, nodes));
        }
        out
    }
}
