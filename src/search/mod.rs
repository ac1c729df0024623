//! Iterative-deepening alpha-beta search: PVS, null-move pruning, late-move
//! reduction, quiescence with SEE-gated captures, and the transposition
//! table / killer / counter / history ordering that drives it.
//!
//! Split into `pvs` (the negamax core and iterative-deepening driver),
//! `quiescence` (the capture-only leaf extension), and `order` (move
//! scoring and the killer/counter/history tables), built around this
//! crate's packed `Move`, fixed-capacity `MoveList`, and a single-threaded
//! search with a cooperative stop flag / deadline instead of SMP.

mod order;
mod pvs;
mod quiescence;

pub use order::OrderingTables;
pub use pvs::{iterative_deepening, SearchContext, SearchLimits, SearchReport};
