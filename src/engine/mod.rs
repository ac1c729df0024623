//! Engine wrapper: the glue around the search core that a UCI front-end
//! talks to. Owns the single `Position`, the transposition table, the
//! killer/counter/history side tables, the UCI-visible options, and the
//! game's hash history (for threefold detection); exposes one small
//! contract: `set_position`, `make_uci_move`, `go`, `perft`, `stop`.
//!
//! The engine itself never spawns a thread. `go` runs the search to
//! completion on the calling thread; a caller that wants it backgrounded
//! (the UCI command loop, in `crate::uci`) spawns its own worker and
//! signals abort through the `Arc<AtomicBool>` returned by `stop_flag`.

pub mod options;
pub mod time;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::moves::Move;
use crate::position::error::FenError;
use crate::position::Position;
use crate::search::{iterative_deepening, OrderingTables, SearchLimits, SearchReport};
use crate::tt::TranspositionTable;

pub use options::{OptionChange, UciOptions};
pub use time::{compute_budget, GoParams};

/// Depth cap used for searches with no `depth` parameter and no time
/// limit (`go infinite`, `go nodes ...`): iterative deepening still stops
/// somewhere short of `MAX_PLY` so a node-limited search terminates.
const UNBOUNDED_SEARCH_DEPTH: u8 = 64;

/// Errors that can surface at the UCI boundary: malformed FEN or an
/// illegal/unparseable move string. Never a panic, never a process exit;
/// the caller drops the command and the engine state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    Fen(FenError),
    IllegalMove(crate::position::error::MoveParseError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Fen(e) => write!(f, "{e}"),
            EngineError::IllegalMove(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<FenError> for EngineError {
    fn from(e: FenError) -> Self {
        EngineError::Fen(e)
    }
}

impl From<crate::position::error::MoveParseError> for EngineError {
    fn from(e: crate::position::error::MoveParseError) -> Self {
        EngineError::IllegalMove(e)
    }
}

pub struct Engine {
    position: Position,
    tt: TranspositionTable,
    tables: OrderingTables,
    /// Zobrist key of every position reached so far in the real game
    /// (startpos/FEN plus every move played through `make_uci_move`),
    /// including the current position. Search extends this with its own
    /// line while descending and pops back out on unmake, so repetition
    /// checks see game history plus the current search path, not just
    /// moves played before the search started.
    game_history: Vec<u64>,
    options: UciOptions,
    stop: Arc<AtomicBool>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        let position = Position::startpos();
        let options = UciOptions::default();
        Engine {
            tt: TranspositionTable::with_size_mb(options.hash_mb),
            tables: OrderingTables::new(crate::position::MAX_PLY),
            game_history: vec![position.zobrist()],
            position,
            options,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[must_use]
    pub fn options(&self) -> &UciOptions {
        &self.options
    }

    /// A clone of the cooperative stop flag, shared with whatever thread
    /// runs `go`; setting it requests abort. No mutex is involved: the
    /// flag is a bare `Arc<AtomicBool>` with release/acquire semantics.
    #[must_use]
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// `position startpos`.
    pub fn set_startpos(&mut self) {
        self.position = Position::startpos();
        self.game_history = vec![self.position.zobrist()];
    }

    /// `position fen <6-field FEN>`. Malformed FEN is reported and the
    /// previous position is left untouched.
    pub fn set_position(&mut self, fen: &str) -> Result<(), EngineError> {
        let position = Position::from_fen(fen)?;
        self.game_history = vec![position.zobrist()];
        self.position = position;
        Ok(())
    }

    /// Apply one `moves` token after `position`. Stops at (and reports)
    /// the first illegal move; the caller is expected to stop feeding
    /// further tokens on error.
    pub fn make_uci_move(&mut self, notation: &str) -> Result<Move, EngineError> {
        let mv = crate::movegen::parse_uci_move(&mut self.position, notation)?;
        self.position.make_move(mv);
        self.game_history.push(self.position.zobrist());
        Ok(mv)
    }

    /// `ucinewgame`: clear the TT and all move-ordering side tables.
    pub fn new_game(&mut self) {
        self.tt.clear();
        self.tables.clear();
    }

    /// `setoption name <id> [value <v>]`.
    pub fn apply_option(&mut self, name: &str, value: Option<&str>) {
        if self.options.apply(name, value) == OptionChange::HashResized {
            #[cfg(feature = "logging")]
            log::info!("resizing transposition table to {} MB", self.options.hash_mb);
            self.tt = TranspositionTable::with_size_mb(self.options.hash_mb);
        }
    }

    /// `perft <depth>`.
    pub fn perft(&mut self, depth: u32) -> u64 {
        self.position.perft(depth)
    }

    /// `perft <depth>`'s root-level "divide" breakdown.
    pub fn perft_divide(&mut self, depth: u32) -> Vec<(Move, u64)> {
        self.position.perft_divide(depth)
    }

    /// `stop`: request the running (or next) search to abort. Cooperative,
    /// observed within ≤2048 nodes.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// `go <params>`: run iterative deepening to completion (bounded by
    /// the computed time budget, a depth cap, or a node budget) on the
    /// calling thread, returning the deepest *completed* iteration.
    /// `on_iteration` is invoked once per completed depth for `info`
    /// reporting.
    pub fn go(&mut self, go_params: &GoParams, on_iteration: impl FnMut(&SearchReport)) -> SearchReport {
        self.stop.store(false, Ordering::Relaxed);
        let now = Instant::now();
        let budget = compute_budget(go_params, self.position.side_to_move(), self.position.ply() as u32, self.options.move_overhead, now);
        let max_depth = go_params.depth.unwrap_or(UNBOUNDED_SEARCH_DEPTH);
        let root_moves = self.resolve_search_moves(&go_params.search_moves);
        let limits = SearchLimits {
            max_depth,
            max_nodes: go_params.nodes,
            deadline: budget.deadline,
            soft_deadline: budget.soft_deadline,
            root_moves,
        };
        iterative_deepening(
            &mut self.position,
            &mut self.tt,
            &mut self.tables,
            &mut self.game_history,
            &self.stop,
            limits,
            on_iteration,
        )
    }

    /// Resolve UCI `searchmoves` notation against the current position,
    /// dropping any token that doesn't parse to a legal move. `None` (not
    /// just an empty vec) means "no restriction" so a `searchmoves` line
    /// that resolves to nothing doesn't starve the search of every root
    /// move.
    fn resolve_search_moves(&mut self, notations: &[String]) -> Option<Vec<Move>> {
        if notations.is_empty() {
            return None;
        }
        let moves: Vec<Move> =
            notations.iter().filter_map(|s| crate::movegen::parse_uci_move(&mut self.position, s).ok()).collect();
        if moves.is_empty() {
            None
        } else {
            Some(moves)
        }
    }
}
