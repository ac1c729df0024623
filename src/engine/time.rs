//! Time management for the UCI `go` command: turns wtime/btime/winc/binc
//! (or a fixed movetime, or an unlimited search) into a hard deadline and
//! a soft "stop starting new iterations" deadline for iterative deepening.

use std::time::{Duration, Instant};

use crate::types::Color;

/// Lower bound on any computed per-move allocation, so a near-flagged
/// clock still gets one short iteration instead of zero.
const MIN_PER_MOVE_MS: u64 = 10;
/// Fraction of the per-move budget spent before iterative deepening
/// declines to start another depth.
const SOFT_BUDGET_FRACTION: f64 = 0.70;
/// Fraction of the remaining clock a single move may claim at most.
const MAX_CLOCK_FRACTION: f64 = 0.80;
/// `moves_to_go` estimate floor used once the game runs long.
const MIN_MOVES_TO_GO: u32 = 7;
/// `moves_to_go` estimate ceiling used near the start of the game.
const MAX_MOVES_TO_GO: u32 = 50;
/// Ply budget consumed by the linear portion of the moves-to-go estimate.
const MOVES_TO_GO_PLY_CAP: u32 = 43;

/// The subset of a UCI `go` command's parameters the time manager (and the
/// engine wrapper's root-move restriction) needs.
#[derive(Clone, Debug, Default)]
pub struct GoParams {
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub movestogo: Option<u64>,
    pub movetime: Option<u64>,
    pub depth: Option<u8>,
    pub nodes: Option<u64>,
    pub infinite: bool,
    /// UCI long-algebraic notation for `searchmoves`, resolved against the
    /// current position (and restricted to legal moves) by `Engine::go`.
    pub search_moves: Vec<String>,
}

/// The deadlines handed to `search::SearchLimits`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeBudget {
    pub deadline: Option<Instant>,
    pub soft_deadline: Option<Instant>,
}

/// Compute a search's time budget from `go` parameters and the clock
/// side to move. `ply` is the position's current ply (used for the
/// moves-to-go estimate); `move_overhead` is the `Move Overhead` UCI
/// option, subtracted from the clock before any other arithmetic.
#[must_use]
pub fn compute_budget(go: &GoParams, side: Color, ply: u32, move_overhead: Duration, now: Instant) -> TimeBudget {
    if go.infinite || go.depth.is_some() || go.nodes.is_some() {
        return TimeBudget { deadline: None, soft_deadline: None };
    }

    if let Some(movetime_ms) = go.movetime {
        let overhead_ms = move_overhead.as_millis() as u64;
        let budget_ms = movetime_ms.saturating_sub(overhead_ms).max(MIN_PER_MOVE_MS);
        let deadline = now + Duration::from_millis(budget_ms);
        return TimeBudget { deadline: Some(deadline), soft_deadline: Some(deadline) };
    }

    let (clock_ms, inc_ms) = match side {
        Color::White => (go.wtime.unwrap_or(0), go.winc.unwrap_or(0)),
        Color::Black => (go.btime.unwrap_or(0), go.binc.unwrap_or(0)),
    };
    let overhead_ms = move_overhead.as_millis() as u64;
    let safe_clock_ms = clock_ms.saturating_sub(overhead_ms);
    let time_left_ms = safe_clock_ms.saturating_add(inc_ms);

    let moves_to_go = go.movestogo.unwrap_or_else(|| estimate_moves_to_go(ply)).max(1);
    let per_move_fraction = (time_left_ms as f64 * MAX_CLOCK_FRACTION) as u64;
    let per_move_share = time_left_ms / moves_to_go;
    let per_move_ms = per_move_fraction.min(per_move_share).max(MIN_PER_MOVE_MS);

    let deadline = now + Duration::from_millis(per_move_ms);
    let soft_ms = ((per_move_ms as f64) * SOFT_BUDGET_FRACTION) as u64;
    let soft_deadline = now + Duration::from_millis(soft_ms.max(1));

    TimeBudget { deadline: Some(deadline), soft_deadline: Some(soft_deadline) }
}

/// `max(50 - min(ply/2, 43), 7)`: assume a long middlegame early on, and
/// narrow the estimate as the game (and the clock) wears on.
fn estimate_moves_to_go(ply: u32) -> u64 {
    let decay = (ply / 2).min(MOVES_TO_GO_PLY_CAP);
    u64::from(MAX_MOVES_TO_GO.saturating_sub(decay).max(MIN_MOVES_TO_GO))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infinite_search_has_no_deadline() {
        let go = GoParams { infinite: true, ..Default::default() };
        let budget = compute_budget(&go, Color::White, 0, Duration::ZERO, Instant::now());
        assert!(budget.deadline.is_none());
        assert!(budget.soft_deadline.is_none());
    }

    #[test]
    fn depth_limited_search_has_no_deadline() {
        let go = GoParams { depth: Some(6), ..Default::default() };
        let budget = compute_budget(&go, Color::White, 0, Duration::ZERO, Instant::now());
        assert!(budget.deadline.is_none());
    }

    #[test]
    fn movetime_is_used_directly_minus_overhead() {
        let now = Instant::now();
        let go = GoParams { movetime: Some(1000), ..Default::default() };
        let budget = compute_budget(&go, Color::White, 10, Duration::from_millis(50), now);
        let deadline = budget.deadline.unwrap();
        let elapsed = deadline.saturating_duration_since(now);
        assert_eq!(elapsed, Duration::from_millis(950));
    }

    #[test]
    fn increment_based_budget_respects_the_eighty_percent_cap() {
        let now = Instant::now();
        let go = GoParams { wtime: Some(1000), winc: Some(0), movestogo: Some(1), ..Default::default() };
        let budget = compute_budget(&go, Color::White, 0, Duration::ZERO, now);
        let elapsed = budget.deadline.unwrap().saturating_duration_since(now);
        assert!(elapsed <= Duration::from_millis(800));
    }

    #[test]
    fn low_time_never_drops_below_the_floor() {
        let now = Instant::now();
        let go = GoParams { wtime: Some(1), winc: Some(0), ..Default::default() };
        let budget = compute_budget(&go, Color::White, 0, Duration::ZERO, now);
        let elapsed = budget.deadline.unwrap().saturating_duration_since(now);
        assert!(elapsed >= Duration::from_millis(MIN_PER_MOVE_MS));
    }
}
