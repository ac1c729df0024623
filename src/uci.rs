//! The UCI text protocol front-end: line parser, `option` advertisement,
//! and stdout writer around the `Engine` core.
//!
//! One background thread runs `go` at a time, holding the engine's mutex
//! for the search's entire duration. The lock is acquired once and
//! dropped once, never contended inside the hot loop, so ownership of
//! mutable state stays lexically tied to the search task for its
//! lifetime. The stop flag lives outside that mutex (a bare
//! `Arc<AtomicBool>`, so no mutex is required on the hot path): `stop`
//! can always flip it even while a search thread holds the engine lock.

use std::io::{self, BufRead, Write};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use parking_lot::Mutex;

use crate::engine::{Engine, GoParams};
use crate::search::SearchReport;

const ENGINE_NAME: &str = "staghorn";
const ENGINE_AUTHOR: &str = "staghorn contributors";

pub struct UciLoop {
    engine: Arc<Mutex<Engine>>,
    stop: Arc<std::sync::atomic::AtomicBool>,
    job: Option<JoinHandle<()>>,
}

impl Default for UciLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl UciLoop {
    #[must_use]
    pub fn new() -> Self {
        let engine = Engine::new();
        let stop = engine.stop_flag();
        UciLoop { engine: Arc::new(Mutex::new(engine)), stop, job: None }
    }

    /// Block on stdin, dispatching one UCI command per line until `quit`
    /// or EOF.
    pub fn run(&mut self) {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if !self.dispatch(&line) {
                break;
            }
            io::stdout().flush().ok();
        }
        self.join_search();
    }

    /// Handle one line; returns `false` when the loop should terminate
    /// (`quit`).
    fn dispatch(&mut self, line: &str) -> bool {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&cmd) = parts.first() else { return true };

        match cmd {
            "uci" => {
                println!("id name {ENGINE_NAME}");
                println!("id author {ENGINE_AUTHOR}");
                self.engine.lock().options().print_options();
                println!("uciok");
            }
            "isready" => {
                self.join_search();
                println!("readyok");
            }
            "ucinewgame" => {
                self.join_search();
                self.engine.lock().new_game();
            }
            "position" => {
                self.join_search();
                self.handle_position(&parts);
            }
            "go" => {
                self.join_search();
                self.handle_go(&parts);
            }
            "stop" => {
                self.stop.store(true, Ordering::Relaxed);
                self.join_search();
            }
            "ponderhit" | "debug" | "register" => {
                // No search-state change beyond whatever `stop` already
                // did; treated as no-ops.
            }
            "setoption" => {
                self.join_search();
                self.handle_setoption(&parts);
            }
            "perft" => {
                self.join_search();
                self.handle_perft(&parts);
            }
            "quit" => return false,
            _ => {
                eprintln!("info string unrecognized command '{cmd}'");
            }
        }
        true
    }

    fn handle_position(&mut self, parts: &[&str]) {
        let mut engine = self.engine.lock();
        let mut i = 1;
        match parts.get(i) {
            Some(&"startpos") => {
                engine.set_startpos();
                i += 1;
            }
            Some(&"fen") => {
                if parts.len() < i + 7 {
                    eprintln!("info string malformed FEN in position command");
                    return;
                }
                let fen = parts[i + 1..i + 7].join(" ");
                if let Err(e) = engine.set_position(&fen) {
                    eprintln!("info string {e}");
                    return;
                }
                i += 7;
            }
            _ => {
                eprintln!("info string expected 'startpos' or 'fen' after 'position'");
                return;
            }
        }

        if parts.get(i) == Some(&"moves") {
            i += 1;
            for &mv in &parts[i..] {
                if let Err(e) = engine.make_uci_move(mv) {
                    eprintln!("info string {e}");
                    break;
                }
            }
        }
    }

    fn handle_setoption(&mut self, parts: &[&str]) {
        let Some((name, value)) = parse_setoption(parts) else {
            return;
        };
        self.engine.lock().apply_option(&name, value.as_deref());
    }

    fn handle_perft(&mut self, parts: &[&str]) {
        let Some(depth) = parts.get(1).and_then(|s| s.parse::<u32>().ok()) else {
            eprintln!("info string 'perft' requires a depth");
            return;
        };
        let start = Instant::now();
        let divide = self.engine.lock().perft_divide(depth);
        let total: u64 = divide.iter().map(|(_, n)| n).sum();
        for (mv, nodes) in &divide {
            println!("{} {}", mv.to_uci(), nodes);
        }
        println!();
        println!("{total}");
        eprintln!("info string perft depth {depth} nodes {total} time {:?}", start.elapsed());
    }

    fn handle_go(&mut self, parts: &[&str]) {
        let go = parse_go_params(parts);
        let engine = Arc::clone(&self.engine);
        let handle = std::thread::spawn(move || {
            let start = Instant::now();
            let mut engine = engine.lock();
            let report = engine.go(&go, |r: &SearchReport| print_info(r, start));
            print_info(&report, start);
            let best = report.best_move.map_or_else(|| "0000".to_string(), |m| m.to_uci());
            println!("bestmove {best}");
        });
        self.job = Some(handle);
    }

    fn join_search(&mut self) {
        if let Some(job) = self.job.take() {
            let _ = job.join();
        }
    }
}

fn print_info(report: &SearchReport, start: Instant) {
    let elapsed_ms = start.elapsed().as_millis().max(1) as u64;
    let nps = report.nodes * 1000 / elapsed_ms;
    let score = if report.score.abs() >= crate::tt::MATE_VALUE - crate::position::MAX_PLY as i32 {
        let mate_in = (crate::tt::MATE_VALUE - report.score.abs() + 1) / 2;
        let signed = if report.score < 0 { -mate_in } else { mate_in };
        format!("mate {signed}")
    } else {
        format!("cp {}", report.score)
    };
    let pv: Vec<String> = report.pv.iter().map(|m| m.to_uci()).collect();
    println!(
        "info depth {} seldepth {} score {} nodes {} nps {} time {} pv {}",
        report.depth,
        report.seldepth,
        score,
        report.nodes,
        nps,
        elapsed_ms,
        pv.join(" "),
    );
}

const GO_KEYWORDS: &[&str] = &[
    "wtime", "btime", "winc", "binc", "movestogo", "movetime", "depth", "nodes", "infinite", "ponder", "mate",
];

/// Parse `go`'s whitespace-delimited key/value parameters.
#[must_use]
fn parse_go_params(parts: &[&str]) -> GoParams {
    let mut go = GoParams::default();
    let mut i = 1;
    while i < parts.len() {
        match parts[i] {
            "wtime" => {
                go.wtime = parts.get(i + 1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "btime" => {
                go.btime = parts.get(i + 1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "winc" => {
                go.winc = parts.get(i + 1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "binc" => {
                go.binc = parts.get(i + 1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "movestogo" => {
                go.movestogo = parts.get(i + 1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "movetime" => {
                go.movetime = parts.get(i + 1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "depth" => {
                go.depth = parts.get(i + 1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "nodes" => {
                go.nodes = parts.get(i + 1).and_then(|s| s.parse().ok());
                i += 2;
            }
            "infinite" => {
                go.infinite = true;
                i += 1;
            }
            // `searchmoves` restricts the root move list to the UCI moves
            // that follow, running to the end of the line or the next
            // recognized `go` keyword (a GUI may reorder parameters).
            "searchmoves" => {
                i += 1;
                while i < parts.len() && !GO_KEYWORDS.contains(&parts[i]) {
                    go.search_moves.push(parts[i].to_string());
                    i += 1;
                }
            }
            // `ponder`, `mate`: accepted tokens that don't change the time
            // budget; skip without erroring rather than treating an
            // unsupported-but-recognized parameter as malformed input.
            _ => i += 1,
        }
    }
    go
}

/// Parse `setoption name <id...> [value <v...>]`, joining multi-word
/// names/values (e.g. `name Move Overhead value 200`).
#[must_use]
fn parse_setoption(parts: &[&str]) -> Option<(String, Option<String>)> {
    if parts.first() != Some(&"setoption") {
        return None;
    }
    let mut name_parts = Vec::new();
    let mut value_parts = Vec::new();
    let mut mode = "";
    for &part in &parts[1..] {
        match part {
            "name" => mode = "name",
            "value" => mode = "value",
            _ => match mode {
                "name" => name_parts.push(part),
                "value" => value_parts.push(part),
                _ => {}
            },
        }
    }
    if name_parts.is_empty() {
        return None;
    }
    let name = name_parts.join(" ");
    let value = if value_parts.is_empty() { None } else { Some(value_parts.join(" ")) };
    Some((name, value))
}

/// Entry point used by `main.rs`.
pub fn run_uci_loop() {
    UciLoop::new().run();
}
