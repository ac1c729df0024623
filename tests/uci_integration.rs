//! Drives the compiled binary over its stdin/stdout pipe exactly as a GUI
//! would, confirming the UCI handshake and a bounded search produce a
//! legal `bestmove`.

use std::io::Write;
use std::process::{Command, Stdio};

use staghorn::movegen::parse_uci_move;
use staghorn::Position;

#[test]
fn uci_smoke_test_returns_legal_move() {
    let exe = env!("CARGO_BIN_EXE_staghorn");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn engine binary");

    let input = b"uci\nisready\nposition startpos moves e2e4\ngo movetime 50\nquit\n";
    child.stdin.as_mut().unwrap().write_all(input).unwrap();

    let output = child.wait_with_output().expect("failed to read output");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("uciok"));
    assert!(stdout.contains("readyok"));

    let bestmove_line = stdout
        .lines()
        .filter(|line| line.starts_with("bestmove"))
        .last()
        .expect("no bestmove found");
    let parts: Vec<&str> = bestmove_line.split_whitespace().collect();
    assert!(parts.len() >= 2, "bestmove missing move: {bestmove_line}");
    let mv = parts[1];
    assert_ne!(mv, "0000", "engine returned null move");

    let mut pos = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
        .unwrap();
    pos.make_move(parse_uci_move(&mut pos, "e2e4").unwrap());
    assert!(parse_uci_move(&mut pos, mv).is_ok(), "bestmove not legal in position: {mv}");
}

#[test]
fn perft_command_prints_divide_and_matching_total() {
    let exe = env!("CARGO_BIN_EXE_staghorn");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn engine binary");

    child.stdin.as_mut().unwrap().write_all(b"perft 2\nquit\n").unwrap();
    let output = child.wait_with_output().expect("failed to read output");
    let stdout = String::from_utf8_lossy(&output.stdout);

    let lines: Vec<&str> = stdout.lines().filter(|l| !l.is_empty()).collect();
    let total: u64 = lines.last().expect("missing total").parse().expect("total is a number");
    assert_eq!(total, 400);
}
