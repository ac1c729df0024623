//! Perft node-count anchors. The deep positions take long enough that they
//! are marked `#[ignore]`; the shallow depths run on every test pass and
//! already exercise every special-move branch (castling, en passant,
//! promotion, discovered check).

use staghorn::Position;

fn perft_at(fen: &str, depth: u32) -> u64 {
    let mut pos: Position = fen.parse().expect("valid FEN");
    pos.perft(depth)
}

#[test]
fn startpos_perft_shallow() {
    assert_eq!(perft_at(Position::STARTPOS_FEN, 1), 20);
    assert_eq!(perft_at(Position::STARTPOS_FEN, 2), 400);
    assert_eq!(perft_at(Position::STARTPOS_FEN, 3), 8_902);
    assert_eq!(perft_at(Position::STARTPOS_FEN, 4), 197_281);
}

#[test]
fn kiwipete_perft_shallow() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -";
    assert_eq!(perft_at(fen, 1), 48);
    assert_eq!(perft_at(fen, 2), 2_039);
    assert_eq!(perft_at(fen, 3), 97_862);
}

#[test]
fn endgame_rook_position_perft_shallow() {
    let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -";
    assert_eq!(perft_at(fen, 1), 14);
    assert_eq!(perft_at(fen, 2), 191);
    assert_eq!(perft_at(fen, 3), 2_812);
}

#[test]
fn promotion_heavy_position_perft_shallow() {
    let fen = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    assert_eq!(perft_at(fen, 1), 24);
    assert_eq!(perft_at(fen, 2), 496);
    assert_eq!(perft_at(fen, 3), 9_483);
}

#[test]
fn discovered_check_position_perft_shallow() {
    let fen = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
    assert_eq!(perft_at(fen, 1), 17);
    assert_eq!(perft_at(fen, 2), 341);
}

#[test]
fn middlegame_position_perft_shallow() {
    let fen = "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";
    assert_eq!(perft_at(fen, 1), 41);
    assert_eq!(perft_at(fen, 2), 1_680);
}

#[test]
#[ignore]
fn startpos_perft_anchor_depth_6() {
    assert_eq!(perft_at(Position::STARTPOS_FEN, 6), 119_060_324);
}

#[test]
#[ignore]
fn kiwipete_perft_anchor_depth_5() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -";
    assert_eq!(perft_at(fen, 5), 193_690_690);
}

#[test]
#[ignore]
fn endgame_rook_position_perft_anchor_depth_7() {
    let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -";
    assert_eq!(perft_at(fen, 7), 178_633_661);
}

#[test]
#[ignore]
fn promotion_heavy_position_perft_anchor_depth_5() {
    let fen = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    assert_eq!(perft_at(fen, 5), 15_833_292);
}

#[test]
#[ignore]
fn discovered_check_position_perft_anchor_depth_4() {
    let fen = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
    assert_eq!(perft_at(fen, 4), 2_103_487);
}

#[test]
#[ignore]
fn middlegame_position_perft_anchor_depth_4() {
    let fen = "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";
    assert_eq!(perft_at(fen, 4), 3_894_594);
}
