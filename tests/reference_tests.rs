//! Cross-validation against shakmaty
//!
//! shakmaty is a mature, independently tested rules library; agreeing with
//! it on legal moves and perft counts over assorted positions is the
//! strongest correctness check the move generator gets.

use lodestone::core::board::Board;
use lodestone::engine::movegen::{generate_legal_moves, generate_moves};
use shakmaty::{fen::Fen, CastlingMode, Chess, Position};

fn reference_position(fen: &str) -> Chess {
    let parsed: Fen = fen.parse().unwrap();
    parsed.into_position(CastlingMode::Standard).unwrap()
}

fn reference_move_set(fen: &str) -> Vec<String> {
    let pos = reference_position(fen);
    let mut moves: Vec<String> = pos
        .legal_moves()
        .iter()
        .map(|m| m.to_uci(CastlingMode::Standard).to_string())
        .collect();
    moves.sort();
    moves
}

fn our_move_set(fen: &str) -> Vec<String> {
    let mut board = Board::from_fen(fen).unwrap();
    let legal = generate_legal_moves(&mut board);
    let mut moves: Vec<String> = legal.iter().map(|m| m.notation()).collect();
    moves.sort();
    moves
}

fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generate_moves(board);
    let mut nodes = 0;
    for i in 0..moves.len() {
        board.make_move(moves.get(i));
        if board.last_move_legal() {
            nodes += perft(board, depth - 1);
        }
        board.undo_move();
    }
    nodes
}

const POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
    "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1",
    "4k3/8/8/8/8/8/4r3/4K3 w - - 0 1",
    "8/P6k/8/8/8/8/p6K/8 w - - 0 1",
];

#[test]
fn test_legal_moves_match_reference() {
    for fen in POSITIONS {
        assert_eq!(
            our_move_set(fen),
            reference_move_set(fen),
            "legal move mismatch for {}",
            fen
        );
    }
}

#[test]
fn test_perft_matches_reference() {
    for fen in POSITIONS {
        let mut board = Board::from_fen(fen).unwrap();
        let pos = reference_position(fen);
        for depth in 1..=2 {
            assert_eq!(
                perft(&mut board, depth),
                shakmaty::perft(&pos, depth),
                "perft({}) mismatch for {}",
                depth,
                fen
            );
        }
    }
}

#[test]
fn test_perft_matches_reference_deeper() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ];
    for fen in fens {
        let mut board = Board::from_fen(fen).unwrap();
        let pos = reference_position(fen);
        assert_eq!(perft(&mut board, 3), shakmaty::perft(&pos, 3), "{}", fen);
    }
}

#[test]
fn test_fen_roundtrip_matches_reference_parsing() {
    // Our emitted FEN must itself parse in shakmaty
    for fen in POSITIONS {
        let board = Board::from_fen(fen).unwrap();
        let emitted = board.to_fen();
        let _ = reference_position(&emitted);
    }
}
