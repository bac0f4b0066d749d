//! XBoard Protocol Tests

use lodestone::core::board::Color;
use lodestone::xboard::Protocol;

fn send(protocol: &mut Protocol, line: &str) -> String {
    let mut out: Vec<u8> = Vec::new();
    protocol.handle_line(line, &mut out);
    String::from_utf8(out).unwrap()
}

#[test]
fn test_new_starts_from_initial_position() {
    let mut protocol = Protocol::new();
    send(&mut protocol, "new");
    assert_eq!(
        protocol.engine.board.to_fen(),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    );
}

#[test]
fn test_moves_in_force_mode() {
    let mut protocol = Protocol::new();
    send(&mut protocol, "new");
    send(&mut protocol, "force");
    let out = send(&mut protocol, "e2e4");
    // Engine plays neither side: the move is applied, no reply is searched
    assert!(out.is_empty());
    assert_eq!(protocol.engine.board.side_to_move, Color::Black);
}

#[test]
fn test_undo_takes_back_one_ply() {
    let mut protocol = Protocol::new();
    send(&mut protocol, "new");
    send(&mut protocol, "force");
    send(&mut protocol, "e2e4");
    send(&mut protocol, "undo");
    assert_eq!(
        protocol.engine.board.to_fen(),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    );
}

#[test]
fn test_go_replies_with_move() {
    let mut protocol = Protocol::new();
    send(&mut protocol, "new");
    send(&mut protocol, "nopost");
    send(&mut protocol, "sd 2");
    send(&mut protocol, "st 1");
    let out = send(&mut protocol, "go");
    assert!(out.starts_with("move "), "unexpected reply: {}", out);
    // The engine played its own move on the board
    assert_eq!(protocol.engine.board.side_to_move, Color::Black);
}

#[test]
fn test_engine_answers_user_move() {
    let mut protocol = Protocol::new();
    send(&mut protocol, "new");
    send(&mut protocol, "nopost");
    send(&mut protocol, "sd 2");
    send(&mut protocol, "st 1");
    let first = send(&mut protocol, "go");
    assert!(first.starts_with("move "));
    // Now it is the user's turn; after their move the engine answers
    let reply = send(&mut protocol, "e7e6");
    assert!(reply.starts_with("move "), "unexpected reply: {}", reply);
}

#[test]
fn test_unknown_command_reported() {
    let mut protocol = Protocol::new();
    let out = send(&mut protocol, "xyzzy");
    assert!(out.starts_with("Error (unknown command)"), "got: {}", out);
}

#[test]
fn test_illegal_move_reported() {
    let mut protocol = Protocol::new();
    send(&mut protocol, "new");
    let out = send(&mut protocol, "e2e5");
    assert!(out.starts_with("Illegal move"), "got: {}", out);
}

#[test]
fn test_time_controls_accepted() {
    let mut protocol = Protocol::new();
    assert!(send(&mut protocol, "st 5").is_empty());
    assert!(send(&mut protocol, "sd 10").is_empty());
    assert!(send(&mut protocol, "time 3000").is_empty());
    assert!(send(&mut protocol, "post").is_empty());
    assert!(send(&mut protocol, "nopost").is_empty());
}

#[test]
fn test_quit_stops_the_loop() {
    let mut protocol = Protocol::new();
    let mut out: Vec<u8> = Vec::new();
    assert!(protocol.handle_line("new", &mut out));
    assert!(!protocol.handle_line("quit", &mut out));
}

#[test]
fn test_promotion_move_text_accepted() {
    let mut protocol = Protocol::new();
    protocol
        .engine
        .set_position("8/P6k/8/8/8/8/7K/8 w - - 0 1")
        .unwrap();
    send(&mut protocol, "force");
    let out = send(&mut protocol, "a7a8q");
    assert!(out.is_empty());
    assert!(protocol.engine.board.to_fen().starts_with("Q7/7k"));
}
