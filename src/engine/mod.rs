//! Chess engine components
//!
//! This module contains the core engine functionality:
//! - Pseudo-legal move generation over the mailbox board
//! - Phase-interpolated static evaluation
//! - Alpha-beta search with a transposition table
//! - The `Engine` facade the protocol adapter drives

pub mod eval;
pub mod movegen;
pub mod search;
pub mod tt;

pub use eval::evaluate;
pub use movegen::{generate_legal_moves, generate_moves};
pub use search::{Searcher, DEPTH_MAX, MATE};
pub use tt::{TTEntry, TTFlag, TranspositionTable};

use crate::core::board::Board;
use crate::core::moves::Move;

/// The engine: a board plus the search state that persists across moves of
/// one game. The protocol adapter talks to this and nothing deeper.
pub struct Engine {
    pub board: Board,
    searcher: Searcher,
}

impl Engine {
    pub fn new() -> Self {
        Engine {
            board: Board::startpos(),
            searcher: Searcher::new(),
        }
    }

    /// Start a fresh game from the initial position.
    pub fn new_game(&mut self) {
        self.board = Board::startpos();
        self.searcher.reset();
    }

    /// Start a fresh game from an arbitrary position.
    pub fn new_game_from(&mut self, fen: &str) -> Result<(), String> {
        self.board = Board::from_fen(fen)?;
        self.searcher.reset();
        Ok(())
    }

    /// Replace the current position, keeping learned search state.
    pub fn set_position(&mut self, fen: &str) -> Result<(), String> {
        self.board = Board::from_fen(fen)?;
        Ok(())
    }

    /// Resolve move text against the legal moves of the current position.
    pub fn find_move(&mut self, text: &str) -> Option<Move> {
        let legal = generate_legal_moves(&mut self.board);
        let found = legal.iter().copied().find(|mv| mv.notation() == text);
        found
    }

    /// Play a move given in long algebraic notation.
    pub fn apply_move(&mut self, text: &str) -> Result<(), String> {
        let mv = self
            .find_move(text)
            .ok_or_else(|| format!("Illegal move: {}", text))?;
        self.board.make_move(mv);
        Ok(())
    }

    /// Play a move the search produced.
    pub fn apply(&mut self, mv: Move) {
        self.board.make_move(mv);
        debug_assert!(self.board.last_move_legal());
    }

    /// Take back one ply.
    pub fn undo_last(&mut self) {
        self.board.undo_move();
    }

    /// Think about the current position and return the best move found.
    pub fn search(&mut self, budget_ms: u64, depth_limit: i32) -> Option<Move> {
        self.searcher.search(&mut self.board, budget_ms, depth_limit)
    }

    /// Score of the deepest finished root search.
    pub fn last_score(&self) -> i32 {
        self.searcher.last_score()
    }

    /// Enable or disable PV info lines during search.
    pub fn set_post(&mut self, post: bool) {
        self.searcher.set_post(post);
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
