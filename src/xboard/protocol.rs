//! XBoard-style protocol handler
//!
//! Line-oriented commands on stdin, `move` replies and PV info lines on
//! stdout. Anything that is not a known command is tried as a move.

use crate::core::board::Color;
use crate::engine::search::DEPTH_MAX;
use crate::engine::Engine;
use std::io::{self, BufRead, Write};

/// Default thinking time when no clock information has arrived.
const DEFAULT_BUDGET_MS: u64 = 5_000;

/// XBoard protocol handler
pub struct Protocol {
    pub engine: Engine,
    /// Which side the engine plays; None in force mode.
    engine_color: Option<Color>,
    /// Per-move time budget in milliseconds.
    budget_ms: u64,
    /// Iteration depth cap.
    depth_limit: i32,
}

impl Protocol {
    pub fn new() -> Self {
        Protocol {
            engine: Engine::new(),
            engine_color: None,
            budget_ms: DEFAULT_BUDGET_MS,
            depth_limit: DEPTH_MAX,
        }
    }

    /// Main protocol loop
    pub fn run(&mut self) {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(_) => break,
            };
            if !self.handle_line(line.trim(), &mut stdout) {
                break;
            }
        }
    }

    /// Handle one command line; returns false on `quit`.
    pub fn handle_line(&mut self, line: &str, out: &mut dyn Write) -> bool {
        if line.is_empty() {
            return true;
        }
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("");
        let argument = parts.next();

        match command {
            "quit" => return false,
            "new" => {
                self.engine.new_game();
                self.engine_color = None;
            }
            "force" => self.engine_color = None,
            "go" => {
                self.engine_color = Some(self.engine.board.side_to_move);
                self.think(out);
            }
            "st" => {
                // Per-move time in seconds
                if let Some(seconds) = argument.and_then(|a| a.parse::<u64>().ok()) {
                    self.budget_ms = seconds * 1000;
                }
            }
            "sd" => {
                if let Some(depth) = argument.and_then(|a| a.parse::<i32>().ok()) {
                    self.depth_limit = depth.clamp(1, DEPTH_MAX);
                }
            }
            "time" => {
                // Remaining clock in centiseconds; budget a thirtieth of it
                if let Some(centis) = argument.and_then(|a| a.parse::<u64>().ok()) {
                    self.budget_ms = centis * 10 / 30;
                }
            }
            "undo" => self.engine.undo_last(),
            "post" => self.engine.set_post(true),
            "nopost" => self.engine.set_post(false),
            _ => self.try_move(line, out),
        }
        true
    }

    /// Anything unrecognized is attempted as a long-algebraic move.
    fn try_move(&mut self, line: &str, out: &mut dyn Write) {
        if !looks_like_move(line) {
            writeln!(out, "Error (unknown command): {}", line).unwrap();
            return;
        }
        match self.engine.apply_move(line) {
            Ok(()) => {
                if self.engine_color == Some(self.engine.board.side_to_move) {
                    self.think(out);
                }
            }
            Err(message) => {
                writeln!(out, "{}", message).unwrap();
            }
        }
    }

    /// Search the current position and play the result.
    fn think(&mut self, out: &mut dyn Write) {
        match self.engine.search(self.budget_ms, self.depth_limit) {
            Some(mv) => {
                writeln!(out, "move {}", mv.notation()).unwrap();
                out.flush().unwrap();
                self.engine.apply(mv);
            }
            None => {
                // Mated or stalemated; nothing to play
                writeln!(out, "resign").unwrap();
                out.flush().unwrap();
            }
        }
    }
}

impl Default for Protocol {
    fn default() -> Self {
        Self::new()
    }
}

/// Move syntax: two squares, optionally a promotion letter.
fn looks_like_move(line: &str) -> bool {
    let bytes = line.as_bytes();
    if bytes.len() != 4 && bytes.len() != 5 {
        return false;
    }
    let square = |file: u8, rank: u8| (b'a'..=b'h').contains(&file) && (b'1'..=b'8').contains(&rank);
    if !square(bytes[0], bytes[1]) || !square(bytes[2], bytes[3]) {
        return false;
    }
    bytes.len() == 4 || matches!(bytes[4], b'q' | b'r' | b'b' | b'n')
}
