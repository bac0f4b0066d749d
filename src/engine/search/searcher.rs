//! Searcher: iterative deepening driver, time budget, and abort handling.

use std::time::{Duration, Instant};

use crate::core::board::Board;
use crate::core::moves::Move;
use crate::engine::movegen::generate_legal_moves;
use crate::engine::tt::TranspositionTable;

use super::ordering::HistoryTable;
use super::types::{SearchStats, ABORT_POLL_NODES, DEPTH_MAX, VALUE_MAX, VALUE_MIN};

/// Fraction of the budget after which another iteration will not be started.
const SOFT_BUDGET_NUMER: u32 = 6;
const SOFT_BUDGET_DENOM: u32 = 10;

pub struct Searcher {
    pub(super) tt: TranspositionTable,
    pub(super) history: HistoryTable,
    pub(super) stats: SearchStats,
    pub(super) abort: bool,
    pub(super) start_time: Instant,
    pub(super) budget: Duration,
    pub(super) post: bool,
    last_score: i32,
}

impl Searcher {
    pub fn new() -> Self {
        Searcher {
            tt: TranspositionTable::new(),
            history: HistoryTable::new(),
            stats: SearchStats::default(),
            abort: false,
            start_time: Instant::now(),
            budget: Duration::ZERO,
            post: true,
            last_score: 0,
        }
    }

    /// Enable or disable PV info lines.
    pub fn set_post(&mut self, post: bool) {
        self.post = post;
    }

    /// Forget everything learned in previous games.
    pub fn reset(&mut self) {
        self.tt.clear();
        self.history.clear();
    }

    /// Score of the deepest finished root search.
    pub fn last_score(&self) -> i32 {
        self.last_score
    }

    /// Nodes visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.stats.nodes
    }

    /// Count a node and poll the clock every ABORT_POLL_NODES visits; a
    /// per-node syscall would dominate the search.
    #[inline]
    pub(super) fn visit_node(&mut self) {
        self.stats.nodes += 1;
        if self.stats.nodes % ABORT_POLL_NODES == 0 && self.start_time.elapsed() >= self.budget {
            self.abort = true;
        }
    }

    /// Search the position, deepening one ply at a time until the depth
    /// limit or the time budget runs out. Returns the best move found.
    pub fn search(&mut self, board: &mut Board, budget_ms: u64, depth_limit: i32) -> Option<Move> {
        self.history.clear();
        self.tt.new_search();
        self.stats = SearchStats::default();
        self.abort = false;
        self.start_time = Instant::now();
        self.budget = Duration::from_millis(budget_ms);

        let depth_limit = depth_limit.clamp(1, DEPTH_MAX);
        let soft_budget = self.budget * SOFT_BUDGET_NUMER / SOFT_BUDGET_DENOM;
        let mut best_move: Option<Move> = None;

        for depth in 1..=depth_limit {
            let mut pv: Vec<Move> = Vec::new();
            let value = self.alpha_beta(board, VALUE_MIN, VALUE_MAX, 0, depth, &mut pv);

            // A partial iteration still counts if it confirmed a root move
            if let Some(&mv) = pv.first() {
                best_move = Some(mv);
            }
            if self.abort {
                break;
            }
            self.last_score = value;
            // Not enough time left for another full iteration
            if self.start_time.elapsed() > soft_budget {
                break;
            }
        }

        // Never sit on our hands: a legal move beats no move even when the
        // first iteration got cut off
        if best_move.is_none() {
            let legal = generate_legal_moves(board);
            if !legal.is_empty() {
                best_move = Some(legal.get(0));
            }
        }

        best_move
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}
