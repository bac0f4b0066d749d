//! Alpha-beta search and quiescence.

use crate::core::board::Board;
use crate::core::moves::Move;
use crate::engine::eval::evaluate;
use crate::engine::movegen::generate_moves;
use crate::engine::tt::{value_from_table, TTFlag};

use super::ordering::order_moves;
use super::pv::report_line;
use super::searcher::Searcher;
use super::types::{DRAW_SCORE, EVAL_MAX, MATE, PLY_MAX, VALUE_MIN};

/// Static-eval margin per remaining depth below which razoring kicks in.
const RAZOR_MARGIN: i32 = 150;
/// Static-eval margin for frontier futility pruning.
const FUTILITY_MARGIN: i32 = 100;
/// Depth taken off a null-move verification search.
const NULL_MOVE_REDUCTION: i32 = 3;
/// Ordered moves after which late-move reduction may apply.
const LMR_THRESHOLD: i32 = 4;

impl Searcher {
    pub(super) fn alpha_beta(
        &mut self,
        board: &mut Board,
        mut alpha: i32,
        beta: i32,
        ply: i32,
        depth: i32,
        pv_out: &mut Vec<Move>,
    ) -> i32 {
        debug_assert!(beta > alpha);

        if self.abort {
            return 0;
        }
        if ply > 0 && board.is_draw() {
            return DRAW_SCORE;
        }
        if depth <= 0 {
            return self.quiescence(board, alpha, beta, ply, pv_out);
        }
        self.visit_node();
        if ply > 0 {
            pv_out.clear();
        }
        if ply >= PLY_MAX - 1 {
            return evaluate(board);
        }

        // Probe the table; a deep-enough entry either answers the node or at
        // least seeds move ordering
        let mut hint: Option<Move> = None;
        if let Some(entry) = self.tt.probe(board.hash, depth) {
            let value = value_from_table(entry.value, ply);
            let usable = match entry.flag {
                TTFlag::UpperBound => value <= alpha,
                TTFlag::LowerBound => value >= beta,
                TTFlag::Exact => value <= alpha || value >= beta,
            };
            if usable {
                return value;
            }
            hint = entry.best_move;
        }

        let in_check = board.in_check();
        let eval = evaluate(board);
        let mut child_pv: Vec<Move> = Vec::new();

        // Razoring: drop straight into quiescence when the static eval is
        // hopelessly below alpha at shallow depth
        if depth <= 3 && !in_check && eval + RAZOR_MARGIN * depth < alpha {
            let razor_alpha = alpha - RAZOR_MARGIN * depth;
            let value = self.quiescence(board, razor_alpha, razor_alpha + 1, ply, &mut child_pv);
            if value <= razor_alpha {
                return value;
            }
        }

        // Null move: hand the opponent a free tempo; if the position still
        // beats beta, a real move will too. Unsound in check, in pawn-only
        // endings, and twice in a row.
        if depth > 3
            && !in_check
            && alpha == beta - 1
            && eval >= beta
            && !board.last_was_null()
            && board.has_material(board.side_to_move)
        {
            board.make_null();
            let mut value = -self.alpha_beta(
                board,
                -beta,
                -beta + 1,
                ply + 1,
                depth - NULL_MOVE_REDUCTION,
                &mut child_pv,
            );
            board.undo_null();
            if self.abort {
                return 0;
            }
            if value >= beta {
                if value > EVAL_MAX {
                    value = beta;
                }
                self.tt
                    .store(board.hash, depth, value, ply, TTFlag::LowerBound, None);
                return value;
            }
        }

        // Check extension
        let new_depth = depth - 1 + i32::from(in_check);

        let mut moves = generate_moves(board);
        order_moves(&mut moves, hint, &self.history);

        let mut best_value = VALUE_MIN;
        let mut best_move: Option<Move> = None;
        let mut move_count = 0;

        for i in 0..moves.len() {
            let mv = moves.get(i);
            board.make_move(mv);
            if !board.last_move_legal() {
                board.undo_move();
                continue;
            }
            move_count += 1;

            let value = if move_count == 1 {
                -self.alpha_beta(board, -beta, -alpha, ply + 1, new_depth, &mut child_pv)
            } else {
                // Frontier futility: a quiet move a pawn below alpha one ply
                // from the horizon will not come back
                if !in_check
                    && new_depth == 1
                    && !mv.is_tactical()
                    && alpha == beta - 1
                    && eval + FUTILITY_MARGIN < alpha
                {
                    board.undo_move();
                    continue;
                }

                let reduction = i32::from(
                    !in_check
                        && new_depth > 1
                        && move_count > LMR_THRESHOLD
                        && !mv.is_tactical()
                        && alpha == beta - 1
                        && eval < alpha,
                );

                let mut value = -self.alpha_beta(
                    board,
                    -alpha - 1,
                    -alpha,
                    ply + 1,
                    new_depth - reduction,
                    &mut child_pv,
                );
                if !self.abort && value > alpha && reduction > 0 {
                    value = -self.alpha_beta(
                        board,
                        -alpha - 1,
                        -alpha,
                        ply + 1,
                        new_depth,
                        &mut child_pv,
                    );
                }
                if !self.abort && value > alpha && value < beta {
                    value =
                        -self.alpha_beta(board, -beta, -alpha, ply + 1, new_depth, &mut child_pv);
                }
                value
            };

            board.undo_move();
            if self.abort {
                return 0;
            }

            if value >= beta {
                self.history.update(mv, depth);
                self.tt
                    .store(board.hash, depth, value, ply, TTFlag::LowerBound, Some(mv));
                return value;
            }
            if value > best_value {
                best_value = value;
                if value > alpha {
                    alpha = value;
                    best_move = Some(mv);
                    pv_out.clear();
                    pv_out.push(mv);
                    pv_out.extend_from_slice(&child_pv);
                    if ply == 0 && self.post {
                        report_line(depth, value, self.start_time, self.stats.nodes, pv_out);
                    }
                }
            }
        }

        if move_count == 0 {
            return if in_check { -MATE + ply } else { DRAW_SCORE };
        }

        match best_move {
            Some(mv) => {
                self.history.update(mv, depth);
                self.tt
                    .store(board.hash, depth, best_value, ply, TTFlag::Exact, Some(mv));
            }
            None => {
                self.tt
                    .store(board.hash, depth, best_value, ply, TTFlag::UpperBound, None);
            }
        }

        best_value
    }

    /// Search only captures and promotions until the position quiets down.
    pub(super) fn quiescence(
        &mut self,
        board: &mut Board,
        mut alpha: i32,
        beta: i32,
        ply: i32,
        pv_out: &mut Vec<Move>,
    ) -> i32 {
        if self.abort {
            return 0;
        }
        self.visit_node();
        if ply > 0 {
            pv_out.clear();
        }
        if ply >= PLY_MAX - 1 {
            return evaluate(board);
        }

        // Stand pat: the side to move may decline every capture
        let mut best_value = evaluate(board);
        if best_value >= beta {
            return best_value;
        }
        if best_value > alpha {
            alpha = best_value;
        }

        let mut child_pv: Vec<Move> = Vec::new();
        let mut moves = generate_moves(board);
        order_moves(&mut moves, None, &self.history);

        for i in 0..moves.len() {
            let mv = moves.get(i);
            if !mv.is_tactical() {
                continue;
            }
            board.make_move(mv);
            if !board.last_move_legal() {
                board.undo_move();
                continue;
            }
            let value = -self.quiescence(board, -beta, -alpha, ply + 1, &mut child_pv);
            board.undo_move();
            if self.abort {
                return 0;
            }

            if value >= beta {
                return value;
            }
            if value > best_value {
                best_value = value;
                if value > alpha {
                    alpha = value;
                    pv_out.clear();
                    pv_out.push(mv);
                    pv_out.extend_from_slice(&child_pv);
                }
            }
        }

        best_value
    }
}
