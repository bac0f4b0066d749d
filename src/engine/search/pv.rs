//! Principal variation reporting.

use crate::core::moves::Move;
use std::time::Instant;

/// Emit one info line: depth, score, elapsed seconds, nodes, then the line
/// of play. This format is what XBoard-style interfaces display in post
/// mode.
pub(super) fn report_line(depth: i32, score: i32, start_time: Instant, nodes: u64, pv: &[Move]) {
    let elapsed = start_time.elapsed().as_secs_f64();
    let pv_str: String = pv
        .iter()
        .map(|mv| mv.notation())
        .collect::<Vec<_>>()
        .join(" ");
    println!("{} {} {:.4} {} {}", depth, score, elapsed, nodes, pv_str);
}
