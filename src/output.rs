//! Console output for the batch run.
//!
//! These lines are the tool's primary interface and go to stdout. Structured
//! diagnostics go through `tracing` (stderr) instead.

use std::io::{self, Write};

use crate::counters::RunCounters;
use crate::locator::Kind;

/// Prints the `Queue i of N: ` prefix (1-based, no newline).
pub fn print_queue_position(position: usize, total: usize) {
    print!("Queue {position} of {total}: ");
    let _ = io::stdout().flush();
}

/// Prints the detected kind after the queue prefix.
pub fn print_kind(kind: Kind) {
    if kind != Kind::Invalid {
        println!("{kind}");
    }
}

/// Prints a one-line notice for a skipped or failed item.
pub fn print_notice(message: &str) {
    println!("{message}");
}

/// Returns the summary lines printed after every pass.
#[must_use]
pub fn summary_lines(counters: &RunCounters) -> [String; 4] {
    [
        "Summary".to_string(),
        format!("Completed: {}", counters.success),
        format!("Warnings: {}", counters.warnings()),
        format!("Errors: {}", counters.error),
    ]
}

/// Prints the end-of-pass summary.
pub fn print_summary(counters: &RunCounters) {
    for line in summary_lines(counters) {
        println!("{line}");
    }
}
