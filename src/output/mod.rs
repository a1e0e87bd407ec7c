//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_audit_result, print_board, print_finished, print_guess_row, print_meaning,
    print_schedule, print_stats,
};
