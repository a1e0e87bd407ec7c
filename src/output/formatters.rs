//! Formatting utilities for terminal output

use crate::core::{LetterHints, LetterVerdict};
use crate::session::GuessRecord;
use colored::{ColoredString, Colorize};

/// On-screen keyboard layout
pub const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// Paint `text` as a tile of the given verdict
fn tile(text: &str, verdict: Option<LetterVerdict>) -> ColoredString {
    match verdict {
        Some(LetterVerdict::Correct) => text.black().on_green().bold(),
        Some(LetterVerdict::Present) => text.black().on_yellow().bold(),
        Some(LetterVerdict::Absent) => text.white().on_bright_black(),
        None => text.bright_white(),
    }
}

/// A guess as colored letter tiles, e.g. " C  R  A  N  E "
#[must_use]
pub fn colored_guess(record: &GuessRecord) -> String {
    record
        .word
        .text()
        .chars()
        .zip(&record.verdicts)
        .map(|(letter, &verdict)| tile(&format!(" {letter} "), Some(verdict)).to_string())
        .collect()
}

/// The keyboard with every guessed letter colored by its best hint
#[must_use]
pub fn colored_keyboard(hints: &LetterHints) -> Vec<String> {
    KEYBOARD_ROWS
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let keys: String = row
                .chars()
                .map(|c| tile(&c.to_string(), hints.get(c)).to_string() + " ")
                .collect();
            format!("{}{keys}", " ".repeat(i))
        })
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).round().max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Bar for one row of the guess distribution, scaled to the largest row
#[must_use]
pub fn distribution_bar(count: usize, largest: usize, width: usize) -> String {
    create_progress_bar(count as f64, largest as f64, width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Word, score};

    #[test]
    fn progress_bar_empty() {
        assert_eq!(create_progress_bar(0.0, 100.0, 10), "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        assert_eq!(create_progress_bar(100.0, 100.0, 10), "██████████");
    }

    #[test]
    fn progress_bar_half() {
        assert_eq!(create_progress_bar(50.0, 100.0, 10), "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(distribution_bar(0, 0, 4), "░░░░");
    }

    #[test]
    fn guess_and_keyboard_keep_letters() {
        colored::control::set_override(false);

        let secret = Word::new("crane").unwrap();
        let word = Word::new("slate").unwrap();
        let record = GuessRecord {
            verdicts: score(&secret, &word).unwrap(),
            word,
        };
        assert_eq!(colored_guess(&record), " S  L  A  T  E ");

        let rows = colored_keyboard(&LetterHints::new());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], "Q W E R T Y U I O P ");
        assert!(rows[2].starts_with("  Z"));
    }
}
