//! Display functions for command results

use super::formatters::{colored_guess, colored_keyboard, distribution_bar};
use crate::commands::AuditResult;
use crate::core::Word;
use crate::daily::DateKey;
use crate::dictionary::WordMeaning;
use crate::progress::PlayerProgress;
use crate::session::{GameSession, GuessRecord, SessionStatus};
use colored::Colorize;

/// Print one scored guess with its tiles and emoji row
pub fn print_guess_row(turn: usize, record: &GuessRecord) {
    println!(
        "  {} {}  {}",
        format!("{turn}.").bright_black(),
        colored_guess(record),
        record.emoji()
    );
}

/// Print the board so far and the keyboard hints
pub fn print_board(session: &GameSession) {
    for (i, record) in session.guesses.iter().enumerate() {
        print_guess_row(i + 1, record);
    }
    println!();
    for row in colored_keyboard(&session.letter_hints) {
        println!("    {row}");
    }
    println!();
}

/// Celebration (or commiseration) banner for a finished session
pub fn print_finished(session: &GameSession, max_guesses: usize) {
    println!("\n{}", "═".repeat(60).bright_cyan());
    if session.status == SessionStatus::Won {
        let turn = session.attempts_used();
        let performance = match turn {
            1 => "🏆 Hole in one!",
            2 => "⭐ Magnificent!",
            3 => "💫 Splendid!",
            4 => "✨ Great!",
            5 => "👍 Nice work!",
            _ => "😅 Phew!",
        };
        println!("  {}", performance.bright_green().bold());
        println!(
            "  Solved in {} {}",
            turn.to_string().bright_cyan().bold(),
            if turn == 1 { "guess" } else { "guesses" }
        );
    } else {
        println!("  {}", "❌ Out of guesses".red().bold());
        println!(
            "  The word was {}",
            session.secret.text().bright_yellow().bold()
        );
    }

    if session.is_daily {
        println!("\n{}", session.share_text(max_guesses));
    }
    println!("{}", "═".repeat(60).bright_cyan());
}

/// Print a dictionary entry
pub fn print_meaning(meaning: &WordMeaning) {
    print!("\n📖 {}", meaning.word.to_uppercase().bright_yellow().bold());
    if let Some(phonetic) = &meaning.phonetic {
        print!("  {}", phonetic.bright_black());
    }
    println!();

    for sense in &meaning.meanings {
        println!(
            "   {} {}",
            format!("({})", sense.part_of_speech).cyan().italic(),
            sense.definition
        );
        if let Some(example) = &sense.example {
            println!("      \"{}\"", example.bright_black());
        }
    }
}

/// Print totals, streak and the guess distribution
pub fn print_stats(progress: &PlayerProgress) {
    let summary = progress.summary();

    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "STATISTICS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Games:".bright_cyan().bold());
    println!("   Played:          {}", summary.total_games);
    println!("   Won:             {}", summary.wins.to_string().green());
    println!("   Lost:            {}", summary.losses.to_string().red());
    println!(
        "   Win rate:        {}",
        format!("{}%", summary.win_rate_percent).bright_yellow().bold()
    );

    println!("\n🔥 {}", "Daily streak:".bright_cyan().bold());
    println!(
        "   Current:         {}",
        progress.streak.current_streak.to_string().bright_yellow().bold()
    );
    println!("   Best:            {}", progress.streak.best_streak);
    if let Some(last) = progress.streak.last_win_date {
        println!("   Last win:        {last}");
    }

    println!("\n📈 {}", "Guess distribution:".bright_cyan().bold());
    let largest = summary.guess_distribution.iter().copied().max().unwrap_or(0);
    for (i, &count) in summary.guess_distribution.iter().enumerate() {
        let bar = distribution_bar(count, largest, 30);
        println!("   {}: {} {count:4}", i + 1, bar.green());
    }

    let histogram = &progress.histogram;
    if histogram.total_wins > 0 {
        println!(
            "\n🗓  {} {}",
            "Daily wins (all time):".bright_cyan().bold(),
            histogram.total_wins
        );
        let largest = histogram.attempts.iter().copied().max().unwrap_or(0) as usize;
        for (i, &count) in histogram.attempts.iter().enumerate() {
            let bar = distribution_bar(count as usize, largest, 30);
            println!("   {}: {} {count:4}", i + 1, bar.bright_blue());
        }
    }
}

/// Print upcoming daily words, marking today's
pub fn print_schedule(entries: &[(DateKey, Word)], today: DateKey) {
    println!("\n{}", "─".repeat(40).cyan());
    println!(" {} ", "DAILY SCHEDULE".bright_cyan().bold());
    println!("{}", "─".repeat(40).cyan());

    for (date, word) in entries {
        if *date == today {
            println!(
                "  {}  {}  {}",
                date.to_string().bright_white().bold(),
                word.text().bright_yellow().bold(),
                "← today".green()
            );
        } else {
            println!("  {date}  {word}");
        }
    }
}

/// Print the result of a selector audit
pub fn print_audit_result(result: &AuditResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "DAILY SELECTOR AUDIT".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Coverage:".bright_cyan().bold());
    println!("   Dates audited:    {} from {}", result.days, result.from);
    println!("   Word list size:   {}", result.list_size);
    println!(
        "   Distinct words:   {} {}",
        result.distinct_words,
        format!("({:.1}% of list)", result.coverage_percent()).green()
    );
    println!("   Max repeats:      {}", result.max_repeats);
    let back_to_back = if result.back_to_back == 0 {
        "0".green()
    } else {
        result.back_to_back.to_string().yellow()
    };
    println!("   Back-to-back:     {back_to_back}");
    println!("   Time taken:       {:.3}s", result.duration.as_secs_f64());

    if !result.most_repeated.is_empty() {
        let words: Vec<&str> = result.most_repeated.iter().map(Word::text).collect();
        println!(
            "\n🔁 {} {}",
            "Most repeated:".bright_cyan().bold(),
            words.join(", ")
        );
    }
}
