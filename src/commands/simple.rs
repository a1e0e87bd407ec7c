//! Simple interactive CLI mode
//!
//! Line-based game without the TUI.

use super::{GameContext, PlayMode};
use crate::error::GameError;
use crate::output::{print_board, print_finished, print_guess_row, print_meaning};
use crate::progress::PlayerProgress;
use crate::session::{GuessOutcome, SessionManager};
use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

/// Run the simple interactive CLI mode on stdin
///
/// # Errors
///
/// Returns an error on I/O failure reading input or if the puzzle cannot be
/// started.
pub async fn run_simple(ctx: &GameContext, mode: PlayMode) -> Result<()> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    play(ctx, mode, &mut input).await
}

/// What the player typed on a guess prompt
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    NewPractice,
    Reset,
    Guess(&'a str),
}

fn parse_command(input: &str) -> Command<'_> {
    match input {
        ":q" | ":quit" | ":exit" => Command::Quit,
        ":n" | ":new" => Command::NewPractice,
        ":r" | ":reset" => Command::Reset,
        guess => Command::Guess(guess),
    }
}

async fn play<R: AsyncBufRead + Unpin>(
    ctx: &GameContext,
    mode: PlayMode,
    input: &mut Lines<R>,
) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Daily Word Puzzle                         ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!(
        "Guess the {}-letter word in {} tries.",
        ctx.config.word_length, ctx.config.max_guesses
    );
    println!("  {} right letter, right spot", "🟩".green());
    println!("  {} in the word, wrong spot", "🟨".yellow());
    println!("  {} not in the word\n", "⬜".bright_black());
    println!("Commands: ':quit' to exit, ':new' for a practice word, ':reset' to restart practice\n");

    let mut manager = ctx.session_manager()?;
    let mut progress = ctx.load_progress().await;

    if let Some(warning) = mode.start(ctx, &mut manager).await? {
        println!("⚠️  {}\n", warning.yellow());
    }
    show_resumed(&manager);

    loop {
        let Some(session) = manager.session() else {
            return Ok(());
        };

        if session.status.is_finished() {
            match prompt(input, "Play a practice word? (yes/no)").await?.as_deref() {
                Some("yes" | "y") => {
                    PlayMode::Practice(None).start(ctx, &mut manager).await?;
                    println!("\n🔄 New practice word!\n");
                    continue;
                }
                _ => break,
            }
        }

        let label = format!(
            "Guess {}/{}",
            session.attempts_used() + 1,
            ctx.config.max_guesses
        );
        let Some(line) = prompt(input, &label).await? else {
            break;
        };

        match parse_command(&line) {
            Command::Quit => break,
            Command::NewPractice => {
                PlayMode::Practice(None).start(ctx, &mut manager).await?;
                println!("\n🔄 New practice word!\n");
            }
            Command::Reset => match manager.reset_practice() {
                Ok(()) => println!("\n🔄 Practice restarted!\n"),
                Err(e) => println!("❌ {e}\n"),
            },
            Command::Guess(raw) => {
                if let Err(e) = guess(ctx, &mut manager, &mut progress, raw).await {
                    if !e.is_user_input() {
                        return Err(e.into());
                    }
                    println!("❌ {e}\n");
                }
            }
        }
    }

    println!("\n👋 Thanks for playing!\n");
    Ok(())
}

async fn guess(
    ctx: &GameContext,
    manager: &mut SessionManager,
    progress: &mut PlayerProgress,
    raw: &str,
) -> Result<(), GameError> {
    let outcome = manager.submit_guess(raw, ctx.dictionary.as_ref()).await?;
    let GuessOutcome::Accepted {
        record, completion, ..
    } = outcome
    else {
        return Ok(());
    };

    let Some(session) = manager.session() else {
        return Ok(());
    };
    print_guess_row(session.attempts_used(), &record);

    match completion {
        Some(event) => {
            progress
                .apply(ctx.store.as_ref(), &event, Utc::now())
                .await;
            print_finished(session, ctx.config.max_guesses);
            if let Some(meaning) = ctx.dictionary.fetch_meaning(&event.word).await {
                print_meaning(&meaning);
            }
            if event.is_daily {
                println!(
                    "\n🔥 Streak: {} (best {})",
                    progress.streak.current_streak, progress.streak.best_streak
                );
            }
            println!();
        }
        None => {
            println!();
            print_board(session);
        }
    }
    Ok(())
}

/// Reprint a session restored from an earlier run
fn show_resumed(manager: &SessionManager) {
    let Some(session) = manager.session() else {
        return;
    };
    if session.guesses.is_empty() {
        return;
    }

    println!("Resuming today's puzzle:\n");
    print_board(session);
    if session.status.is_finished() {
        print_finished(session, manager.config().max_guesses);
    }
}

/// Prompt and read one trimmed line; `None` at end of input
async fn prompt<R: AsyncBufRead + Unpin>(
    input: &mut Lines<R>,
    label: &str,
) -> std::io::Result<Option<String>> {
    print!("{label}: ");
    std::io::stdout().flush()?;
    Ok(input
        .next_line()
        .await?
        .map(|line| line.trim().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::context;
    use crate::core::Word;
    use crate::store::{DAILY_SESSION_KEY, HISTORY_KEY, PersistedStore};

    fn lines(script: &str) -> Lines<BufReader<&[u8]>> {
        BufReader::new(script.as_bytes()).lines()
    }

    #[test]
    fn commands_are_recognized() {
        assert_eq!(parse_command(":q"), Command::Quit);
        assert_eq!(parse_command(":new"), Command::NewPractice);
        assert_eq!(parse_command(":reset"), Command::Reset);
        assert_eq!(parse_command("crane"), Command::Guess("crane"));
    }

    #[tokio::test]
    async fn practice_game_to_completion() {
        let ctx = context(&["crane", "slate", "floor"]);
        let mode = PlayMode::Practice(Some(Word::new("floor").unwrap()));

        play(&ctx, mode, &mut lines("xyzzy\ncrane\nfloor\nno\n"))
            .await
            .unwrap();

        // Practice games reach the history but never the daily snapshot
        let progress = ctx.load_progress().await;
        assert_eq!(progress.history.len(), 1);
        assert!(progress.history.iter().all(|r| r.won && r.attempts_used == 2));
        assert_eq!(progress.streak.current_streak, 0);
        assert!(ctx.store.get(DAILY_SESSION_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn daily_progress_survives_quit() {
        let ctx = context(&["crane", "slate", "floor"]);

        play(&ctx, PlayMode::Daily, &mut lines("sl4te\n:quit\n"))
            .await
            .unwrap();
        assert!(ctx.store.get(DAILY_SESSION_KEY).await.unwrap().is_some());
        assert!(ctx.store.get(HISTORY_KEY).await.unwrap().is_none());

        // End of input also ends the game
        play(&ctx, PlayMode::Daily, &mut lines("")).await.unwrap();
    }
}
