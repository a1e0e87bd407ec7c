//! Daily Wordle - CLI
//!
//! Daily word puzzle with TUI and line-based modes, plus maintenance commands
//! for the daily schedule.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use daily_wordle::{
    commands::{GameContext, PlayMode, define_word, run_audit, run_simple},
    config::{self, GameConfig},
    core::Word,
    daily::{DailyWordSelector, DailyWordSource, DateKey, ReferenceTimezone, RemoteDailyWord},
    dictionary::{Dictionary, FreeDictionaryClient, WordListDictionary},
    output::{print_audit_result, print_meaning, print_schedule, print_stats},
    store::FileStore,
    wordlists::{WORDS, WordList, loader::words_from_slice},
};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(
    name = "daily_wordle",
    about = "Daily word puzzle with streaks and statistics",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Store file (default: platform data directory)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Custom word list file, one word per line
    #[arg(short = 'w', long, global = true)]
    wordlist: Option<PathBuf>,

    /// Validate guesses against the word list instead of the online dictionary
    #[arg(long, global = true)]
    offline: bool,

    /// Fetch the daily word from this endpoint instead of the local selector
    #[arg(long, global = true)]
    daily_url: Option<String>,

    /// Letters per word
    #[arg(long, global = true)]
    word_length: Option<usize>,

    /// Attempts per puzzle
    #[arg(long, global = true)]
    max_guesses: Option<usize>,

    /// Reference timezone: UTC or an offset like +05:30
    #[arg(long, global = true)]
    timezone: Option<ReferenceTimezone>,

    /// Completed games kept in the history
    #[arg(long, global = true)]
    history_cap: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play today's puzzle in the TUI (default)
    Play,

    /// Play a practice puzzle in the TUI
    Practice {
        /// Secret to practice with (default: random word)
        #[arg(long)]
        word: Option<String>,
    },

    /// Line-based game without the TUI
    Simple {
        /// Play a practice word instead of today's puzzle
        #[arg(long)]
        practice: bool,
    },

    /// Show statistics, streak and guess distribution
    Stats,

    /// List upcoming daily words
    Schedule {
        /// First date, YYYY-MM-DD (default: today)
        #[arg(long)]
        from: Option<DateKey>,

        /// Number of days
        #[arg(short = 'n', long, default_value = "7")]
        days: usize,
    },

    /// Check how evenly the daily selector covers the word list
    Audit {
        /// First date, YYYY-MM-DD (default: today)
        #[arg(long)]
        from: Option<DateKey>,

        /// Number of days
        #[arg(short = 'n', long, default_value = "3650")]
        days: usize,
    },

    /// Look up the meaning of a word
    Define {
        /// Word to look up
        word: String,
    },
}

impl Cli {
    /// Config file, then command-line overrides
    fn game_config(&self) -> Result<GameConfig> {
        let path = self.config.clone().or_else(config::default_config_path);
        let mut game = match path {
            Some(path) => GameConfig::from_toml_file(&path)?,
            None => GameConfig::default(),
        };

        if let Some(word_length) = self.word_length {
            game.word_length = word_length;
        }
        if let Some(max_guesses) = self.max_guesses {
            game.max_guesses = max_guesses;
        }
        if let Some(timezone) = self.timezone {
            game.reference_timezone = timezone;
        }
        if let Some(history_cap) = self.history_cap {
            game.history_cap = history_cap;
        }

        game.validate()?;
        Ok(game)
    }
}

fn load_word_list(path: Option<&Path>, word_length: usize) -> Result<Arc<WordList>> {
    use daily_wordle::wordlists::loader::load_from_file;

    let words = match path {
        Some(path) => load_from_file(path)
            .with_context(|| format!("cannot read word list {}", path.display()))?,
        None => words_from_slice(WORDS),
    };
    Ok(Arc::new(WordList::new(words, word_length)?))
}

fn build_context(cli: &Cli) -> Result<GameContext> {
    let config = cli.game_config()?;
    let words = load_word_list(cli.wordlist.as_deref(), config.word_length)?;

    let store_path = cli.store.clone().unwrap_or_else(config::default_store_path);
    tracing::info!(path = %store_path.display(), words = words.len(), "using store");

    let dictionary: Arc<dyn Dictionary> = if cli.offline {
        Arc::new(WordListDictionary::new(Arc::clone(&words)))
    } else {
        Arc::new(FreeDictionaryClient::new()?)
    };

    let source: Arc<dyn DailyWordSource> = match &cli.daily_url {
        Some(url) => Arc::new(RemoteDailyWord::new(url.clone())?),
        None => Arc::new(DailyWordSelector::new(Arc::clone(&words))),
    };

    Ok(GameContext {
        config,
        store: Arc::new(FileStore::new(store_path)),
        dictionary,
        source,
        words,
    })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    let log_path = config::default_log_path();
    let file = log_path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|()| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
        });

    match file {
        Ok(file) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
            tracing::info!(path = %log_path.display(), "Logging initialized");
        }
        // Without a log file, no logs rather than a corrupted TUI
        Err(_) => tracing_subscriber::registry().with(env_filter).init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let ctx = build_context(&cli)?;

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match command {
        Commands::Play => daily_wordle::interactive::run_tui(ctx, PlayMode::Daily).await,
        Commands::Practice { word } => {
            let word = word
                .map(|w| Word::with_length(w, ctx.config.word_length))
                .transpose()?;
            daily_wordle::interactive::run_tui(ctx, PlayMode::Practice(word)).await
        }
        Commands::Simple { practice } => {
            let mode = if practice {
                PlayMode::Practice(None)
            } else {
                PlayMode::Daily
            };
            run_simple(&ctx, mode).await
        }
        Commands::Stats => {
            let progress = ctx.load_progress().await;
            print_stats(&progress);
            Ok(())
        }
        Commands::Schedule { from, days } => {
            let today = ctx.today();
            let selector = DailyWordSelector::new(Arc::clone(&ctx.words));
            print_schedule(&selector.schedule(from.unwrap_or(today), days), today);
            Ok(())
        }
        Commands::Audit { from, days } => {
            let selector = DailyWordSelector::new(Arc::clone(&ctx.words));
            let from = from.unwrap_or_else(|| ctx.today());
            println!("Auditing {days} days of daily words...");
            print_audit_result(&run_audit(&selector, from, days, true));
            Ok(())
        }
        Commands::Define { word } => {
            match define_word(ctx.dictionary.as_ref(), &word).await? {
                Some(meaning) => print_meaning(&meaning),
                None => println!("No definition found for {}", word.to_uppercase()),
            }
            Ok(())
        }
    }
}
