//! TUI application state and logic

use crate::commands::{GameContext, PlayMode};
use crate::daily::DateKey;
use crate::dictionary::WordMeaning;
use crate::error::GameError;
use crate::progress::PlayerProgress;
use crate::session::{GuessOutcome, PendingGuess, SessionManager, SessionPhase};
use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::debug;

/// Results of work done off the UI loop
#[derive(Debug)]
pub enum Background {
    Validated { pending: PendingGuess, valid: bool },
    Meaning {
        instance: u64,
        meaning: Option<WordMeaning>,
    },
}

/// Application state
pub struct App {
    pub ctx: GameContext,
    pub manager: SessionManager,
    pub progress: PlayerProgress,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    pub meaning: Option<WordMeaning>,
    pub show_stats: bool,
    pub should_quit: bool,
    tx: UnboundedSender<Background>,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl App {
    /// Start the puzzle for `mode` and return the app with the receiver for
    /// its background results
    ///
    /// # Errors
    ///
    /// Returns an error if the puzzle cannot be started.
    pub async fn new(
        ctx: GameContext,
        mode: &PlayMode,
    ) -> Result<(Self, UnboundedReceiver<Background>), GameError> {
        let (tx, rx) = unbounded_channel();
        let mut manager = ctx.session_manager()?;
        let progress = ctx.load_progress().await;
        let warning = mode.start(&ctx, &mut manager).await?;

        let mut app = Self {
            ctx,
            manager,
            progress,
            input_buffer: String::new(),
            messages: Vec::new(),
            meaning: None,
            show_stats: false,
            should_quit: false,
            tx,
        };

        if let Some(warning) = warning {
            app.add_message(&warning, MessageStyle::Error);
        }
        app.announce_start();
        Ok((app, rx))
    }

    fn announce_start(&mut self) {
        let Some(session) = self.manager.session() else {
            return;
        };
        let finished = session.status.is_finished();
        let text = match (session.is_daily, session.guesses.len()) {
            (true, 0) => format!("Daily puzzle for {}. Good luck!", session.date),
            (true, n) => format!("Resumed today's puzzle after {n} guesses."),
            (false, _) => "Practice word chosen. Good luck!".to_string(),
        };
        self.add_message(&text, MessageStyle::Info);

        if finished {
            self.add_message(
                "Today's puzzle is done. Press 'n' for a practice word.",
                MessageStyle::Info,
            );
            self.show_stats = true;
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    /// Whether the current puzzle is over
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.manager.phase(), SessionPhase::Won | SessionPhase::Lost)
    }

    /// Handle one key press
    ///
    /// # Errors
    ///
    /// Returns an error only for faults that should end the TUI.
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<(), GameError> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        if self.is_finished() {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('n') => self.new_practice().await?,
                KeyCode::Char('r') => self.reset_practice(),
                KeyCode::Char('s') => self.show_stats = !self.show_stats,
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.show_stats = !self.show_stats,
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                if self.input_buffer.len() < self.ctx.config.word_length {
                    self.input_buffer.push(c.to_ascii_uppercase());
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Enter => self.submit().await?,
            _ => {}
        }
        Ok(())
    }

    /// Send the typed guess for validation
    async fn submit(&mut self) -> Result<(), GameError> {
        let pending = match self.manager.begin_guess(&self.input_buffer) {
            Ok(pending) => pending,
            Err(e) if e.is_user_input() => {
                self.add_message(&e.to_string(), MessageStyle::Error);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if !pending.needs_validation() {
            return self.resolve(pending, true).await;
        }

        let dictionary = Arc::clone(&self.ctx.dictionary);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let valid = dictionary.is_valid_word(pending.word()).await;
            // The receiver only goes away when the app is closing
            let _ = tx.send(Background::Validated { pending, valid });
        });
        Ok(())
    }

    /// Apply a result produced off the UI loop
    ///
    /// # Errors
    ///
    /// Returns an error only for faults that should end the TUI.
    pub async fn handle_background(&mut self, message: Background) -> Result<(), GameError> {
        match message {
            Background::Validated { pending, valid } => self.resolve(pending, valid).await,
            Background::Meaning { instance, meaning } => {
                if instance == self.manager.instance() {
                    self.meaning = meaning;
                } else {
                    debug!("meaning arrived for a replaced puzzle");
                }
                Ok(())
            }
        }
    }

    async fn resolve(&mut self, pending: PendingGuess, valid: bool) -> Result<(), GameError> {
        let outcome = match self.manager.resolve_guess(pending, valid).await {
            Ok(outcome) => outcome,
            Err(e) if e.is_user_input() => {
                self.add_message(&e.to_string(), MessageStyle::Error);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let GuessOutcome::Accepted { completion, .. } = outcome else {
            debug!("validation result arrived for a replaced puzzle");
            return Ok(());
        };
        self.input_buffer.clear();

        let Some(event) = completion else {
            return Ok(());
        };

        self.progress
            .apply(self.ctx.store.as_ref(), &event, Utc::now())
            .await;

        if event.won {
            let celebration = match event.attempts_used {
                1 => "🎯 HOLE IN ONE! Extraordinary! 🌟",
                2 => "🔥 MAGNIFICENT! Two guesses! 🔥",
                3 => "✨ SPLENDID! Three guesses! ✨",
                4 => "👏 GREAT JOB! Four guesses! 👏",
                5 => "🎉 NICE WORK! Five guesses! 🎉",
                _ => "😅 PHEW! Got it! 😅",
            };
            self.add_message(celebration, MessageStyle::Success);
        } else {
            self.add_message(
                &format!("Out of guesses. The word was {}.", event.word),
                MessageStyle::Error,
            );
        }
        self.add_message(
            "Press 'n' for a practice word, 's' for stats or 'q' to quit.",
            MessageStyle::Info,
        );
        self.show_stats = true;

        let dictionary = Arc::clone(&self.ctx.dictionary);
        let tx = self.tx.clone();
        let instance = self.manager.instance();
        tokio::spawn(async move {
            let meaning = dictionary.fetch_meaning(&event.word).await;
            let _ = tx.send(Background::Meaning { instance, meaning });
        });
        Ok(())
    }

    async fn new_practice(&mut self) -> Result<(), GameError> {
        PlayMode::Practice(None)
            .start(&self.ctx, &mut self.manager)
            .await?;
        self.reset_view();
        self.add_message(
            "New practice word chosen. Good luck!",
            MessageStyle::Info,
        );
        Ok(())
    }

    fn reset_practice(&mut self) {
        match self.manager.reset_practice() {
            Ok(()) => {
                self.reset_view();
                self.add_message("Practice restarted.", MessageStyle::Info);
            }
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    fn reset_view(&mut self) {
        self.input_buffer.clear();
        self.meaning = None;
        self.show_stats = false;
    }

    /// Move to the new daily puzzle once the date changes
    ///
    /// # Errors
    ///
    /// Returns an error if the new puzzle cannot be started.
    pub async fn tick(&mut self, today: DateKey) -> Result<(), GameError> {
        if let Some(outcome) = self.manager.roll_over(today).await? {
            self.reset_view();
            if let Some(warning) = outcome.warning {
                self.add_message(&warning, MessageStyle::Error);
            }
            self.add_message(
                &format!("A new day! Daily puzzle for {today}."),
                MessageStyle::Info,
            );
        }
        Ok(())
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if the puzzle cannot be started, if terminal setup or
/// cleanup fails, or on an I/O error during rendering or event handling.
pub async fn run_tui(ctx: GameContext, mode: PlayMode) -> Result<()> {
    let (app, rx) = App::new(ctx, &mode).await?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app, rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut rx: UnboundedReceiver<Background>,
) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        while let Ok(message) = rx.try_recv() {
            app.handle_background(message).await?;
        }
        app.tick(app.ctx.today()).await?;

        // Only process key press events (fixes Windows double-input bug)
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key).await?;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
