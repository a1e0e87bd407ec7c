//! TUI rendering with ratatui
//!
//! Board, keyboard, statistics and messages for the puzzle.

use super::app::{App, MessageStyle};
use crate::core::LetterVerdict;
use crate::output::formatters::KEYBOARD_ROWS;
use crate::session::SessionStatus;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Board and keyboard
            Constraint::Percentage(45), // Stats, meaning, messages
        ])
        .split(chunks[1]);

    render_play_panel(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);
    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn verdict_style(verdict: Option<LetterVerdict>) -> Style {
    let base = Style::default().add_modifier(Modifier::BOLD);
    match verdict {
        Some(LetterVerdict::Correct) => base.fg(Color::Black).bg(Color::Green),
        Some(LetterVerdict::Present) => base.fg(Color::Black).bg(Color::Yellow),
        Some(LetterVerdict::Absent) => base.fg(Color::White).bg(Color::DarkGray),
        None => base.fg(Color::White),
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title = match app.manager.session() {
        Some(session) if session.is_daily => format!("🧩 DAILY WORD PUZZLE - {}", session.date),
        Some(_) => "🧩 DAILY WORD PUZZLE - Practice".to_string(),
        None => "🧩 DAILY WORD PUZZLE".to_string(),
    };

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_play_panel(f: &mut Frame, app: &App, area: Rect) {
    let board_height = u16::try_from(app.ctx.config.max_guesses).unwrap_or(u16::MAX);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(board_height.saturating_add(2)), // Board
            Constraint::Min(5),                                 // Keyboard
        ])
        .split(area);

    render_board(f, app, chunks[0]);
    render_keyboard(f, app, chunks[1]);
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let config = &app.ctx.config;
    let mut lines = Vec::with_capacity(config.max_guesses);

    if let Some(session) = app.manager.session() {
        for guess in &session.guesses {
            let mut spans = Vec::with_capacity(guess.verdicts.len());
            for (letter, &verdict) in guess.word.text().chars().zip(&guess.verdicts) {
                spans.push(Span::styled(format!(" {letter} "), verdict_style(Some(verdict))));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }

        // Row being typed
        if session.status == SessionStatus::Playing {
            let typed: Vec<char> = app.input_buffer.chars().collect();
            let spans: Vec<Span> = (0..config.word_length)
                .flat_map(|i| {
                    let cell = typed.get(i).map_or_else(|| " _ ".to_string(), |c| format!(" {c} "));
                    [
                        Span::styled(cell, verdict_style(None)),
                        Span::raw(" "),
                    ]
                })
                .collect();
            lines.push(Line::from(spans));
        }
    }

    while lines.len() < config.max_guesses {
        lines.push(Line::from(Span::styled(
            " · ".repeat(config.word_length),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let board = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Board ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(board, area);
}

fn render_keyboard(f: &mut Frame, app: &App, area: Rect) {
    let hints = app.manager.session().map(|s| &s.letter_hints);

    let lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .chars()
                .flat_map(|c| {
                    let verdict = hints.and_then(|h| h.get(c));
                    [
                        Span::styled(format!(" {c} "), verdict_style(verdict)),
                        Span::raw(" "),
                    ]
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let keyboard = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Keyboard ")
            .borders(Borders::ALL),
    );
    f.render_widget(keyboard, area);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Win rate gauge
            Constraint::Percentage(55), // Stats or meaning
            Constraint::Min(4),         // Messages
        ])
        .split(area);

    render_win_rate(f, app, chunks[0]);
    if app.show_stats {
        render_stats(f, app, chunks[1]);
    } else {
        render_meaning(f, app, chunks[1]);
    }
    render_messages(f, app, chunks[2]);
}

fn render_win_rate(f: &mut Frame, app: &App, area: Rect) {
    let summary = app.progress.summary();
    let percent = u16::try_from(summary.win_rate_percent.min(100)).unwrap_or(100);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Win Rate ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .percent(percent)
        .label(format!(
            "{percent}% of {} games | streak {}",
            summary.total_games, app.progress.streak.current_streak
        ));

    f.render_widget(gauge, area);
}

fn render_stats(f: &mut Frame, app: &App, area: Rect) {
    let summary = app.progress.summary();
    let streak = &app.progress.streak;
    let largest = summary.guess_distribution.iter().copied().max().unwrap_or(0);
    let last_turn = app
        .manager
        .session()
        .filter(|s| s.status == SessionStatus::Won)
        .map(|s| s.attempts_used());

    let mut lines = vec![
        Line::from(format!(
            "Played {}  Won {}  Lost {}",
            summary.total_games, summary.wins, summary.losses
        )),
        Line::from(format!(
            "Streak {}  Best {}",
            streak.current_streak, streak.best_streak
        )),
        Line::from(""),
    ];

    for (i, &count) in summary.guess_distribution.iter().enumerate() {
        let width = if largest == 0 { 0 } else { count * 20 / largest };
        let color = if last_turn == Some(i + 1) {
            Color::Green
        } else {
            Color::DarkGray
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{}: ", i + 1)),
            Span::styled("█".repeat(width.max(1)), Style::default().fg(color)),
            Span::raw(format!(" {count}")),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Statistics ")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Green)),
    );
    f.render_widget(paragraph, area);
}

fn render_meaning(f: &mut Frame, app: &App, area: Rect) {
    let lines = match &app.meaning {
        Some(meaning) => {
            let mut lines = vec![Line::from(vec![
                Span::styled(
                    meaning.word.to_uppercase(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    "  {}",
                    meaning.phonetic.as_deref().unwrap_or_default()
                )),
            ])];
            for sense in &meaning.meanings {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("({}) ", sense.part_of_speech),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(sense.definition.clone()),
                ]));
            }
            lines
        }
        None => vec![Line::from(
            "Type a word and press Enter. Tab shows statistics.",
        )],
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Meaning ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, content, color) = if app.is_finished() {
        (
            " 🎉 Puzzle finished | 'n' practice word, 'r' restart practice, 'q' quit ",
            String::new(),
            Color::Green,
        )
    } else if app.manager.is_validating() {
        (" Checking word... ", app.input_buffer.clone(), Color::Cyan)
    } else {
        (
            " Enter Guess | Enter to submit, Esc to quit ",
            app.input_buffer.clone(),
            Color::Yellow,
        )
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    let mode_text = match app.manager.session() {
        Some(session) if session.is_daily => "Mode: Daily",
        Some(_) => "Mode: Practice",
        None => "Mode: -",
    };
    f.render_widget(Paragraph::new(mode_text).alignment(Alignment::Center), chunks[0]);

    let attempts_text = app.manager.session().map_or_else(String::new, |s| {
        format!(
            "Guesses: {}/{}",
            s.attempts_used(),
            app.ctx.config.max_guesses
        )
    });
    f.render_widget(
        Paragraph::new(attempts_text).alignment(Alignment::Center),
        chunks[1],
    );

    let help = Paragraph::new("Esc: Quit | Tab: Stats | Ctrl-C: Exit")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::PlayMode;
    use crate::commands::testing::context;
    use crate::core::Word;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[tokio::test]
    async fn draws_board_and_typed_letters() {
        let ctx = context(&["crane", "slate", "floor"]);
        let mode = PlayMode::Practice(Some(Word::new("floor").unwrap()));
        let (mut app, _rx) = App::new(ctx, &mode).await.unwrap();
        for c in "cra".chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
                .await
                .unwrap();
        }

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Practice"));
        assert!(text.contains("Board"));
        assert!(text.contains(" C "));
        assert!(text.contains("Keyboard"));
    }
}
