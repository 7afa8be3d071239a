use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::chat::{Phase, Sender};
use crate::render::terminal::transcript_lines;
use crate::tui::app::{InputMode, TuiState, WhisprApp};

/// Render the main UI
pub fn render_ui(f: &mut Frame, app: &WhisprApp, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status bar
            Constraint::Min(5),    // Messages
            Constraint::Length(3), // Input box
        ])
        .split(f.size());

    render_status_bar(f, app, state, chunks[0]);
    render_messages(f, app, chunks[1]);
    render_input_box(f, app, state, chunks[2]);
}

/// Render the status bar
fn render_status_bar(f: &mut Frame, app: &WhisprApp, state: &TuiState, area: Rect) {
    let (status, status_color) = match app.phase() {
        Phase::Pending { .. } => ("Waiting for reply", Color::Yellow),
        Phase::Completed {
            sender: Sender::Error,
            ..
        } => ("Last request failed", Color::Red),
        _ => ("Ready", Color::Green),
    };

    let hint = match state.input_mode {
        InputMode::Editing => "Enter send · Esc normal mode",
        InputMode::Normal => "e edit · q quit",
    };

    let status_text = Line::from(vec![
        Span::styled("Model: ", Style::default().fg(Color::Gray)),
        Span::styled(app.model_name().to_string(), Style::default().fg(Color::Green)),
        Span::styled(" | ", Style::default().fg(Color::Gray)),
        Span::styled(status, Style::default().fg(status_color)),
        Span::styled(" | ", Style::default().fg(Color::Gray)),
        Span::styled(hint, Style::default().fg(Color::DarkGray)),
    ]);

    let status_bar =
        Paragraph::new(status_text).block(Block::default().borders(Borders::ALL).title("Whispr"));

    f.render_widget(status_bar, area);
}

/// First line to show so the newest message stays in view.
pub fn scroll_offset(total_lines: usize, area_height: u16) -> u16 {
    let visible = area_height.saturating_sub(2) as usize; // borders
    total_lines.saturating_sub(visible).min(u16::MAX as usize) as u16
}

/// Render the messages area
fn render_messages(f: &mut Frame, app: &WhisprApp, area: Rect) {
    // Lines come back wrapped to the inner width, so each one is one row
    let inner_width = area.width.saturating_sub(2) as usize;
    let lines = transcript_lines(app.records(), Some(inner_width));
    let offset = scroll_offset(lines.len(), area.height);

    let messages = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Conversation"))
        .scroll((offset, 0));

    f.render_widget(messages, area);
}

/// Render the input box
fn render_input_box(f: &mut Frame, app: &WhisprApp, state: &TuiState, area: Rect) {
    let dimmed = app.is_pending() || state.input_mode == InputMode::Normal;
    let title = if app.is_pending() {
        "Input (waiting...)"
    } else {
        "Input"
    };

    let input = Paragraph::new(app.input())
        .style(Style::default())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .style(Style::default().fg(if dimmed {
                    Color::DarkGray
                } else {
                    Color::White
                })),
        );

    f.render_widget(input, area);

    // Show cursor only while the input is live
    if !dimmed {
        let width = app.input().chars().count() as u16;
        f.set_cursor(area.x + width + 1, area.y + 1);
    }
}
