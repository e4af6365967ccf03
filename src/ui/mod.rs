//! Terminal UI components
//!
//! Built with ratatui. Every screen is drawn from [`App`] alone, so a
//! render is a pure function of session state.

pub mod theme;
pub mod login;
pub mod channels;

pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, Screen};

/// Draw the whole frame
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    match app.screen {
        Screen::Login => login::render_login(frame, chunks[1], app),
        Screen::Channels => channels::render_channels(frame, chunks[1], app),
    }
    render_status_bar(frame, chunks[2], app);

    if let Some(ref message) = app.overlay {
        render_error_popup(frame, area, message);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            "TV",
            Style::default()
                .fg(Theme::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "REMOTE",
            Style::default()
                .fg(Theme::SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", app.screen.title()), Theme::dimmed()),
    ];
    if app.is_loading() {
        spans.push(Span::styled("  ⟳ loading", Theme::loading()));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border()),
        );
    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let hints: &[(&str, &str)] = if app.overlay.is_some() {
        &[("↵", "ok"), ("ESC", "dismiss")]
    } else {
        match app.screen {
            Screen::Login => &[("↑↓", "move"), ("↵", "select"), ("Ctrl+C", "quit")],
            Screen::Channels => &[("↑↓", "move"), ("↵", "play"), ("ESC", "back"), ("q", "quit")],
        }
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", app.screen.title()),
        Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY),
    )];
    for (key, action) in hints {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(*key, Theme::keybind()));
        spans.push(Span::styled(format!(" {}", action), Theme::dimmed()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(Theme::status_bar()), area);
}

fn render_error_popup(frame: &mut Frame, area: Rect, message: &str) {
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = 7;

    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(popup_width)) / 2,
        y: area.y + (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height.min(area.height),
    };

    frame.render_widget(Clear, popup_area);

    let popup = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, Theme::error())),
        Line::from(""),
        Line::from(Span::styled(" OK ", Theme::focused())),
    ])
    .alignment(Alignment::Center)
    .wrap(ratatui::widgets::Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(" ✗ ERROR ", Theme::error()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(popup, popup_area);
}
