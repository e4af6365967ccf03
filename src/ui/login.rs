//! Login screen
//!
//! URL, username and password fields followed by the Login button. The
//! focused control gets the bright border; the password is masked.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::App;
use crate::login::LoginControl;
use crate::ui::Theme;

const FIELD_HEIGHT: u16 = 3;

pub fn render_login(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(" PLAYLIST LOGIN ", Theme::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.min(70);
    let form_area = Rect {
        x: inner.x + (inner.width - width) / 2,
        width,
        ..inner
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Min(0),
        ])
        .split(form_area);

    let focused = app.focused_control();
    render_field(frame, rows[1], app, LoginControl::Url, focused);
    render_field(frame, rows[2], app, LoginControl::Username, focused);
    render_field(frame, rows[3], app, LoginControl::Password, focused);
    render_button(frame, rows[5], app, focused == Some(LoginControl::Submit));

    let hint = Paragraph::new(Line::from(Span::styled(
        "M3U link, or server URL with username and password",
        Theme::dimmed(),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(hint, rows[6]);
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    control: LoginControl,
    focused: Option<LoginControl>,
) {
    let is_focused = focused == Some(control);
    let value = app.form.field(control).unwrap_or_default();

    let mut shown = if control == LoginControl::Password {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    if is_focused {
        shown.push('│');
    }

    let field = Paragraph::new(shown).style(Theme::input()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if is_focused {
                Theme::border_focused()
            } else {
                Theme::border()
            })
            .title(Span::styled(format!(" {} ", control.label()), Theme::title())),
    );
    frame.render_widget(field, area);
}

fn render_button(frame: &mut Frame, area: Rect, app: &App, is_focused: bool) {
    let label = if app.is_loading() {
        "⟳ Loading..."
    } else {
        LoginControl::Submit.label()
    };

    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(if is_focused {
            Theme::focused()
        } else {
            Theme::text()
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if is_focused {
                    Theme::border_focused()
                } else {
                    Theme::border()
                }),
        );
    frame.render_widget(button, area);
}
