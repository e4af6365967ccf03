//! UI rendering tests for tvremote
//!
//! Draws full frames into ratatui's TestBackend and checks what a viewer
//! would see.

use ratatui::{backend::TestBackend, Terminal};
use tvremote::app::{App, Screen};
use tvremote::login::LoginForm;
use tvremote::models::Channel;
use tvremote::ui::{self, channels::scroll_offset};

fn draw(app: &App, width: u16, height: u16) -> Vec<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect()
}

fn screen_text(lines: &[String]) -> String {
    lines.join("\n")
}

fn channel_app(n: usize) -> App {
    let mut app = App::new();
    app.channels = (0..n)
        .map(|i| Channel::from_url(format!("Channel {:03}", i), format!("http://h/{}.ts", i)))
        .collect();
    app.screen = Screen::Channels;
    app
}

// =============================================================================
// Login Screen
// =============================================================================

/// Test: login form shows its fields and masks the password
#[test]
fn test_login_renders_fields() {
    let app = App::with_form(LoginForm::new("http://h/list.m3u", "alice", "secret"));
    let text = screen_text(&draw(&app, 80, 24));

    assert!(text.contains("http://h/list.m3u"));
    assert!(text.contains("alice"));
    assert!(!text.contains("secret"));
    assert!(text.contains("••••••"));
    assert!(text.contains("Login"));
}

/// Test: the loading indicator appears while a fetch is outstanding
#[test]
fn test_loading_indicator() {
    let mut app = App::new();
    app.pending_fetches = 1;
    let text = screen_text(&draw(&app, 80, 24));
    assert!(text.contains("Loading"));
}

// =============================================================================
// Channel List
// =============================================================================

/// Test: focused channel carries the focus marker
#[test]
fn test_focused_channel_marker() {
    let mut app = channel_app(5);
    app.handle_event(tvremote::UiEvent::NavigateDown);
    let lines = draw(&app, 80, 24);

    let focused: Vec<&String> = lines.iter().filter(|l| l.contains('▸')).collect();
    assert_eq!(focused.len(), 1);
    assert!(focused[0].contains("Channel 001"));
}

/// Test: focus far down the list is scrolled into view
#[test]
fn test_focus_scrolled_into_view() {
    let mut app = channel_app(100);
    app.handle_event(tvremote::UiEvent::NavigateUp);
    let text = screen_text(&draw(&app, 80, 24));

    assert!(text.contains("Channel 099"));
    assert!(!text.contains("Channel 000"));
}

/// Test: an empty playlist says so instead of drawing an empty box
#[test]
fn test_empty_channel_list() {
    let app = channel_app(0);
    let text = screen_text(&draw(&app, 80, 24));
    assert!(text.contains("No channels found"));
}

/// Test: the now-playing line names the channel
#[test]
fn test_now_playing_line() {
    let mut app = channel_app(3);
    app.playback_started(app.channels[2].clone());
    let text = screen_text(&draw(&app, 80, 24));
    assert!(text.contains("▶ Channel 002"));
}

#[test]
fn test_scroll_offset_keeps_focus_visible() {
    for height in 1..20 {
        for focused in 0..60 {
            let offset = scroll_offset(focused, height);
            assert!(offset <= focused);
            assert!(focused < offset + height);
        }
    }
}

// =============================================================================
// Error Overlay
// =============================================================================

/// Test: error overlay draws over the current screen
#[test]
fn test_error_overlay() {
    let mut app = channel_app(3);
    app.show_error("Please provide a URL");
    let text = screen_text(&draw(&app, 80, 24));

    assert!(text.contains("ERROR"));
    assert!(text.contains("Error: Please provide a URL"));
    assert!(text.contains("OK"));
}

/// Test: small and large terminals both render without panicking
#[test]
fn test_layout_sizes() {
    let app = channel_app(10);
    for (w, h) in [(40, 10), (80, 24), (200, 50)] {
        let lines = draw(&app, w, h);
        assert_eq!(lines.len(), h as usize);
    }
}
