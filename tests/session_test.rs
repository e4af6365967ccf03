//! Session flow tests
//!
//! Drive the app with logical events and a fake retrieval source:
//! Login -> Channels -> Play -> Back, plus the error paths.

use std::sync::atomic::{AtomicUsize, Ordering};

use tvremote::api::{PlaylistSource, RetrievalError, Stage};
use tvremote::app::{App, Command, Screen, UiEvent};
use tvremote::keymap::{map_key_code, Platform, KEY_DOWN, KEY_ENTER, KEY_UP};
use tvremote::login::{LoginForm, PlaylistRequest};
use tvremote::models::Channel;

/// Answers every fetch the same way and counts calls
struct FakeSource {
    calls: AtomicUsize,
    fail_with: Option<u16>,
    channels: Vec<Channel>,
}

impl FakeSource {
    fn ok(channels: Vec<Channel>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_with: None,
            channels,
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_with: Some(status),
            channels: Vec::new(),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PlaylistSource for FakeSource {
    async fn fetch(&self, _request: &PlaylistRequest) -> Result<Vec<Channel>, RetrievalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_with {
            Some(status) => Err(RetrievalError::Status {
                stage: Stage::FetchPlaylist,
                status,
                detail: "Internal Server Error".into(),
            }),
            None => Ok(self.channels.clone()),
        }
    }
}

fn channels(names: &[&str]) -> Vec<Channel> {
    names
        .iter()
        .map(|n| Channel::from_url(*n, format!("http://h/{}.m3u8", n.to_lowercase())))
        .collect()
}

/// Feed one event; run a Fetch against the source the way the event loop does
async fn step(app: &mut App, source: &FakeSource, event: UiEvent) -> Option<Command> {
    match app.handle_event(event) {
        Some(Command::Fetch(request)) => {
            let result = source.fetch(&request).await;
            app.complete_login(result);
            None
        }
        other => other,
    }
}

fn m3u_form() -> LoginForm {
    LoginForm::new("http://h/list.m3u", "", "")
}

/// Move focus to the Login button (index 3) with Up from the URL field
async fn focus_submit(app: &mut App, source: &FakeSource) {
    step(app, source, UiEvent::NavigateUp).await;
}

// =============================================================================
// Happy Path
// =============================================================================

/// Test: login, pick the second channel, play it, go back
#[tokio::test]
async fn test_login_browse_play_back() {
    let source = FakeSource::ok(channels(&["News", "Sports", "Kids"]));
    let mut app = App::with_form(m3u_form());

    focus_submit(&mut app, &source).await;
    assert!(step(&mut app, &source, UiEvent::Activate).await.is_none());

    assert_eq!(source.calls(), 1);
    assert_eq!(app.screen, Screen::Channels);
    assert_eq!(app.channels.len(), 3);
    assert_eq!(app.focus.index(), 0);
    assert!(!app.is_loading());

    step(&mut app, &source, UiEvent::NavigateDown).await;
    let command = step(&mut app, &source, UiEvent::Activate).await;
    let Some(Command::Play(channel)) = command else {
        panic!("expected Play, got {:?}", command);
    };
    assert_eq!(channel.name, "Sports");
    assert_eq!(channel.url, "http://h/sports.m3u8");
    app.playback_started(channel);
    assert!(app.now_playing.is_some());

    let command = step(&mut app, &source, UiEvent::Cancel).await;
    assert_eq!(command, Some(Command::StopPlayback));
    assert_eq!(app.screen, Screen::Login);
    assert!(app.now_playing.is_none());
    assert_eq!(app.focus.index(), 0);
}

/// Test: wrap-around on the channel list
#[tokio::test]
async fn test_channel_focus_wraps() {
    let source = FakeSource::ok(channels(&["A", "B", "C"]));
    let mut app = App::with_form(m3u_form());
    focus_submit(&mut app, &source).await;
    step(&mut app, &source, UiEvent::Activate).await;

    step(&mut app, &source, UiEvent::NavigateUp).await;
    assert_eq!(app.focused_channel().map(|c| c.name.as_str()), Some("C"));
    step(&mut app, &source, UiEvent::NavigateDown).await;
    assert_eq!(app.focused_channel().map(|c| c.name.as_str()), Some("A"));
}

/// Test: remote key codes drive the same flow on every platform
#[tokio::test]
async fn test_remote_codes_drive_session() {
    for platform in [Platform::Tizen, Platform::WebOs, Platform::Browser] {
        let source = FakeSource::ok(channels(&["One", "Two"]));
        let mut app = App::with_form(m3u_form());

        for code in [KEY_UP, KEY_ENTER] {
            let event = map_key_code(platform, code).unwrap();
            step(&mut app, &source, event).await;
        }
        assert_eq!(app.screen, Screen::Channels, "{:?}", platform);

        step(&mut app, &source, map_key_code(platform, KEY_DOWN).unwrap()).await;
        let back = map_key_code(platform, platform.back_code()).unwrap();
        assert_eq!(
            step(&mut app, &source, back).await,
            Some(Command::StopPlayback)
        );
        assert_eq!(app.screen, Screen::Login);
    }
}

// =============================================================================
// Error Paths
// =============================================================================

/// Test: empty form raises an input error and never calls the source
#[tokio::test]
async fn test_empty_login_does_not_fetch() {
    let source = FakeSource::ok(channels(&["News"]));
    let mut app = App::new();

    focus_submit(&mut app, &source).await;
    step(&mut app, &source, UiEvent::Activate).await;

    assert_eq!(source.calls(), 0);
    assert_eq!(app.screen, Screen::Login);
    assert_eq!(app.overlay.as_deref(), Some("Error: Please provide a URL"));
}

/// Test: server URL without credentials asks for them
#[tokio::test]
async fn test_server_without_credentials() {
    let source = FakeSource::ok(Vec::new());
    let mut app = App::with_form(LoginForm::new("http://provider:8080", "user", ""));

    focus_submit(&mut app, &source).await;
    step(&mut app, &source, UiEvent::Activate).await;

    assert_eq!(source.calls(), 0);
    assert!(app
        .overlay
        .as_deref()
        .is_some_and(|m| m.contains("credentials")));
}

/// Test: a failed fetch shows status and stage and keeps the old list
#[tokio::test]
async fn test_failed_fetch_keeps_channels() {
    let good = FakeSource::ok(channels(&["Kept"]));
    let bad = FakeSource::failing(500);
    let mut app = App::with_form(m3u_form());

    focus_submit(&mut app, &good).await;
    step(&mut app, &good, UiEvent::Activate).await;
    step(&mut app, &good, UiEvent::Cancel).await;
    assert_eq!(app.screen, Screen::Login);

    focus_submit(&mut app, &bad).await;
    step(&mut app, &bad, UiEvent::Activate).await;

    assert_eq!(bad.calls(), 1);
    let message = app.overlay.clone().unwrap_or_default();
    assert!(message.starts_with("Error: "), "{}", message);
    assert!(message.contains("500"), "{}", message);
    assert!(message.contains("fetching M3U playlist"), "{}", message);
    assert_eq!(app.channels, channels(&["Kept"]));
    assert_eq!(app.screen, Screen::Login);

    // Dismissing the overlay returns focus to the first control
    step(&mut app, &bad, UiEvent::Activate).await;
    assert!(app.overlay.is_none());
    assert_eq!(app.focus.index(), 0);
}

/// Test: Cancel on the login screen does nothing
#[tokio::test]
async fn test_cancel_ignored_on_login() {
    let source = FakeSource::ok(Vec::new());
    let mut app = App::with_form(m3u_form());

    assert!(step(&mut app, &source, UiEvent::Cancel).await.is_none());
    assert_eq!(app.screen, Screen::Login);
    assert!(app.running);
}

// =============================================================================
// Overlapping Logins
// =============================================================================

/// Test: two outstanding fetches, whichever completes last wins
#[tokio::test]
async fn test_last_completion_wins() {
    let mut app = App::with_form(m3u_form());
    let first = FakeSource::ok(channels(&["First"]));
    let second = FakeSource::ok(channels(&["Second", "Second B"]));

    app.handle_event(UiEvent::NavigateUp);
    let Some(Command::Fetch(req_a)) = app.handle_event(UiEvent::Activate) else {
        panic!("expected first fetch");
    };
    let Some(Command::Fetch(req_b)) = app.handle_event(UiEvent::Activate) else {
        panic!("expected second fetch");
    };
    assert_eq!(app.pending_fetches, 2);
    assert!(app.is_loading());

    let (result_a, result_b) = futures::join!(first.fetch(&req_a), second.fetch(&req_b));

    // The second request finishes first
    app.complete_login(result_b);
    assert_eq!(app.channels.len(), 2);
    assert!(app.is_loading());

    app.complete_login(result_a);
    assert_eq!(app.channels, channels(&["First"]));
    assert_eq!(app.screen, Screen::Channels);
    assert!(!app.is_loading());
}

/// Test: an empty playlist lands on an empty channel list
#[tokio::test]
async fn test_empty_playlist_shows_empty_list() {
    let source = FakeSource::ok(Vec::new());
    let mut app = App::with_form(m3u_form());

    focus_submit(&mut app, &source).await;
    step(&mut app, &source, UiEvent::Activate).await;

    assert_eq!(app.screen, Screen::Channels);
    assert!(app.channels.is_empty());
    assert!(app.overlay.is_none());
    assert!(step(&mut app, &source, UiEvent::Activate).await.is_none());
}
