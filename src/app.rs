//! App state and session control
//!
//! Owns the channel list, the focus index and the screen state machine.
//! Input arrives as logical [`UiEvent`]s; side effects leave as
//! [`Command`]s for the event loop to run.

use thiserror::Error;

use crate::api::RetrievalError;
use crate::focus::{Direction, FocusNavigator};
use crate::login::{InputError, LoginControl, LoginForm, PlaylistRequest};
use crate::models::Channel;

// =============================================================================
// Screens and Events
// =============================================================================

/// Screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Playlist URL and credentials
    #[default]
    Login,
    /// Channel list
    Channels,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Login => "LOGIN",
            Screen::Channels => "CHANNELS",
        }
    }
}

/// Logical input, independent of platform key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    NavigateUp,
    NavigateDown,
    Activate,
    Cancel,
    /// Character typed into the focused text field
    Input(char),
    /// Delete the last character of the focused text field
    Erase,
    Quit,
}

/// Side effect requested by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Retrieve a channel list
    Fetch(PlaylistRequest),
    /// Start playing a channel
    Play(Channel),
    /// Stop whatever is playing
    StopPlayback,
}

/// Anything that ends a login attempt
#[derive(Debug, Error)]
pub enum LoginError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
}

// =============================================================================
// Main Application State
// =============================================================================

/// Session state
#[derive(Debug)]
pub struct App {
    /// Current screen
    pub screen: Screen,
    /// Error overlay message, shown over either screen
    pub overlay: Option<String>,
    /// Focus within the current focusable set
    pub focus: FocusNavigator,
    /// Channels from the last successful fetch
    pub channels: Vec<Channel>,
    /// Login form contents
    pub form: LoginForm,
    /// Channel handed to the player, if any
    pub now_playing: Option<Channel>,
    /// Fetches started and not yet completed
    pub pending_fetches: usize,
    /// Whether the event loop should keep going
    pub running: bool,
}

impl Default for App {
    fn default() -> Self {
        Self {
            screen: Screen::Login,
            overlay: None,
            focus: FocusNavigator::new(),
            channels: Vec::new(),
            form: LoginForm::default(),
            now_playing: None,
            pending_fetches: 0,
            running: true,
        }
    }
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a prefilled login form
    pub fn with_form(form: LoginForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending_fetches > 0
    }

    /// Size of the focusable set right now
    pub fn focusable_count(&self) -> usize {
        if self.overlay.is_some() {
            return 1;
        }
        match self.screen {
            Screen::Login => LoginControl::ALL.len(),
            Screen::Channels => self.channels.len(),
        }
    }

    /// Focused login control, if the login screen has focus
    pub fn focused_control(&self) -> Option<LoginControl> {
        if self.overlay.is_some() || self.screen != Screen::Login {
            return None;
        }
        LoginControl::at(self.focus.index())
    }

    /// Focused channel, if the channel screen has focus
    pub fn focused_channel(&self) -> Option<&Channel> {
        if self.overlay.is_some() || self.screen != Screen::Channels {
            return None;
        }
        self.channels.get(self.focus.index())
    }

    /// True while printable keys should be typed into a field
    pub fn is_editing(&self) -> bool {
        self.focused_control().is_some_and(LoginControl::is_text_field)
    }

    /// Show the error overlay
    pub fn show_error(&mut self, error: impl std::fmt::Display) {
        let message = format!("Error: {}", error);
        tracing::warn!(%message, "showing error overlay");
        self.overlay = Some(message);
        self.focus.reset();
    }

    /// Hide the error overlay and refocus the current screen
    pub fn dismiss_error(&mut self) {
        self.overlay = None;
        self.focus.reset();
    }

    // -------------------------------------------------------------------------
    // Event Handling
    // -------------------------------------------------------------------------

    /// Apply one logical input event
    pub fn handle_event(&mut self, event: UiEvent) -> Option<Command> {
        if event == UiEvent::Quit {
            self.running = false;
            return None;
        }

        if self.overlay.is_some() {
            if matches!(event, UiEvent::Activate | UiEvent::Cancel) {
                self.dismiss_error();
            }
            return None;
        }

        match event {
            UiEvent::NavigateUp => {
                self.focus.navigate(Direction::Backward, self.focusable_count());
                None
            }
            UiEvent::NavigateDown => {
                self.focus.navigate(Direction::Forward, self.focusable_count());
                None
            }
            _ => match self.screen {
                Screen::Login => self.handle_login_event(event),
                Screen::Channels => self.handle_channels_event(event),
            },
        }
    }

    fn handle_login_event(&mut self, event: UiEvent) -> Option<Command> {
        let control = self.focused_control()?;
        match event {
            UiEvent::Input(c) => {
                if let Some(field) = self.form.field_mut(control) {
                    field.push(c);
                }
                None
            }
            UiEvent::Erase => {
                if let Some(field) = self.form.field_mut(control) {
                    field.pop();
                }
                None
            }
            UiEvent::Activate if control == LoginControl::Submit => self.submit_login(),
            UiEvent::Activate => {
                self.focus
                    .navigate(Direction::Forward, self.focusable_count());
                None
            }
            // Nothing above the login screen to go back to
            _ => None,
        }
    }

    fn handle_channels_event(&mut self, event: UiEvent) -> Option<Command> {
        match event {
            UiEvent::Activate => self.focused_channel().cloned().map(Command::Play),
            UiEvent::Cancel => Some(self.back_to_login()),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Session Transitions
    // -------------------------------------------------------------------------

    /// Validate the form and request a fetch
    ///
    /// Input errors surface immediately and nothing is fetched.
    pub fn submit_login(&mut self) -> Option<Command> {
        match self.form.resolve() {
            Ok(request) => {
                self.pending_fetches += 1;
                tracing::info!(request = %request.describe(), "login submitted");
                Some(Command::Fetch(request))
            }
            Err(e) => {
                self.show_error(LoginError::from(e));
                None
            }
        }
    }

    /// Apply a finished fetch
    ///
    /// Fetches are never cancelled: whichever completes last decides the
    /// channel list.
    pub fn complete_login(&mut self, result: Result<Vec<Channel>, RetrievalError>) {
        self.pending_fetches = self.pending_fetches.saturating_sub(1);
        match result {
            Ok(channels) => {
                tracing::info!(count = channels.len(), "showing channel list");
                self.channels = channels;
                self.screen = Screen::Channels;
                self.focus.reset();
            }
            Err(e) => self.show_error(LoginError::from(e)),
        }
    }

    /// Leave the channel list
    pub fn back_to_login(&mut self) -> Command {
        tracing::info!("back to login");
        self.screen = Screen::Login;
        self.focus.reset();
        self.now_playing = None;
        Command::StopPlayback
    }

    pub fn playback_started(&mut self, channel: Channel) {
        self.now_playing = Some(channel);
    }

    pub fn playback_failed(&mut self, error: impl std::fmt::Display) {
        self.now_playing = None;
        self.show_error(error);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
