//! Platform key adaptation
//!
//! Maps raw key input to logical [`UiEvent`]s. Remote key codes differ per
//! TV platform (only Back really varies); terminal input arrives as
//! crossterm key events. Nothing past this module looks at either.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::app::UiEvent;

pub const KEY_LEFT: u32 = 37;
pub const KEY_UP: u32 = 38;
pub const KEY_RIGHT: u32 = 39;
pub const KEY_DOWN: u32 = 40;
pub const KEY_ENTER: u32 = 13;

/// Runtime that produced a raw key code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Tizen,
    #[serde(rename = "webos")]
    WebOs,
    #[default]
    Browser,
}

impl Platform {
    /// Key code of the remote's Back button
    pub fn back_code(self) -> u32 {
        match self {
            Platform::Tizen => 10009,
            Platform::WebOs => 461,
            Platform::Browser => 27,
        }
    }
}

/// Map a raw remote key code
pub fn map_key_code(platform: Platform, code: u32) -> Option<UiEvent> {
    match code {
        KEY_UP => Some(UiEvent::NavigateUp),
        KEY_DOWN => Some(UiEvent::NavigateDown),
        KEY_ENTER => Some(UiEvent::Activate),
        c if c == platform.back_code() => Some(UiEvent::Cancel),
        _ => None,
    }
}

/// Map a terminal key event
///
/// `editing` is true while a text field has focus, so printable keys are
/// typed instead of treated as shortcuts.
pub fn map_key_event(key: KeyEvent, editing: bool) -> Option<UiEvent> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(UiEvent::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::BackTab => Some(UiEvent::NavigateUp),
        KeyCode::Down | KeyCode::Tab => Some(UiEvent::NavigateDown),
        KeyCode::Enter => Some(UiEvent::Activate),
        KeyCode::Esc => Some(UiEvent::Cancel),
        KeyCode::Backspace if editing => Some(UiEvent::Erase),
        KeyCode::Backspace => Some(UiEvent::Cancel),
        KeyCode::Char(c) if editing => Some(UiEvent::Input(c)),
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('k') => Some(UiEvent::NavigateUp),
        KeyCode::Char('j') => Some(UiEvent::NavigateDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_back_code_per_platform() {
        assert_eq!(map_key_code(Platform::Tizen, 10009), Some(UiEvent::Cancel));
        assert_eq!(map_key_code(Platform::WebOs, 461), Some(UiEvent::Cancel));
        assert_eq!(map_key_code(Platform::Browser, 27), Some(UiEvent::Cancel));
        // Another platform's back code means nothing here
        assert_eq!(map_key_code(Platform::Browser, 10009), None);
    }

    #[test]
    fn test_arrows_and_enter() {
        assert_eq!(map_key_code(Platform::Tizen, KEY_UP), Some(UiEvent::NavigateUp));
        assert_eq!(map_key_code(Platform::Tizen, KEY_DOWN), Some(UiEvent::NavigateDown));
        assert_eq!(map_key_code(Platform::WebOs, KEY_ENTER), Some(UiEvent::Activate));
        assert_eq!(map_key_code(Platform::WebOs, KEY_LEFT), None);
        assert_eq!(map_key_code(Platform::WebOs, KEY_RIGHT), None);
    }

    #[test]
    fn test_typing_vs_shortcuts() {
        assert_eq!(map_key_event(key(KeyCode::Char('q')), true), Some(UiEvent::Input('q')));
        assert_eq!(map_key_event(key(KeyCode::Char('q')), false), Some(UiEvent::Quit));
        assert_eq!(map_key_event(key(KeyCode::Backspace), true), Some(UiEvent::Erase));
        assert_eq!(map_key_event(key(KeyCode::Backspace), false), Some(UiEvent::Cancel));
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key_event(ev, true), Some(UiEvent::Quit));
    }
}
