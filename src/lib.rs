//! tvremote - remote-driven IPTV playlist player
//!
//! Turns an M3U link or provider credentials into a channel list that can
//! be walked with four arrow keys, Enter and Back.
//!
//! # Modules
//!
//! - `models` - Channels and provider stream records
//! - `playlist` - M3U parsing and provider stream mapping
//! - `focus` - Wrap-around focus movement
//! - `login` - Login form and request resolution
//! - `app` - Session state machine
//! - `keymap` - Platform key codes to logical events
//! - `api` - Playlist retrieval (relay and xtream backends)
//! - `stream` - Local playback
//! - `ui` - TUI components
//! - `config` - Config file loading
//! - `cli`, `commands` - Scriptable subcommands

pub mod models;
pub mod playlist;
pub mod focus;
pub mod login;
pub mod app;
pub mod keymap;
pub mod api;
pub mod stream;
pub mod ui;
pub mod config;
pub mod cli;
pub mod commands;

// Re-export commonly used types
pub use models::{Channel, ProviderStream, StreamId};
pub use playlist::{parse_m3u, MalformedEntry};
pub use focus::{next_index, Direction, FocusNavigator};
pub use login::{InputError, LoginForm, PlaylistRequest};
pub use app::{App, Command, LoginError, Screen, UiEvent};
pub use api::{Backend, PlaylistSource, RetrievalError, Retriever};
pub use config::Config;
