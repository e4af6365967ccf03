//! Playback
//!
//! - Player: launches mpv or VLC for a channel URL

pub mod player;

pub use player::{LocalPlayer, PlaybackHandle, PlaybackStrategy, PlayerError, PlayerType};
