//! Configuration for tvremote
//!
//! Read from ~/.config/tvremote/config.toml. Missing or unreadable files
//! fall back to defaults. The file is never written by the app.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::{Backend, ClientOptions, DEFAULT_USER_AGENT};
use crate::stream::PlayerType;

/// Public CORS relay used when none is configured
pub const DEFAULT_RELAY_URL: &str = "https://api.allorigins.win/get?url=";

/// Environment variable overriding `relay_url`
pub const RELAY_ENV: &str = "TVREMOTE_RELAY_URL";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Retrieval backend (relay or xtream)
    pub backend: Backend,
    /// Relay prefix; an empty string fetches playlists directly
    pub relay_url: String,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Referer header, sent only when set
    pub referer: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Local media player
    pub player: PlayerType,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::Relay,
            relay_url: DEFAULT_RELAY_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: None,
            timeout_secs: 30,
            player: PlayerType::Mpv,
        }
    }
}

impl Config {
    /// Get config file path (~/.config/tvremote/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tvremote").join("config.toml"))
    }

    /// Load from an explicit path or the default location, with env overrides
    pub fn load(path: Option<&Path>) -> Self {
        let file = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::path(),
        };

        let mut config = match file {
            Some(p) if p.exists() => Self::from_file(&p).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring config file");
                Self::default()
            }),
            _ => Self::default(),
        };

        if let Ok(relay) = std::env::var(RELAY_ENV) {
            config.relay_url = relay;
        }
        config
    }

    /// Parse one config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// HTTP options for the retrieval backends
    pub fn client_options(&self) -> ClientOptions {
        let relay = self.relay_url.trim();
        ClientOptions {
            relay_url: (!relay.is_empty()).then(|| relay.to_string()),
            user_agent: self.user_agent.clone(),
            referer: self.referer.clone().filter(|r| !r.trim().is_empty()),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
        }
    }
}
