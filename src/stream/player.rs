//! Local Player - mpv/VLC playback
//!
//! Hands a channel URL to an external media player. Segmented (HLS) streams
//! and direct media URLs get different player flags.

use std::process::Stdio;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::process::{Child, Command};

/// How a URL should be played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStrategy {
    /// Adaptive stream described by an `.m3u8` manifest
    Segmented,
    /// Single media resource (MPEG-TS, MP4, ...)
    Direct,
}

impl PlaybackStrategy {
    pub fn for_url(url: &str) -> Self {
        if url.contains(".m3u8") {
            PlaybackStrategy::Segmented
        } else {
            PlaybackStrategy::Direct
        }
    }
}

/// Supported local players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerType {
    /// mpv media player (default)
    #[default]
    Mpv,
    /// VLC media player
    Vlc,
}

impl PlayerType {
    /// Get the command name for this player
    pub fn command(&self) -> &'static str {
        match self {
            PlayerType::Mpv => "mpv",
            PlayerType::Vlc => {
                // On macOS, VLC is an app bundle
                #[cfg(target_os = "macos")]
                if std::path::Path::new("/Applications/VLC.app").exists() {
                    return "/Applications/VLC.app/Contents/MacOS/VLC";
                }
                "vlc"
            }
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlayerType::Mpv => "mpv",
            PlayerType::Vlc => "VLC",
        }
    }

    /// Command-line arguments for a URL under a strategy
    pub fn args(&self, url: &str, strategy: PlaybackStrategy) -> Vec<String> {
        let mut args = vec![url.to_string()];
        match (self, strategy) {
            (PlayerType::Mpv, PlaybackStrategy::Segmented) => {
                args.push("--hls-bitrate=max".into());
            }
            (PlayerType::Mpv, PlaybackStrategy::Direct) => {
                args.push("--cache=yes".into());
            }
            (PlayerType::Vlc, PlaybackStrategy::Segmented) => {
                args.push("--adaptive-logic=highest".into());
            }
            (PlayerType::Vlc, PlaybackStrategy::Direct) => {
                args.push("--network-caching=3000".into());
            }
        }
        match self {
            PlayerType::Mpv => args.push("--force-window=immediate".into()),
            PlayerType::Vlc => args.push("--no-video-title-show".into()),
        }
        args
    }
}

impl std::fmt::Display for PlayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Errors from local player operations
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Player '{0}' not found. Install it first.")]
    NotFound(String),
    #[error("Failed to start player: {0}")]
    StartFailed(#[from] std::io::Error),
}

/// A running player process
#[derive(Debug)]
pub struct PlaybackHandle {
    child: Child,
    pub strategy: PlaybackStrategy,
}

impl PlaybackHandle {
    /// Kill the player
    pub async fn stop(mut self) {
        if let Err(e) = self.child.kill().await {
            tracing::debug!(error = %e, "player already gone");
        }
    }

    /// Wait for the player to exit on its own
    pub async fn wait(mut self) {
        match self.child.wait().await {
            Ok(status) => tracing::debug!(%status, "player exited"),
            Err(e) => tracing::debug!(error = %e, "could not wait for player"),
        }
    }

    /// True once the player process has exited
    pub fn has_exited(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(Some(_)))
    }
}

/// Local player for channel streams
pub struct LocalPlayer {
    player_type: PlayerType,
}

impl LocalPlayer {
    pub fn new(player_type: PlayerType) -> Self {
        Self { player_type }
    }

    pub fn player_type(&self) -> PlayerType {
        self.player_type
    }

    /// Check if the player is available on the system
    pub async fn is_available(&self) -> bool {
        let cmd = self.player_type.command();

        if cmd.starts_with('/') {
            return std::path::Path::new(cmd).exists();
        }

        Command::new("which")
            .arg(cmd)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Start playing a stream URL; the player is killed when the handle drops
    pub fn play(&self, url: &str) -> Result<PlaybackHandle, PlayerError> {
        self.launch(url, true)
    }

    /// Start a player that outlives this process
    pub fn play_detached(&self, url: &str) -> Result<(), PlayerError> {
        self.launch(url, false).map(|_| ())
    }

    fn launch(&self, url: &str, kill_on_drop: bool) -> Result<PlaybackHandle, PlayerError> {
        let strategy = PlaybackStrategy::for_url(url);
        tracing::info!(player = %self.player_type, ?strategy, %url, "starting playback");

        let mut cmd = Command::new(self.player_type.command());
        cmd.args(self.player_type.args(url, strategy));

        // Player output would draw over the TUI
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());
        cmd.kill_on_drop(kill_on_drop);

        let child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PlayerError::NotFound(self.player_type.command().to_string())
            } else {
                PlayerError::StartFailed(e)
            }
        })?;

        Ok(PlaybackHandle { child, strategy })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_from_url() {
        assert_eq!(
            PlaybackStrategy::for_url("http://x/live/index.m3u8?token=1"),
            PlaybackStrategy::Segmented
        );
        assert_eq!(
            PlaybackStrategy::for_url("http://srv.tv/live/u/p/42.ts"),
            PlaybackStrategy::Direct
        );
    }

    #[test]
    fn test_player_type_command() {
        let vlc_cmd = PlayerType::Vlc.command();
        assert!(vlc_cmd == "vlc" || vlc_cmd == "/Applications/VLC.app/Contents/MacOS/VLC");
        assert_eq!(PlayerType::Mpv.command(), "mpv");
    }

    #[test]
    fn test_args_follow_strategy() {
        let args = PlayerType::Mpv.args("http://x/a.m3u8", PlaybackStrategy::Segmented);
        assert_eq!(args[0], "http://x/a.m3u8");
        assert!(args.contains(&"--hls-bitrate=max".to_string()));

        let args = PlayerType::Vlc.args("http://x/a.ts", PlaybackStrategy::Direct);
        assert!(args.contains(&"--network-caching=3000".to_string()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_handle_wait_returns_after_exit() {
        let child = Command::new("true").spawn().unwrap();
        let handle = PlaybackHandle {
            child,
            strategy: PlaybackStrategy::Direct,
        };
        assert_eq!(handle.strategy, PlaybackStrategy::Direct);
        handle.wait().await;
    }

    #[test]
    fn test_local_player_reports_its_type() {
        assert_eq!(LocalPlayer::new(PlayerType::Vlc).player_type(), PlayerType::Vlc);
        assert_eq!(LocalPlayer::new(PlayerType::default()).player_type(), PlayerType::Mpv);
    }

    #[test]
    fn test_default_player() {
        assert_eq!(PlayerType::default(), PlayerType::Mpv);
        assert_eq!(PlayerType::Vlc.to_string(), "VLC");
    }
}
