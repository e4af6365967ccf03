//! CLI - Command Line Interface for tvremote
//!
//! Run without a subcommand for the interactive TUI. Subcommands cover the
//! same pipeline for scripting, and print JSON when asked or piped.
//!
//! # Examples
//!
//! ```bash
//! # List channels from an M3U link
//! tvremote channels --url http://host/list.m3u
//!
//! # Provider login
//! tvremote channels --url http://provider:8080 -u user -p pass --json
//!
//! # Parse a local file, then play a channel
//! tvremote parse ./list.m3u
//! tvremote play http://host/live/42.ts --player vlc
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::api::Backend;
use crate::login::LoginForm;
use crate::models::Channel;
use crate::stream::PlayerType;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Playlist had no channels
    NoChannels = 4,
    /// Player could not be started
    PlayerFailed = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// tvremote - remote-driven IPTV playlist player
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "tvremote",
    version,
    about = "Remote-driven IPTV playlist player",
    long_about = "Log in with an M3U link or provider credentials, browse the \
                  channel list with arrow keys and play a channel.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  tvremote                                   Launch interactive TUI\n\
                  tvremote channels --url http://h/list.m3u  List channels\n\
                  tvremote parse list.m3u --json             Parse a local playlist\n\
                  tvremote play http://h/live/1.ts           Play one stream"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Retrieval backend (overrides config)
    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendChoice>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and list the channels of a playlist
    #[command(visible_alias = "ls")]
    Channels(ChannelsCmd),

    /// Parse a local M3U file
    Parse(ParseCmd),

    /// Play a stream URL in mpv or VLC
    #[command(visible_alias = "pl")]
    Play(PlayCmd),
}

/// Retrieval backend selection
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendChoice {
    /// Fetch playlists through the CORS relay
    Relay,
    /// Call the provider's player API directly
    Xtream,
}

impl From<BackendChoice> for Backend {
    fn from(choice: BackendChoice) -> Self {
        match choice {
            BackendChoice::Relay => Backend::Relay,
            BackendChoice::Xtream => Backend::Xtream,
        }
    }
}

/// Local player selection
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerChoice {
    /// mpv media player
    Mpv,
    /// VLC media player
    Vlc,
}

impl From<PlayerChoice> for PlayerType {
    fn from(choice: PlayerChoice) -> Self {
        match choice {
            PlayerChoice::Mpv => PlayerType::Mpv,
            PlayerChoice::Vlc => PlayerType::Vlc,
        }
    }
}

// =============================================================================
// Channels Command
// =============================================================================

/// Resolve a login and print the channel list
#[derive(Args, Debug)]
pub struct ChannelsCmd {
    /// M3U link, or provider server URL when credentials are given
    #[arg(long, short = 'U')]
    pub url: Option<String>,

    /// Provider username
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Provider password
    #[arg(long, short = 'p')]
    pub password: Option<String>,

    /// Maximum number of channels to print
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

impl ChannelsCmd {
    /// Same form the login screen fills in
    pub fn form(&self) -> LoginForm {
        LoginForm::new(
            self.url.clone().unwrap_or_default(),
            self.username.clone().unwrap_or_default(),
            self.password.clone().unwrap_or_default(),
        )
    }
}

// =============================================================================
// Parse Command
// =============================================================================

/// Parse a local M3U file and print its channels
#[derive(Args, Debug)]
pub struct ParseCmd {
    /// Path to the playlist
    #[arg(required = true)]
    pub file: PathBuf,

    /// Maximum number of channels to print
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

// =============================================================================
// Play Command
// =============================================================================

/// Play one stream URL locally
#[derive(Args, Debug)]
pub struct PlayCmd {
    /// Stream URL
    #[arg(required = true)]
    pub url: String,

    /// Player to use (overrides config)
    #[arg(long, short = 'p', value_enum)]
    pub player: Option<PlayerChoice>,

    /// Block until the player exits
    #[arg(long, short = 'w')]
    pub wait: bool,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }
}

impl JsonOutput<()> {
    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> Self {
        Self {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Channel list response
#[derive(Debug, Serialize)]
pub struct ChannelList {
    /// Channels in the playlist, before `--limit`
    pub total: usize,
    pub channels: Vec<Channel>,
}

impl ChannelList {
    pub fn new(mut channels: Vec<Channel>, limit: Option<usize>) -> Self {
        let total = channels.len();
        if let Some(limit) = limit {
            channels.truncate(limit);
        }
        Self { total, channels }
    }
}

/// Playback response
#[derive(Debug, Serialize)]
pub struct PlayResponse {
    pub status: &'static str,
    pub player: PlayerType,
    pub url: String,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as JSON
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(&JsonOutput::success(data))?);
        Ok(())
    }

    /// Print a channel list, one channel per line unless JSON was asked for
    pub fn channels(&self, list: ChannelList) -> anyhow::Result<()> {
        if self.json {
            return self.print(list);
        }
        for channel in &list.channels {
            match &channel.group {
                Some(group) => println!("{}\t{}\t[{}]", channel.name, channel.url, group),
                None => println!("{}\t{}", channel.name, channel.url),
            }
        }
        if list.channels.len() < list.total {
            self.info(format!("... {} of {} channels", list.channels.len(), list.total));
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
