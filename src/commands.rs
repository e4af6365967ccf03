//! CLI Command Handlers
//!
//! Each handler takes its CLI args, the loaded config and Output, and
//! returns an ExitCode.

use crate::api::{PlaylistSource, RetrievalError, Retriever};
use crate::cli::{ChannelList, ChannelsCmd, ExitCode, Output, ParseCmd, PlayCmd, PlayResponse};
use crate::config::Config;
use crate::models::Channel;
use crate::playlist::parse_m3u;
use crate::stream::{LocalPlayer, PlayerError, PlayerType};

/// Print a channel list, or fail with NoChannels when it is empty
fn print_channels(channels: Vec<Channel>, limit: Option<usize>, output: &Output) -> ExitCode {
    if channels.is_empty() {
        return output.error("No channels found in playlist", ExitCode::NoChannels);
    }
    if let Err(e) = output.channels(ChannelList::new(channels, limit)) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Channels Command
// =============================================================================

pub async fn channels_cmd(cmd: ChannelsCmd, config: &Config, output: &Output) -> ExitCode {
    let request = match cmd.form().resolve() {
        Ok(request) => request,
        Err(e) => return output.error(e.to_string(), ExitCode::InvalidArgs),
    };

    let retriever = Retriever::new(config.backend, &config.client_options());
    output.info(format!("Fetching {} via {}...", request.describe(), retriever.backend()));

    match retriever.fetch(&request).await {
        Ok(channels) => print_channels(channels, cmd.limit, output),
        Err(e @ RetrievalError::Decode { .. }) => output.error(e.to_string(), ExitCode::Error),
        Err(e) => output.error(e.to_string(), ExitCode::NetworkError),
    }
}

// =============================================================================
// Parse Command
// =============================================================================

pub async fn parse_cmd(cmd: ParseCmd, output: &Output) -> ExitCode {
    let text = match tokio::fs::read_to_string(&cmd.file).await {
        Ok(text) => text,
        Err(e) => {
            return output.error(
                format!("Failed to read {}: {}", cmd.file.display(), e),
                ExitCode::InvalidArgs,
            )
        }
    };

    print_channels(parse_m3u(&text), cmd.limit, output)
}

// =============================================================================
// Play Command
// =============================================================================

pub async fn play_cmd(cmd: PlayCmd, config: &Config, output: &Output) -> ExitCode {
    let player_type = cmd.player.map(PlayerType::from).unwrap_or(config.player);
    let player = LocalPlayer::new(player_type);

    if !player.is_available().await {
        return output.error(
            PlayerError::NotFound(player_type.command().to_string()).to_string(),
            ExitCode::PlayerFailed,
        );
    }

    let handle = if cmd.wait {
        match player.play(&cmd.url) {
            Ok(handle) => Some(handle),
            Err(e) => return output.error(e.to_string(), ExitCode::PlayerFailed),
        }
    } else {
        match player.play_detached(&cmd.url) {
            Ok(()) => None,
            Err(e) => return output.error(e.to_string(), ExitCode::PlayerFailed),
        }
    };

    output.info(format!("Playing in {}", player.player_type().display_name()));
    let response = PlayResponse {
        status: "playing",
        player: player.player_type(),
        url: cmd.url,
    };
    if output.json {
        if let Err(e) = output.print(response) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    }

    if let Some(handle) = handle {
        handle.wait().await;
    }
    ExitCode::Success
}
