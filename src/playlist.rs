//! Playlist parsing
//!
//! Turns raw playlist text (M3U) or provider stream descriptors into an
//! ordered channel list. Pure functions, no I/O.
//!
//! Malformed entries never fail the whole parse: they are logged at debug
//! level and dropped, and parsing continues with the next line.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::models::{Channel, ProviderStream};

/// Marker that opens an M3U channel header line
pub const EXTINF: &str = "#EXTINF";

/// Container suffix appended to synthesized provider stream URLs
pub const PROVIDER_EXTENSION: &str = "ts";

/// Why a single playlist entry was dropped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedEntry {
    #[error("header has no comma before the channel name")]
    MissingComma,

    #[error("channel name is blank")]
    EmptyName,

    #[error("header is not followed by a stream URL")]
    MissingUrl,

    /// The next `#EXTINF` came before any URL
    #[error("header is followed by another header: {0}")]
    UnexpectedDirective(String),
}

// =============================================================================
// M3U
// =============================================================================

/// Parse M3U text into channels, in order of appearance
pub fn parse_m3u(text: &str) -> Vec<Channel> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut channels = Vec::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        let line = lines[cursor];
        if !line.starts_with(EXTINF) {
            cursor += 1;
            continue;
        }

        let url_index = url_line_index(&lines, cursor + 1);
        let next = lines.get(url_index).copied();
        match parse_entry(line, next) {
            Ok(channel) => {
                channels.push(channel);
                cursor = url_index + 1;
            }
            Err(reason) => {
                tracing::debug!(line = cursor + 1, %reason, "dropping playlist entry");
                // A following header stays in place and is parsed on its own.
                cursor = if next.is_some_and(is_url_line) {
                    url_index + 1
                } else {
                    url_index
                };
            }
        }
    }

    tracing::debug!(count = channels.len(), "parsed M3U playlist");
    channels
}

/// Interpret one `#EXTINF` header and the line that follows it
pub fn parse_entry(header: &str, url_line: Option<&str>) -> Result<Channel, MalformedEntry> {
    let header = header.trim();
    let comma = header.rfind(',').ok_or(MalformedEntry::MissingComma)?;

    let name = header[comma + 1..].trim();
    if name.is_empty() {
        return Err(MalformedEntry::EmptyName);
    }

    let url = url_line.map(str::trim).unwrap_or_default();
    if url.is_empty() {
        return Err(MalformedEntry::MissingUrl);
    }
    if url.starts_with('#') {
        return Err(MalformedEntry::UnexpectedDirective(url.to_string()));
    }

    let group = group_title(&header[..comma]);
    Ok(Channel::from_url(name, url).with_group(group))
}

/// Index of the line that answers the header before `from`
///
/// Blank lines and per-entry directives such as `#EXTVLCOPT` or `#EXTGRP`
/// are skipped. Stops at the first URL line or the next `#EXTINF`.
fn url_line_index(lines: &[&str], from: usize) -> usize {
    let mut index = from;
    while let Some(line) = lines.get(index) {
        let line = line.trim();
        if line.starts_with(EXTINF) || is_url_line(line) {
            break;
        }
        index += 1;
    }
    index
}

fn is_url_line(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with('#')
}

/// Extract the `group-title="..."` attribute from the attribute part of a header
fn group_title(attrs: &str) -> Option<String> {
    static GROUP_RE: OnceLock<Regex> = OnceLock::new();
    let re = GROUP_RE
        .get_or_init(|| Regex::new(r#"group-title="([^"]*)""#).expect("group-title pattern"));

    re.captures(attrs)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|g| !g.is_empty())
}

// =============================================================================
// Provider (Xtream Codes)
// =============================================================================

/// Build channels from provider stream descriptors
///
/// URLs follow `{server}/live/{username}/{password}/{stream_id}.ts`. The
/// channel id is the provider's stream id, not the URL.
pub fn channels_from_provider(
    server: &str,
    username: &str,
    password: &str,
    streams: Vec<ProviderStream>,
) -> Vec<Channel> {
    let server = server.trim_end_matches('/');

    streams
        .into_iter()
        .filter_map(|stream| {
            let name = stream.name.trim();
            if name.is_empty() {
                tracing::debug!(
                    stream_id = %stream.stream_id,
                    reason = %MalformedEntry::EmptyName,
                    "dropping provider stream"
                );
                return None;
            }

            let id = stream.stream_id.to_string();
            Some(Channel {
                url: provider_stream_url(server, username, password, &id),
                id,
                name: name.to_string(),
                group: None,
            })
        })
        .collect()
}

/// Playback URL for one provider live stream
pub fn provider_stream_url(server: &str, username: &str, password: &str, stream_id: &str) -> String {
    format!(
        "{}/live/{}/{}/{}.{}",
        server.trim_end_matches('/'),
        username,
        password,
        stream_id,
        PROVIDER_EXTENSION
    )
}

// =============================================================================
// Tests
// =============================================================================
