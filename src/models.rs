//! Data structures shared across tvremote
//!
//! - **Channel**: one playable stream, as rendered in the channel list
//! - **Provider**: stream descriptors returned by Xtream-Codes style APIs

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Channel
// =============================================================================

/// One playable stream in the channel list
///
/// `id` semantics depend on where the channel came from: M3U entries use the
/// stream URL itself, provider entries use the provider's `stream_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Stable identifier (stream URL or provider stream id)
    pub id: String,
    /// Display label, never blank
    pub name: String,
    /// Resolvable playback URL, never blank
    pub url: String,
    /// `group-title` attribute from the playlist, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Channel {
    /// Channel from an M3U entry (id is the URL)
    pub fn from_url(name: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            id: url.clone(),
            name: name.into(),
            url,
            group: None,
        }
    }

    pub fn with_group(mut self, group: Option<String>) -> Self {
        self.group = group;
        self
    }

    /// True if the URL points at a segmented (HLS) stream
    pub fn is_segmented(&self) -> bool {
        self.url.contains(".m3u8")
    }
}

// =============================================================================
// Provider Models (Xtream Codes)
// =============================================================================

/// Provider-assigned stream identifier
///
/// Panels disagree on whether this is a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamId {
    Number(i64),
    Text(String),
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamId::Number(n) => write!(f, "{}", n),
            StreamId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for StreamId {
    fn from(n: i64) -> Self {
        StreamId::Number(n)
    }
}

/// One entry of a provider `get_live_streams` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderStream {
    pub stream_id: StreamId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stream_icon: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
}

impl ProviderStream {
    pub fn new(stream_id: i64, name: impl Into<String>) -> Self {
        Self {
            stream_id: StreamId::Number(stream_id),
            name: name.into(),
            stream_icon: None,
            category_id: None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
