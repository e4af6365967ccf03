//! Playlist retrieval
//!
//! - Relay: fetch M3U text, optionally through a CORS-style relay
//! - Xtream: provider `player_api.php` live stream listing
//!
//! Both backends implement [`PlaylistSource`] and are picked by configuration.
//! One request per fetch, no retries.

pub mod relay;
pub mod xtream;

pub use relay::RelayClient;
pub use xtream::XtreamClient;

use std::fmt;
use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::login::PlaylistRequest;
use crate::models::Channel;

/// Browser-like user agent; several panels reject unknown clients
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

// =============================================================================
// Errors
// =============================================================================

/// Which retrieval step failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FetchPlaylist,
    FetchProviderStreams,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::FetchPlaylist => write!(f, "fetching M3U playlist"),
            Stage::FetchProviderStreams => write!(f, "fetching provider streams"),
        }
    }
}

/// Retrieval failure, tagged with the stage it happened in
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Failed while {stage}: HTTP {status} - {detail}")]
    Status {
        stage: Stage,
        status: u16,
        detail: String,
    },

    #[error("Network error while {stage}: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response while {stage}: {message}")]
    Decode { stage: Stage, message: String },
}

impl RetrievalError {
    pub fn stage(&self) -> Stage {
        match self {
            RetrievalError::Status { stage, .. }
            | RetrievalError::Transport { stage, .. }
            | RetrievalError::Decode { stage, .. } => *stage,
        }
    }

    /// HTTP status, if the failure was a non-success response
    pub fn status(&self) -> Option<u16> {
        match self {
            RetrievalError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn status_error(stage: Stage, status: StatusCode, detail: Option<String>) -> Self {
        let detail = detail
            .filter(|d| !d.trim().is_empty())
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| "no details".to_string());
        RetrievalError::Status {
            stage,
            status: status.as_u16(),
            detail,
        }
    }
}

// =============================================================================
// Source Trait
// =============================================================================

/// Something that can turn a login request into a channel list
pub trait PlaylistSource {
    fn fetch(
        &self,
        request: &PlaylistRequest,
    ) -> impl Future<Output = Result<Vec<Channel>, RetrievalError>> + Send;
}

/// Retrieval backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// M3U text, through the relay when one is configured
    #[default]
    Relay,
    /// Provider player API for credentials, direct M3U otherwise
    Xtream,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Relay => write!(f, "relay"),
            Backend::Xtream => write!(f, "xtream"),
        }
    }
}

/// HTTP settings shared by both backends
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub relay_url: Option<String>,
    pub user_agent: String,
    pub referer: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            relay_url: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientOptions {
    pub(crate) fn http_client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.clone())
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "HTTP client settings rejected, using defaults");
                reqwest::Client::default()
            })
    }
}

/// The configured backend
pub enum Retriever {
    Relay(RelayClient),
    Xtream(XtreamClient),
}

impl Retriever {
    pub fn new(backend: Backend, options: &ClientOptions) -> Self {
        match backend {
            Backend::Relay => Retriever::Relay(RelayClient::new(options)),
            Backend::Xtream => Retriever::Xtream(XtreamClient::new(options)),
        }
    }

    pub fn backend(&self) -> Backend {
        match self {
            Retriever::Relay(_) => Backend::Relay,
            Retriever::Xtream(_) => Backend::Xtream,
        }
    }
}

impl PlaylistSource for Retriever {
    async fn fetch(&self, request: &PlaylistRequest) -> Result<Vec<Channel>, RetrievalError> {
        tracing::info!(backend = %self.backend(), request = %request.describe(), "fetching playlist");
        let result = match self {
            Retriever::Relay(client) => client.fetch(request).await,
            Retriever::Xtream(client) => client.fetch(request).await,
        };
        match &result {
            Ok(channels) => tracing::info!(count = channels.len(), "playlist loaded"),
            Err(e) => tracing::warn!(error = %e, "playlist fetch failed"),
        }
        result
    }
}
