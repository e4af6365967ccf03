//! M3U fetcher with optional CORS-style relay
//!
//! The relay is called as `{relay_url}{percent-encoded target}` and answers
//! with the target body wrapped in JSON: `{"contents": "..."}`. Without a
//! relay the target is fetched directly and its body is the playlist.

use serde::Deserialize;

use super::{ClientOptions, PlaylistSource, RetrievalError, Stage};
use crate::login::PlaylistRequest;
use crate::models::Channel;
use crate::playlist::parse_m3u;

/// Relay response envelope
#[derive(Debug, Deserialize)]
struct RelayResponse {
    #[serde(default)]
    contents: Option<String>,
}

/// M3U fetcher
pub struct RelayClient {
    relay_url: Option<String>,
    referer: Option<String>,
    client: reqwest::Client,
}

impl RelayClient {
    pub fn new(options: &ClientOptions) -> Self {
        Self {
            relay_url: options.relay_url.clone().filter(|r| !r.trim().is_empty()),
            referer: options.referer.clone(),
            client: options.http_client(),
        }
    }

    /// Client that fetches through the given relay (for testing)
    pub fn with_relay(relay_url: impl Into<String>) -> Self {
        Self::new(&ClientOptions {
            relay_url: Some(relay_url.into()),
            ..ClientOptions::default()
        })
    }

    /// Client that fetches playlists directly
    pub fn direct() -> Self {
        Self::new(&ClientOptions::default())
    }

    pub fn relay_url(&self) -> Option<&str> {
        self.relay_url.as_deref()
    }

    /// URL actually requested for a playlist target
    pub fn request_url(&self, target: &str) -> String {
        match &self.relay_url {
            Some(relay) => format!("{}{}", relay, urlencoding::encode(target)),
            None => target.to_string(),
        }
    }

    /// Playlist URL for a login request
    pub fn target_url(request: &PlaylistRequest) -> String {
        match request {
            PlaylistRequest::M3u { url } => url.clone(),
            PlaylistRequest::Provider {
                server,
                username,
                password,
            } => PlaylistRequest::provider_m3u_url(server, username, password),
        }
    }

    /// Fetch raw playlist text
    pub async fn fetch_text(&self, target: &str) -> Result<String, RetrievalError> {
        let stage = Stage::FetchPlaylist;
        let mut builder = self.client.get(self.request_url(target));
        if let Some(referer) = &self.referer {
            builder = builder.header(reqwest::header::REFERER, referer);
        }

        let response = builder
            .send()
            .await
            .map_err(|source| RetrievalError::Transport { stage, source })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| RetrievalError::Transport { stage, source })?;

        if self.relay_url.is_none() {
            if !status.is_success() {
                return Err(RetrievalError::status_error(stage, status, Some(body)));
            }
            return Ok(body);
        }

        let envelope = serde_json::from_str::<RelayResponse>(&body);
        if !status.is_success() {
            let detail = envelope.ok().and_then(|e| e.contents);
            return Err(RetrievalError::status_error(stage, status, detail));
        }

        envelope
            .map_err(|e| RetrievalError::Decode {
                stage,
                message: format!("relay JSON: {}", e),
            })?
            .contents
            .ok_or_else(|| RetrievalError::Decode {
                stage,
                message: "relay response has no contents".to_string(),
            })
    }
}

impl PlaylistSource for RelayClient {
    async fn fetch(&self, request: &PlaylistRequest) -> Result<Vec<Channel>, RetrievalError> {
        let text = self.fetch_text(&Self::target_url(request)).await?;
        Ok(parse_m3u(&text))
    }
}
