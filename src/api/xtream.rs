//! Xtream Codes provider client
//!
//! Lists live streams through `player_api.php` and synthesizes playback
//! URLs from the server and credentials. Direct M3U links bypass the API.

use super::{ClientOptions, PlaylistSource, RetrievalError, Stage};
use crate::login::PlaylistRequest;
use crate::models::{Channel, ProviderStream};
use crate::playlist::{channels_from_provider, parse_m3u};

/// Provider API client
pub struct XtreamClient {
    referer: Option<String>,
    client: reqwest::Client,
}

impl XtreamClient {
    pub fn new(options: &ClientOptions) -> Self {
        Self {
            referer: options.referer.clone(),
            client: options.http_client(),
        }
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.referer {
            Some(referer) => builder.header(reqwest::header::REFERER, referer),
            None => builder,
        }
    }

    /// `player_api.php` URL for an action
    pub fn api_url(server: &str, username: &str, password: &str, action: &str) -> String {
        format!(
            "{}/player_api.php?username={}&password={}&action={}",
            server.trim_end_matches('/'),
            urlencoding::encode(username),
            urlencoding::encode(password),
            action
        )
    }

    /// All live streams visible to these credentials
    pub async fn live_streams(
        &self,
        server: &str,
        username: &str,
        password: &str,
    ) -> Result<Vec<ProviderStream>, RetrievalError> {
        let stage = Stage::FetchProviderStreams;
        let url = Self::api_url(server, username, password, "get_live_streams");

        let response = self
            .get(&url)
            .send()
            .await
            .map_err(|source| RetrievalError::Transport { stage, source })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| RetrievalError::Transport { stage, source })?;

        if !status.is_success() {
            return Err(RetrievalError::status_error(stage, status, Some(body)));
        }

        // Bad credentials come back as 200 with a user_info object.
        serde_json::from_str(&body).map_err(|e| RetrievalError::Decode {
            stage,
            message: format!("expected a stream list: {}", e),
        })
    }

    /// Direct M3U download, no relay
    pub async fn playlist_text(&self, url: &str) -> Result<String, RetrievalError> {
        let stage = Stage::FetchPlaylist;
        let response = self
            .get(url)
            .send()
            .await
            .map_err(|source| RetrievalError::Transport { stage, source })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| RetrievalError::Transport { stage, source })?;

        if !status.is_success() {
            return Err(RetrievalError::status_error(stage, status, Some(body)));
        }
        Ok(body)
    }
}

impl PlaylistSource for XtreamClient {
    async fn fetch(&self, request: &PlaylistRequest) -> Result<Vec<Channel>, RetrievalError> {
        match request {
            PlaylistRequest::M3u { url } => {
                let text = self.playlist_text(url).await?;
                Ok(parse_m3u(&text))
            }
            PlaylistRequest::Provider {
                server,
                username,
                password,
            } => {
                let streams = self.live_streams(server, username, password).await?;
                Ok(channels_from_provider(server, username, password, streams))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        assert_eq!(
            XtreamClient::api_url("http://srv.tv/", "u", "p", "get_live_streams"),
            "http://srv.tv/player_api.php?username=u&password=p&action=get_live_streams"
        );
    }
}
