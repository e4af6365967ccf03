//! Login form and playlist request resolution
//!
//! Decides, from what the user typed, whether to fetch an M3U URL directly
//! or go through a provider using server credentials.

use serde::Serialize;
use thiserror::Error;

/// Missing or unusable login input. No retrieval is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please provide a URL")]
    MissingUrl,

    #[error("Please provide a valid M3U URL or credentials (username and password)")]
    MissingCredentials,
}

/// What to fetch for one login attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlaylistRequest {
    /// Direct playlist URL
    M3u { url: String },
    /// Provider server plus credentials
    Provider {
        server: String,
        username: String,
        #[serde(skip_serializing)]
        password: String,
    },
}

impl PlaylistRequest {
    /// Provider's M3U export endpoint (`get.php`) for these credentials
    pub fn provider_m3u_url(server: &str, username: &str, password: &str) -> String {
        format!(
            "{}/get.php?username={}&password={}&type=m3u_plus",
            server.trim_end_matches('/'),
            urlencoding::encode(username),
            urlencoding::encode(password)
        )
    }

    /// Short description for logs (never includes the password)
    pub fn describe(&self) -> String {
        match self {
            PlaylistRequest::M3u { url } => format!("m3u {}", url),
            PlaylistRequest::Provider {
                server, username, ..
            } => format!("provider {} as {}", server, username),
        }
    }
}

/// True if the URL already names a playlist rather than a provider server
pub fn is_playlist_url(url: &str) -> bool {
    url.ends_with(".m3u")
        || url.contains("type=m3u")
        || url.contains("type=m3u_plus")
        || url.contains(".m3u8")
}

/// Which login control is focused, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginControl {
    Url,
    Username,
    Password,
    Submit,
}

impl LoginControl {
    /// All controls in focus order
    pub const ALL: [LoginControl; 4] = [
        LoginControl::Url,
        LoginControl::Username,
        LoginControl::Password,
        LoginControl::Submit,
    ];

    pub fn at(index: usize) -> Option<LoginControl> {
        Self::ALL.get(index).copied()
    }

    pub fn is_text_field(self) -> bool {
        !matches!(self, LoginControl::Submit)
    }

    pub fn label(self) -> &'static str {
        match self {
            LoginControl::Url => "URL",
            LoginControl::Username => "Username",
            LoginControl::Password => "Password",
            LoginControl::Submit => "Login",
        }
    }
}

/// Login form contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Text buffer behind a control (None for the submit button)
    pub fn field_mut(&mut self, control: LoginControl) -> Option<&mut String> {
        match control {
            LoginControl::Url => Some(&mut self.url),
            LoginControl::Username => Some(&mut self.username),
            LoginControl::Password => Some(&mut self.password),
            LoginControl::Submit => None,
        }
    }

    pub fn field(&self, control: LoginControl) -> Option<&str> {
        match control {
            LoginControl::Url => Some(&self.url),
            LoginControl::Username => Some(&self.username),
            LoginControl::Password => Some(&self.password),
            LoginControl::Submit => None,
        }
    }

    /// Decide what to fetch
    pub fn resolve(&self) -> Result<PlaylistRequest, InputError> {
        let url = self.url.trim();
        let username = self.username.trim();
        let password = self.password.trim();

        if url.is_empty() {
            return Err(InputError::MissingUrl);
        }

        if is_playlist_url(url) {
            Ok(PlaylistRequest::M3u {
                url: url.to_string(),
            })
        } else if !username.is_empty() && !password.is_empty() {
            Ok(PlaylistRequest::Provider {
                server: url.trim_end_matches('/').to_string(),
                username: username.to_string(),
                password: password.to_string(),
            })
        } else {
            Err(InputError::MissingCredentials)
        }
    }
}
