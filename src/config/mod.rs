use std::env;
use std::fmt;

use url::Url;

use crate::error::ClientError;

/// Public GoRest API root
pub const DEFAULT_BASE_URL: &str = "https://gorest.co.in/public/v2";

/// Environment variable holding the bearer token
pub const TOKEN_VAR: &str = "GOREST_TOKEN";

/// Connection settings for one run, loaded once and handed to the client
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: normalize_base_url(&base_url.into())?,
            token: token.into(),
        })
    }

    /// Default base URL and the token from `GOREST_TOKEN`
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = match lookup(TOKEN_VAR) {
            Some(token) if !token.trim().is_empty() => token.trim().to_string(),
            _ => {
                // The service answers 401; that is reported by the step that hits it
                tracing::warn!("{} is not set, requests will be sent with an empty bearer token", TOKEN_VAR);
                String::new()
            }
        };

        Self::new(DEFAULT_BASE_URL, token)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ClientError> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }

    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &if self.has_token() { "<redacted>" } else { "<empty>" })
            .finish()
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ClientError> {
    let parsed = Url::parse(raw).map_err(|e| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ClientError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(raw.trim_end_matches('/').to_string())
}
