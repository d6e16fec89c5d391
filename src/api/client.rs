use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::types::{UserId, UserPayload};

/// Status and decoded body of one call
///
/// Returned for every status code; deciding whether the status is acceptable
/// is left to the caller.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    /// `Value::Null` when the response had no body
    pub body: Value,
}

/// HTTP client bound to one base URL and bearer token
#[derive(Debug, Clone)]
pub struct GorestClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl GorestClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gorest-api-tests/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Collection endpoint
    pub fn users_url(&self) -> String {
        format!("{}/users", self.config.base_url)
    }

    /// Single-resource endpoint
    pub fn user_url(&self, id: UserId) -> String {
        format!("{}/users/{}", self.config.base_url, id)
    }

    pub async fn list_users(&self) -> Result<ApiResponse, ClientError> {
        self.send::<()>(Method::GET, self.users_url(), None).await
    }

    pub async fn create_user(&self, payload: &UserPayload) -> Result<ApiResponse, ClientError> {
        self.send(Method::POST, self.users_url(), Some(payload)).await
    }

    pub async fn get_user(&self, id: UserId) -> Result<ApiResponse, ClientError> {
        self.send::<()>(Method::GET, self.user_url(id), None).await
    }

    pub async fn update_user(&self, id: UserId, payload: &UserPayload) -> Result<ApiResponse, ClientError> {
        self.send(Method::PUT, self.user_url(id), Some(payload)).await
    }

    pub async fn delete_user(&self, id: UserId) -> Result<ApiResponse, ClientError> {
        self.send::<()>(Method::DELETE, self.user_url(id), None).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: String,
        body: Option<&B>,
    ) -> Result<ApiResponse, ClientError> {
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(AUTHORIZATION, self.config.bearer())
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        let transport = |source| ClientError::Transport {
            method: method.clone(),
            url: url.clone(),
            source,
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(transport)?;

        tracing::debug!("{} {} -> {}", method, url, status);

        let body = if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode {
                url: url.clone(),
                source,
            })?
        };

        Ok(ApiResponse { status, body })
    }
}
