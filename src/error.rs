// Client and scenario error types
use reqwest::StatusCode;
use serde_json::Value;

use crate::scenario::Step;

/// Failures talking to the service, before any expectation is checked
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("{method} {url} failed: {source}")]
    Transport {
        method: reqwest::Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A scenario step did not observe what it expected
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("{step}: expected status {expected}, got {actual} (body: {body})")]
    UnexpectedStatus {
        step: Step,
        expected: StatusCode,
        actual: StatusCode,
        body: Value,
    },

    #[error("{step}: {detail}")]
    PayloadMismatch { step: Step, detail: String },
}

impl ClientError {
    /// Stable error code for machine-readable output
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::InvalidBaseUrl { .. } | ClientError::Build(_) => "CONFIG",
            ClientError::Transport { .. } => "TRANSPORT",
            ClientError::Decode { .. } => "DECODE",
        }
    }
}

impl ScenarioError {
    pub fn payload_mismatch(step: Step, detail: impl Into<String>) -> Self {
        ScenarioError::PayloadMismatch {
            step,
            detail: detail.into(),
        }
    }

    /// Stable error code for machine-readable output
    pub fn kind(&self) -> &'static str {
        match self {
            ScenarioError::Client(err) => err.kind(),
            ScenarioError::UnexpectedStatus { .. } => "UNEXPECTED_STATUS",
            ScenarioError::PayloadMismatch { .. } => "PAYLOAD_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unexpected_status_message_names_step_and_codes() {
        let err = ScenarioError::UnexpectedStatus {
            step: Step::ReadAfterDelete,
            expected: StatusCode::NOT_FOUND,
            actual: StatusCode::OK,
            body: json!({"id": 1}),
        };

        let message = err.to_string();
        assert!(message.starts_with("read after delete"), "{}", message);
        assert!(message.contains("404"), "{}", message);
        assert!(message.contains("200"), "{}", message);
        assert_eq!(err.kind(), "UNEXPECTED_STATUS");
    }

    #[test]
    fn client_errors_keep_their_kind_when_wrapped() {
        let err: ScenarioError = ClientError::InvalidBaseUrl {
            url: "ftp://x".to_string(),
            reason: "unsupported scheme".to_string(),
        }
        .into();

        assert_eq!(err.kind(), "CONFIG");
    }
}
