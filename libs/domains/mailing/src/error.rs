//! Error types for the mailing domain.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::validation::FieldViolations;

/// Result type for the request boundary.
pub type MailingResult<T> = Result<T, MailingError>;

/// The HTML body could not be rendered as plain text.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("error getting text from body: {0}")]
    Render(#[from] html2text::Error),
}

/// A single provider refused or failed to take the message.
///
/// Only ever seen by the dispatcher, which logs it and moves on to the next
/// provider.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("fail to marshal input {0}")]
    Encode(#[from] serde_json::Error),

    #[error("do request fail: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("error reading body: {0}")]
    ReadBody(#[source] reqwest::Error),

    #[error("error with {provider}: Status code {status}. Body {body}")]
    Rejected {
        provider: &'static str,
        status: u16,
        body: String,
    },
}

/// One failed attempt, kept for logging after the whole chain is exhausted.
#[derive(Debug)]
pub struct ProviderFailure {
    pub provider: &'static str,
    pub error: SendError,
}

/// Every configured provider failed.
#[derive(Debug, Error)]
#[error("mail wasn't sent. Any provider could send it")]
pub struct DispatchError {
    pub failures: Vec<ProviderFailure>,
}

/// Startup misconfiguration. The process must not start serving.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("at least one provider is required")]
    NoProviders,

    #[error(transparent)]
    Env(#[from] core_config::ConfigError),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Errors surfaced by `POST /v1/email`.
#[derive(Debug, Error)]
pub enum MailingError {
    #[error("error reading request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(#[from] FieldViolations),

    #[error("fail to translate: {0}")]
    Transform(#[from] TransformError),

    #[error("fail to send email: {0}")]
    Dispatch(#[from] DispatchError),
}

impl MailingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MailingError::InvalidBody(_) | MailingError::Validation(_) => StatusCode::BAD_REQUEST,
            MailingError::Transform(_) | MailingError::Dispatch(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for MailingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, "{}", message);
        } else {
            tracing::info!(status = %status, "Rejected email request: {}", message);
        }

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_carries_status_and_body() {
        let err = SendError::Rejected {
            provider: "postmarkapp",
            status: 400,
            body: r#"{"error":"error"}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"error with postmarkapp: Status code 400. Body {"error":"error"}"#
        );
    }

    #[test]
    fn test_dispatch_error_hides_provider_details() {
        let err = MailingError::from(DispatchError {
            failures: vec![ProviderFailure {
                provider: "sendgrid",
                error: SendError::Rejected {
                    provider: "sendgrid",
                    status: 401,
                    body: "bad key".to_string(),
                },
            }],
        });

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "fail to send email: mail wasn't sent. Any provider could send it"
        );
    }

    #[test]
    fn test_invalid_body_is_client_error() {
        let parse_err = serde_json::from_slice::<serde_json::Value>(b"").unwrap_err();
        let err = MailingError::from(parse_err);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().starts_with("error reading request body: "));
    }

    #[test]
    fn test_transform_failure_is_server_error() {
        let err = MailingError::from(TransformError::Render(html2text::Error::TooNarrow));

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("fail to translate: error getting text from body: "));
    }
}
