//! Email provider implementations.
//!
//! Each provider maps an [`EmailMessage`] onto one vendor's HTTP API and makes
//! exactly one request per call. Retrying against another vendor is the
//! dispatcher's job, not the provider's.

mod postmark;
mod sendgrid;

pub use postmark::{PostmarkConfig, PostmarkProvider};
pub use sendgrid::{SendGridConfig, SendGridProvider};

use std::time::Duration;

use async_trait::async_trait;
use core_config::{FromEnv, env_parse_or};
use reqwest::{Client, RequestBuilder, header::CONTENT_TYPE};
use serde::Serialize;

use crate::error::{ConfigError, SendError};
use crate::models::EmailMessage;

/// Per-attempt timeout used when `PROVIDER_TIMEOUT_SECS` is unset.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Trait for email sending providers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Make one delivery attempt. Any 2xx response counts as accepted.
    async fn send(&self, message: &EmailMessage) -> Result<(), SendError>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

/// Settings for the HTTP client shared by every provider.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
}

impl HttpClientConfig {
    /// Build the client. It is cheap to clone and safe to share across
    /// concurrent requests.
    pub fn build_client(&self) -> Result<Client, ConfigError> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ConfigError::HttpClient)
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FromEnv for HttpClientConfig {
    fn from_env() -> Result<Self, core_config::ConfigError> {
        let secs = env_parse_or("PROVIDER_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        Ok(Self {
            timeout: Duration::from_secs(secs),
        })
    }
}

/// POST `payload` as JSON and map the outcome.
///
/// The response body is only read on failure, to put it in the error.
pub(crate) async fn deliver<T: Serialize>(
    provider: &'static str,
    request: RequestBuilder,
    payload: &T,
) -> Result<(), SendError> {
    let body = serde_json::to_vec(payload)?;

    let response = request
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
        .map_err(SendError::Transport)?;

    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.map_err(SendError::ReadBody)?;
    Err(SendError::Rejected {
        provider,
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
pub(crate) fn test_message() -> EmailMessage {
    EmailMessage {
        to: "jane@example.com".to_string(),
        to_name: "Jane".to_string(),
        from: "noreply@example.com".to_string(),
        from_name: "Example".to_string(),
        subject: "Welcome".to_string(),
        html_body: "<p>Hello</p>".to_string(),
        text_body: "Hello".to_string(),
    }
}
