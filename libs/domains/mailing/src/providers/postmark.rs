//! Postmark email provider implementation.

use super::{EmailProvider, deliver};
use crate::error::SendError;
use crate::models::EmailMessage;
use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_required};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

const DEFAULT_API_URL: &str = "https://api.postmarkapp.com";
const DEFAULT_MESSAGE_STREAM: &str = "outbound";

/// Postmark API configuration.
#[derive(Debug, Clone)]
pub struct PostmarkConfig {
    /// Server token sent as `X-Postmark-Server-Token`.
    pub api_key: String,
    /// API base URL (defaults to production).
    pub api_url: String,
    /// Message stream the email is sent through.
    pub message_stream: String,
}

impl PostmarkConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
            message_stream: DEFAULT_MESSAGE_STREAM.to_string(),
        }
    }

    pub fn with_api_url(mut self, api_url: String) -> Self {
        self.api_url = api_url;
        self
    }
}

impl FromEnv for PostmarkConfig {
    /// Requires POSTMARK_API_KEY. POSTMARK_API_URL and POSTMARK_MESSAGE_STREAM
    /// are optional.
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_required("POSTMARK_API_KEY")?,
            api_url: env_or_default("POSTMARK_API_URL", DEFAULT_API_URL),
            message_stream: env_or_default("POSTMARK_MESSAGE_STREAM", DEFAULT_MESSAGE_STREAM),
        })
    }
}

/// Postmark email provider.
///
/// Postmark receives the HTML body only.
pub struct PostmarkProvider {
    config: PostmarkConfig,
    client: Client,
}

impl PostmarkProvider {
    pub fn new(config: PostmarkConfig, client: Client) -> Self {
        Self { config, client }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PostmarkRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    message_stream: &'a str,
}

impl<'a> PostmarkRequest<'a> {
    fn new(message: &'a EmailMessage, message_stream: &'a str) -> Self {
        Self {
            from: &message.from,
            to: &message.to,
            subject: &message.subject,
            html_body: &message.html_body,
            message_stream,
        }
    }
}

#[async_trait]
impl EmailProvider for PostmarkProvider {
    async fn send(&self, message: &EmailMessage) -> Result<(), SendError> {
        let payload = PostmarkRequest::new(message, &self.config.message_stream);

        debug!(
            to = %message.to,
            subject = %message.subject,
            stream = %self.config.message_stream,
            "Sending email via Postmark"
        );

        let request = self
            .client
            .post(format!("{}/email", self.config.api_url))
            .header("X-Postmark-Server-Token", &self.config.api_key);

        deliver(self.name(), request, &payload).await
    }

    fn name(&self) -> &'static str {
        "postmarkapp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::test_message;
    use mockito::Matcher;
    use serde_json::json;

    fn provider(api_url: String) -> PostmarkProvider {
        let config = PostmarkConfig::new("server-token".to_string()).with_api_url(api_url);
        PostmarkProvider::new(config, Client::new())
    }

    #[test]
    fn test_postmark_config_from_env() {
        temp_env::with_vars(
            [
                ("POSTMARK_API_KEY", Some("pm-key")),
                ("POSTMARK_API_URL", None),
                ("POSTMARK_MESSAGE_STREAM", None),
            ],
            || {
                let config = PostmarkConfig::from_env().unwrap();
                assert_eq!(config.api_key, "pm-key");
                assert_eq!(config.api_url, "https://api.postmarkapp.com");
                assert_eq!(config.message_stream, "outbound");
            },
        );
    }

    #[test]
    fn test_postmark_config_requires_key() {
        temp_env::with_var_unset("POSTMARK_API_KEY", || {
            let err = PostmarkConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("POSTMARK_API_KEY"));
        });
    }

    #[tokio::test]
    async fn test_sends_html_body_with_server_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/email")
            .match_header("X-Postmark-Server-Token", "server-token")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "From": "noreply@example.com",
                "To": "jane@example.com",
                "Subject": "Welcome",
                "HtmlBody": "<p>Hello</p>",
                "MessageStream": "outbound"
            })))
            .with_status(200)
            .with_body(r#"{"ErrorCode":0,"Message":"OK"}"#)
            .expect(1)
            .create_async()
            .await;

        provider(server.url()).send(&test_message()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_any_2xx_is_accepted() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/email")
            .with_status(202)
            .create_async()
            .await;

        assert!(provider(server.url()).send(&test_message()).await.is_ok());
    }

    #[tokio::test]
    async fn test_rejection_carries_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/email")
            .with_status(400)
            .with_body(r#"{"error":"error"}"#)
            .create_async()
            .await;

        let err = provider(server.url())
            .send(&test_message())
            .await
            .unwrap_err();

        assert!(matches!(err, SendError::Rejected { status: 400, .. }));
        assert_eq!(
            err.to_string(),
            r#"error with postmarkapp: Status code 400. Body {"error":"error"}"#
        );
    }

    #[tokio::test]
    async fn test_transport_failure() {
        // Nothing listens on port 1.
        let err = provider("http://127.0.0.1:1".to_string())
            .send(&test_message())
            .await
            .unwrap_err();

        assert!(matches!(err, SendError::Transport(_)));
        assert!(err.to_string().starts_with("do request fail: "));
    }
}
