//! SendGrid email provider implementation.

use super::{EmailProvider, deliver};
use crate::error::SendError;
use crate::models::EmailMessage;
use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_required};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

const DEFAULT_API_URL: &str = "https://api.sendgrid.com/v3";

/// SendGrid API configuration.
#[derive(Debug, Clone)]
pub struct SendGridConfig {
    /// SendGrid API key, sent as a bearer token.
    pub api_key: String,
    /// SendGrid API base URL (defaults to production).
    pub api_url: String,
}

impl SendGridConfig {
    /// Create a new SendGrid configuration.
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    pub fn with_api_url(mut self, api_url: String) -> Self {
        self.api_url = api_url;
        self
    }
}

impl FromEnv for SendGridConfig {
    /// Requires SENDGRID_API_KEY. SENDGRID_API_URL is optional.
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_required("SENDGRID_API_KEY")?,
            api_url: env_or_default("SENDGRID_API_URL", DEFAULT_API_URL),
        })
    }
}

/// SendGrid email provider.
///
/// SendGrid receives the plain-text body only. Replies go to the sender.
pub struct SendGridProvider {
    config: SendGridConfig,
    client: Client,
}

impl SendGridProvider {
    /// Create a new SendGrid provider.
    pub fn new(config: SendGridConfig, client: Client) -> Self {
        Self { config, client }
    }
}

// SendGrid API request structures

#[derive(Debug, Serialize)]
struct SendGridRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    content: Vec<Content<'a>>,
    from: EmailAddress<'a>,
    reply_to: EmailAddress<'a>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<EmailAddress<'a>>,
    subject: &'a str,
}

#[derive(Debug, Serialize)]
struct EmailAddress<'a> {
    email: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

impl<'a> From<&'a EmailMessage> for SendGridRequest<'a> {
    fn from(message: &'a EmailMessage) -> Self {
        let sender = || EmailAddress {
            email: &message.from,
            name: &message.from_name,
        };

        Self {
            personalizations: vec![Personalization {
                to: vec![EmailAddress {
                    email: &message.to,
                    name: &message.to_name,
                }],
                subject: &message.subject,
            }],
            content: vec![Content {
                content_type: "text/plain",
                value: &message.text_body,
            }],
            from: sender(),
            reply_to: sender(),
        }
    }
}

#[async_trait]
impl EmailProvider for SendGridProvider {
    async fn send(&self, message: &EmailMessage) -> Result<(), SendError> {
        let payload = SendGridRequest::from(message);

        debug!(
            to = %message.to,
            subject = %message.subject,
            "Sending email via SendGrid"
        );

        let request = self
            .client
            .post(format!("{}/mail/send", self.config.api_url))
            .bearer_auth(&self.config.api_key);

        deliver(self.name(), request, &payload).await
    }

    fn name(&self) -> &'static str {
        "sendgrid"
    }
}
