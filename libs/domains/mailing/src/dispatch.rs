//! Provider failover.
//!
//! Providers are tried one at a time in configured order. The first one that
//! accepts the message ends the dispatch; later providers are never contacted.
//! A provider that accepted the message but whose response was lost looks
//! like a failure here, so the next provider may deliver a second copy.

use tracing::{error, info, instrument, warn};

use crate::error::{ConfigError, DispatchError, ProviderFailure};
use crate::models::EmailMessage;
use crate::providers::EmailProvider;

/// Ordered, non-empty chain of providers.
pub struct MailDispatcher {
    providers: Vec<Box<dyn EmailProvider>>,
}

impl MailDispatcher {
    /// The order of `providers` is the failover priority.
    pub fn new(providers: Vec<Box<dyn EmailProvider>>) -> Result<Self, ConfigError> {
        if providers.is_empty() {
            return Err(ConfigError::NoProviders);
        }
        Ok(Self { providers })
    }

    /// Provider names in priority order.
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    #[instrument(skip_all, fields(to = %message.to, subject = %message.subject))]
    pub async fn send(&self, message: &EmailMessage) -> Result<(), DispatchError> {
        let mut failures = Vec::new();

        for provider in &self.providers {
            let name = provider.name();
            match provider.send(message).await {
                Ok(()) => {
                    info!(
                        provider = name,
                        attempt = failures.len() + 1,
                        "Email accepted by provider"
                    );
                    return Ok(());
                }
                Err(e) => {
                    warn!(provider = name, error = %e, "Provider failed to send email");
                    failures.push(ProviderFailure {
                        provider: name,
                        error: e,
                    });
                }
            }
        }

        error!(
            attempts = failures.len(),
            "No provider could deliver the email"
        );
        Err(DispatchError { failures })
    }
}
