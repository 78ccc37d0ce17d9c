//! Mailing Domain
//!
//! Accepts a send request over HTTP, renders a plain-text alternative of the
//! HTML body, and delivers the message through the first provider that
//! accepts it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ POST /v1/email  │  ← Parses and validates the request
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │   MailService   │  ← Renders HTML to text, builds EmailMessage
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ MailDispatcher  │  ← Tries providers in order, stops at first success
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ Email Provider  │  ← Postmark, SendGrid
//! └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_mailing::{
//!     MailDispatcher, MailService, handlers,
//!     providers::{HttpClientConfig, PostmarkConfig, PostmarkProvider},
//! };
//!
//! let client = HttpClientConfig::default().build_client()?;
//! let dispatcher = MailDispatcher::new(vec![
//!     Box::new(PostmarkProvider::new(PostmarkConfig::new(key), client)),
//! ])?;
//! let app = handlers::router(MailService::new(dispatcher));
//! ```

pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod models;
pub mod providers;
pub mod service;
pub mod transform;
pub mod validation;

// Re-export commonly used types
pub use dispatch::MailDispatcher;
pub use error::{
    ConfigError, DispatchError, MailingError, MailingResult, ProviderFailure, SendError,
    TransformError,
};
pub use models::{EmailMessage, SendEmailRequest};
pub use providers::{EmailProvider, HttpClientConfig, PostmarkProvider, SendGridProvider};
pub use service::MailService;
pub use transform::{Renderer, html_to_text};
pub use validation::{FieldViolation, FieldViolations, Violation, validate_request};
