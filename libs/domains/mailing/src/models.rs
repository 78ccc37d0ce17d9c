use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Body of `POST /v1/email`.
///
/// Absent and `null` fields deserialize as empty strings so that validation,
/// rather than parsing, reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct SendEmailRequest {
    /// Recipient address
    #[validate(length(min = 1, code = "required"), email(code = "email"))]
    #[schema(example = "jane@example.com")]
    #[serde(deserialize_with = "null_as_empty")]
    pub to: String,

    /// Recipient display name
    #[validate(length(min = 1, code = "required"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub to_name: String,

    /// Sender address
    #[validate(length(min = 1, code = "required"), email(code = "email"))]
    #[schema(example = "noreply@example.com")]
    #[serde(deserialize_with = "null_as_empty")]
    pub from: String,

    /// Sender display name
    #[validate(length(min = 1, code = "required"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub from_name: String,

    #[validate(length(min = 1, code = "required"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub subject: String,

    /// HTML body; a plain-text rendering is derived from it
    #[validate(length(min = 1, code = "required"))]
    #[schema(example = "<p>Hello</p>")]
    #[serde(deserialize_with = "null_as_empty")]
    pub body: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A message ready to hand to a provider.
///
/// Built once per request from a [`SendEmailRequest`] (see
/// `EmailMessage::try_from`) and shared by reference with every provider
/// attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub to_name: String,
    pub from: String,
    pub from_name: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}
