use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::post,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::MailingResult;
use crate::models::SendEmailRequest;
use crate::service::MailService;
use crate::validation::validate_request;

/// Path of the send endpoint.
pub const EMAIL_PATH: &str = "/v1/email";

/// OpenAPI documentation for the mailing API
#[derive(OpenApi)]
#[openapi(
    paths(send_email),
    components(schemas(SendEmailRequest)),
    tags(
        (name = "email", description = "Send email through the first available provider")
    )
)]
pub struct ApiDoc;

/// Create the mailing router
pub fn router(service: MailService) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(EMAIL_PATH, post(send_email).fallback(method_not_allowed))
        .with_state(shared_service)
}

/// Send an email
///
/// The HTML body is also rendered as plain text. Providers are tried in
/// order until one accepts the message.
#[utoipa::path(
    post,
    path = "/v1/email",
    tag = "email",
    request_body = SendEmailRequest,
    responses(
        (status = 200, description = "Email accepted by a provider"),
        (status = 400, description = "Unreadable body or one `Error in field '<Field>'. <Reason>` line per invalid field", body = String, content_type = "text/plain"),
        (status = 405, description = "Method not allowed", body = String, content_type = "text/plain"),
        (status = 500, description = "Body could not be rendered as text, or no provider accepted the email", body = String, content_type = "text/plain")
    )
)]
async fn send_email(
    State(service): State<Arc<MailService>>,
    body: Bytes,
) -> MailingResult<StatusCode> {
    let request: SendEmailRequest = serde_json::from_slice(&body)?;
    validate_request(&request)?;

    service.send_email(request).await?;
    Ok(StatusCode::OK)
}

async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}
