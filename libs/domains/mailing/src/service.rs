use tracing::instrument;

use crate::dispatch::MailDispatcher;
use crate::error::{MailingResult, TransformError};
use crate::models::{EmailMessage, SendEmailRequest};
use crate::transform::{Renderer, html_to_text};

/// Turns validated requests into messages and hands them to the dispatcher.
pub struct MailService {
    dispatcher: MailDispatcher,
    renderer: Renderer,
}

impl MailService {
    pub fn new(dispatcher: MailDispatcher) -> Self {
        Self {
            dispatcher,
            renderer: html_to_text,
        }
    }

    /// Replace the HTML to plain-text renderer.
    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Build the outgoing message, rendering the plain-text part from the HTML body.
    pub fn translate(&self, request: SendEmailRequest) -> Result<EmailMessage, TransformError> {
        EmailMessage::render(request, self.renderer)
    }

    /// Translate then dispatch. A translation failure means no provider is
    /// contacted.
    #[instrument(skip_all, fields(to = %request.to))]
    pub async fn send_email(&self, request: SendEmailRequest) -> MailingResult<()> {
        let message = self.translate(request)?;
        self.dispatcher.send(&message).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MailingError;
    use crate::providers::{EmailProvider, MockEmailProvider};
    use axum::http::StatusCode;

    fn request() -> SendEmailRequest {
        SendEmailRequest {
            to: "a@b.com".to_string(),
            to_name: "A".to_string(),
            from: "c@d.com".to_string(),
            from_name: "C".to_string(),
            subject: "s".to_string(),
            body: "<p>hi</p>".to_string(),
        }
    }

    fn untouched(name: &'static str) -> Box<dyn EmailProvider> {
        let mut mock = MockEmailProvider::new();
        mock.expect_name().return_const(name);
        mock.expect_send().never();
        Box::new(mock)
    }

    fn failing_render(_: &str) -> Result<String, TransformError> {
        Err(TransformError::Render(html2text::Error::TooNarrow))
    }

    #[tokio::test]
    async fn test_translate_failure_contacts_no_provider() {
        let dispatcher = MailDispatcher::new(vec![untouched("first"), untouched("second")]).unwrap();
        let service = MailService::new(dispatcher).with_renderer(failing_render);

        let err = service.send_email(request()).await.unwrap_err();

        assert!(matches!(err, MailingError::Transform(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_send_email_hands_rendered_message_to_provider() {
        let mut mock = MockEmailProvider::new();
        mock.expect_name().return_const("only");
        mock.expect_send()
            .withf(|message| message.html_body == "<p>hi</p>" && message.text_body.trim() == "hi")
            .times(1)
            .returning(|_| Ok(()));
        let service = MailService::new(MailDispatcher::new(vec![Box::new(mock)]).unwrap());

        assert!(service.send_email(request()).await.is_ok());
    }
}
