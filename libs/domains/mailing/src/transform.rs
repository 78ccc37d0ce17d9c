//! HTML to plain-text rendering for the text part of outgoing mail.

use crate::error::TransformError;
use crate::models::{EmailMessage, SendEmailRequest};

/// Column width the plain-text body is wrapped to.
pub const TEXT_WIDTH: usize = 80;

/// Renders an HTML body into the plain-text part of a message.
pub type Renderer = fn(&str) -> Result<String, TransformError>;

/// Render an HTML fragment as readable plain text.
///
/// Tables are laid out as bordered grids. The output depends only on the
/// input, so the same HTML always yields the same text. Content nested deeper
/// than the wrap width allows runs past it instead of failing.
pub fn html_to_text(html: &str) -> Result<String, TransformError> {
    let text = html2text::config::plain()
        .allow_width_overflow()
        .string_from_read(html.as_bytes(), TEXT_WIDTH)?;
    Ok(text)
}

impl EmailMessage {
    /// Build a message, deriving the plain-text part with `renderer`.
    pub fn render(request: SendEmailRequest, renderer: Renderer) -> Result<Self, TransformError> {
        let text_body = renderer(&request.body)?;

        Ok(EmailMessage {
            to: request.to,
            to_name: request.to_name,
            from: request.from,
            from_name: request.from_name,
            subject: request.subject,
            html_body: request.body,
            text_body,
        })
    }
}

impl TryFrom<SendEmailRequest> for EmailMessage {
    type Error = TransformError;

    fn try_from(request: SendEmailRequest) -> Result<Self, Self::Error> {
        EmailMessage::render(request, html_to_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_becomes_plain_text() {
        let text = html_to_text("<p>hi</p>").unwrap();
        assert_eq!(text.trim(), "hi");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let html = "<h1>Invoice</h1><p>Thanks for <b>your</b> order.</p><ul><li>one</li><li>two</li></ul>";
        assert_eq!(html_to_text(html).unwrap(), html_to_text(html).unwrap());
    }

    #[test]
    fn test_tables_keep_cell_contents() {
        let html = "<table><tr><th>Item</th><th>Qty</th></tr><tr><td>Widget</td><td>3</td></tr></table>";
        let text = html_to_text(html).unwrap();

        assert!(text.contains("Item"));
        assert!(text.contains("Widget"));
        assert!(text.contains('3'));
        assert!(!text.contains("<td>"));
    }

    #[test]
    fn test_plain_input_passes_through() {
        let text = html_to_text("just text").unwrap();
        assert_eq!(text.trim(), "just text");
    }

    #[test]
    fn test_deeply_nested_quotes_overflow_instead_of_failing() {
        let html = format!("{}hi", "<blockquote>".repeat(50));
        let text = html_to_text(&html).unwrap();
        assert!(text.contains("hi"));
    }

    #[test]
    fn test_message_keeps_html_and_adds_text() {
        let request = SendEmailRequest {
            to: "a@b.com".to_string(),
            to_name: "A".to_string(),
            from: "c@d.com".to_string(),
            from_name: "C".to_string(),
            subject: "s".to_string(),
            body: "<p>hi</p>".to_string(),
        };

        let message = EmailMessage::try_from(request).unwrap();

        assert_eq!(message.html_body, "<p>hi</p>");
        assert_eq!(message.text_body.trim(), "hi");
        assert_eq!(message.to, "a@b.com");
        assert_eq!(message.from_name, "C");
    }

    #[test]
    fn test_render_failure_is_returned() {
        let request = SendEmailRequest {
            body: "<p>hi</p>".to_string(),
            ..Default::default()
        };

        let err = EmailMessage::render(request, |_| {
            Err(TransformError::Render(html2text::Error::TooNarrow))
        })
        .unwrap_err();

        assert!(err.to_string().starts_with("error getting text from body: "));
    }
}
