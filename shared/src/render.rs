//! Rendering of whole chat messages

use crate::detect::{detect, MessageBody};
use crate::dispatch::{dispatch, RenderContext};
use crate::models::{Message, MessageContent, RenderedMessage};

/// Render a chat message for display
///
/// Malformed payloads never fail the render: the raw text is shown instead.
pub fn render_message(message: &Message, ctx: &RenderContext) -> RenderedMessage {
    let content = match detect(&message.text) {
        Ok(MessageBody::PlainText(text)) => MessageContent::Text {
            text: text.to_string(),
        },
        Ok(MessageBody::Structured(payload)) => MessageContent::Card {
            card: dispatch(&payload, ctx),
        },
        Err(err) => {
            tracing::warn!("Rendering message as text: {}", err);
            MessageContent::Text {
                text: message.text.clone(),
            }
        }
    };

    RenderedMessage {
        id: message.id,
        author_name: message.author.name.clone(),
        avatar: message.author.avatar.clone(),
        is_bot: message.author.name == ctx.bot_name,
        created_at: message.created_at,
        content,
    }
}

/// Render a batch of messages with one shared context
pub fn render_messages(messages: &[Message], ctx: &RenderContext) -> Vec<RenderedMessage> {
    messages.iter().map(|m| render_message(m, ctx)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::DEFAULT_BOT_NAME;
    use crate::models::{Author, ViewModel};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn ctx() -> RenderContext {
        RenderContext::new(NaiveDate::from_ymd_opt(2023, 6, 1).unwrap())
    }

    fn message(author: &str, text: &str) -> Message {
        Message::new(
            Author {
                name: author.to_string(),
                avatar: Some("/avatar.png".to_string()),
            },
            text,
            Utc.with_ymd_and_hms(2023, 6, 1, 9, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_plain_text_message() {
        let rendered = render_message(&message("Asha", "Will it rain today?"), &ctx());
        assert!(!rendered.is_bot);
        assert_eq!(
            rendered.content,
            MessageContent::Text {
                text: "Will it rain today?".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_payload_falls_back_to_text() {
        let body = r#"{"weatherData":{"type":"aqi","list":[}"#;
        let rendered = render_message(&message(DEFAULT_BOT_NAME, body), &ctx());
        assert!(rendered.is_bot);
        assert_eq!(
            rendered.content,
            MessageContent::Text {
                text: body.to_string()
            }
        );
    }

    #[test]
    fn test_unknown_kind_renders_empty_card() {
        let body = r#"{"weatherData":{"type":"uvindex"}}"#;
        let rendered = render_message(&message(DEFAULT_BOT_NAME, body), &ctx());
        assert_eq!(
            rendered.content,
            MessageContent::Card {
                card: ViewModel::Empty
            }
        );
    }

    #[test]
    fn test_custom_bot_name() {
        let ctx = ctx().with_bot_name("Forecaster");
        let rendered = render_messages(
            &[message("Forecaster", "hi"), message(DEFAULT_BOT_NAME, "hi")],
            &ctx,
        );
        assert!(rendered[0].is_bot);
        assert!(!rendered[1].is_bot);
    }
}
