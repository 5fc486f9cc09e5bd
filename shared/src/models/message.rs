//! Chat message models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Upper bound on message text accepted for rendering
pub const MAX_MESSAGE_TEXT_LEN: u64 = 20_000;

/// Author of a chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    #[serde(rename = "fName")]
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// A chat message as received from the chat feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct Message {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(rename = "user")]
    pub author: Author,
    #[validate(length(max = 20000))]
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(author: Author, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            author,
            text: text.into(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wire_names() {
        let message: Message = serde_json::from_str(
            r#"{
                "user": { "fName": "Nimble.AI Weather", "avatar": "/bot.png" },
                "text": "hello",
                "created_at": "2023-06-01T10:15:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(message.author.name, "Nimble.AI Weather");
        assert_eq!(message.author.avatar.as_deref(), Some("/bot.png"));
        assert!(message.id.is_none());
    }

    #[test]
    fn test_message_text_length_validation() {
        let author = Author {
            name: "Asha".to_string(),
            avatar: None,
        };
        let ok = Message::new(author.clone(), "short", Utc::now());
        assert!(ok.validate().is_ok());

        let too_long = Message::new(
            author,
            "x".repeat(MAX_MESSAGE_TEXT_LEN as usize + 1),
            Utc::now(),
        );
        assert!(too_long.validate().is_err());
    }
}
