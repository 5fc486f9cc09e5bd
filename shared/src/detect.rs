//! Detection of structured weather payloads embedded in message text
//!
//! The chat bot sends weather cards as JSON text starting with a fixed
//! marker. Detection is a prefix test; anything carrying the marker must
//! then parse as `{ "weatherData": { "type": ..., ... } }`.

use serde::{Deserialize, Serialize};

use crate::error::WeatherChatResult;
use crate::models::{PayloadKind, StructuredPayload};

/// Literal prefix of a message body that carries a weather payload
pub const WEATHER_PAYLOAD_MARKER: &str = r#"{"weatherData":{"#;

/// Classified message body
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody<'a> {
    PlainText(&'a str),
    Structured(StructuredPayload),
}

#[derive(Debug, Deserialize)]
struct PayloadEnvelope {
    #[serde(rename = "weatherData")]
    weather_data: serde_json::Value,
}

/// Whether the body claims to carry a weather payload
pub fn has_payload_marker(body: &str) -> bool {
    body.starts_with(WEATHER_PAYLOAD_MARKER)
}

/// Classify a message body as plain text or a structured payload
///
/// Returns `MalformedPayload` when the marker is present but the body does
/// not parse; callers fall back to showing the raw text.
pub fn detect(body: &str) -> WeatherChatResult<MessageBody<'_>> {
    if !has_payload_marker(body) {
        return Ok(MessageBody::PlainText(body));
    }

    let envelope: PayloadEnvelope = serde_json::from_str(body)?;
    let payload = StructuredPayload::from_value(envelope.weather_data)?;
    Ok(MessageBody::Structured(payload))
}

/// Coarse classification of a message body, for callers that only route
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DetectedKind {
    Text,
    Weather,
    Forecast,
    Aqi,
    Unsupported,
    Malformed,
}

impl std::fmt::Display for DetectedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectedKind::Text => write!(f, "text"),
            DetectedKind::Weather => write!(f, "weather"),
            DetectedKind::Forecast => write!(f, "forecast"),
            DetectedKind::Aqi => write!(f, "aqi"),
            DetectedKind::Unsupported => write!(f, "unsupported"),
            DetectedKind::Malformed => write!(f, "malformed"),
        }
    }
}

/// Classify a body without keeping the payload
pub fn detect_kind(body: &str) -> DetectedKind {
    match detect(body) {
        Ok(MessageBody::PlainText(_)) => DetectedKind::Text,
        Ok(MessageBody::Structured(payload)) => match payload.kind() {
            PayloadKind::Weather => DetectedKind::Weather,
            PayloadKind::Forecast => DetectedKind::Forecast,
            PayloadKind::Aqi => DetectedKind::Aqi,
            PayloadKind::Unsupported => DetectedKind::Unsupported,
        },
        Err(err) => {
            tracing::debug!("Detection failed: {}", err);
            DetectedKind::Malformed
        }
    }
}
