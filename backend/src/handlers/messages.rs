//! HTTP handlers for message rendering endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use shared::{DetectedKind, Message, RenderedMessage};
use validator::Validate;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::AppState;

/// Request body for batch rendering
#[derive(Debug, Deserialize, Validate)]
pub struct RenderBatchRequest {
    #[validate(length(min = 1, max = 100, message = "Batch must hold 1 to 100 messages"))]
    pub messages: Vec<Message>,
}

/// Request body for payload detection
#[derive(Debug, Deserialize, Validate)]
pub struct DetectRequest {
    #[validate(length(max = 20000, message = "Text is too long"))]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct DetectResponse {
    pub kind: DetectedKind,
}

/// Render a single chat message
pub async fn render_message(
    State(state): State<AppState>,
    AppJson(message): AppJson<Message>,
) -> AppResult<Json<RenderedMessage>> {
    message.validate()?;
    Ok(Json(state.render.render(&message)))
}

/// Render a batch of chat messages
pub async fn render_batch(
    State(state): State<AppState>,
    AppJson(input): AppJson<RenderBatchRequest>,
) -> AppResult<Json<Vec<RenderedMessage>>> {
    input.validate()?;
    for message in &input.messages {
        message.validate()?;
    }
    Ok(Json(state.render.render_batch(&input.messages)))
}

/// Classify a message body without rendering it
pub async fn detect_payload(
    State(state): State<AppState>,
    AppJson(input): AppJson<DetectRequest>,
) -> AppResult<Json<DetectResponse>> {
    input.validate()?;
    Ok(Json(DetectResponse {
        kind: state.render.detect_kind(&input.text),
    }))
}
