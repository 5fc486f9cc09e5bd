//! Route definitions for the Nimble weather chat render service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Message rendering
        .nest("/messages", message_routes())
        // Payload detection
        .route("/payloads/detect", post(handlers::detect_payload))
        // Air quality
        .nest("/aqi", aqi_routes())
}

/// Message rendering routes
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/render", post(handlers::render_message))
        .route("/render/batch", post(handlers::render_batch))
}

/// Air quality routes
fn aqi_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::compute_aqi))
        .route("/bands", get(handlers::list_health_bands))
        .route("/breakpoints", get(handlers::get_breakpoints))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use chrono::FixedOffset;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::{ChatConfig, Config, ServerConfig};
    use crate::services::RenderService;
    use crate::{create_app, AppState};

    fn test_state() -> AppState {
        let config = Config {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            chat: ChatConfig::default(),
        };
        AppState {
            render: RenderService::new(
                config.chat.bot_name.clone(),
                FixedOffset::east_opt(0).unwrap(),
            ),
            config: Arc::new(config),
        }
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let response = create_app(test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = create_app(test_state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn message(author: &str, text: &str) -> Value {
        json!({
            "user": { "fName": author, "avatar": null },
            "text": text,
            "created_at": "2023-06-01T09:30:00Z"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_render_plain_text() {
        let (status, body) =
            post_json("/api/v1/messages/render", message("Asha", "Is it sunny?")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_bot"], false);
        assert_eq!(body["content"]["kind"], "text");
        assert_eq!(body["content"]["text"], "Is it sunny?");
    }

    #[tokio::test]
    async fn test_render_unsupported_payload_as_empty_card() {
        let (status, body) = post_json(
            "/api/v1/messages/render",
            message(shared::DEFAULT_BOT_NAME, r#"{"weatherData":{"type":"uvindex"}}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_bot"], true);
        assert_eq!(body["content"]["kind"], "card");
        assert_eq!(body["content"]["card"]["type"], "empty");
    }

    #[tokio::test]
    async fn test_render_batch_rejects_empty_batch() {
        let (status, body) =
            post_json("/api/v1/messages/render/batch", json!({ "messages": [] })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["field"], "messages");
    }

    #[tokio::test]
    async fn test_render_batch() {
        let (status, body) = post_json(
            "/api/v1/messages/render/batch",
            json!({ "messages": [message("Asha", "hi"), message("Ravi", "hello")] }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_detect_payload() {
        let (_, body) = post_json("/api/v1/payloads/detect", json!({ "text": "hello" })).await;
        assert_eq!(body["kind"], "text");

        let (_, body) = post_json(
            "/api/v1/payloads/detect",
            json!({ "text": r#"{"weatherData":{"type":"aqi""# }),
        )
        .await;
        assert_eq!(body["kind"], "malformed");
    }

    #[tokio::test]
    async fn test_compute_aqi() {
        let (status, body) = post_json("/api/v1/aqi", json!({ "pm2_5": 35, "pm10": 40 })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dominant_pollutant"], "pm2_5");
        assert_eq!(body["health_concern"], "Satisfactory");
        assert_eq!(body["color"], "#92D050");
    }

    #[tokio::test]
    async fn test_compute_aqi_rejects_invalid_reading() {
        let (status, body) = post_json("/api/v1/aqi", json!({ "pm10": -5 })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "INVALID_READING");

        let (status, _) = post_json("/api/v1/aqi", json!({})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_compute_aqi_unknown_pollutant_uses_error_body() {
        let (status, body) = post_json("/api/v1/aqi", json!({ "pm2_5": 35, "no": 0.3 })).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "INVALID_BODY");
        assert!(body["error"]["message"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_render_rejects_unparsable_body() {
        let response = create_app(test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/messages/render")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"user\":"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "INVALID_BODY");
    }

    #[tokio::test]
    async fn test_reference_tables() {
        let (status, body) = get_json("/api/v1/aqi/bands").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(6));

        let (status, body) = get_json("/api/v1/aqi/breakpoints").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pm2_5"].as_array().map(Vec::len), Some(6));
    }
}
