//! Nimble Weather Chat - Render Server
//!
//! Classifies chat messages, shapes weather payloads into cards and computes
//! air quality indices for the chat front-end.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod extract;
mod handlers;
mod routes;
mod services;

pub use config::Config;
use services::RenderService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub render: RenderService,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nimble_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Nimble Weather Chat Server");
    tracing::info!("Environment: {}", config.environment);

    // Reference tables are static; refuse to start on a broken one
    shared::BreakpointTable::national()
        .validate()
        .map_err(anyhow::Error::msg)?;
    shared::HealthBandTable::national()
        .validate()
        .map_err(anyhow::Error::msg)?;
    tracing::info!("AQI reference tables validated");

    // Create application state
    let render = RenderService::from_config(&config.chat)?;
    tracing::info!("Bot author: {}", config.chat.bot_name);

    let state = AppState {
        config: Arc::new(config.clone()),
        render,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Nimble Weather Chat API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
