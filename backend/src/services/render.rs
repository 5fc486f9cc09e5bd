//! Render service binding the shared core to the configured chat settings

use chrono::{DateTime, FixedOffset, Utc};
use shared::{
    compute_composite_index, detect_kind, render_message, render_messages, validate_reading,
    AqiResult, DetectedKind, HealthBand, Message, PollutantReading, RenderContext,
    RenderedMessage, WeatherChatError,
};

use crate::config::ChatConfig;
use crate::error::{AppError, AppResult};

/// Composite index together with its health classification
#[derive(Debug, Clone, serde::Serialize)]
pub struct AqiAssessment {
    #[serde(flatten)]
    pub result: AqiResult,
    pub health_concern: String,
    pub color: String,
}

/// Render service for chat messages and AQI lookups
#[derive(Debug, Clone)]
pub struct RenderService {
    bot_name: String,
    timezone: FixedOffset,
}

impl RenderService {
    pub fn new(bot_name: impl Into<String>, timezone: FixedOffset) -> Self {
        Self {
            bot_name: bot_name.into(),
            timezone,
        }
    }

    /// Build the service from chat configuration
    pub fn from_config(config: &ChatConfig) -> AppResult<Self> {
        let timezone = config
            .timezone()
            .map_err(|e| AppError::Configuration(e.to_string()))?;
        Ok(Self::new(config.bot_name.clone(), timezone))
    }

    /// Render context for the local date at `now`
    pub fn context_at(&self, now: DateTime<Utc>) -> RenderContext {
        let today = now.with_timezone(&self.timezone).date_naive();
        RenderContext::new(today).with_bot_name(self.bot_name.clone())
    }

    pub fn render(&self, message: &Message) -> RenderedMessage {
        render_message(message, &self.context_at(Utc::now()))
    }

    /// Render a batch against a single "today"
    pub fn render_batch(&self, messages: &[Message]) -> Vec<RenderedMessage> {
        let ctx = self.context_at(Utc::now());
        tracing::debug!("Rendering {} messages for {}", messages.len(), ctx.today);
        render_messages(messages, &ctx)
    }

    pub fn detect_kind(&self, text: &str) -> DetectedKind {
        detect_kind(text)
    }

    /// Compute and classify the composite AQI for a reading
    pub fn assess(&self, reading: &PollutantReading) -> AppResult<AqiAssessment> {
        validate_reading(reading)
            .map_err(|msg| AppError::from(WeatherChatError::InvalidReading(msg.to_string())))?;

        let result = compute_composite_index(reading)?;
        let band: &HealthBand = shared::classify(result.composite_index);

        Ok(AqiAssessment {
            health_concern: band.label(),
            color: band.color().to_string(),
            result,
        })
    }
}
