//! Render-ready view models handed to the presentation layer
//!
//! Every computed value (temperatures, AQI, classification) is final here;
//! the presentation layer must not derive them again.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::types::{CompassPoint, Pollutant};

/// Shaped card for one payload kind
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewModel {
    Weather(CurrentWeatherView),
    Forecast(ForecastView),
    Aqi(AqiView),
    /// Nothing to render (unsupported payload kind)
    Empty,
}

impl ViewModel {
    pub fn is_empty(&self) -> bool {
        matches!(self, ViewModel::Empty)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationView {
    pub name: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WindView {
    pub speed_mps: Decimal,
    /// Bearing as reported by the provider
    pub direction_deg: i32,
    /// Rotation of the `↑` indicator; 0 points up
    pub arrow_rotation_deg: i32,
    pub compass: CompassPoint,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CurrentWeatherView {
    pub location: LocationView,
    pub day_name: String,
    pub date: NaiveDate,
    pub icon: String,
    pub description: String,
    /// Two decimal places
    pub temperature_celsius: Decimal,
    /// Two decimal places
    pub feels_like_celsius: Decimal,
    pub humidity_percent: i32,
    /// One decimal place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility_km: Option<Decimal>,
    pub wind: WindView,
    pub cloudiness_percent: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain_last_hour_mm: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snow_last_hour_mm: Option<Decimal>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ForecastView {
    pub location: LocationView,
    pub days: Vec<DailyForecastView>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyForecastView {
    pub date: NaiveDate,
    pub day_name: String,
    pub icon: String,
    pub description: String,
    /// One decimal place
    pub temperature_celsius: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AqiView {
    pub day_name: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub status: AqiStatus,
}

/// Outcome of the air quality computation for a card
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AqiStatus {
    Available {
        /// Two decimal places
        index: Decimal,
        health_concern: String,
        color: String,
        dominant_pollutant: Option<Pollutant>,
    },
    /// The reading could not be indexed; no number is shown
    Unavailable { reason: String },
}

/// Body of a rendered chat message
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: String },
    Card { card: ViewModel },
}

/// A chat message ready for display
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RenderedMessage {
    pub id: Option<Uuid>,
    pub author_name: String,
    pub avatar: Option<String>,
    pub is_bot: bool,
    pub created_at: DateTime<Utc>,
    pub content: MessageContent,
}
