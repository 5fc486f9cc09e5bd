//! Shaping of structured payloads into render-ready view models

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::aqi::{classify, compute_composite_index};
use crate::error::{WeatherChatError, WeatherChatResult};
use crate::models::{
    AirQualityData, AqiStatus, AqiView, CurrentWeatherData, CurrentWeatherView, DailyForecastView,
    ForecastData, ForecastView, LocationView, StructuredPayload, ViewModel, WindView,
};
use crate::types::{day_name, kelvin_to_celsius, to_fixed, CompassPoint};

/// Default author name of the weather bot
pub const DEFAULT_BOT_NAME: &str = "Nimble.AI Weather";

/// Forecast entries are three-hourly; every 8th one gives one per day
pub const FORECAST_DAILY_STRIDE: usize = 8;

/// Ambient inputs of a render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    /// Date shown on current-weather and AQI cards
    pub today: NaiveDate,
    /// Author name identifying bot messages
    pub bot_name: String,
}

impl RenderContext {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            bot_name: DEFAULT_BOT_NAME.to_string(),
        }
    }

    pub fn with_bot_name(mut self, bot_name: impl Into<String>) -> Self {
        self.bot_name = bot_name.into();
        self
    }

    fn today_name(&self) -> String {
        day_name(self.today.weekday()).to_string()
    }
}

/// Route a payload to the shaping routine for its kind
pub fn dispatch(payload: &StructuredPayload, ctx: &RenderContext) -> ViewModel {
    match payload {
        StructuredPayload::Weather(data) => ViewModel::Weather(shape_current_weather(data, ctx)),
        StructuredPayload::Forecast(data) => ViewModel::Forecast(shape_forecast(data)),
        StructuredPayload::Aqi(data) => ViewModel::Aqi(shape_air_quality(data, ctx)),
        StructuredPayload::Unsupported { kind } => {
            tracing::debug!("No card for payload kind {:?}", kind);
            ViewModel::Empty
        }
    }
}

/// Uppercase the first character only
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Wind indicator for a bearing; 0° keeps the arrow pointing up
pub fn wind_view(speed_mps: Decimal, direction_deg: i32) -> WindView {
    WindView {
        speed_mps,
        direction_deg,
        arrow_rotation_deg: direction_deg.rem_euclid(360),
        compass: CompassPoint::from_degrees(direction_deg),
    }
}

fn celsius_fixed(kelvin: Decimal, decimal_places: u32) -> Decimal {
    to_fixed(kelvin_to_celsius(kelvin), decimal_places)
}

fn unix_instant(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}

/// Current conditions card
pub fn shape_current_weather(data: &CurrentWeatherData, ctx: &RenderContext) -> CurrentWeatherView {
    let condition = data.weather.first().cloned().unwrap_or_default();

    CurrentWeatherView {
        location: LocationView {
            name: data.name.clone(),
            country: data.sys.country.clone(),
        },
        day_name: ctx.today_name(),
        date: ctx.today,
        icon: condition.icon,
        description: capitalize_first(&condition.description),
        temperature_celsius: celsius_fixed(data.main.temp, 2),
        feels_like_celsius: celsius_fixed(data.main.feels_like, 2),
        humidity_percent: data.main.humidity,
        visibility_km: data
            .visibility
            .map(|meters| to_fixed(Decimal::from(meters) / Decimal::from(1000), 1)),
        wind: wind_view(data.wind.speed, data.wind.deg.unwrap_or(0)),
        cloudiness_percent: data.clouds.all,
        rain_last_hour_mm: data.rain.as_ref().and_then(|r| r.one_hour),
        snow_last_hour_mm: data.snow.as_ref().and_then(|s| s.one_hour),
        sunrise: unix_instant(data.sys.sunrise),
        sunset: unix_instant(data.sys.sunset),
    }
}

/// Daily forecast card, one entry per day
pub fn shape_forecast(data: &ForecastData) -> ForecastView {
    let days = data
        .list
        .iter()
        .step_by(FORECAST_DAILY_STRIDE)
        .map(|entry| {
            let condition = entry.weather.first().cloned().unwrap_or_default();
            let date = entry.dt_txt.date();
            DailyForecastView {
                date,
                day_name: day_name(date.weekday()).to_string(),
                icon: condition.icon,
                description: condition.description,
                temperature_celsius: celsius_fixed(entry.main.temp, 1),
            }
        })
        .collect();

    ForecastView {
        location: LocationView {
            name: data.city.name.clone(),
            country: data.city.country.clone(),
        },
        days,
    }
}

/// Air quality card from the first reading in the payload
pub fn shape_air_quality(data: &AirQualityData, ctx: &RenderContext) -> AqiView {
    let status = match air_quality_status(data) {
        Ok(status) => status,
        Err(err) => {
            tracing::warn!("AQI unavailable: {}", err);
            AqiStatus::Unavailable {
                reason: err.to_string(),
            }
        }
    };

    AqiView {
        day_name: ctx.today_name(),
        date: ctx.today,
        status,
    }
}

fn air_quality_status(data: &AirQualityData) -> WeatherChatResult<AqiStatus> {
    let sample = data.list.first().ok_or_else(|| {
        WeatherChatError::InvalidReading("Payload has no air quality readings".to_string())
    })?;

    let result = compute_composite_index(&sample.components.to_reading())?;
    let band = classify(result.composite_index);

    Ok(AqiStatus::Available {
        index: to_fixed(result.composite_index, 2),
        health_concern: band.label(),
        color: band.color().to_string(),
        dominant_pollutant: result.dominant_pollutant,
    })
}
