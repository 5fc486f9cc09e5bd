//! Weather payload models
//!
//! Shapes follow the OpenWeatherMap responses the chat bot embeds in its
//! messages. Only the fields the cards need are modelled; everything else is
//! ignored on deserialization.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::WeatherChatResult;
use crate::types::{Pollutant, PollutantReading};

/// Payload kinds understood by the weather cards
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    Weather,
    Forecast,
    Aqi,
    Unsupported,
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadKind::Weather => write!(f, "weather"),
            PayloadKind::Forecast => write!(f, "forecast"),
            PayloadKind::Aqi => write!(f, "aqi"),
            PayloadKind::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// A structured payload extracted from a chat message
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredPayload {
    Weather(CurrentWeatherData),
    Forecast(ForecastData),
    Aqi(AirQualityData),
    /// A well-formed payload whose `type` this renderer does not know;
    /// `kind` is empty when the field is absent or not a string
    Unsupported { kind: String },
}

impl StructuredPayload {
    /// Build a payload from the `weatherData` object
    pub fn from_value(value: serde_json::Value) -> WeatherChatResult<Self> {
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string();

        let payload = match kind.as_str() {
            "weather" => StructuredPayload::Weather(serde_json::from_value(value)?),
            "forecast" => StructuredPayload::Forecast(serde_json::from_value(value)?),
            "aqi" => StructuredPayload::Aqi(serde_json::from_value(value)?),
            _ => StructuredPayload::Unsupported { kind },
        };

        Ok(payload)
    }

    pub fn kind(&self) -> PayloadKind {
        match self {
            StructuredPayload::Weather(_) => PayloadKind::Weather,
            StructuredPayload::Forecast(_) => PayloadKind::Forecast,
            StructuredPayload::Aqi(_) => PayloadKind::Aqi,
            StructuredPayload::Unsupported { .. } => PayloadKind::Unsupported,
        }
    }
}

/// Weather condition entry (`weather[]`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeatherCondition {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

/// Current weather conditions payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentWeatherData {
    pub name: String,
    pub sys: SunCycle,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    /// Meters
    pub visibility: Option<i32>,
    pub wind: Wind,
    pub clouds: Clouds,
    pub rain: Option<Precipitation>,
    pub snow: Option<Precipitation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SunCycle {
    #[serde(default)]
    pub country: String,
    /// Unix seconds
    pub sunrise: i64,
    /// Unix seconds
    pub sunset: i64,
}

/// Temperatures are in Kelvin
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MainReadings {
    pub temp: Decimal,
    pub feels_like: Decimal,
    pub humidity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wind {
    /// Meters per second
    pub speed: Decimal,
    pub deg: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Clouds {
    pub all: i32,
}

/// Rain or snow volume in millimeters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Precipitation {
    #[serde(rename = "1h")]
    pub one_hour: Option<Decimal>,
    #[serde(rename = "3h")]
    pub three_hour: Option<Decimal>,
}

/// Five day / three hour forecast payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastData {
    pub city: ForecastCity,
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastCity {
    pub name: String,
    #[serde(default)]
    pub country: String,
}

/// One three-hourly forecast step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastEntry {
    #[serde(deserialize_with = "deserialize_dt_txt")]
    pub dt_txt: NaiveDateTime,
    pub main: ForecastMain,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

/// Temperature in Kelvin
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastMain {
    pub temp: Decimal,
}

/// Format of `dt_txt` in forecast entries
pub const FORECAST_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn deserialize_dt_txt<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, FORECAST_TIME_FORMAT).map_err(serde::de::Error::custom)
}

/// Air pollution payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AirQualityData {
    #[serde(default)]
    pub list: Vec<AirQualitySample>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AirQualitySample {
    /// Unix seconds
    pub dt: Option<i64>,
    pub components: AirQualityComponents,
}

/// Pollutant concentrations as reported by the provider, all in µg/m³
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AirQualityComponents {
    pub co: Option<Decimal>,
    pub no: Option<Decimal>,
    pub no2: Option<Decimal>,
    pub o3: Option<Decimal>,
    pub so2: Option<Decimal>,
    pub pm2_5: Option<Decimal>,
    pub pm10: Option<Decimal>,
    pub nh3: Option<Decimal>,
}

impl AirQualityComponents {
    /// Convert to breakpoint-table units
    ///
    /// CO is reported in µg/m³ but indexed in mg/m³. NO has no breakpoints.
    pub fn to_reading(&self) -> PollutantReading {
        let co_mg = self.co.map(|co| co / Decimal::from(1000));

        [
            (Pollutant::Pm25, self.pm2_5),
            (Pollutant::Pm10, self.pm10),
            (Pollutant::No2, self.no2),
            (Pollutant::So2, self.so2),
            (Pollutant::Co, co_mg),
            (Pollutant::O3, self.o3),
            (Pollutant::Nh3, self.nh3),
        ]
        .into_iter()
        .filter_map(|(pollutant, value)| value.map(|v| (pollutant, v)))
        .collect()
    }
}
