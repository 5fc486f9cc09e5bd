//! Common types used across the platform

use std::collections::BTreeMap;

use chrono::Weekday;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Offset between the Kelvin and Celsius scales
pub fn kelvin_offset() -> Decimal {
    Decimal::new(27315, 2)
}

/// Convert a Kelvin temperature to Celsius
pub fn kelvin_to_celsius(kelvin: Decimal) -> Decimal {
    kelvin - kelvin_offset()
}

/// Round to a fixed number of decimal places, keeping trailing zeros
///
/// Mirrors `Number.prototype.toFixed`: `27` with two places becomes `27.00`.
pub fn to_fixed(value: Decimal, decimal_places: u32) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimal_places);
    rounded
}

/// English weekday name shown on weather cards
pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Pollutants tracked by the air quality index
///
/// Declaration order doubles as the tie-break order for the dominant pollutant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pollutant {
    #[serde(rename = "pm2_5")]
    Pm25,
    #[serde(rename = "pm10")]
    Pm10,
    #[serde(rename = "no2")]
    No2,
    #[serde(rename = "so2")]
    So2,
    #[serde(rename = "co")]
    Co,
    #[serde(rename = "o3")]
    O3,
    #[serde(rename = "nh3")]
    Nh3,
}

impl Pollutant {
    pub const ALL: [Pollutant; 7] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::Co,
        Pollutant::O3,
        Pollutant::Nh3,
    ];

    /// Unit the breakpoint table expects concentrations in
    pub fn unit(&self) -> &'static str {
        match self {
            Pollutant::Co => "mg/m³",
            _ => "µg/m³",
        }
    }
}

impl std::fmt::Display for Pollutant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pollutant::Pm25 => write!(f, "PM2.5"),
            Pollutant::Pm10 => write!(f, "PM10"),
            Pollutant::No2 => write!(f, "NO2"),
            Pollutant::So2 => write!(f, "SO2"),
            Pollutant::Co => write!(f, "CO"),
            Pollutant::O3 => write!(f, "O3"),
            Pollutant::Nh3 => write!(f, "NH3"),
        }
    }
}

/// Pollutant concentrations in breakpoint-table units
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct PollutantReading {
    concentrations: BTreeMap<Pollutant, Decimal>,
}

impl PollutantReading {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, pollutant: Pollutant, concentration: Decimal) -> Self {
        self.insert(pollutant, concentration);
        self
    }

    pub fn insert(&mut self, pollutant: Pollutant, concentration: Decimal) {
        self.concentrations.insert(pollutant, concentration);
    }

    pub fn get(&self, pollutant: Pollutant) -> Option<Decimal> {
        self.concentrations.get(&pollutant).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.concentrations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.concentrations.len()
    }

    /// Iterate in pollutant declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, Decimal)> + '_ {
        self.concentrations.iter().map(|(p, c)| (*p, *c))
    }
}

impl FromIterator<(Pollutant, Decimal)> for PollutantReading {
    fn from_iter<I: IntoIterator<Item = (Pollutant, Decimal)>>(iter: I) -> Self {
        Self {
            concentrations: iter.into_iter().collect(),
        }
    }
}

/// Eight-point compass direction for wind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CompassPoint {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassPoint {
    /// Compass point for a meteorological bearing in degrees
    pub fn from_degrees(degrees: i32) -> Self {
        let normalized = degrees.rem_euclid(360);
        // each sector spans 45° centred on its bearing
        match ((normalized * 2 + 45) / 90) % 8 {
            0 => CompassPoint::N,
            1 => CompassPoint::NE,
            2 => CompassPoint::E,
            3 => CompassPoint::SE,
            4 => CompassPoint::S,
            5 => CompassPoint::SW,
            6 => CompassPoint::W,
            _ => CompassPoint::NW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_kelvin_to_celsius() {
        assert_eq!(kelvin_to_celsius(dec("300.00")), dec("26.85"));
        assert_eq!(kelvin_to_celsius(dec("273.15")), Decimal::ZERO);
    }

    #[test]
    fn test_to_fixed_pads_and_rounds() {
        assert_eq!(to_fixed(dec("27"), 2).to_string(), "27.00");
        assert_eq!(to_fixed(dec("26.845"), 2).to_string(), "26.85");
        assert_eq!(to_fixed(dec("9.96"), 1).to_string(), "10.0");
    }

    #[test]
    fn test_compass_points() {
        assert_eq!(CompassPoint::from_degrees(0), CompassPoint::N);
        assert_eq!(CompassPoint::from_degrees(22), CompassPoint::N);
        assert_eq!(CompassPoint::from_degrees(23), CompassPoint::NE);
        assert_eq!(CompassPoint::from_degrees(90), CompassPoint::E);
        assert_eq!(CompassPoint::from_degrees(180), CompassPoint::S);
        assert_eq!(CompassPoint::from_degrees(270), CompassPoint::W);
        assert_eq!(CompassPoint::from_degrees(338), CompassPoint::N);
        assert_eq!(CompassPoint::from_degrees(-90), CompassPoint::W);
    }

    #[test]
    fn test_reading_serde_uses_provider_keys() {
        let reading: PollutantReading =
            serde_json::from_str(r#"{"pm2_5": 35, "co": 0.5}"#).unwrap();
        assert_eq!(reading.get(Pollutant::Pm25), Some(dec("35")));
        assert_eq!(reading.get(Pollutant::Co), Some(dec("0.5")));
        assert_eq!(reading.len(), 2);
    }

    #[test]
    fn test_pollutant_display() {
        assert_eq!(Pollutant::Pm25.to_string(), "PM2.5");
        assert_eq!(Pollutant::Nh3.to_string(), "NH3");
        assert_eq!(Pollutant::Co.unit(), "mg/m³");
    }
}
