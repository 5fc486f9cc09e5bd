//! Health concern classification for composite AQI values

use std::sync::OnceLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// National AQI health concern categories, ascending by severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum HealthConcern {
    Good,
    Satisfactory,
    Moderate,
    Poor,
    VeryPoor,
    Severe,
}

impl HealthConcern {
    /// Display color (hex) used by the AQI badge
    pub fn color(&self) -> &'static str {
        match self {
            HealthConcern::Good => "#00B050",
            HealthConcern::Satisfactory => "#92D050",
            HealthConcern::Moderate => "#FFFF00",
            HealthConcern::Poor => "#FF9900",
            HealthConcern::VeryPoor => "#FF0000",
            HealthConcern::Severe => "#C00000",
        }
    }
}

impl std::fmt::Display for HealthConcern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthConcern::Good => write!(f, "Good"),
            HealthConcern::Satisfactory => write!(f, "Satisfactory"),
            HealthConcern::Moderate => write!(f, "Moderate"),
            HealthConcern::Poor => write!(f, "Poor"),
            HealthConcern::VeryPoor => write!(f, "Very Poor"),
            HealthConcern::Severe => write!(f, "Severe"),
        }
    }
}

/// A health concern band covering `[lower_bound, upper_bound)` on the index
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct HealthBand {
    pub lower_bound: Decimal,
    pub upper_bound: Decimal,
    pub concern: HealthConcern,
}

impl HealthBand {
    pub fn label(&self) -> String {
        self.concern.to_string()
    }

    pub fn color(&self) -> &'static str {
        self.concern.color()
    }

    pub fn contains(&self, index: Decimal) -> bool {
        index >= self.lower_bound && index < self.upper_bound
    }
}

/// Ordered health bands; the last band also absorbs values above its bound
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct HealthBandTable {
    bands: Vec<HealthBand>,
}

impl HealthBandTable {
    pub fn new(bands: Vec<HealthBand>) -> Self {
        Self { bands }
    }

    /// The national table, built once per process
    pub fn national() -> &'static HealthBandTable {
        static TABLE: OnceLock<HealthBandTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            let edges = [0u32, 50, 100, 200, 300, 400, 500];
            let concerns = [
                HealthConcern::Good,
                HealthConcern::Satisfactory,
                HealthConcern::Moderate,
                HealthConcern::Poor,
                HealthConcern::VeryPoor,
                HealthConcern::Severe,
            ];
            let bands = concerns
                .iter()
                .enumerate()
                .map(|(i, concern)| HealthBand {
                    lower_bound: Decimal::from(edges[i]),
                    upper_bound: Decimal::from(edges[i + 1]),
                    concern: *concern,
                })
                .collect();
            HealthBandTable::new(bands)
        })
    }

    pub fn bands(&self) -> &[HealthBand] {
        &self.bands
    }

    /// Band for an index; above the table clamps to the most severe band
    ///
    /// Returns `None` only for an empty table.
    pub fn classify(&self, index: Decimal) -> Option<&HealthBand> {
        let index = index.max(Decimal::ZERO);
        self.bands
            .iter()
            .find(|band| band.contains(index))
            .or_else(|| self.bands.last())
    }
}

/// Classify a composite index against the national bands
pub fn classify(index: Decimal) -> &'static HealthBand {
    let table = HealthBandTable::national();
    // the national table is never empty
    table.classify(index).unwrap_or(&table.bands[0])
}
