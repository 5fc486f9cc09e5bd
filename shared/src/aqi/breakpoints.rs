//! Pollutant sub-index calculation (Indian National AQI breakpoints)
//!
//! Each pollutant concentration is mapped onto the index scale by linear
//! interpolation inside its breakpoint band. The composite index is the
//! maximum sub-index, as in the CPCB National Air Quality Index.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{WeatherChatError, WeatherChatResult};
use crate::types::{Pollutant, PollutantReading};

/// Index ranges shared by every pollutant, ascending
const INDEX_BANDS: [(u32, u32); 6] = [
    (0, 50),
    (50, 100),
    (100, 200),
    (200, 300),
    (300, 400),
    (400, 500),
];

/// Concentration band edges per pollutant (µg/m³, CO in mg/m³)
const CONCENTRATION_EDGES: [(Pollutant, [u32; 7]); 7] = [
    (Pollutant::Pm25, [0, 30, 60, 90, 120, 250, 500]),
    (Pollutant::Pm10, [0, 50, 100, 250, 350, 430, 600]),
    (Pollutant::No2, [0, 40, 80, 180, 280, 400, 800]),
    (Pollutant::So2, [0, 40, 80, 380, 800, 1600, 2100]),
    (Pollutant::Co, [0, 1, 2, 10, 17, 34, 50]),
    (Pollutant::O3, [0, 50, 100, 168, 208, 748, 1000]),
    (Pollutant::Nh3, [0, 200, 400, 800, 1200, 1800, 2400]),
];

/// One breakpoint band: `[concentration_low, concentration_high]` maps onto
/// `[index_low, index_high]`
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Breakpoint {
    pub concentration_low: Decimal,
    pub concentration_high: Decimal,
    pub index_low: Decimal,
    pub index_high: Decimal,
}

impl Breakpoint {
    pub fn contains(&self, concentration: Decimal) -> bool {
        concentration >= self.concentration_low && concentration <= self.concentration_high
    }

    /// Linear interpolation inside the band
    pub fn interpolate(&self, concentration: Decimal) -> Decimal {
        let span = self.concentration_high - self.concentration_low;
        let rise = (concentration - self.concentration_low) * (self.index_high - self.index_low);
        self.index_low + rise.checked_div(span).unwrap_or(Decimal::ZERO)
    }
}

/// Sub-index of a single pollutant
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct SubIndex {
    pub pollutant: Pollutant,
    pub concentration: Decimal,
    pub index: Decimal,
}

/// Composite air quality index for a reading
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AqiResult {
    pub composite_index: Decimal,
    pub dominant_pollutant: Option<Pollutant>,
    pub sub_indices: Vec<SubIndex>,
}

/// Breakpoint bands for every indexed pollutant
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct BreakpointTable {
    bands: BTreeMap<Pollutant, Vec<Breakpoint>>,
}

impl BreakpointTable {
    /// Build a table from explicit bands
    pub fn new(bands: BTreeMap<Pollutant, Vec<Breakpoint>>) -> Self {
        Self { bands }
    }

    /// The national table, built once per process
    pub fn national() -> &'static BreakpointTable {
        static TABLE: OnceLock<BreakpointTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            let bands = CONCENTRATION_EDGES
                .iter()
                .map(|(pollutant, edges)| {
                    let breakpoints = INDEX_BANDS
                        .iter()
                        .enumerate()
                        .map(|(i, (index_low, index_high))| Breakpoint {
                            concentration_low: Decimal::from(edges[i]),
                            concentration_high: Decimal::from(edges[i + 1]),
                            index_low: Decimal::from(*index_low),
                            index_high: Decimal::from(*index_high),
                        })
                        .collect();
                    (*pollutant, breakpoints)
                })
                .collect();
            BreakpointTable::new(bands)
        })
    }

    pub fn bands(&self, pollutant: Pollutant) -> Option<&[Breakpoint]> {
        self.bands.get(&pollutant).map(Vec::as_slice)
    }

    pub fn pollutants(&self) -> impl Iterator<Item = Pollutant> + '_ {
        self.bands.keys().copied()
    }

    /// Sub-index for one pollutant concentration
    ///
    /// Values outside the table clamp to the lowest or highest band.
    pub fn sub_index(
        &self,
        pollutant: Pollutant,
        concentration: Decimal,
    ) -> WeatherChatResult<Decimal> {
        if concentration < Decimal::ZERO {
            return Err(WeatherChatError::InvalidReading(format!(
                "{} concentration cannot be negative ({})",
                pollutant, concentration
            )));
        }

        let bands = self
            .bands(pollutant)
            .filter(|bands| !bands.is_empty())
            .ok_or_else(|| {
                WeatherChatError::InvalidReading(format!("No breakpoints for {}", pollutant))
            })?;

        let (first, last) = (bands[0], bands[bands.len() - 1]);
        if concentration <= first.concentration_low {
            return Ok(first.index_low);
        }
        if concentration >= last.concentration_high {
            return Ok(last.index_high);
        }

        let band = bands
            .iter()
            .find(|band| band.contains(concentration))
            .unwrap_or(&last);
        Ok(band.interpolate(concentration))
    }

    /// Composite index for a reading: the maximum sub-index
    pub fn composite_index(&self, reading: &PollutantReading) -> WeatherChatResult<AqiResult> {
        if reading.is_empty() {
            return Err(WeatherChatError::InvalidReading(
                "Reading has no pollutant concentrations".to_string(),
            ));
        }

        let mut sub_indices = Vec::with_capacity(reading.len());
        for (pollutant, concentration) in reading.iter() {
            let index = self.sub_index(pollutant, concentration)?;
            sub_indices.push(SubIndex {
                pollutant,
                concentration,
                index,
            });
        }

        // ties keep the earlier pollutant
        let dominant = sub_indices.iter().fold(None::<&SubIndex>, |best, candidate| match best {
            Some(current) if current.index >= candidate.index => Some(current),
            _ => Some(candidate),
        });

        Ok(AqiResult {
            composite_index: dominant.map(|s| s.index).unwrap_or(Decimal::ZERO),
            dominant_pollutant: dominant.map(|s| s.pollutant),
            sub_indices,
        })
    }
}

/// Composite index of a reading against the national table
pub fn compute_composite_index(reading: &PollutantReading) -> WeatherChatResult<AqiResult> {
    BreakpointTable::national().composite_index(reading)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::to_fixed;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_sub_index_interpolates() {
        let table = BreakpointTable::national();
        assert_eq!(table.sub_index(Pollutant::Pm10, dec("50")).unwrap(), dec("50"));
        assert_eq!(table.sub_index(Pollutant::No2, dec("20")).unwrap(), dec("25"));
        assert_eq!(table.sub_index(Pollutant::Co, dec("0.5")).unwrap(), dec("25"));
        assert_eq!(table.sub_index(Pollutant::Pm10, dec("175")).unwrap(), dec("150"));
        assert_eq!(
            to_fixed(table.sub_index(Pollutant::Pm25, dec("35")).unwrap(), 2),
            dec("58.33")
        );
    }

    #[test]
    fn test_sub_index_clamps_above_table() {
        let table = BreakpointTable::national();
        assert_eq!(table.sub_index(Pollutant::Pm25, dec("9000")).unwrap(), dec("500"));
        assert_eq!(table.sub_index(Pollutant::Co, dec("50")).unwrap(), dec("500"));
    }

    #[test]
    fn test_sub_index_zero() {
        let table = BreakpointTable::national();
        for pollutant in Pollutant::ALL {
            assert_eq!(table.sub_index(pollutant, Decimal::ZERO).unwrap(), Decimal::ZERO);
        }
    }

    #[test]
    fn test_negative_concentration_is_invalid() {
        let err = BreakpointTable::national()
            .sub_index(Pollutant::So2, dec("-1"))
            .unwrap_err();
        assert!(matches!(err, WeatherChatError::InvalidReading(_)));
    }

    #[test]
    fn test_composite_is_maximum_sub_index() {
        let reading = PollutantReading::new()
            .with(Pollutant::Pm25, dec("35"))
            .with(Pollutant::Pm10, dec("50"))
            .with(Pollutant::No2, dec("20"))
            .with(Pollutant::So2, dec("5"))
            .with(Pollutant::Co, dec("0.5"))
            .with(Pollutant::O3, dec("30"))
            .with(Pollutant::Nh3, dec("2"));

        let result = compute_composite_index(&reading).unwrap();
        assert_eq!(to_fixed(result.composite_index, 2), dec("58.33"));
        assert_eq!(result.dominant_pollutant, Some(Pollutant::Pm25));
        assert_eq!(result.sub_indices.len(), 7);
    }

    #[test]
    fn test_dominant_tie_keeps_declaration_order() {
        // both at index 50
        let reading = PollutantReading::new()
            .with(Pollutant::Pm10, dec("50"))
            .with(Pollutant::O3, dec("50"));
        let result = compute_composite_index(&reading).unwrap();
        assert_eq!(result.dominant_pollutant, Some(Pollutant::Pm10));
    }

    #[test]
    fn test_empty_reading_is_invalid() {
        assert!(matches!(
            compute_composite_index(&PollutantReading::new()),
            Err(WeatherChatError::InvalidReading(_))
        ));
    }

    #[test]
    fn test_national_table_covers_all_pollutants() {
        let table = BreakpointTable::national();
        assert_eq!(table.pollutants().count(), Pollutant::ALL.len());
        for pollutant in Pollutant::ALL {
            assert_eq!(table.bands(pollutant).map(<[Breakpoint]>::len), Some(6));
        }
    }
}
