//! Validation utilities for readings and reference tables

use rust_decimal::Decimal;

use crate::aqi::{BreakpointTable, HealthBandTable};
use crate::types::PollutantReading;

// ============================================================================
// Reading Validations
// ============================================================================

/// Validate that every concentration in a reading is non-negative
pub fn validate_reading(reading: &PollutantReading) -> Result<(), &'static str> {
    if reading.is_empty() {
        return Err("Reading must contain at least one pollutant");
    }
    if reading.iter().any(|(_, c)| c < Decimal::ZERO) {
        return Err("Pollutant concentrations cannot be negative");
    }
    Ok(())
}

/// Validate a UTC offset in seconds (±18 hours)
pub fn validate_utc_offset(offset_seconds: i32) -> Result<(), &'static str> {
    if offset_seconds.abs() >= 18 * 3600 {
        return Err("UTC offset must be within ±18 hours");
    }
    Ok(())
}

// ============================================================================
// Reference Table Validations
// ============================================================================

/// Validate that each pollutant's bands start at zero, are contiguous and ascending
pub fn validate_breakpoint_table(table: &BreakpointTable) -> Result<(), &'static str> {
    for pollutant in table.pollutants() {
        let bands = table.bands(pollutant).unwrap_or_default();
        let first = bands.first().ok_or("Every pollutant needs at least one band")?;

        if first.concentration_low != Decimal::ZERO || first.index_low != Decimal::ZERO {
            return Err("Breakpoints must start at zero");
        }
        for band in bands {
            if band.concentration_high <= band.concentration_low
                || band.index_high <= band.index_low
            {
                return Err("Breakpoint bands must be ascending");
            }
        }
        for pair in bands.windows(2) {
            if pair[0].concentration_high != pair[1].concentration_low
                || pair[0].index_high != pair[1].index_low
            {
                return Err("Breakpoint bands must be contiguous");
            }
        }
    }
    Ok(())
}

/// Validate that health bands partition the index from zero without gaps
pub fn validate_health_bands(table: &HealthBandTable) -> Result<(), &'static str> {
    let bands = table.bands();
    let first = bands.first().ok_or("Health band table cannot be empty")?;

    if first.lower_bound != Decimal::ZERO {
        return Err("Health bands must start at zero");
    }
    for band in bands {
        if band.upper_bound <= band.lower_bound {
            return Err("Health bands must be ascending");
        }
    }
    for pair in bands.windows(2) {
        if pair[0].upper_bound != pair[1].lower_bound {
            return Err("Health bands must not have gaps or overlaps");
        }
        if pair[0].concern >= pair[1].concern {
            return Err("Health bands must be ordered by severity");
        }
    }
    Ok(())
}

impl BreakpointTable {
    /// Check the contiguity invariant of every pollutant's bands
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_breakpoint_table(self)
    }
}

impl HealthBandTable {
    /// Check that the bands partition the index ascending by severity
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_health_bands(self)
    }
}
