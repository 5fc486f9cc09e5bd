//! HTTP handlers for air quality endpoints

use axum::{extract::State, Json};
use shared::{BreakpointTable, HealthBand, HealthBandTable, PollutantReading};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::services::render::AqiAssessment;
use crate::AppState;

/// Compute the composite AQI for a pollutant reading
pub async fn compute_aqi(
    State(state): State<AppState>,
    AppJson(reading): AppJson<PollutantReading>,
) -> AppResult<Json<AqiAssessment>> {
    let assessment = state.render.assess(&reading)?;
    Ok(Json(assessment))
}

/// List the health concern bands
pub async fn list_health_bands() -> Json<Vec<HealthBand>> {
    Json(HealthBandTable::national().bands().to_vec())
}

/// Get the breakpoint table
pub async fn get_breakpoints() -> Json<BreakpointTable> {
    Json(BreakpointTable::national().clone())
}
