//! WebAssembly module for the Nimble weather chat
//!
//! Provides client-side rendering for:
//! - Chat message classification and weather cards
//! - Composite AQI and health classification
//! - Temperature conversion

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    if let Err(msg) = shared::BreakpointTable::national().validate() {
        console_warn(&format!("AQI breakpoint table invalid: {}", msg));
    }
    if let Err(msg) = shared::HealthBandTable::national().validate() {
        console_warn(&format!("AQI health bands invalid: {}", msg));
    }
}

fn console_warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

/// Composite AQI from JavaScript; values past `Decimal` range clamp high
fn index_from_f64(index: f64) -> Result<Decimal, String> {
    if !index.is_finite() {
        return Err(format!("AQI must be a finite number, got {}", index));
    }
    if index < 0.0 {
        return Err(format!("AQI cannot be negative ({})", index));
    }
    match Decimal::try_from(index) {
        Ok(value) => Ok(value),
        // classification clamps anything above the table to the top band
        Err(_) if index > 1.0 => Ok(Decimal::MAX),
        Err(e) => Err(format!("AQI {} is not representable: {}", index, e)),
    }
}

fn classify_aqi_label(index: f64) -> Result<String, String> {
    Ok(shared::classify(index_from_f64(index)?).label())
}

fn aqi_color_hex(index: f64) -> Result<String, String> {
    Ok(shared::classify(index_from_f64(index)?).color().to_string())
}

fn kelvin_to_celsius_value(kelvin: f64) -> Result<f64, String> {
    if !kelvin.is_finite() || kelvin < 0.0 {
        return Err(format!("Invalid Kelvin temperature: {}", kelvin));
    }
    let kelvin = Decimal::try_from(kelvin)
        .map_err(|e| format!("Kelvin temperature {} is not representable: {}", kelvin, e))?;
    let celsius = shared::to_fixed(shared::kelvin_to_celsius(kelvin), 2);
    celsius
        .to_f64()
        .ok_or_else(|| format!("Celsius value {} does not fit in f64", celsius))
}

fn render_message_json(message_json: &str, today: &str) -> Result<String, String> {
    let message: shared::Message = serde_json::from_str(message_json)
        .map_err(|e| format!("Invalid message JSON: {}", e))?;
    let today = NaiveDate::parse_from_str(today, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date {:?}: {}", today, e))?;

    let rendered = shared::render_message(&message, &shared::RenderContext::new(today));
    if let MessageContent::Card { card } = &rendered.content {
        if card.is_empty() {
            console_warn("Weather payload of unknown kind rendered as empty card");
        }
    }
    serde_json::to_string(&rendered).map_err(|e| e.to_string())
}

fn compute_aqi_json(reading_json: &str) -> Result<String, String> {
    let reading: PollutantReading = serde_json::from_str(reading_json)
        .map_err(|e| format!("Invalid reading JSON: {}", e))?;
    let result = shared::compute_composite_index(&reading).map_err(|e| e.to_string())?;
    serde_json::to_string(&result).map_err(|e| e.to_string())
}

/// Render a chat message; `today` is the local date as `YYYY-MM-DD`
#[wasm_bindgen]
pub fn render_message(message_json: &str, today: &str) -> Result<String, JsValue> {
    render_message_json(message_json, today).map_err(|e| JsValue::from_str(&e))
}

/// Classify a message body: text, weather, forecast, aqi, unsupported or malformed
#[wasm_bindgen]
pub fn detect_payload_kind(text: &str) -> String {
    shared::detect_kind(text).to_string()
}

/// Composite AQI for a pollutant reading such as `{"pm2_5": 35, "pm10": 50}`
#[wasm_bindgen]
pub fn compute_aqi(reading_json: &str) -> Result<String, JsValue> {
    compute_aqi_json(reading_json).map_err(|e| JsValue::from_str(&e))
}

/// Health concern label for a composite AQI
#[wasm_bindgen]
pub fn classify_aqi(index: f64) -> Result<String, JsValue> {
    classify_aqi_label(index).map_err(|e| JsValue::from_str(&e))
}

/// Badge color for a composite AQI
#[wasm_bindgen]
pub fn aqi_color(index: f64) -> Result<String, JsValue> {
    aqi_color_hex(index).map_err(|e| JsValue::from_str(&e))
}

/// Convert Kelvin to Celsius, rounded to two decimals
#[wasm_bindgen]
pub fn kelvin_to_celsius(kelvin: f64) -> Result<f64, JsValue> {
    kelvin_to_celsius_value(kelvin).map_err(|e| JsValue::from_str(&e))
}
