//! Error types for message classification and air-quality computation

use thiserror::Error;

/// Errors raised by the rendering core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeatherChatError {
    /// Body carries the weather payload marker but could not be parsed
    #[error("Malformed weather payload: {0}")]
    MalformedPayload(String),

    /// Pollutant reading is unusable (negative concentration or missing data)
    #[error("Invalid pollutant reading: {0}")]
    InvalidReading(String),
}

impl WeatherChatError {
    /// Stable machine-readable code for the error
    pub fn code(&self) -> &'static str {
        match self {
            WeatherChatError::MalformedPayload(_) => "MALFORMED_PAYLOAD",
            WeatherChatError::InvalidReading(_) => "INVALID_READING",
        }
    }
}

impl From<serde_json::Error> for WeatherChatError {
    fn from(err: serde_json::Error) -> Self {
        WeatherChatError::MalformedPayload(err.to_string())
    }
}

/// Result type alias for the rendering core
pub type WeatherChatResult<T> = Result<T, WeatherChatError>;
