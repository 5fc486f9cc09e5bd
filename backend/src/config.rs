//! Configuration management for the Nimble weather chat render service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with NIMBLE_ prefix

use chrono::FixedOffset;
use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Chat rendering configuration
    pub chat: ChatConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    /// Author name of the weather bot
    pub bot_name: String,

    /// Offset from UTC used to decide "today" on cards
    pub utc_offset_seconds: i32,
}

impl ChatConfig {
    /// Fixed offset for the configured timezone
    pub fn timezone(&self) -> Result<FixedOffset, ConfigError> {
        shared::validate_utc_offset(self.utc_offset_seconds)
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        FixedOffset::east_opt(self.utc_offset_seconds)
            .ok_or_else(|| ConfigError::Message("Invalid chat.utc_offset_seconds".to_string()))
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("NIMBLE_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("chat.bot_name", shared::DEFAULT_BOT_NAME)?
            .set_default("chat.utc_offset_seconds", 0)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (NIMBLE_ prefix)
            .add_source(
                Environment::with_prefix("NIMBLE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.chat.timezone()?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            bot_name: shared::DEFAULT_BOT_NAME.to_string(),
            utc_offset_seconds: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_timezone() {
        let chat = ChatConfig {
            utc_offset_seconds: 19800,
            ..Default::default()
        };
        assert_eq!(chat.timezone().unwrap().local_minus_utc(), 19800);

        let invalid = ChatConfig {
            utc_offset_seconds: 90000,
            ..Default::default()
        };
        assert!(invalid.timezone().is_err());
    }
}
