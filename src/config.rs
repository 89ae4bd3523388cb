//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application name for identification.
    pub name: String,
    /// Where the credential settings file lives.
    pub credential_path: PathBuf,
    /// Artificial "thinking" delay applied to assistant replies and
    /// simulated API calls.
    pub response_delay: Duration,
    /// Whether step instructions are read aloud when a synthesizer is
    /// available.
    pub speak_instructions: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "reframe".to_string(),
            credential_path: PathBuf::from("./data/settings.json"),
            response_delay: Duration::from_millis(1000),
            speak_instructions: false,
        }
    }
}

impl AppConfig {
    /// Build a config from environment variables, falling back to defaults.
    ///
    /// Recognized variables: `REFRAME_CREDENTIAL_PATH`, `REFRAME_DELAY_MS`,
    /// `REFRAME_SPEECH`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("REFRAME_CREDENTIAL_PATH") {
            config.credential_path = PathBuf::from(path);
        }

        if let Ok(ms) = std::env::var("REFRAME_DELAY_MS") {
            let ms: u64 = ms.parse().map_err(|_| ConfigError::InvalidValue {
                key: "REFRAME_DELAY_MS".to_string(),
                message: format!("expected a number of milliseconds, got {ms:?}"),
            })?;
            config.response_delay = Duration::from_millis(ms);
        }

        if let Ok(speech) = std::env::var("REFRAME_SPEECH") {
            config.speak_instructions = matches!(speech.as_str(), "1" | "true" | "on");
        }

        Ok(config)
    }
}
