use thiserror::Error;

/// Shown instead of starting the game when no AI credential is configured.
pub const MISSING_API_KEY_MESSAGE: &str =
    "Gemini API Key is missing.\nPlease configure it to start the application.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Gemini API Key is missing.\nPlease configure it to start the application.")]
    MissingApiKey,

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },
}
