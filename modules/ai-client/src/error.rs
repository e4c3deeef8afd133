use thiserror::Error;

pub type Result<T> = std::result::Result<T, AiError>;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("AI returned an invalid response format: {0}")]
    InvalidResponse(#[from] JsonExtractError),
}

/// Why a model response could not be turned into the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonExtractError {
    #[error("received empty response from AI")]
    Empty,

    #[error("response is not valid JSON: {0}")]
    Malformed(String),

    #[error("response does not match the expected shape: {0}")]
    SchemaMismatch(String),
}

impl From<reqwest::Error> for AiError {
    fn from(e: reqwest::Error) -> Self {
        AiError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for AiError {
    fn from(e: serde_json::Error) -> Self {
        AiError::Parse(e.to_string())
    }
}
