use std::env;

use tracing::info;

use crate::error::ConfigError;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_STARTING_MONEY: i64 = 5000;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // Generative AI
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: Option<String>,

    // Encyclopedia
    pub wikipedia_api_url: String,

    // Rules
    pub starting_money: i64,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// `GEMINI_API_KEY` is required; `API_KEY` is accepted as a fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gemini_api_key = non_empty("GEMINI_API_KEY")
            .or_else(|| non_empty("API_KEY"))
            .ok_or(ConfigError::MissingApiKey)?;

        let starting_money = match non_empty("STARTING_MONEY") {
            Some(raw) => parse_money("STARTING_MONEY", &raw)?,
            None => DEFAULT_STARTING_MONEY,
        };

        Ok(Self {
            gemini_api_key,
            gemini_model: non_empty("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: non_empty("GEMINI_BASE_URL"),
            wikipedia_api_url: non_empty("WIKIPEDIA_API_URL")
                .unwrap_or_else(|| DEFAULT_WIKIPEDIA_API_URL.to_string()),
            starting_money,
        })
    }

    /// Log the configuration with the credential masked.
    pub fn log_redacted(&self) {
        info!(
            gemini_api_key = %redact(&self.gemini_api_key),
            gemini_model = %self.gemini_model,
            gemini_base_url = self.gemini_base_url.as_deref().unwrap_or("default"),
            wikipedia_api_url = %self.wikipedia_api_url,
            starting_money = self.starting_money,
            "Configuration loaded"
        );
    }
}

pub fn parse_money(key: &str, raw: &str) -> Result<i64, ConfigError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| ConfigError::Invalid {
            key: key.to_string(),
            value: raw.to_string(),
        })
}

fn redact(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_key_is_reported() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey);
        assert_eq!(err.to_string(), crate::MISSING_API_KEY_MESSAGE);
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey);
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "AIza-123")])).unwrap();
        assert_eq!(config.gemini_api_key, "AIza-123");
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.gemini_base_url, None);
        assert_eq!(config.wikipedia_api_url, DEFAULT_WIKIPEDIA_API_URL);
        assert_eq!(config.starting_money, 5000);
    }

    #[test]
    fn api_key_fallback() {
        let config = Config::from_lookup(lookup(&[("API_KEY", "legacy")])).unwrap();
        assert_eq!(config.gemini_api_key, "legacy");

        let config =
            Config::from_lookup(lookup(&[("API_KEY", "legacy"), ("GEMINI_API_KEY", "new")])).unwrap();
        assert_eq!(config.gemini_api_key, "new");
    }

    #[test]
    fn overrides_apply() {
        let config = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_MODEL", "gemini-2.5-flash"),
            ("GEMINI_BASE_URL", "http://localhost:8080/v1beta"),
            ("WIKIPEDIA_API_URL", "http://localhost:9000/api.php"),
            ("STARTING_MONEY", "12000"),
        ]))
        .unwrap();
        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert_eq!(
            config.gemini_base_url.as_deref(),
            Some("http://localhost:8080/v1beta")
        );
        assert_eq!(config.wikipedia_api_url, "http://localhost:9000/api.php");
        assert_eq!(config.starting_money, 12000);
    }

    #[test]
    fn bad_starting_money_is_invalid() {
        for raw in ["lots", "-5", "0"] {
            let err = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "k"), ("STARTING_MONEY", raw)]))
                .unwrap_err();
            assert_eq!(
                err,
                ConfigError::Invalid {
                    key: "STARTING_MONEY".into(),
                    value: raw.into()
                }
            );
        }
    }

    #[test]
    fn redact_masks_secret() {
        assert_eq!(redact("AIzaSyExampleKey"), "AIza****");
        assert_eq!(redact("short"), "****");
    }
}
