//! Pipeline configuration.
//!
//! # Responsibility
//! - Carry deployment-level defaults used when creating and saving deals.
//! - Load and normalize those defaults from JSON.
//!
//! # Invariants
//! - A loaded config always passes `validate`.

use crate::engine::mutator::DEFAULT_UNTITLED_DEAL_NAME;
use crate::logging::{default_log_level, normalize_level};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Currency assigned to newly created deals unless configured otherwise.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Deal pipeline defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Currency code stamped on new deals.
    pub default_currency: String,
    /// Title used when a deal has neither title nor project name.
    pub untitled_deal_name: String,
    /// Core log level (`trace|debug|info|warn|error`).
    pub log_level: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
            untitled_deal_name: DEFAULT_UNTITLED_DEAL_NAME.to_string(),
            log_level: default_log_level().to_string(),
        }
    }
}

impl PipelineConfig {
    /// Parses and normalizes a JSON config document.
    ///
    /// Missing keys fall back to defaults.
    ///
    /// # Errors
    /// - Returns `ConfigError::Parse` for malformed JSON or unknown keys.
    /// - Returns a value error when a present key fails validation.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let parsed: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        parsed.normalized()
    }

    /// Trims values and checks them.
    pub fn normalized(self) -> Result<Self, ConfigError> {
        let config = Self {
            default_currency: self.default_currency.trim().to_string(),
            untitled_deal_name: self.untitled_deal_name.trim().to_string(),
            log_level: self.log_level.trim().to_ascii_lowercase(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks value constraints without normalizing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let currency = self.default_currency.as_str();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::InvalidCurrency(currency.to_string()));
        }
        if self.untitled_deal_name.trim().is_empty() {
            return Err(ConfigError::EmptyUntitledName);
        }
        normalize_level(&self.log_level).map_err(ConfigError::InvalidLogLevel)?;
        Ok(())
    }
}

/// Configuration load errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    InvalidCurrency(String),
    EmptyUntitledName,
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(details) => write!(f, "invalid pipeline config: {details}"),
            Self::InvalidCurrency(value) => {
                write!(f, "default_currency must be a 3-letter uppercase code, got `{value}`")
            }
            Self::EmptyUntitledName => write!(f, "untitled_deal_name must not be empty"),
            Self::InvalidLogLevel(details) => write!(f, "{details}"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{ConfigError, PipelineConfig};

    #[test]
    fn empty_document_yields_defaults() {
        let config = PipelineConfig::from_json_str("{}").expect("defaults");
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.default_currency, "EUR");
        assert_eq!(config.untitled_deal_name, "Untitled Deal");
    }

    #[test]
    fn values_are_trimmed_and_level_lowercased() {
        let config = PipelineConfig::from_json_str(
            r#"{"default_currency":" USD ","untitled_deal_name":" New deal ","log_level":"WARN"}"#,
        )
        .expect("valid config");
        assert_eq!(config.default_currency, "USD");
        assert_eq!(config.untitled_deal_name, "New deal");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn rejects_lowercase_currency() {
        let err = PipelineConfig::from_json_str(r#"{"default_currency":"eur"}"#)
            .expect_err("lowercase currency must fail");
        assert_eq!(err, ConfigError::InvalidCurrency("eur".to_string()));
    }

    #[test]
    fn rejects_unknown_keys_and_levels() {
        let err = PipelineConfig::from_json_str(r#"{"colour":"blue"}"#)
            .expect_err("unknown key must fail");
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = PipelineConfig::from_json_str(r#"{"log_level":"loud"}"#)
            .expect_err("unknown level must fail");
        assert!(err.to_string().contains("unsupported log level"));
    }
}
