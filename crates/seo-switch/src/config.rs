//! Engine configuration.

use bon::Builder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rotation::RotationOffsets;

/// Errors raised while loading or validating an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("phrase bank '{name}' must contain at least one phrase")]
    EmptyPhraseBank { name: &'static str },

    #[error("max_depth must be at least 1")]
    ZeroMaxDepth,

    #[error("invalid engine config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Currency formatting for `#MinPrice#`.
///
/// Prices are always rendered with exactly two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
#[serde(default)]
pub struct CurrencyFormat {
    #[builder(default = ',')]
    pub decimal_separator: char,
    /// Inserted between groups of three integer digits.
    #[builder(default = '\u{202f}')]
    pub thousands_separator: char,
    #[builder(default = "€".to_string())]
    pub symbol: String,
    /// Render `12,50 €` rather than `€12,50`.
    #[builder(default = true)]
    pub symbol_after: bool,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat::builder().build()
    }
}

/// Tunables of a [`SwitchEngine`](crate::SwitchEngine).
///
/// # Example
///
/// ```
/// use seo_switch::EngineConfig;
///
/// let config = EngineConfig::builder()
///     .max_depth(3)
///     .offer_phrases(vec!["vous propose".to_string()])
///     .build();
/// assert!(config.validate().is_ok());
///
/// let loaded = EngineConfig::from_json_str(r#"{ "max_depth": 2 }"#).unwrap();
/// assert_eq!(loaded.max_depth, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum placeholder nesting, counting the template itself as level 1.
    #[builder(default = 2)]
    pub max_depth: usize,

    /// Phrase bank for `#PrixPasCher#`.
    #[builder(default = default_cheap_price_phrases())]
    pub cheap_price_phrases: Vec<String>,

    /// Phrase bank for `#VousPropose#`.
    #[builder(default = default_offer_phrases())]
    pub offer_phrases: Vec<String>,

    #[builder(default)]
    pub currency: CurrencyFormat,

    #[builder(default)]
    pub offsets: RotationOffsets,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig::builder().build()
    }
}

impl EngineConfig {
    /// Load a config document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroMaxDepth);
        }
        if self.cheap_price_phrases.is_empty() {
            return Err(ConfigError::EmptyPhraseBank {
                name: "cheap_price_phrases",
            });
        }
        if self.offer_phrases.is_empty() {
            return Err(ConfigError::EmptyPhraseBank {
                name: "offer_phrases",
            });
        }
        Ok(())
    }
}

fn default_cheap_price_phrases() -> Vec<String> {
    [
        "pas cher",
        "à prix discount",
        "à petit prix",
        "au meilleur prix",
        "à prix réduit",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_offer_phrases() -> Vec<String> {
    [
        "vous propose",
        "met à votre disposition",
        "vous offre un large choix de",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
        assert_eq!(EngineConfig::default().max_depth, 2);
    }

    #[test]
    fn rejects_empty_bank() {
        let err = EngineConfig::from_json_str(r#"{ "offer_phrases": [] }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EmptyPhraseBank {
                name: "offer_phrases"
            }
        ));
    }

    #[test]
    fn rejects_zero_depth() {
        let config = EngineConfig::builder().max_depth(0).build();
        assert!(matches!(config.validate(), Err(ConfigError::ZeroMaxDepth)));
    }

    #[test]
    fn partial_currency_keeps_other_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "currency": { "symbol": "CHF" } }"#).unwrap();
        assert_eq!(config.currency.symbol, "CHF");
        assert_eq!(config.currency.decimal_separator, ',');
    }
}
