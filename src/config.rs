//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;
use url::Url;

use crate::error::ConfigurationError;
use crate::odds::Region;

/// Application configuration loaded from environment variables.
///
/// CLI flags are applied on top by the binary before [`Config::validate`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Odds API ===
    /// API key for live requests.
    #[serde(default)]
    pub odds_api_key: Option<String>,

    /// Odds API base URL.
    #[serde(default = "default_api_url")]
    pub odds_api_url: String,

    /// Live request timeout in milliseconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_ms: u64,

    // === Scan Parameters ===
    /// Total stake distributed across a match's outcomes.
    #[serde(default = "default_bet")]
    pub bet: Decimal,

    /// Sport key filter ("upcoming" for all sports).
    #[serde(default = "default_sport")]
    pub sport: String,

    /// Bookmaker region filter.
    #[serde(default)]
    pub region: Region,

    // === Operation Modes ===
    /// Read odds from a local fixture instead of the API.
    #[serde(default)]
    pub demo: bool,

    /// Fixture path used in demo mode.
    #[serde(default = "default_demo_file")]
    pub demo_file: PathBuf,
}

fn default_api_url() -> String {
    "https://api.the-odds-api.com".to_string()
}

fn default_http_timeout() -> u64 {
    10_000
}

fn default_bet() -> Decimal {
    Decimal::ONE_HUNDRED
}

fn default_sport() -> String {
    "upcoming".to_string()
}

fn default_demo_file() -> PathBuf {
    PathBuf::from("fixtures/test_data.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            odds_api_key: None,
            odds_api_url: default_api_url(),
            http_timeout_ms: default_http_timeout(),
            bet: default_bet(),
            sport: default_sport(),
            region: Region::default(),
            demo: false,
            demo_file: default_demo_file(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.bet <= Decimal::ZERO {
            return Err(ConfigurationError::NonPositiveStake(self.bet));
        }

        if self.http_timeout_ms == 0 {
            return Err(ConfigurationError::ZeroTimeout);
        }

        if !self.demo {
            if self.api_key().is_none() {
                return Err(ConfigurationError::MissingApiKey);
            }

            Url::parse(&self.odds_api_url).map_err(|e| ConfigurationError::InvalidUrl {
                url: self.odds_api_url.clone(),
                reason: e.to_string(),
            })?;
        }

        Ok(())
    }

    /// API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.odds_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// Valid live-mode config for tests.
    pub(crate) fn test_config() -> Config {
        Config {
            odds_api_key: Some("test-key".to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn default_values_are_sensible() {
        let config = Config::default();
        assert_eq!(config.bet, dec!(100));
        assert_eq!(config.sport, "upcoming");
        assert_eq!(config.region, Region::Eu);
        assert!(!config.demo);
    }

    #[test]
    fn validate_accepts_live_config_with_key() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_positive_stake() {
        let mut config = test_config();
        config.bet = Decimal::ZERO;
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::NonPositiveStake(Decimal::ZERO))
        );

        config.bet = dec!(-10);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_requires_key_only_in_live_mode() {
        let mut config = Config {
            odds_api_key: Some("   ".to_string()),
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigurationError::MissingApiKey));

        config.demo = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_url() {
        let mut config = test_config();
        config.odds_api_url = "::nope".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidUrl { .. })
        ));
    }
}
