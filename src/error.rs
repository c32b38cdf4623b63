//! Unified error types for the arbitrage finder.

use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

/// Unified error type for the arbitrage finder.
#[derive(Error, Debug)]
pub enum AppError {
    /// Environment configuration could not be deserialized.
    #[error("configuration error: {0}")]
    Env(#[from] envy::Error),

    /// Caller-supplied configuration is invalid.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Odds acquisition failed.
    #[error("Failed to collect data: {0}")]
    Feed(#[from] FeedError),

    /// Arbitrage evaluation failed.
    #[error("arbitrage error: {0}")]
    Arbitrage(#[from] ArbitrageError),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid input supplied by the caller (CLI flags or environment).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Total stake must be strictly positive.
    #[error("total stake must be positive, got {0}")]
    NonPositiveStake(Decimal),

    /// Live mode needs an API key.
    #[error("ODDS_API_KEY is required unless running in demo mode")]
    MissingApiKey,

    /// Base URL could not be parsed.
    #[error("invalid odds API url {url}: {reason}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// HTTP timeout must be non-zero.
    #[error("HTTP_TIMEOUT_MS must be greater than zero")]
    ZeroTimeout,
}

/// Odds acquisition errors (live API or demo file).
#[derive(Error, Debug)]
pub enum FeedError {
    /// The demo fixture could not be read or parsed.
    #[error("Could not get demoFile: {path}: {reason}")]
    DemoFile {
        /// Fixture path.
        path: PathBuf,
        /// Underlying failure.
        reason: String,
    },

    /// The odds API returned a non-success HTTP status.
    #[error("odds API returned HTTP {status} for sport {sport}")]
    BadStatus {
        /// HTTP status code.
        status: u16,
        /// Requested sport key.
        sport: String,
    },

    /// The odds API answered with `success: false`.
    #[error("odds API reported failure for sport {sport}")]
    Unsuccessful {
        /// Requested sport key.
        sport: String,
    },

    /// Response body could not be parsed.
    #[error("failed to parse odds data: {0}")]
    ParseError(String),

    /// Request URL could not be built.
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),

    /// HTTP request failed.
    #[error("http request failed: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// Arbitrage evaluation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArbitrageError {
    /// Stake handed to the calculator was not positive.
    #[error(transparent)]
    InvalidStake(#[from] ConfigurationError),

    /// Decimal arithmetic overflowed on absurd odds.
    #[error("decimal overflow while evaluating outcome {index:?}")]
    Overflow {
        /// Outcome being sized, if the overflow happened there.
        index: Option<usize>,
    },

    /// Equal-payout allocation produced diverging per-outcome profits.
    #[error("per-outcome profits diverge: min {min}, max {max}")]
    PayoutMismatch {
        /// Smallest rounded per-outcome profit.
        min: Decimal,
        /// Largest rounded per-outcome profit.
        max: Decimal,
    },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
