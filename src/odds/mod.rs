//! Odds acquisition.
//!
//! This module handles:
//! - Match and quote types for head-to-head odds
//! - The Odds API client (live mode)
//! - Local fixture loading (demo mode)

pub mod client;
pub mod fixture;
pub mod types;

use std::path::PathBuf;

pub use client::OddsApiClient;
pub use fixture::load_demo_file;
pub use types::{Match, OddsResponse, Quote, Region};

use crate::error::FeedError;

/// Where matches come from for one run.
#[derive(Debug, Clone)]
pub enum OddsSource {
    /// Live request against the odds API.
    Live {
        /// Configured client.
        client: OddsApiClient,
        /// Sport key filter.
        sport: String,
        /// Bookmaker region filter.
        region: Region,
    },
    /// Local fixture file.
    Demo(PathBuf),
}

impl OddsSource {
    /// Retrieve the full match list. Any failure aborts the run.
    pub async fn fetch(&self) -> Result<Vec<Match>, FeedError> {
        match self {
            OddsSource::Live {
                client,
                sport,
                region,
            } => client.fetch_odds(sport, *region).await,
            OddsSource::Demo(path) => load_demo_file(path).await,
        }
    }

    /// Short description for log lines.
    pub fn describe(&self) -> String {
        match self {
            OddsSource::Live { sport, region, .. } => format!("live ({sport}, {region})"),
            OddsSource::Demo(path) => format!("demo ({})", path.display()),
        }
    }
}
