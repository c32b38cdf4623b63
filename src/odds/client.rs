//! The Odds API v3 client.

use std::time::{Duration, Instant};

use tracing::{debug, instrument, warn};
use url::Url;

use super::types::{Match, OddsResponse, Region};
use crate::config::Config;
use crate::error::FeedError;
use crate::metrics;

/// Head-to-head (moneyline) market key.
const MARKET_H2H: &str = "h2h";

/// HTTP client for The Odds API.
#[derive(Debug, Clone)]
pub struct OddsApiClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// API base URL (scheme + host).
    base_url: Url,
    /// API key, sent as a query parameter.
    api_key: String,
}

impl OddsApiClient {
    /// Create a client from config.
    pub fn new(config: &Config, api_key: impl Into<String>) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.http_timeout_ms))
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            http,
            base_url: Url::parse(&config.odds_api_url)?,
            api_key: api_key.into(),
        })
    }

    /// Build the odds request URL for a sport and region.
    pub fn odds_url(&self, sport: &str, region: Region) -> Result<Url, FeedError> {
        let mut url = self.base_url.join("/v3/odds/")?;
        url.query_pairs_mut()
            .append_pair("apiKey", &self.api_key)
            .append_pair("sport", sport)
            .append_pair("region", &region.to_string())
            .append_pair("mkt", MARKET_H2H);
        Ok(url)
    }

    /// Fetch head-to-head odds for every upcoming match of a sport.
    #[instrument(skip(self))]
    pub async fn fetch_odds(&self, sport: &str, region: Region) -> Result<Vec<Match>, FeedError> {
        let url = self.odds_url(sport, region)?;
        let start = Instant::now();

        let response = self.http.get(url).send().await?;
        metrics::record_odds_fetch_latency(start);

        if !response.status().is_success() {
            warn!(status = %response.status(), "Odds API request failed");
            return Err(FeedError::BadStatus {
                status: response.status().as_u16(),
                sport: sport.to_string(),
            });
        }

        let body: OddsResponse = response
            .json()
            .await
            .map_err(|e| FeedError::ParseError(format!("Failed to parse odds response: {}", e)))?;

        if body.success == Some(false) {
            return Err(FeedError::Unsuccessful {
                sport: sport.to_string(),
            });
        }

        debug!(matches = body.data.len(), "Fetched odds");
        Ok(body.data)
    }
}
