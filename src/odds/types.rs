//! Match and bookmaker quote types, as returned by The Odds API v3.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};
use time::macros::format_description;
use time::OffsetDateTime;

/// Bookmaker region filter understood by the odds API.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Region {
    /// United Kingdom bookmakers.
    Uk,
    /// United States bookmakers.
    Us,
    /// European bookmakers.
    #[default]
    Eu,
    /// Australian bookmakers.
    Au,
}

/// One sporting event with every bookmaker quote collected for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Event identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Sport or league key (e.g. "soccer_epl").
    pub sport_key: String,
    /// Human-readable sport name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport_nice: Option<String>,
    /// Participants, in the order the outcomes refer to them.
    #[serde(default)]
    pub teams: Vec<String>,
    /// Kickoff as unix timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commence_time: Option<i64>,
    /// Home side, when the sport has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_team: Option<String>,
    /// Bookmaker quotes, in feed order.
    #[serde(default)]
    pub sites: Vec<Quote>,
}

impl Match {
    /// Comma-joined team names, used in log and report lines.
    pub fn teams_label(&self) -> String {
        self.teams.join(",")
    }

    /// Kickoff time, if the feed provided a valid one.
    pub fn kickoff(&self) -> Option<OffsetDateTime> {
        self.commence_time
            .and_then(|ts| OffsetDateTime::from_unix_timestamp(ts).ok())
    }

    /// Format kickoff as "YYYY-MM-DD HH:MM UTC".
    pub fn kickoff_str(&self) -> Option<String> {
        let format = format_description!("[year]-[month]-[day] [hour]:[minute] UTC");
        self.kickoff().and_then(|t| t.format(&format).ok())
    }

    /// Widest odds sequence across quotes (the match's outcome count).
    pub fn outcome_count(&self) -> usize {
        self.sites.iter().map(|q| q.odds.len()).max().unwrap_or(0)
    }
}

/// One bookmaker's head-to-head prices for a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Bookmaker key (e.g. "unibet").
    pub site_key: String,
    /// Bookmaker display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_nice: Option<String>,
    /// Last price update as unix timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<i64>,
    /// Decimal odds per outcome; `None` where the feed sent a non-number.
    #[serde(with = "h2h")]
    pub odds: Vec<Option<Decimal>>,
}

impl Quote {
    /// Build a quote from plain decimal odds.
    pub fn new(site_key: impl Into<String>, odds: impl IntoIterator<Item = Decimal>) -> Self {
        Self {
            site_key: site_key.into(),
            site_nice: None,
            last_update: None,
            odds: odds.into_iter().map(Some).collect(),
        }
    }
}

/// Top-level odds API response (`{ "success": .., "data": [..] }`).
#[derive(Debug, Clone, Deserialize)]
pub struct OddsResponse {
    /// Whether the API considered the request successful.
    #[serde(default)]
    pub success: Option<bool>,
    /// Matches with their quotes.
    #[serde(default)]
    pub data: Vec<Match>,
}

/// Parse one wire odd.
///
/// Numbers and numeric strings (`"3.5"`) are accepted; anything else,
/// including `null` and text like `"N/A"`, becomes `None`.
pub fn parse_odd(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// (De)serializes `odds` through the API's `{ "h2h": [...] }` market wrapper.
mod h2h {
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    use super::parse_odd;

    #[derive(Deserialize)]
    struct WireMarkets {
        #[serde(default)]
        h2h: Vec<Value>,
    }

    #[derive(Serialize)]
    struct WireMarketsOut {
        h2h: Vec<Option<f64>>,
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Option<Decimal>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let markets = WireMarkets::deserialize(deserializer)?;
        Ok(markets.h2h.iter().map(parse_odd).collect())
    }

    pub fn serialize<S>(odds: &[Option<Decimal>], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        WireMarketsOut {
            h2h: odds.iter().map(|o| o.and_then(|d| d.to_f64())).collect(),
        }
        .serialize(serializer)
    }
}
