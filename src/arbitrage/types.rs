//! Best-odd and data-quality types shared by the normalizer and calculator.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use smallvec::SmallVec;

/// Highest odd quoted for one outcome across all bookmakers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestOdd {
    /// Bookmaker offering the odd.
    #[serde(rename = "site")]
    pub site_key: String,
    /// Decimal odd.
    #[serde(with = "rust_decimal::serde::float")]
    pub odd: Decimal,
    /// Outcome position within the match.
    pub index: usize,
}

impl BestOdd {
    /// Create a best odd entry.
    pub fn new(site_key: impl Into<String>, odd: Decimal, index: usize) -> Self {
        Self {
            site_key: site_key.into(),
            odd,
            index,
        }
    }
}

/// Per-outcome best odds of one match; `None` where no bookmaker quoted.
///
/// Head-to-head markets have two or three outcomes, so this stays inline.
pub type BestOdds = SmallVec<[Option<BestOdd>; 3]>;

/// Data-quality problem found in a match's odds matrix.
///
/// Non-fatal: the match is still evaluated on its valid outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataWarning {
    /// No bookmaker quoted this outcome.
    MissingOutcome {
        /// Outcome position.
        index: usize,
    },
    /// Best quote for this outcome is zero or negative.
    InvalidOdd {
        /// Outcome position.
        index: usize,
        /// Bookmaker that sent it.
        site_key: String,
        /// The rejected value.
        odd: Decimal,
    },
    /// A bookmaker quoted fewer outcomes than the widest quote.
    RaggedQuotes {
        /// Bookmaker with the short quote.
        site_key: String,
        /// Outcome count of the widest quote.
        expected: usize,
        /// Outcomes this bookmaker quoted.
        actual: usize,
    },
}

impl fmt::Display for DataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataWarning::MissingOutcome { index } => {
                write!(f, "no bookmaker quoted outcome {}", index)
            }
            DataWarning::InvalidOdd {
                index,
                site_key,
                odd,
            } => write!(f, "invalid odd {} from {} on outcome {}", odd, site_key, index),
            DataWarning::RaggedQuotes {
                site_key,
                expected,
                actual,
            } => write!(
                f,
                "{} quoted {} of {} outcomes",
                site_key, actual, expected
            ),
        }
    }
}
