//! Arbitrage module for detecting opportunities and sizing wagers.
//!
//! This module handles:
//! - Best-odd selection across bookmakers
//! - Margin and equal-payout stake calculations
//! - Per-match detection over a match list

pub mod calculator;
pub mod detector;
pub mod normalizer;
pub mod types;

pub use calculator::{evaluate, margin_percent, ArbitrageResult, ProfitRange, Wager};
pub use detector::{scan_match, scan_matches, MatchReport, ScanSummary};
pub use normalizer::{normalize, quote_shape_warnings};
pub use types::{BestOdd, BestOdds, DataWarning};
