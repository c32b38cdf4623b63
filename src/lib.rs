//! Sports-betting arbitrage finder.
//!
//! Given several bookmakers' head-to-head odds for the same match, takes the
//! best odd per outcome and checks whether their implied probabilities sum
//! to less than 100%. When they do, the total stake can be split so every
//! outcome pays the same amount, guaranteeing profit whatever the result.
//!
//! # Example
//!
//! ```text
//! Bookmaker X: 2.10 | 1.80
//! Bookmaker Y: 1.95 | 2.05
//! ───────────────────────────
//! Best:        2.10 | 2.05   ->  1/2.10 + 1/2.05 = 96.40% < 100% ✅
//! Stake $100:  $49.40 on X, $50.60 on Y  ->  $3.73 profit either way
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`odds`]: Match types, odds API client and demo fixtures
//! - [`arbitrage`]: Best-odd selection, margin and stake calculation
//! - [`report`]: Terminal and JSON output
//! - [`metrics`]: Scan counters and latencies
//! - [`utils`]: Monetary rounding

pub mod arbitrage;
pub mod config;
pub mod error;
pub mod metrics;
pub mod odds;
pub mod report;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
