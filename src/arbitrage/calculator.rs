//! Arbitrage margin and equal-payout stake calculations.
//!
//! The margin is the bookmakers' combined implied probability:
//!
//! ```text
//! Outcome 0: best 2.10 (X)  ->  1/2.10 = 0.4762
//! Outcome 1: best 2.05 (Y)  ->  1/2.05 = 0.4878
//! ─────────────────────────────────────────────
//! Margin:                       96.40% < 100% ✅
//! ```
//!
//! Below 100% the stake can be split so every outcome pays the same amount,
//! which exceeds the stake.

use rust_decimal::Decimal;
use serde::Serialize;
use smallvec::SmallVec;

use super::types::{BestOdd, DataWarning};
use crate::error::{ArbitrageError, ConfigurationError};
use crate::utils::{round_money, serialize_money};

/// Margin (in percent) at and above which no arbitrage exists.
pub const BREAK_EVEN_MARGIN: Decimal = Decimal::ONE_HUNDRED;

/// Precision the margin is compared at. Inverses like `1/3` are truncated at
/// 28 digits, so an exact 100% book can otherwise sum to just under 100.
pub const MARGIN_CMP_DP: u32 = 20;

/// Largest allowed spread between rounded per-outcome profits.
pub const PAYOUT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Stake to place on one outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wager {
    /// Bookmaker to place the bet with.
    #[serde(rename = "site")]
    pub site_key: String,
    /// Outcome position within the match.
    pub index: usize,
    /// Decimal odd taken.
    #[serde(with = "rust_decimal::serde::float")]
    pub odd: Decimal,
    /// Stake, rounded to cents.
    #[serde(rename = "wager", serialize_with = "serialize_money")]
    pub amount: Decimal,
    /// Net profit if this outcome wins, rounded to cents.
    #[serde(serialize_with = "serialize_money")]
    pub profit: Decimal,
}

/// Min/max of the rounded per-outcome profits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfitRange {
    /// Smallest per-outcome profit.
    #[serde(serialize_with = "serialize_money")]
    pub min: Decimal,
    /// Largest per-outcome profit.
    #[serde(serialize_with = "serialize_money")]
    pub max: Decimal,
}

/// Evaluation of one match's best-odds matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArbitrageResult {
    /// Outcomes in the matrix, valid or not.
    pub outcome_count: usize,
    /// `100 × Σ 1/odd` over valid outcomes.
    #[serde(with = "rust_decimal::serde::float")]
    pub margin: Decimal,
    /// Whether a guaranteed profit exists (`margin < 100` with at least one valid outcome).
    pub is_profitable: bool,
    /// One wager per valid outcome; empty when not profitable.
    pub wagers: Vec<Wager>,
    /// Profit of the first wager; zero when not profitable.
    #[serde(serialize_with = "serialize_money")]
    pub profit: Decimal,
    /// Spread of per-outcome profits across the wagers.
    pub profit_range: Option<ProfitRange>,
    /// Sum of the rounded wagers.
    #[serde(serialize_with = "serialize_money")]
    pub total_staked: Decimal,
    /// Set when some outcome was missing or invalid.
    pub partial: bool,
    /// Outcomes excluded from evaluation, and why.
    pub warnings: Vec<DataWarning>,
}

impl ArbitrageResult {
    /// Guaranteed edge in percent (`100 - margin`), zero when not profitable.
    pub fn edge_pct(&self) -> Decimal {
        if self.is_profitable {
            BREAK_EVEN_MARGIN - self.margin
        } else {
            Decimal::ZERO
        }
    }

    /// Return on the staked amount in percent.
    pub fn roi(&self) -> Decimal {
        if self.total_staked.is_zero() {
            Decimal::ZERO
        } else {
            (self.profit / self.total_staked) * Decimal::ONE_HUNDRED
        }
    }

    /// Wagers laid out by outcome index, `None` where an outcome was dropped.
    ///
    /// Empty when the match is not profitable.
    pub fn wagers_by_outcome(&self) -> Vec<Option<Wager>> {
        if self.wagers.is_empty() {
            return Vec::new();
        }
        let mut slots = vec![None; self.outcome_count];
        for wager in &self.wagers {
            if let Some(slot) = slots.get_mut(wager.index) {
                *slot = Some(wager.clone());
            }
        }
        slots
    }
}

/// Outcome that passed validation, with its precomputed inverse.
struct ValidOdd<'a> {
    best: &'a BestOdd,
    inverse: Decimal,
}

/// Split best odds into valid outcomes and warnings for the rest.
fn partition(best_odds: &[Option<BestOdd>]) -> (SmallVec<[ValidOdd<'_>; 3]>, Vec<DataWarning>) {
    let mut valid = SmallVec::new();
    let mut warnings = Vec::new();

    for (index, slot) in best_odds.iter().enumerate() {
        match slot {
            None => warnings.push(DataWarning::MissingOutcome { index }),
            Some(best) => match positive_inverse(best.odd) {
                Some(inverse) => valid.push(ValidOdd { best, inverse }),
                None => warnings.push(DataWarning::InvalidOdd {
                    index,
                    site_key: best.site_key.clone(),
                    odd: best.odd,
                }),
            },
        }
    }

    (valid, warnings)
}

/// `1 / odd` for strictly positive odds.
fn positive_inverse(odd: Decimal) -> Option<Decimal> {
    if odd <= Decimal::ZERO {
        return None;
    }
    Decimal::ONE.checked_div(odd)
}

/// Sum of inverses as a percentage.
fn margin_of(valid: &[ValidOdd<'_>]) -> Result<Decimal, ArbitrageError> {
    valid
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v.inverse))
        .and_then(|sum| sum.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(ArbitrageError::Overflow { index: None })
}

/// Margin in percent over the valid outcomes of a best-odds matrix.
///
/// Missing and non-positive odds are left out of the sum.
pub fn margin_percent(best_odds: &[Option<BestOdd>]) -> Result<Decimal, ArbitrageError> {
    let (valid, _) = partition(best_odds);
    margin_of(&valid)
}

/// Bet factor `1 + Σ_{k≠i} odd_i / odd_k` for one outcome.
fn bet_factor(target: &BestOdd, valid: &[ValidOdd<'_>]) -> Option<Decimal> {
    valid
        .iter()
        .filter(|other| other.best.index != target.index)
        .try_fold(Decimal::ONE, |acc, other| {
            acc.checked_add(target.odd.checked_div(other.best.odd)?)
        })
}

/// Equal-payout stake and net profit for one outcome, unrounded.
fn stake_for(
    target: &BestOdd,
    valid: &[ValidOdd<'_>],
    total_stake: Decimal,
) -> Option<(Decimal, Decimal)> {
    let stake = total_stake.checked_div(bet_factor(target, valid)?)?;
    let profit = stake.checked_mul(target.odd)?.checked_sub(total_stake)?;
    Some((stake, profit))
}

/// Evaluate a best-odds matrix for arbitrage and size the wagers.
///
/// Outcomes without a usable odd are excluded and reported in `warnings`;
/// the result is then `partial` and its wagers cover only the valid subset.
pub fn evaluate(
    best_odds: &[Option<BestOdd>],
    total_stake: Decimal,
) -> Result<ArbitrageResult, ArbitrageError> {
    if total_stake <= Decimal::ZERO {
        return Err(ConfigurationError::NonPositiveStake(total_stake).into());
    }

    let (valid, warnings) = partition(best_odds);
    let margin = margin_of(&valid)?;
    let partial = !warnings.is_empty();

    let mut result = ArbitrageResult {
        outcome_count: best_odds.len(),
        margin,
        is_profitable: false,
        wagers: Vec::new(),
        profit: Decimal::ZERO,
        profit_range: None,
        total_staked: Decimal::ZERO,
        partial,
        warnings,
    };

    if valid.is_empty() || margin.round_dp(MARGIN_CMP_DP) >= BREAK_EVEN_MARGIN {
        return Ok(result);
    }

    let mut wagers = Vec::with_capacity(valid.len());
    for v in &valid {
        let (stake, profit) = stake_for(v.best, &valid, total_stake).ok_or(
            ArbitrageError::Overflow {
                index: Some(v.best.index),
            },
        )?;

        wagers.push(Wager {
            site_key: v.best.site_key.clone(),
            index: v.best.index,
            odd: v.best.odd,
            amount: round_money(stake),
            profit: round_money(profit),
        });
    }

    let range = profit_range(&wagers);
    if let Some(range) = range {
        if range.max - range.min > PAYOUT_TOLERANCE {
            return Err(ArbitrageError::PayoutMismatch {
                min: range.min,
                max: range.max,
            });
        }
    }

    result.is_profitable = true;
    result.profit = wagers.first().map(|w| w.profit).unwrap_or_default();
    result.profit_range = range;
    result.total_staked = wagers.iter().map(|w| w.amount).sum();
    result.wagers = wagers;

    Ok(result)
}

fn profit_range(wagers: &[Wager]) -> Option<ProfitRange> {
    let min = wagers.iter().map(|w| w.profit).min()?;
    let max = wagers.iter().map(|w| w.profit).max()?;
    Some(ProfitRange { min, max })
}
