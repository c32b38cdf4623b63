//! Per-match arbitrage detection over a match list.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::calculator::{evaluate, ArbitrageResult, Wager};
use super::normalizer::{normalize, quote_shape_warnings};
use super::types::{BestOdd, DataWarning};
use crate::error::{ArbitrageError, ConfigurationError};
use crate::metrics;
use crate::odds::Match;

/// Everything known about one match after evaluation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    /// The input match.
    #[serde(rename = "match")]
    pub event: Match,
    /// Best odd per outcome; `null` where nobody quoted.
    pub highest_odds: Vec<Option<BestOdd>>,
    /// Margin in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub arbitrage: Decimal,
    /// Wager per outcome index when profitable; `null` for dropped outcomes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub wagers: Vec<Option<Wager>>,
    /// Set when some outcome was missing or invalid.
    pub partial: bool,
    /// Quote-shape problems that did not remove an outcome.
    pub quote_warnings: Vec<DataWarning>,
    /// Full evaluation.
    #[serde(skip)]
    pub evaluation: ArbitrageResult,
}

impl MatchReport {
    /// Whether this match offers an arbitrage.
    pub fn is_profitable(&self) -> bool {
        self.evaluation.is_profitable
    }
}

/// Outcome of scanning a whole match list.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    /// One report per match, in input order.
    pub reports: Vec<MatchReport>,
    /// Matches with an arbitrage.
    pub profitable_matches: usize,
    /// Matches with a missing or invalid outcome.
    pub incomplete_matches: usize,
    /// Sum of the reported profit of every profitable match.
    #[serde(serialize_with = "crate::utils::serialize_money")]
    pub total_profit: Decimal,
}

/// Normalize and evaluate one match.
#[instrument(skip(event), fields(sport = %event.sport_key, teams = %event.teams_label()))]
pub fn scan_match(event: &Match, total_stake: Decimal) -> Result<MatchReport, ArbitrageError> {
    let _timer = metrics::timer_match_evaluation();

    let best_odds = normalize(event);
    let quote_warnings = quote_shape_warnings(event);
    for warning in &quote_warnings {
        debug!(%warning, "Ragged quote");
    }

    let evaluation = evaluate(&best_odds, total_stake)?;
    metrics::inc_matches_evaluated();

    if evaluation.partial {
        metrics::inc_incomplete_matches();
        warn!(
            warnings = evaluation.warnings.len(),
            outcomes = evaluation.outcome_count,
            "Incomplete odds matrix, evaluating valid outcomes only"
        );
    }

    if evaluation.is_profitable {
        metrics::inc_opportunities_detected();
        info!(
            margin = %evaluation.margin.round_dp(2),
            profit = %evaluation.profit,
            partial = evaluation.partial,
            "Arbitrage opportunity detected"
        );
    } else {
        debug!(margin = %evaluation.margin.round_dp(2), "No arbitrage opportunity");
    }

    Ok(MatchReport {
        event: event.clone(),
        highest_odds: best_odds.into_vec(),
        arbitrage: evaluation.margin,
        wagers: evaluation.wagers_by_outcome(),
        partial: evaluation.partial,
        quote_warnings,
        evaluation,
    })
}

/// Scan every match and total up the opportunities.
///
/// A non-positive stake fails before any match is evaluated.
#[instrument(skip(matches), fields(count = matches.len()))]
pub fn scan_matches(
    matches: &[Match],
    total_stake: Decimal,
) -> Result<ScanSummary, ArbitrageError> {
    if total_stake <= Decimal::ZERO {
        return Err(ConfigurationError::NonPositiveStake(total_stake).into());
    }

    let mut summary = ScanSummary::default();

    for event in matches {
        let report = scan_match(event, total_stake)?;

        if report.evaluation.partial {
            summary.incomplete_matches += 1;
        }
        if report.is_profitable() {
            summary.profitable_matches += 1;
            summary.total_profit += report.evaluation.profit;
        }
        summary.reports.push(report);
    }

    info!(
        profitable = summary.profitable_matches,
        incomplete = summary.incomplete_matches,
        total_profit = %summary.total_profit,
        "Scan complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odds::Quote;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn test_match(teams: [&str; 2], sites: Vec<Quote>) -> Match {
        Match {
            id: None,
            sport_key: "basketball_nba".to_string(),
            sport_nice: None,
            teams: teams.iter().map(|t| t.to_string()).collect(),
            commence_time: None,
            home_team: None,
            sites,
        }
    }

    fn arb_match() -> Match {
        test_match(
            ["Lakers", "Celtics"],
            vec![
                Quote::new("x", [dec!(2.10), dec!(1.80)]),
                Quote::new("y", [dec!(1.95), dec!(2.05)]),
            ],
        )
    }

    fn fair_match() -> Match {
        test_match(
            ["Bulls", "Heat"],
            vec![
                Quote::new("x", [dec!(1.90), dec!(1.90)]),
                Quote::new("y", [dec!(1.85), dec!(1.95)]),
            ],
        )
    }

    #[test]
    fn scan_match_reports_best_odds_and_margin() {
        let report = scan_match(&arb_match(), dec!(100)).unwrap();

        assert_eq!(
            report.highest_odds,
            vec![
                Some(BestOdd::new("x", dec!(2.10), 0)),
                Some(BestOdd::new("y", dec!(2.05), 1)),
            ]
        );
        assert_eq!(report.arbitrage, report.evaluation.margin);
        assert!(report.is_profitable());
        assert!(report.quote_warnings.is_empty());
    }

    #[test]
    fn scan_matches_totals_profit_of_profitable_matches() {
        let summary = scan_matches(&[arb_match(), fair_match(), arb_match()], dec!(100)).unwrap();

        assert_eq!(summary.reports.len(), 3);
        assert_eq!(summary.profitable_matches, 2);
        assert_eq!(summary.incomplete_matches, 0);
        assert_eq!(summary.total_profit, dec!(7.46));
        assert!(!summary.reports[1].is_profitable());
    }

    #[test]
    fn empty_site_list_is_not_profitable() {
        let report = scan_match(&test_match(["A", "B"], vec![]), dec!(100)).unwrap();

        assert!(report.highest_odds.is_empty());
        assert!(!report.is_profitable());
    }

    #[test]
    fn ragged_quotes_are_reported_without_crashing() {
        let event = test_match(
            ["A", "B"],
            vec![
                Quote::new("short", [dec!(2.6)]),
                Quote::new("full", [dec!(2.2), dec!(2.1), dec!(9.0)]),
            ],
        );

        let report = scan_match(&event, dec!(100)).unwrap();

        assert_eq!(report.highest_odds.len(), 3);
        assert_eq!(report.quote_warnings.len(), 1);
        assert!(!report.evaluation.partial);
    }

    #[test]
    fn rejects_non_positive_stake_up_front() {
        assert!(matches!(
            scan_matches(&[arb_match()], Decimal::ZERO),
            Err(ArbitrageError::InvalidStake(_))
        ));
    }

    #[test]
    fn report_serializes_with_match_key() {
        let report = scan_match(&arb_match(), dec!(100)).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["match"]["sport_key"], "basketball_nba");
        assert_eq!(json["highestOdds"][1]["site"], "y");
        assert_eq!(json["wagers"][0]["wager"], "49.40");
        assert_eq!(json["wagers"][1]["profit"], "3.73");
        assert_eq!(json["partial"], false);
        assert!(json.get("evaluation").is_none());
    }

    #[test]
    fn report_wagers_keep_outcome_positions() {
        let mut quote = Quote::new("x", [dec!(2.5), dec!(9.9), dec!(3.0)]);
        quote.odds[1] = None;
        let report = scan_match(&test_match(["A", "B"], vec![quote]), dec!(100)).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        let wagers = json["wagers"].as_array().unwrap();
        assert_eq!(wagers.len(), 3);
        assert_eq!(wagers[0]["wager"], "54.55");
        assert!(wagers[1].is_null());
        assert_eq!(wagers[2]["site"], "x");
        assert_eq!(json["highestOdds"][1], serde_json::Value::Null);
        assert_eq!(json["partial"], true);
    }

    #[test]
    fn unprofitable_report_has_no_wagers() {
        let report = scan_match(&fair_match(), dec!(100)).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("wagers").is_none());
        assert!(json["arbitrage"].as_f64().unwrap() > 100.0);
    }
}
