//! Best-odd selection across bookmakers.

use smallvec::smallvec;

use super::types::{BestOdd, BestOdds, DataWarning};
use crate::odds::Match;

/// Pick the highest odd per outcome across every quote of a match.
///
/// Single indexed fold over (quote, outcome) pairs. A later quote only
/// replaces the running best when strictly greater, so ties keep the first
/// bookmaker in feed order. Missing entries (`None`, or indices past a short
/// quote) never compete. Indices nobody quoted stay `None`.
pub fn normalize(event: &Match) -> BestOdds {
    let mut best: BestOdds = smallvec![None; event.outcome_count()];

    for quote in &event.sites {
        for (index, odd) in quote.odds.iter().enumerate() {
            let Some(odd) = *odd else {
                continue;
            };

            let improves = match &best[index] {
                Some(current) => odd > current.odd,
                None => true,
            };
            if improves {
                best[index] = Some(BestOdd::new(quote.site_key.as_str(), odd, index));
            }
        }
    }

    best
}

/// Report quotes shorter than the widest quote of the match.
pub fn quote_shape_warnings(event: &Match) -> Vec<DataWarning> {
    let expected = event.outcome_count();

    event
        .sites
        .iter()
        .filter(|q| q.odds.len() < expected)
        .map(|q| DataWarning::RaggedQuotes {
            site_key: q.site_key.clone(),
            expected,
            actual: q.odds.len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odds::Quote;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn test_match(sites: Vec<Quote>) -> Match {
        Match {
            id: None,
            sport_key: "soccer_epl".to_string(),
            sport_nice: None,
            teams: vec!["Arsenal".to_string(), "Chelsea".to_string()],
            commence_time: None,
            home_team: None,
            sites,
        }
    }

    #[test]
    fn picks_highest_odd_per_outcome() {
        let event = test_match(vec![
            Quote::new("x", [dec!(2.10), dec!(1.80)]),
            Quote::new("y", [dec!(1.95), dec!(2.05)]),
        ]);

        let best = normalize(&event);

        assert_eq!(
            best.to_vec(),
            vec![
                Some(BestOdd::new("x", dec!(2.10), 0)),
                Some(BestOdd::new("y", dec!(2.05), 1)),
            ]
        );
    }

    #[test]
    fn ties_keep_first_listed_quote() {
        let event = test_match(vec![
            Quote::new("first", [dec!(2.50), dec!(1.50)]),
            Quote::new("second", [dec!(2.50), dec!(1.50)]),
            Quote::new("third", [dec!(2.5), dec!(1.4)]),
        ]);

        for _ in 0..3 {
            let best = normalize(&event);
            assert_eq!(best[0].as_ref().unwrap().site_key, "first");
            assert_eq!(best[1].as_ref().unwrap().site_key, "first");
        }
    }

    #[test]
    fn no_sites_yields_empty_result() {
        assert!(normalize(&test_match(vec![])).is_empty());
    }

    #[test]
    fn short_quote_does_not_compete_past_its_length() {
        let event = test_match(vec![
            Quote::new("short", [dec!(3.00)]),
            Quote::new("full", [dec!(2.00), dec!(3.10), dec!(4.00)]),
        ]);

        let best = normalize(&event);

        assert_eq!(best.len(), 3);
        assert_eq!(best[0], Some(BestOdd::new("short", dec!(3.00), 0)));
        assert_eq!(best[1], Some(BestOdd::new("full", dec!(3.10), 1)));
        assert_eq!(best[2], Some(BestOdd::new("full", dec!(4.00), 2)));
    }

    #[test]
    fn unquoted_outcome_stays_empty() {
        let mut a = Quote::new("a", [dec!(2.0), dec!(3.0), dec!(4.0)]);
        a.odds[1] = None;
        let mut b = Quote::new("b", [dec!(2.2), dec!(3.0), dec!(3.5)]);
        b.odds[1] = None;

        let best = normalize(&test_match(vec![a, b]));

        assert_eq!(best[0], Some(BestOdd::new("b", dec!(2.2), 0)));
        assert_eq!(best[1], None);
        assert_eq!(best[2], Some(BestOdd::new("a", dec!(4.0), 2)));
    }

    #[test]
    fn flags_ragged_quotes() {
        let event = test_match(vec![
            Quote::new("short", [dec!(3.00)]),
            Quote::new("full", [dec!(2.00), dec!(3.10)]),
        ]);

        assert_eq!(
            quote_shape_warnings(&event),
            vec![DataWarning::RaggedQuotes {
                site_key: "short".to_string(),
                expected: 2,
                actual: 1,
            }]
        );
    }
}
