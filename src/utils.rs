//! Utility functions.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serializer;

/// Decimal places used for every reported monetary value.
pub const MONEY_DP: u32 = 2;

/// Round a monetary amount to cents, half away from zero.
///
/// Every wager and profit that leaves the calculator goes through here so
/// the aggregate profit and the per-outcome figures agree.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a monetary amount with exactly two decimals (e.g. `"49.40"`).
pub fn format_money(amount: Decimal) -> String {
    let rounded = round_money(amount);
    // Avoid printing "-0.00".
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
    format!("{:.2}", rounded)
}

/// Serde helper writing a monetary amount as a two-decimal string.
pub fn serialize_money<S>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_money(*amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_money(dec!(3.735)), dec!(3.74));
        assert_eq!(round_money(dec!(3.7349)), dec!(3.73));
        assert_eq!(round_money(dec!(0.005)), dec!(0.01));
    }

    #[test]
    fn rounds_negative_half_away_from_zero() {
        assert_eq!(round_money(dec!(-2.345)), dec!(-2.35));
    }

    #[test]
    fn leaves_cents_untouched() {
        assert_eq!(round_money(dec!(50.60)), dec!(50.60));
        assert_eq!(round_money(dec!(100)), dec!(100));
    }

    #[test]
    fn formats_two_decimals() {
        assert_eq!(format_money(dec!(49.397590)), "49.40");
        assert_eq!(format_money(dec!(3)), "3.00");
        assert_eq!(format_money(dec!(-0.004)), "0.00");
    }
}
