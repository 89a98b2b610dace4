//! Currency and number formatting for display.
//!
//! Rounding follows the host page: whole-unit rounding sends halves toward
//! positive infinity, fixed-point rounding sends halves away from zero.

use proj_engine::round_half_up;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const MILLION: f64 = 1_000_000.0;

/// Round to whole units, halves toward positive infinity.
///
/// Same rule as the seasonal series, so a card and its chart point agree.
pub fn round_whole(value: f64) -> Option<i128> {
    value
        .is_finite()
        .then(|| i128::from(round_half_up(value)))
}

/// Fixed-point text with `dp` decimals, halves away from zero.
///
/// The midpoint test runs on the exact binary value, so `1.15` (stored as
/// `1.1499999999999999...`) gives `1.1`.
pub fn to_fixed(value: f64, dp: u32) -> String {
    match Decimal::from_f64_retain(value) {
        Some(d) => {
            let rounded = d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.*}", dp as usize, rounded)
        }
        None => format!("{:.*}", dp as usize, value),
    }
}

/// Integer with comma thousands separators, e.g. `-1,234,567`.
pub fn group_thousands(n: i128) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Rounded, grouped integer; non-finite values print as-is.
pub fn format_count(value: f64) -> String {
    match round_whole(value) {
        Some(n) => group_thousands(n),
        None => value.to_string(),
    }
}

/// Percentage text for a fraction, e.g. `0.7` as `70`.
pub fn format_percent(fraction: f64) -> String {
    match Decimal::from_f64(fraction * 100.0) {
        Some(d) => d.round_dp(2).normalize().to_string(),
        None => (fraction * 100.0).to_string(),
    }
}

/// `$` followed by the rounded, grouped amount. Used by the report.
///
/// Example:
/// assert_eq!(format_currency(93_912.4), "$93,912");
pub fn format_currency(value: f64) -> String {
    format!("${}", format_count(value))
}

/// Result-card currency: millions as `$X.XM`, smaller amounts grouped.
///
/// Example:
/// assert_eq!(format_compact_currency(2_468_913.0), "$2.5M");
pub fn format_compact_currency(value: f64) -> String {
    if value >= MILLION {
        format!("${}M", to_fixed(value / MILLION, 1))
    } else {
        format_currency(value)
    }
}

/// Chart axis tick: millions as `$X.XM`, otherwise whole thousands as `$XK`.
pub fn format_axis_tick(value: f64) -> String {
    if value >= MILLION {
        format!("${}M", to_fixed(value / MILLION, 1))
    } else {
        format!("${}K", to_fixed(value / 1000.0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(406_639), "406,639");
        assert_eq!(group_thousands(-1_234_567), "-1,234,567");
    }

    #[test]
    fn whole_rounding_halves_go_up() {
        assert_eq!(round_whole(2.5), Some(3));
        assert_eq!(round_whole(-2.5), Some(-2));
        assert_eq!(round_whole(-2.51), Some(-3));
        assert_eq!(round_whole(-0.4), Some(0));
        assert_eq!(round_whole(f64::NAN), None);
    }

    #[test]
    fn rounding_sees_the_stored_double() {
        // largest double below 0.5
        assert_eq!(round_whole(0.49999999999999994), Some(0));
        assert_eq!(round_whole(-0.5), Some(0));
        assert_eq!(to_fixed(1.15, 1), "1.1");
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(format_compact_currency(1_150_000.0), "$1.1M");
        assert_eq!(format_axis_tick(1_150_000.0), "$1.1M");
    }

    #[test]
    fn currency_formats() {
        assert_eq!(format_currency(93_912.4), "$93,912");
        assert_eq!(format_currency(2_362.5), "$2,363");
        assert_eq!(format_currency(-8_078.6), "$-8,079");
        assert_eq!(format_compact_currency(999_999.4), "$999,999");
        assert_eq!(format_compact_currency(1_000_000.0), "$1.0M");
        assert_eq!(format_compact_currency(2_468_913.0), "$2.5M");
        assert_eq!(format_compact_currency(2_449_999.0), "$2.4M");
    }

    #[test]
    fn axis_ticks() {
        assert_eq!(format_axis_tick(0.0), "$0K");
        assert_eq!(format_axis_tick(250_000.0), "$250K");
        assert_eq!(format_axis_tick(1_500_000.0), "$1.5M");
    }

    #[test]
    fn percent_text() {
        assert_eq!(format_percent(0.7), "70");
        assert_eq!(format_percent(0.25), "25");
        assert_eq!(format_percent(0.57), "57");
        assert_eq!(format_percent(0.125), "12.5");
    }

    proptest! {
        #[test]
        fn grouped_text_parses_back(n in -10_000_000_000i64..10_000_000_000) {
            let text = group_thousands(i128::from(n));
            let back: i64 = text.replace(',', "").parse().unwrap();
            prop_assert_eq!(back, n);
        }

        #[test]
        fn whole_rounding_agrees_with_series(x in -1.0e12f64..1.0e12) {
            prop_assert_eq!(round_whole(x), Some(i128::from(round_half_up(x))));
        }
    }
}
