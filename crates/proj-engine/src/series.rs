//! Seasonal 12-month projection for charting.

use proj_core::{
    CalculationResult, Locale, MonthlySeries, ProjectionConfig, MONTHS_PER_YEAR,
    OCCUPANCY_VARIATION,
};

/// Round to the nearest integer, halves toward positive infinity.
///
/// Matches the rounding of the host page, so `-2.5` becomes `-2`.
pub fn round_half_up(x: f64) -> i64 {
    let floor = x.floor();
    let rounded = if x - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

/// Apply the seasonal occupancy curve to the monthly figures of `result`.
///
/// Gross and operating costs are both scaled by the month's multiplier, then
/// profit and the two shares are recomputed with the same formulas as the
/// weekly split.
pub fn project_12_months(
    result: &CalculationResult,
    config: &ProjectionConfig,
    locale: Locale,
) -> MonthlySeries {
    let mut gross = [0i64; MONTHS_PER_YEAR];
    let mut partner_share = [0i64; MONTHS_PER_YEAR];
    let mut platform_share = [0i64; MONTHS_PER_YEAR];

    for (i, factor) in OCCUPANCY_VARIATION.iter().enumerate() {
        let month_gross = result.monthly_gross_revenue * factor;
        let month_costs = result.monthly_operating_costs * factor;
        let month_profit = month_gross - month_costs;
        gross[i] = round_half_up(month_gross);
        partner_share[i] = round_half_up(month_profit * config.partner_share_percent);
        platform_share[i] = round_half_up(month_gross * config.platform_share_percent);
    }

    MonthlySeries {
        labels: locale.month_labels().map(String::from),
        gross,
        partner_share,
        platform_share,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::project;
    use proj_core::InputSnapshot;
    use proptest::prelude::*;

    #[test]
    fn rounding_matches_host_page() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.4999), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(0.0), 0);
        assert_eq!(round_half_up(0.49999999999999994), 0);
    }

    #[test]
    fn reference_series() {
        let cfg = ProjectionConfig::default();
        let r = project(&InputSnapshot::default(), &cfg);
        let s = project_12_months(&r, &cfg, Locale::En);
        assert_eq!(s.labels[0], "Jan");
        // multiplier 1.0 in June reproduces the monthly figures
        assert_eq!(s.gross[5], 406_639);
        assert_eq!(s.partner_share[5], 205_743);
        assert_eq!(s.platform_share[5], 121_992);
        assert_eq!(s.gross[0], 243_983);
        assert_eq!(s.platform_share[0], 73_195);
    }

    #[test]
    fn labels_follow_locale_only() {
        let cfg = ProjectionConfig::default();
        let r = project(&InputSnapshot::default(), &cfg);
        let en = project_12_months(&r, &cfg, Locale::En);
        let zh = project_12_months(&r, &cfg, Locale::Zh);
        assert_eq!(zh.labels[2], "3月");
        assert_eq!(en.gross, zh.gross);
        assert_eq!(en.partner_share, zh.partner_share);
        assert_eq!(en.platform_share, zh.platform_share);
    }

    #[test]
    fn loss_making_venue_has_negative_partner_months() {
        let cfg = ProjectionConfig::default();
        let r = project(
            &InputSnapshot {
                capacity: 1,
                ..InputSnapshot::default()
            },
            &cfg,
        );
        let s = project_12_months(&r, &cfg, Locale::En);
        assert!(s.partner_share.iter().all(|v| *v < 0));
        assert!(s.gross.iter().all(|v| *v > 0));
    }

    proptest! {
        #[test]
        fn average_tracks_curve(capacity in 1i64..2_000, occ in 0u32..=100, corporate in any::<bool>()) {
            let cfg = ProjectionConfig::default();
            let r = project(&InputSnapshot {
                capacity,
                occupancy: f64::from(occ) / 100.0,
                corporate_events: corporate,
                ..InputSnapshot::default()
            }, &cfg);
            let s = project_12_months(&r, &cfg, Locale::En);
            prop_assert_eq!(s.gross.len(), 12);
            let mean_factor = OCCUPANCY_VARIATION.iter().sum::<f64>() / 12.0;
            let mean = |xs: &[i64; 12]| xs.iter().sum::<i64>() as f64 / 12.0;
            let tol = 0.5 + 1e-6;
            prop_assert!((mean(&s.gross) - mean_factor * r.monthly_gross_revenue).abs() <= tol);
            prop_assert!((mean(&s.partner_share) - mean_factor * r.monthly_partner_share).abs() <= tol);
            prop_assert!((mean(&s.platform_share) - mean_factor * r.monthly_platform_share).abs() <= tol);
        }
    }
}
