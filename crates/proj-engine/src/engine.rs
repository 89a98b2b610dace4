//! Weekly, monthly, and annual projection of one input snapshot.
//!
//! All arithmetic is done in `f64`. Out-of-range snapshots (negative
//! capacity, occupancy above 1) produce odd but finite figures, never a panic.

use proj_core::{
    Breakeven, CalculationResult, CostBreakdown, InputSnapshot, InvestmentRange,
    ProjectionConfig, RevenueBreakdown,
};
use tracing::debug;

/// Months per year used by the annual rollup.
const MONTHS: f64 = 12.0;

/// Project revenue, costs, and revenue share for `snapshot`.
///
/// Pure and deterministic: identical inputs yield identical results.
///
/// Example:
/// let r = project(&InputSnapshot::default(), &ProjectionConfig::default());
/// assert_eq!(r.weekly_costs.staff, 6000.0);
pub fn project(snapshot: &InputSnapshot, config: &ProjectionConfig) -> CalculationResult {
    let capacity = snapshot.capacity as f64;
    let days = snapshot.days_per_week as f64;
    let shows = snapshot.shows_per_day as f64;

    let area_sqm = (capacity * config.sqm_per_person).ceil();
    let projectors_needed = (area_sqm / config.projector_coverage_sqm).ceil();

    let investment = InvestmentRange::from(config.investment_table.bucket_for(snapshot.capacity));
    let avg_investment = investment.average();

    // not rounded until display
    let tickets_per_week = capacity * shows * days * snapshot.occupancy;

    let weekly_revenue = weekly_revenue(snapshot, config, tickets_per_week);

    let staff_needed = (capacity / config.staff_ratio).ceil();
    let weekly_costs = weekly_costs(snapshot, config, tickets_per_week, staff_needed, &weekly_revenue);

    let weekly_gross_profit = weekly_revenue.gross - weekly_costs.total;
    // Partner share comes out of profit, platform share out of gross; the two
    // are not a partition of one pool.
    let weekly_partner_share = weekly_gross_profit * config.partner_share_percent;
    let weekly_platform_share = weekly_revenue.gross * config.platform_share_percent;

    let monthly_gross_revenue = weekly_revenue.gross * config.weeks_per_month;
    let monthly_operating_costs = weekly_costs.total * config.weeks_per_month;
    let monthly_partner_share = weekly_partner_share * config.weeks_per_month;
    let monthly_platform_share = weekly_platform_share * config.weeks_per_month;

    let breakeven = breakeven(avg_investment, weekly_partner_share, config.weeks_per_month);

    debug!(
        capacity = snapshot.capacity,
        tickets_per_week,
        gross = weekly_revenue.gross,
        costs = weekly_costs.total,
        breakeven = breakeven.as_sentinel(),
        "projection computed"
    );

    CalculationResult {
        inputs: snapshot.clone(),
        area_sqm: area_sqm as i64,
        projectors_needed: projectors_needed as i64,
        investment,
        avg_investment,
        tickets_per_week,
        staff_needed: staff_needed as i64,
        weekly_revenue,
        weekly_costs,
        weekly_gross_profit,
        weekly_partner_share,
        weekly_platform_share,
        monthly_gross_revenue,
        monthly_operating_costs,
        monthly_partner_share,
        monthly_platform_share,
        annual_partner_revenue: monthly_partner_share * MONTHS,
        annual_platform_revenue: monthly_platform_share * MONTHS,
        breakeven,
    }
}

fn weekly_revenue(
    snapshot: &InputSnapshot,
    config: &ProjectionConfig,
    tickets: f64,
) -> RevenueBreakdown {
    let ticket = tickets * snapshot.ticket_price;
    let vip = tickets * config.vip_conversion_rate * snapshot.vip_price;
    let merch = tickets * snapshot.merch_conversion * config.merch_avg_price;
    let concessions = tickets * config.concessions_conversion_rate * config.concessions_price;
    let photobooth = tickets * config.photobooth_conversion_rate * config.photobooth_price;
    let corporate = if snapshot.corporate_events {
        config.corporate_weekly_pax * config.corporate_event_price
    } else {
        0.0
    };
    let additional = merch + concessions + photobooth;
    RevenueBreakdown {
        ticket,
        vip,
        merch,
        concessions,
        photobooth,
        corporate,
        additional,
        gross: ticket + vip + additional + corporate,
    }
}

fn weekly_costs(
    snapshot: &InputSnapshot,
    config: &ProjectionConfig,
    tickets: f64,
    staff_needed: f64,
    revenue: &RevenueBreakdown,
) -> CostBreakdown {
    let mask = tickets * snapshot.mask_replacement * config.mask_cost_per_unit;
    let costume = tickets * snapshot.costume_replacement * config.costume_cost_per_unit;
    let staff = staff_needed
        * snapshot.days_per_week as f64
        * snapshot.shows_per_day as f64
        * config.staff_cost_per_day;
    let management = config.management_weekly;
    let marketing = revenue.ticket * config.marketing_percent;
    let insurance = config.insurance_misc_weekly;
    CostBreakdown {
        mask,
        costume,
        staff,
        management,
        marketing,
        insurance,
        total: mask + costume + staff + management + marketing + insurance,
    }
}

/// Months for cumulative partner share to cover `avg_investment`.
///
/// A zero, negative, or NaN weekly partner share is unreachable.
fn breakeven(avg_investment: f64, weekly_partner_share: f64, weeks_per_month: f64) -> Breakeven {
    if weekly_partner_share > 0.0 {
        let months = (avg_investment / (weekly_partner_share * weeks_per_month)).ceil();
        // `as` saturates; negative investments clamp to zero months
        Breakeven::Months(months as u32)
    } else {
        Breakeven::Unreachable
    }
}
