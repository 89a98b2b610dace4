#![deny(warnings)]

//! Core domain models for the venue revenue projection.
//!
//! This crate defines the static configuration table, the input snapshot
//! collected from the host UI, and the derived calculation records, with
//! validation helpers to guarantee configuration invariants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Month count reported when the partner share never recovers the investment.
pub const BREAKEVEN_SENTINEL: u32 = 999;

/// Number of months in the seasonal projection.
pub const MONTHS_PER_YEAR: usize = 12;

/// Seasonal occupancy multipliers; index 0 is the first month of operation.
pub const OCCUPANCY_VARIATION: [f64; MONTHS_PER_YEAR] =
    [0.6, 0.7, 0.8, 0.9, 0.95, 1.0, 1.0, 0.95, 0.9, 0.85, 0.8, 0.75];

/// Display language of the host page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (default).
    #[default]
    En,
    /// Simplified Chinese.
    Zh,
}

impl Locale {
    /// Short language code as stored in preferences.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }

    /// Month labels for the 12-month chart axis.
    pub fn month_labels(self) -> [&'static str; MONTHS_PER_YEAR] {
        match self {
            Locale::En => [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ],
            Locale::Zh => [
                "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
            ],
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Language code outside the supported set.
#[derive(Debug, Error, PartialEq)]
#[error("unsupported language: {0}")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "zh" => Ok(Locale::Zh),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

/// One capacity bucket of the investment table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentBucket {
    /// Inclusive upper capacity bound; `None` admits any capacity.
    pub max_capacity: Option<i64>,
    /// Low end of the estimated investment in USD.
    pub investment_min: f64,
    /// High end of the estimated investment in USD.
    pub investment_max: f64,
    /// Fewest projectors quoted for this bucket.
    pub projectors_min: u32,
    /// Most projectors quoted for this bucket.
    pub projectors_max: u32,
}

impl InvestmentBucket {
    /// Whether a venue of `capacity` falls in this bucket.
    pub fn admits(&self, capacity: i64) -> bool {
        self.max_capacity.map_or(true, |max| capacity <= max)
    }
}

/// Ordered, non-empty list of investment buckets.
///
/// Buckets are checked in order and the first admitting one wins, so
/// thresholds must be strictly ascending and only the last bucket may be
/// open-ended. Deserialization enforces the same rules as [`InvestmentTable::new`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<InvestmentBucket>", into = "Vec<InvestmentBucket>")]
pub struct InvestmentTable(Vec<InvestmentBucket>);

impl InvestmentTable {
    /// Build a table, rejecting empty or misordered bucket lists.
    pub fn new(buckets: Vec<InvestmentBucket>) -> Result<Self, ConfigError> {
        validate_buckets(&buckets)?;
        Ok(Self(buckets))
    }

    /// Buckets in lookup order.
    pub fn buckets(&self) -> &[InvestmentBucket] {
        &self.0
    }

    /// Bucket for a venue capacity. Capacities above every bound fall into
    /// the last bucket.
    pub fn bucket_for(&self, capacity: i64) -> &InvestmentBucket {
        match self.0.iter().find(|b| b.admits(capacity)) {
            Some(bucket) => bucket,
            // non-empty by construction
            None => &self.0[self.0.len() - 1],
        }
    }
}

impl Default for InvestmentTable {
    fn default() -> Self {
        Self(vec![
            InvestmentBucket {
                max_capacity: Some(150),
                investment_min: 236_000.0,
                investment_max: 400_000.0,
                projectors_min: 16,
                projectors_max: 18,
            },
            InvestmentBucket {
                max_capacity: Some(250),
                investment_min: 320_000.0,
                investment_max: 550_000.0,
                projectors_min: 26,
                projectors_max: 30,
            },
            InvestmentBucket {
                max_capacity: None,
                investment_min: 420_000.0,
                investment_max: 750_000.0,
                projectors_min: 36,
                projectors_max: 42,
            },
        ])
    }
}

impl TryFrom<Vec<InvestmentBucket>> for InvestmentTable {
    type Error = ConfigError;

    fn try_from(buckets: Vec<InvestmentBucket>) -> Result<Self, Self::Error> {
        Self::new(buckets)
    }
}

impl From<InvestmentTable> for Vec<InvestmentBucket> {
    fn from(table: InvestmentTable) -> Self {
        table.0
    }
}

/// Static per-unit constants driving the projection.
///
/// Every field has a default matching the published partnership terms, so a
/// partial YAML override only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectionConfig {
    /// Floor area per guest in m².
    pub sqm_per_person: f64,
    /// Floor area covered by one projector mounted at 5 m, in m².
    pub projector_coverage_sqm: f64,
    /// Average weeks per month used for rollups.
    pub weeks_per_month: f64,
    /// Partner share of weekly operating profit.
    pub partner_share_percent: f64,
    /// Platform share of weekly gross revenue.
    pub platform_share_percent: f64,
    /// Default ticket price offered to the input collector.
    pub base_ticket_price: f64,
    /// Default VIP upgrade price offered to the input collector.
    pub vip_upgrade_price: f64,
    pub merch_avg_price: f64,
    /// Food and drinks average spend.
    pub concessions_price: f64,
    pub photobooth_price: f64,
    /// Corporate event price per attendee.
    pub corporate_event_price: f64,
    pub vip_conversion_rate: f64,
    /// Default merch conversion offered to the input collector.
    pub merch_conversion_rate: f64,
    pub concessions_conversion_rate: f64,
    pub photobooth_conversion_rate: f64,
    /// Corporate attendees per week when corporate events are enabled.
    pub corporate_weekly_pax: f64,
    pub mask_cost_per_unit: f64,
    pub costume_cost_per_unit: f64,
    /// Daily rate per staff member.
    pub staff_cost_per_day: f64,
    /// Guests per staff member.
    pub staff_ratio: f64,
    /// Producer plus two technicians, per week.
    pub management_weekly: f64,
    /// Marketing spend as a fraction of ticket revenue.
    pub marketing_percent: f64,
    pub insurance_misc_weekly: f64,
    pub investment_table: InvestmentTable,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            sqm_per_person: 1.2,
            projector_coverage_sqm: 12.0,
            weeks_per_month: 4.33,
            partner_share_percent: 0.70,
            platform_share_percent: 0.30,
            base_ticket_price: 32.0,
            vip_upgrade_price: 45.0,
            merch_avg_price: 6.0,
            concessions_price: 5.0,
            photobooth_price: 4.0,
            corporate_event_price: 45.0,
            vip_conversion_rate: 0.10,
            merch_conversion_rate: 0.70,
            concessions_conversion_rate: 0.70,
            photobooth_conversion_rate: 0.13,
            corporate_weekly_pax: 200.0,
            mask_cost_per_unit: 1.50,
            costume_cost_per_unit: 4.50,
            staff_cost_per_day: 50.0,
            staff_ratio: 25.0,
            management_weekly: 4800.0,
            marketing_percent: 0.10,
            insurance_misc_weekly: 3000.0,
            investment_table: InvestmentTable::default(),
        }
    }
}

/// User-adjustable parameters at one point in time.
///
/// Fraction fields are always decimals in `[0, 1]` scale, never the raw
/// 0-100 slider values. No range checks are applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputSnapshot {
    /// Guests per show.
    pub capacity: i64,
    pub ticket_price: f64,
    pub days_per_week: i64,
    pub shows_per_day: i64,
    /// Fraction of seats filled per show.
    pub occupancy: f64,
    pub costume_replacement: f64,
    pub mask_replacement: f64,
    pub vip_price: f64,
    pub merch_conversion: f64,
    pub corporate_events: bool,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            capacity: 250,
            ticket_price: 32.0,
            days_per_week: 4,
            shows_per_day: 3,
            occupancy: 0.70,
            costume_replacement: 0.25,
            mask_replacement: 1.00,
            vip_price: 45.0,
            merch_conversion: 0.70,
            corporate_events: false,
        }
    }
}

impl InputSnapshot {
    /// Defaults with prices and merch conversion taken from `config`.
    pub fn defaults_for(config: &ProjectionConfig) -> Self {
        Self {
            ticket_price: config.base_ticket_price,
            vip_price: config.vip_upgrade_price,
            merch_conversion: config.merch_conversion_rate,
            ..Self::default()
        }
    }
}

/// Investment estimate and projector quote for the matched bucket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRange {
    pub min: f64,
    pub max: f64,
    pub projectors_min: u32,
    pub projectors_max: u32,
}

impl InvestmentRange {
    /// Midpoint of the investment estimate.
    pub fn average(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

impl From<&InvestmentBucket> for InvestmentRange {
    fn from(b: &InvestmentBucket) -> Self {
        Self {
            min: b.investment_min,
            max: b.investment_max,
            projectors_min: b.projectors_min,
            projectors_max: b.projectors_max,
        }
    }
}

/// Weekly revenue per stream, in USD.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueBreakdown {
    pub ticket: f64,
    pub vip: f64,
    pub merch: f64,
    pub concessions: f64,
    pub photobooth: f64,
    pub corporate: f64,
    /// Merch + concessions + photobooth.
    pub additional: f64,
    pub gross: f64,
}

/// Weekly operating cost per category, in USD.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub mask: f64,
    pub costume: f64,
    pub staff: f64,
    pub management: f64,
    pub marketing: f64,
    pub insurance: f64,
    pub total: f64,
}

/// Months until cumulative partner share covers the average investment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum Breakeven {
    Months(u32),
    /// Partner share is zero or negative.
    Unreachable,
}

impl Breakeven {
    /// Month count, or `None` when breakeven is never reached.
    pub fn months(self) -> Option<u32> {
        match self {
            Breakeven::Months(m) => Some(m),
            Breakeven::Unreachable => None,
        }
    }

    /// Month count with [`BREAKEVEN_SENTINEL`] standing in for unreachable.
    pub fn as_sentinel(self) -> u32 {
        self.months().unwrap_or(BREAKEVEN_SENTINEL)
    }
}

impl From<u32> for Breakeven {
    fn from(m: u32) -> Self {
        if m == BREAKEVEN_SENTINEL {
            Breakeven::Unreachable
        } else {
            Breakeven::Months(m)
        }
    }
}

impl From<Breakeven> for u32 {
    fn from(b: Breakeven) -> Self {
        b.as_sentinel()
    }
}

/// Every intermediate and final figure of one projection.
///
/// Created fresh on each recompute and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Snapshot the figures were derived from.
    pub inputs: InputSnapshot,
    pub area_sqm: i64,
    pub projectors_needed: i64,
    pub investment: InvestmentRange,
    pub avg_investment: f64,
    /// Continuous attendance; rounded only for display.
    pub tickets_per_week: f64,
    pub staff_needed: i64,
    pub weekly_revenue: RevenueBreakdown,
    pub weekly_costs: CostBreakdown,
    pub weekly_gross_profit: f64,
    pub weekly_partner_share: f64,
    pub weekly_platform_share: f64,
    pub monthly_gross_revenue: f64,
    pub monthly_operating_costs: f64,
    pub monthly_partner_share: f64,
    pub monthly_platform_share: f64,
    pub annual_partner_revenue: f64,
    pub annual_platform_revenue: f64,
    pub breakeven: Breakeven,
}

/// Seasonally varied monthly figures for charting, in whole USD.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySeries {
    pub labels: [String; MONTHS_PER_YEAR],
    pub gross: [i64; MONTHS_PER_YEAR],
    pub partner_share: [i64; MONTHS_PER_YEAR],
    pub platform_share: [i64; MONTHS_PER_YEAR],
}

/// Configuration invariant violations.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// No buckets at all.
    #[error("investment table is empty")]
    EmptyInvestmentTable,
    /// An open-ended bucket followed by more buckets would shadow them.
    #[error("investment bucket {0} is open-ended but not last")]
    OpenBucketNotLast(usize),
    /// Capacity bounds must increase bucket over bucket.
    #[error("investment bucket {0} bound is not above the previous bucket")]
    UnorderedThresholds(usize),
    /// A bucket quotes min above max.
    #[error("investment bucket {0} has min greater than max")]
    InvertedRange(usize),
    /// A constant is NaN or infinite.
    #[error("non-finite value for {0}")]
    NonFinite(&'static str),
    /// A divisor is zero or negative.
    #[error("{0} must be > 0")]
    NonPositive(&'static str),
}

fn validate_buckets(buckets: &[InvestmentBucket]) -> Result<(), ConfigError> {
    if buckets.is_empty() {
        return Err(ConfigError::EmptyInvestmentTable);
    }
    let mut prev: Option<i64> = None;
    for (i, b) in buckets.iter().enumerate() {
        if !(b.investment_min.is_finite() && b.investment_max.is_finite()) {
            return Err(ConfigError::NonFinite("investmentTable"));
        }
        if b.investment_min > b.investment_max || b.projectors_min > b.projectors_max {
            return Err(ConfigError::InvertedRange(i));
        }
        match b.max_capacity {
            None if i + 1 != buckets.len() => return Err(ConfigError::OpenBucketNotLast(i)),
            None => {}
            Some(max) => {
                if prev.is_some_and(|p| max <= p) {
                    return Err(ConfigError::UnorderedThresholds(i));
                }
                prev = Some(max);
            }
        }
    }
    Ok(())
}

/// Validate a projection configuration.
pub fn validate_config(cfg: &ProjectionConfig) -> Result<(), ConfigError> {
    let constants = [
        ("sqmPerPerson", cfg.sqm_per_person),
        ("projectorCoverageSqm", cfg.projector_coverage_sqm),
        ("weeksPerMonth", cfg.weeks_per_month),
        ("partnerSharePercent", cfg.partner_share_percent),
        ("platformSharePercent", cfg.platform_share_percent),
        ("baseTicketPrice", cfg.base_ticket_price),
        ("vipUpgradePrice", cfg.vip_upgrade_price),
        ("merchAvgPrice", cfg.merch_avg_price),
        ("concessionsPrice", cfg.concessions_price),
        ("photoboothPrice", cfg.photobooth_price),
        ("corporateEventPrice", cfg.corporate_event_price),
        ("vipConversionRate", cfg.vip_conversion_rate),
        ("merchConversionRate", cfg.merch_conversion_rate),
        ("concessionsConversionRate", cfg.concessions_conversion_rate),
        ("photoboothConversionRate", cfg.photobooth_conversion_rate),
        ("corporateWeeklyPax", cfg.corporate_weekly_pax),
        ("maskCostPerUnit", cfg.mask_cost_per_unit),
        ("costumeCostPerUnit", cfg.costume_cost_per_unit),
        ("staffCostPerDay", cfg.staff_cost_per_day),
        ("staffRatio", cfg.staff_ratio),
        ("managementWeekly", cfg.management_weekly),
        ("marketingPercent", cfg.marketing_percent),
        ("insuranceMiscWeekly", cfg.insurance_misc_weekly),
    ];
    for (name, value) in constants {
        if !value.is_finite() {
            return Err(ConfigError::NonFinite(name));
        }
    }
    let divisors = [
        ("projectorCoverageSqm", cfg.projector_coverage_sqm),
        ("staffRatio", cfg.staff_ratio),
        ("weeksPerMonth", cfg.weeks_per_month),
    ];
    for (name, value) in divisors {
        if value <= 0.0 {
            return Err(ConfigError::NonPositive(name));
        }
    }
    validate_buckets(cfg.investment_table.buckets())
}
