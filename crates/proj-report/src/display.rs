//! Binds calculation results to the fixed set of result cards on the page.

use crate::format::{format_compact_currency, format_count};
use proj_core::{Breakeven, CalculationResult, Locale};
use serde::Serialize;

/// One result card on the scenarios page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplaySlot {
    Area,
    Projectors,
    Investment,
    TicketsPerWeek,
    WeeklyRevenue,
    WeeklyTickets,
    WeeklyVip,
    WeeklyAdditional,
    WeeklyCorporate,
    WeeklyCosts,
    PartnerShare,
    PlatformShare,
    Breakeven,
    AnnualPartner,
    AnnualPlatform,
}

impl DisplaySlot {
    /// Slots in page order.
    pub const ALL: [DisplaySlot; 15] = [
        DisplaySlot::Area,
        DisplaySlot::Projectors,
        DisplaySlot::Investment,
        DisplaySlot::TicketsPerWeek,
        DisplaySlot::WeeklyRevenue,
        DisplaySlot::WeeklyTickets,
        DisplaySlot::WeeklyVip,
        DisplaySlot::WeeklyAdditional,
        DisplaySlot::WeeklyCorporate,
        DisplaySlot::WeeklyCosts,
        DisplaySlot::PartnerShare,
        DisplaySlot::PlatformShare,
        DisplaySlot::Breakeven,
        DisplaySlot::AnnualPartner,
        DisplaySlot::AnnualPlatform,
    ];

    /// DOM element id of the card's value.
    pub fn element_id(self) -> &'static str {
        match self {
            DisplaySlot::Area => "resultArea",
            DisplaySlot::Projectors => "resultProjectors",
            DisplaySlot::Investment => "resultInvestment",
            DisplaySlot::TicketsPerWeek => "resultTicketsPerWeek",
            DisplaySlot::WeeklyRevenue => "resultWeeklyRevenue",
            DisplaySlot::WeeklyTickets => "resultWeeklyTickets",
            DisplaySlot::WeeklyVip => "resultWeeklyVip",
            DisplaySlot::WeeklyAdditional => "resultWeeklyAdditional",
            DisplaySlot::WeeklyCorporate => "resultWeeklyCorporate",
            DisplaySlot::WeeklyCosts => "resultWeeklyCosts",
            DisplaySlot::PartnerShare => "resultPartnerShare",
            DisplaySlot::PlatformShare => "resultPlatformShare",
            DisplaySlot::Breakeven => "resultBreakeven",
            DisplaySlot::AnnualPartner => "resultAnnualPartner",
            DisplaySlot::AnnualPlatform => "resultAnnualPlatform",
        }
    }

    /// Short caption for text hosts without the page markup.
    pub fn caption(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (DisplaySlot::Area, Locale::En) => "Area",
            (DisplaySlot::Area, Locale::Zh) => "面积",
            (DisplaySlot::Projectors, Locale::En) => "Projectors",
            (DisplaySlot::Projectors, Locale::Zh) => "投影仪",
            (DisplaySlot::Investment, Locale::En) => "Investment",
            (DisplaySlot::Investment, Locale::Zh) => "投资额",
            (DisplaySlot::TicketsPerWeek, Locale::En) => "Tickets / week",
            (DisplaySlot::TicketsPerWeek, Locale::Zh) => "每周票数",
            (DisplaySlot::WeeklyRevenue, Locale::En) => "Weekly revenue",
            (DisplaySlot::WeeklyRevenue, Locale::Zh) => "每周总收入",
            (DisplaySlot::WeeklyTickets, Locale::En) => "Weekly tickets",
            (DisplaySlot::WeeklyTickets, Locale::Zh) => "每周门票收入",
            (DisplaySlot::WeeklyVip, Locale::En) => "Weekly VIP",
            (DisplaySlot::WeeklyVip, Locale::Zh) => "每周VIP收入",
            (DisplaySlot::WeeklyAdditional, Locale::En) => "Weekly additional",
            (DisplaySlot::WeeklyAdditional, Locale::Zh) => "每周附加收入",
            (DisplaySlot::WeeklyCorporate, Locale::En) => "Weekly corporate",
            (DisplaySlot::WeeklyCorporate, Locale::Zh) => "每周企业活动收入",
            (DisplaySlot::WeeklyCosts, Locale::En) => "Weekly costs",
            (DisplaySlot::WeeklyCosts, Locale::Zh) => "每周运营成本",
            (DisplaySlot::PartnerShare, Locale::En) => "Partner share / month",
            (DisplaySlot::PartnerShare, Locale::Zh) => "合作伙伴月分成",
            (DisplaySlot::PlatformShare, Locale::En) => "Platform share / month",
            (DisplaySlot::PlatformShare, Locale::Zh) => "平台月分成",
            (DisplaySlot::Breakeven, Locale::En) => "Breakeven",
            (DisplaySlot::Breakeven, Locale::Zh) => "回本周期",
            (DisplaySlot::AnnualPartner, Locale::En) => "Partner / year",
            (DisplaySlot::AnnualPartner, Locale::Zh) => "合作伙伴年收入",
            (DisplaySlot::AnnualPlatform, Locale::En) => "Platform / year",
            (DisplaySlot::AnnualPlatform, Locale::Zh) => "平台年收入",
        }
    }
}

fn breakeven_text(breakeven: Breakeven, locale: Locale) -> String {
    match (breakeven, locale) {
        (Breakeven::Months(m), Locale::En) => format!("{m} months"),
        (Breakeven::Months(m), Locale::Zh) => format!("{m} 个月"),
        (Breakeven::Unreachable, Locale::En) => "Not reachable".to_string(),
        (Breakeven::Unreachable, Locale::Zh) => "无法回本".to_string(),
    }
}

/// Display text for every slot, in page order.
pub fn bind_results(result: &CalculationResult, locale: Locale) -> Vec<(DisplaySlot, String)> {
    DisplaySlot::ALL
        .iter()
        .map(|&slot| {
            let text = match slot {
                DisplaySlot::Area => format!("{} m²", result.area_sqm),
                DisplaySlot::Projectors => result.projectors_needed.to_string(),
                DisplaySlot::Investment => format!(
                    "{} - {}",
                    format_compact_currency(result.investment.min),
                    format_compact_currency(result.investment.max)
                ),
                DisplaySlot::TicketsPerWeek => format_count(result.tickets_per_week),
                DisplaySlot::WeeklyRevenue => format_compact_currency(result.weekly_revenue.gross),
                DisplaySlot::WeeklyTickets => format_compact_currency(result.weekly_revenue.ticket),
                DisplaySlot::WeeklyVip => format_compact_currency(result.weekly_revenue.vip),
                DisplaySlot::WeeklyAdditional => {
                    format_compact_currency(result.weekly_revenue.additional)
                }
                DisplaySlot::WeeklyCorporate => {
                    format_compact_currency(result.weekly_revenue.corporate)
                }
                DisplaySlot::WeeklyCosts => format_compact_currency(result.weekly_costs.total),
                DisplaySlot::PartnerShare => format_compact_currency(result.monthly_partner_share),
                DisplaySlot::PlatformShare => {
                    format_compact_currency(result.monthly_platform_share)
                }
                DisplaySlot::Breakeven => breakeven_text(result.breakeven, locale),
                DisplaySlot::AnnualPartner => {
                    format_compact_currency(result.annual_partner_revenue)
                }
                DisplaySlot::AnnualPlatform => {
                    format_compact_currency(result.annual_platform_revenue)
                }
            };
            (slot, text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proj_core::{InputSnapshot, ProjectionConfig};
    use proj_engine::project;
    use std::collections::HashMap;

    fn bound(snapshot: &InputSnapshot, locale: Locale) -> HashMap<&'static str, String> {
        let r = project(snapshot, &ProjectionConfig::default());
        bind_results(&r, locale)
            .into_iter()
            .map(|(slot, text)| (slot.element_id(), text))
            .collect()
    }

    #[test]
    fn reference_cards() {
        let cards = bound(&InputSnapshot::default(), Locale::En);
        assert_eq!(cards.len(), DisplaySlot::ALL.len());
        assert_eq!(cards["resultArea"], "300 m²");
        assert_eq!(cards["resultProjectors"], "25");
        assert_eq!(cards["resultInvestment"], "$320,000 - $550,000");
        assert_eq!(cards["resultTicketsPerWeek"], "2,100");
        assert_eq!(cards["resultWeeklyRevenue"], "$93,912");
        assert_eq!(cards["resultWeeklyTickets"], "$67,200");
        assert_eq!(cards["resultWeeklyVip"], "$9,450");
        assert_eq!(cards["resultWeeklyCorporate"], "$0");
        assert_eq!(cards["resultWeeklyCosts"], "$26,033");
        assert_eq!(cards["resultBreakeven"], "3 months");
        assert_eq!(cards["resultAnnualPartner"], "$2.5M");
    }

    #[test]
    fn unreachable_breakeven_is_spelled_out() {
        let tiny = InputSnapshot {
            capacity: 1,
            ..InputSnapshot::default()
        };
        assert_eq!(bound(&tiny, Locale::En)["resultBreakeven"], "Not reachable");
        assert_eq!(bound(&tiny, Locale::Zh)["resultBreakeven"], "无法回本");
    }

    #[test]
    fn zh_breakeven_unit() {
        let cards = bound(&InputSnapshot::default(), Locale::Zh);
        assert_eq!(cards["resultBreakeven"], "3 个月");
        assert_eq!(DisplaySlot::Breakeven.caption(Locale::Zh), "回本周期");
    }

    #[test]
    fn element_ids_are_unique() {
        let mut ids: Vec<_> = DisplaySlot::ALL.iter().map(|s| s.element_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), DisplaySlot::ALL.len());
    }
}
