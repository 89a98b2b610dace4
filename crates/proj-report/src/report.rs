//! Printable partnership proposal.
//!
//! Renders a self-contained HTML page from a calculation result. The host
//! opens it for printing or saves it; a failed write is reported to the
//! caller, which is expected to log it and carry on.

use crate::format::{format_currency, format_percent};
use crate::ReportError;
use chrono::NaiveDate;
use proj_core::{CalculationResult, ProjectionConfig};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

const STYLE: &str = "body { font-family: Arial, sans-serif; padding: 40px; max-width: 800px; margin: 0 auto; }
h1 { border-bottom: 2px solid #000; padding-bottom: 10px; }
h2 { margin-top: 30px; color: #333; }
table { width: 100%; border-collapse: collapse; margin: 15px 0; }
th, td { border: 1px solid #ddd; padding: 10px; text-align: left; }
.highlight { font-weight: bold; font-size: 1.1em; background: #f0f9ff; }
.total-row { background: #e8e8e8; font-weight: bold; }
.banner { background: #fff3cd; padding: 10px; border-radius: 4px; }
.note { margin-top: 30px; font-size: 0.9em; color: #666; }";

/// Header details of an exported report.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportMeta {
    pub title: String,
    /// Name the platform share is reported under.
    pub platform_name: String,
    pub generated_on: NaiveDate,
}

impl ReportMeta {
    /// Default title and platform name, dated today.
    pub fn today() -> Self {
        Self::dated(chrono::Local::now().date_naive())
    }

    pub fn dated(generated_on: NaiveDate) -> Self {
        Self {
            title: "Partnership Proposal".to_string(),
            platform_name: "Platform".to_string(),
            generated_on,
        }
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

struct Table<'a> {
    out: &'a mut String,
}

impl<'a> Table<'a> {
    fn open(out: &'a mut String, heading: &str) -> Self {
        let _ = write!(out, "<h2>{}</h2>\n<table>\n", escape_html(heading));
        Self { out }
    }

    fn row(&mut self, class: Option<&str>, label: &str, value: &str) {
        let class_attr = class.map(|c| format!(" class=\"{c}\"")).unwrap_or_default();
        let _ = writeln!(
            self.out,
            "<tr{class_attr}><td>{}</td><td>{}</td></tr>",
            escape_html(label),
            escape_html(value)
        );
    }

    fn close(self) {
        self.out.push_str("</table>\n");
    }
}

/// Render the proposal document with the five fixed sections.
pub fn render_report(
    result: &CalculationResult,
    config: &ProjectionConfig,
    meta: &ReportMeta,
) -> String {
    let v = &result.inputs;
    let partner_pct = format_percent(config.partner_share_percent);
    let platform_pct = format_percent(config.platform_share_percent);
    let platform = escape_html(&meta.platform_name);
    let title = escape_html(&meta.title);

    let mut out = String::with_capacity(8 * 1024);
    let _ = write!(
        out,
        "<html>\n<head>\n<title>{title}</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n"
    );
    let _ = writeln!(out, "<h1>{title}</h1>");
    let _ = writeln!(out, "<p>Generated: {}</p>", meta.generated_on.format("%Y-%m-%d"));
    let _ = writeln!(
        out,
        "<p class=\"banner\"><strong>Revenue Share:</strong> Partner {partner_pct}% / {platform} {platform_pct}%</p>"
    );

    let mut t = Table::open(&mut out, "Venue Configuration");
    t.row(None, "Capacity", &format!("{} people", v.capacity));
    t.row(None, "Ticket Price", &format!("${} USD", v.ticket_price));
    t.row(None, "VIP Upgrade Price", &format!("${} USD", v.vip_price));
    t.row(None, "Days per Week", &v.days_per_week.to_string());
    t.row(None, "Shows per Day", &v.shows_per_day.to_string());
    t.row(None, "Expected Occupancy", &format!("{}%", format_percent(v.occupancy)));
    let corporate = if v.corporate_events {
        format!("Yes ({} pax/week)", config.corporate_weekly_pax)
    } else {
        "No".to_string()
    };
    t.row(None, "Corporate Events", &corporate);
    t.close();

    let w = &result.weekly_revenue;
    let mut t = Table::open(&mut out, "Weekly Revenue Breakdown");
    t.row(None, "Ticket Sales", &format_currency(w.ticket));
    t.row(
        None,
        &format!("VIP Upgrades ({}%)", format_percent(config.vip_conversion_rate)),
        &format_currency(w.vip),
    );
    t.row(
        None,
        &format!("Merchandise ({}%)", format_percent(v.merch_conversion)),
        &format_currency(w.merch),
    );
    t.row(
        None,
        &format!(
            "Concessions/Afterparty ({}%)",
            format_percent(config.concessions_conversion_rate)
        ),
        &format_currency(w.concessions),
    );
    t.row(
        None,
        &format!("Photobooth ({}%)", format_percent(config.photobooth_conversion_rate)),
        &format_currency(w.photobooth),
    );
    if v.corporate_events {
        t.row(None, "Corporate Events", &format_currency(w.corporate));
    }
    t.row(Some("total-row"), "Total Weekly Revenue", &format_currency(w.gross));
    t.close();

    let c = &result.weekly_costs;
    let mut t = Table::open(&mut out, "Weekly Operating Costs");
    t.row(
        None,
        &format!(
            "Masks ({}% replacement @ ${:.2}/ea)",
            format_percent(v.mask_replacement),
            config.mask_cost_per_unit
        ),
        &format_currency(c.mask),
    );
    t.row(
        None,
        &format!(
            "Costumes ({}% replacement @ ${:.2}/ea)",
            format_percent(v.costume_replacement),
            config.costume_cost_per_unit
        ),
        &format_currency(c.costume),
    );
    t.row(
        None,
        &format!(
            "Staff (1 per {} people @ ${}/day)",
            config.staff_ratio, config.staff_cost_per_day
        ),
        &format_currency(c.staff),
    );
    t.row(None, "Management (producer + 2 techs)", &format_currency(c.management));
    t.row(
        None,
        &format!(
            "Marketing ({}% of ticket revenue)",
            format_percent(config.marketing_percent)
        ),
        &format_currency(c.marketing),
    );
    t.row(None, "Insurance & Miscellaneous", &format_currency(c.insurance));
    t.row(Some("total-row"), "Total Weekly Costs", &format_currency(c.total));
    t.close();

    let mut t = Table::open(&mut out, "Revenue Share (Monthly)");
    t.row(None, "Monthly Gross Revenue", &format_currency(result.monthly_gross_revenue));
    t.row(
        None,
        "Monthly Operating Costs",
        &format_currency(result.monthly_operating_costs),
    );
    t.row(
        Some("highlight"),
        &format!("Partner Share ({partner_pct}% of profit)"),
        &format_currency(result.monthly_partner_share),
    );
    t.row(
        None,
        &format!("{} Share ({platform_pct}% of gross)", meta.platform_name),
        &format_currency(result.monthly_platform_share),
    );
    t.close();

    let mut t = Table::open(&mut out, "Annual Projections");
    t.row(
        Some("highlight"),
        "Partner Annual Revenue",
        &format_currency(result.annual_partner_revenue),
    );
    t.row(
        None,
        &format!("{} Annual Revenue", meta.platform_name),
        &format_currency(result.annual_platform_revenue),
    );
    t.close();

    out.push_str(
        "<p class=\"note\"><em>This is a preliminary projection based on the assumptions above. \
         Final terms subject to negotiation. Venue rent is not included as the partner provides \
         the space.</em></p>\n</body>\n</html>\n",
    );
    out
}

/// Render the report and write it to `path`, creating parent directories.
pub fn export_report(
    result: &CalculationResult,
    config: &ProjectionConfig,
    meta: &ReportMeta,
    path: &Path,
) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_report(result, config, meta))?;
    info!(path = %path.display(), "report exported");
    Ok(())
}
