//! Line-chart datasets for the 12-month projection.

use crate::format::group_thousands;
use crate::ReportError;
use proj_core::{Locale, MonthlySeries};
use serde::Serialize;

/// One line of the chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<i64>,
    pub border_color: &'static str,
    pub background_color: &'static str,
}

/// Chart payload: month labels plus gross, partner, and platform lines.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

impl ChartData {
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn dataset_labels(locale: Locale) -> [&'static str; 3] {
    match locale {
        Locale::En => ["Gross Revenue", "Partner Share", "Platform Share"],
        Locale::Zh => ["总收入", "合作伙伴分成", "平台分成"],
    }
}

/// Build chart datasets from a seasonal series.
pub fn chart_data(series: &MonthlySeries, locale: Locale) -> ChartData {
    let [gross, partner, platform] = dataset_labels(locale);
    ChartData {
        labels: series.labels.to_vec(),
        datasets: vec![
            ChartDataset {
                label: gross.to_string(),
                data: series.gross.to_vec(),
                border_color: "#ffffff",
                background_color: "rgba(255, 255, 255, 0.1)",
            },
            ChartDataset {
                label: partner.to_string(),
                data: series.partner_share.to_vec(),
                border_color: "#22c55e",
                background_color: "rgba(34, 197, 94, 0.1)",
            },
            ChartDataset {
                label: platform.to_string(),
                data: series.platform_share.to_vec(),
                border_color: "#737373",
                background_color: "rgba(115, 115, 115, 0.1)",
            },
        ],
    }
}

/// Hover text for one data point, e.g. `Gross Revenue: $406,639`.
pub fn tooltip_label(dataset_label: &str, value: i64) -> String {
    format!("{dataset_label}: ${}", group_thousands(i128::from(value)))
}
