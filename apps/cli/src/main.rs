#![deny(warnings)]

//! Headless host shell for the venue projection calculator.
//!
//! Plays the part of the scenarios page: gathers raw control values, runs a
//! synchronous recompute, and hands the published result to the display,
//! chart, and report consumers.

use anyhow::{bail, Context, Result};
use proj_core::{
    validate_config, CalculationResult, InputSnapshot, Locale, MonthlySeries, ProjectionConfig,
};
use proj_engine::{collect_with_defaults, project_12_months, Calculator, ProjectionSink};
use proj_report::{
    bind_results, chart_data, export_report, format_axis_tick, tooltip_label, ChartData, ReportMeta,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: venue-calc [--config FILE] [--input FILE] [--set KEY=VALUE]... \
[--lang en|zh] [--prefs FILE] [--export FILE] [--chart-json FILE] [--json] [--watch] [--version]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    input: Option<PathBuf>,
    sets: BTreeMap<String, String>,
    lang: Option<Locale>,
    prefs: Option<PathBuf>,
    export: Option<PathBuf>,
    chart_json: Option<PathBuf>,
    json: bool,
    watch: bool,
    version: bool,
}

fn split_pair(pair: &str) -> Result<(String, String)> {
    match pair.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.trim().to_string())),
        _ => bail!("expected KEY=VALUE, got {pair:?}"),
    }
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut out = Args::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        let mut value = |flag: &str| it.next().with_context(|| format!("{flag} needs a value"));
        match arg.as_str() {
            "--config" => out.config = Some(value("--config")?.into()),
            "--input" => out.input = Some(value("--input")?.into()),
            "--set" => {
                let (k, v) = split_pair(&value("--set")?)?;
                out.sets.insert(k, v);
            }
            "--lang" => out.lang = Some(value("--lang")?.parse()?),
            "--prefs" => out.prefs = Some(value("--prefs")?.into()),
            "--export" => out.export = Some(value("--export")?.into()),
            "--chart-json" => out.chart_json = Some(value("--chart-json")?.into()),
            "--json" => out.json = true,
            "--watch" => out.watch = true,
            "--version" => out.version = true,
            other => warn!(arg = other, "ignoring unknown argument"),
        }
    }
    Ok(out)
}

fn load_config(path: Option<&Path>) -> Result<ProjectionConfig> {
    let cfg: ProjectionConfig = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_yaml::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ProjectionConfig::default(),
    };
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Overlay the keys of a snapshot file on the config-derived defaults.
fn merge_snapshot(text: &str, cfg: &ProjectionConfig) -> Result<InputSnapshot> {
    let mut base = serde_yaml::to_value(InputSnapshot::defaults_for(cfg))?;
    let patch = if text.trim().is_empty() {
        serde_yaml::Value::Null
    } else {
        serde_yaml::from_str(text)?
    };
    match patch {
        serde_yaml::Value::Null => {}
        serde_yaml::Value::Mapping(patch) => {
            if let serde_yaml::Value::Mapping(fields) = &mut base {
                fields.extend(patch);
            }
        }
        other => bail!("expected a mapping of input values, got {other:?}"),
    }
    Ok(serde_yaml::from_value(base)?)
}

/// Snapshot file values are fractions already; YAML also accepts JSON.
fn load_base_snapshot(path: Option<&Path>, cfg: &ProjectionConfig) -> Result<InputSnapshot> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading input {}", path.display()))?;
            merge_snapshot(&text, cfg).with_context(|| format!("parsing input {}", path.display()))
        }
        None => Ok(InputSnapshot::defaults_for(cfg)),
    }
}

fn resolve_locale(requested: Option<Locale>, prefs_path: &Path) -> Locale {
    match requested {
        Some(lang) => {
            let prefs = persistence::Preferences { lang };
            if let Err(e) = persistence::save_preferences(prefs_path, &prefs) {
                warn!(error = %e, "could not save language preference");
            }
            lang
        }
        None => persistence::load_preferences(prefs_path).lang,
    }
}

#[derive(Serialize)]
struct JsonView<'a> {
    result: &'a CalculationResult,
    series: MonthlySeries,
}

/// First month holding the highest value of each dataset.
fn peaks(chart: &ChartData) -> Vec<(&str, &str, i64)> {
    chart
        .datasets
        .iter()
        .filter_map(|ds| {
            let mut best: Option<(&str, i64)> = None;
            for (month, v) in chart.labels.iter().zip(&ds.data) {
                if best.map_or(true, |(_, b)| *v > b) {
                    best = Some((month.as_str(), *v));
                }
            }
            best.map(|(month, v)| (ds.label.as_str(), month, v))
        })
        .collect()
}

/// Prints the result cards and the seasonal series.
struct TerminalView {
    locale: Locale,
    json: bool,
}

impl TerminalView {
    fn render(&self, config: &ProjectionConfig, result: &CalculationResult) -> Result<String> {
        let series = project_12_months(result, config, self.locale);
        if self.json {
            return Ok(serde_json::to_string_pretty(&JsonView { result, series })?);
        }
        let mut lines = Vec::new();
        for (slot, text) in bind_results(result, self.locale) {
            lines.push(format!("{:<24} {}", slot.caption(self.locale), text));
        }
        let chart = chart_data(&series, self.locale);
        lines.push(String::new());
        lines.push(format!("{:<8}{}", "", chart.labels.join("\t")));
        for ds in &chart.datasets {
            let row: Vec<String> = ds.data.iter().map(|v| v.to_string()).collect();
            lines.push(format!("{:<8}{}", ds.label, row.join("\t")));
        }
        let values = chart.datasets.iter().flat_map(|ds| ds.data.iter().copied());
        let lo = values.clone().min().unwrap_or(0).min(0);
        let hi = values.max().unwrap_or(0);
        lines.push(format!(
            "axis {} .. {}",
            format_axis_tick(lo as f64),
            format_axis_tick(hi as f64)
        ));
        for (label, month, v) in peaks(&chart) {
            lines.push(format!("peak {month}  {}", tooltip_label(label, v)));
        }
        Ok(lines.join("\n"))
    }
}

impl ProjectionSink for TerminalView {
    fn on_projection(&mut self, config: &ProjectionConfig, result: &CalculationResult) {
        match self.render(config, result) {
            Ok(text) => println!("{text}"),
            Err(e) => warn!(error = %e, "could not render result"),
        }
    }
}

/// Rewrites the printable report after each recompute. Failures are logged.
struct ReportExporter {
    path: PathBuf,
}

impl ProjectionSink for ReportExporter {
    fn on_projection(&mut self, config: &ProjectionConfig, result: &CalculationResult) {
        if let Err(e) = export_report(result, config, &ReportMeta::today(), &self.path) {
            warn!(path = %self.path.display(), error = %e, "report export skipped");
        }
    }
}

/// Rewrites the chart payload after each recompute. Failures are logged.
struct ChartExporter {
    path: PathBuf,
    locale: Locale,
}

impl ChartExporter {
    fn write(&self, config: &ProjectionConfig, result: &CalculationResult) -> Result<()> {
        let series = project_12_months(result, config, self.locale);
        let json = chart_data(&series, self.locale).to_json()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl ProjectionSink for ChartExporter {
    fn on_projection(&mut self, config: &ProjectionConfig, result: &CalculationResult) {
        if let Err(e) = self.write(config, result) {
            warn!(path = %self.path.display(), error = %e, "chart export skipped");
        }
    }
}

/// Apply one `key=value` line from the watch stream. Returns false on `quit`.
fn apply_change(line: &str, sets: &mut BTreeMap<String, String>) -> Result<bool> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(true);
    }
    if line == "quit" || line == "exit" {
        return Ok(false);
    }
    let (k, v) = split_pair(line)?;
    sets.insert(k, v);
    Ok(true)
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1)).context(USAGE)?;
    if args.version {
        println!(
            "venue-calc {} ({} {})",
            env!("CARGO_PKG_VERSION"),
            env!("GIT_SHA"),
            env!("BUILD_DATE")
        );
        return Ok(());
    }
    info!(config = ?args.config, input = ?args.input, watch = args.watch, "starting CLI");

    let cfg = load_config(args.config.as_deref())?;
    let base = load_base_snapshot(args.input.as_deref(), &cfg)?;
    let prefs_path = args.prefs.clone().unwrap_or_else(persistence::default_prefs_path);
    let locale = resolve_locale(args.lang, &prefs_path);

    let mut view = TerminalView {
        locale,
        json: args.json,
    };
    let mut report = args.export.clone().map(|path| ReportExporter { path });
    let mut chart = args
        .chart_json
        .clone()
        .map(|path| ChartExporter { path, locale });

    let mut calc = Calculator::new(cfg);
    let mut sets = args.sets;
    loop {
        let snapshot = collect_with_defaults(&sets, &base);
        let mut sinks: Vec<&mut dyn ProjectionSink> = vec![&mut view];
        if let Some(r) = report.as_mut() {
            sinks.push(r);
        }
        if let Some(c) = chart.as_mut() {
            sinks.push(c);
        }
        calc.recompute_and_notify(&snapshot, &mut sinks);

        if !args.watch {
            break;
        }
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            break;
        }
        match apply_change(&line, &mut sets) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => warn!(error = %e, "ignoring input line"),
        }
    }

    if let Some(last) = calc.last() {
        info!(
            capacity = last.inputs.capacity,
            breakeven = last.breakeven.as_sentinel(),
            "done"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_flags_and_sets() {
        let a = args(&[
            "--set",
            "capacity=180",
            "--set",
            "occupancy = 85",
            "--lang",
            "zh",
            "--json",
            "--export",
            "out/report.html",
        ])
        .unwrap();
        assert_eq!(a.sets.get("capacity").map(String::as_str), Some("180"));
        assert_eq!(a.sets.get("occupancy").map(String::as_str), Some("85"));
        assert_eq!(a.lang, Some(Locale::Zh));
        assert!(a.json);
        assert_eq!(a.export, Some(PathBuf::from("out/report.html")));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(args(&["--set", "nonsense"]).is_err());
        assert!(args(&["--lang", "fr"]).is_err());
        assert!(args(&["--config"]).is_err());
    }

    #[test]
    fn unknown_flags_are_ignored() {
        assert_eq!(args(&["--frobnicate"]).unwrap(), Args::default());
    }

    #[test]
    fn watch_lines() {
        let mut sets = BTreeMap::new();
        assert!(apply_change("capacity=120\n", &mut sets).unwrap());
        assert!(apply_change("   ", &mut sets).unwrap());
        assert!(!apply_change("quit", &mut sets).unwrap());
        assert!(apply_change("oops", &mut sets).is_err());
        assert_eq!(sets.len(), 1);
    }

    #[test]
    fn raw_sets_override_snapshot_file_values() {
        let base = InputSnapshot {
            capacity: 400,
            ..InputSnapshot::default()
        };
        let mut sets = BTreeMap::new();
        sets.insert("occupancy".to_string(), "50".to_string());
        let snap = collect_with_defaults(&sets, &base);
        assert_eq!(snap.capacity, 400);
        assert_eq!(snap.occupancy, 0.5);
    }

    #[test]
    fn terminal_view_lists_every_card() {
        let cfg = ProjectionConfig::default();
        let result = proj_engine::project(&InputSnapshot::default(), &cfg);
        let view = TerminalView {
            locale: Locale::En,
            json: false,
        };
        let text = view.render(&cfg, &result).unwrap();
        assert!(text.contains("300 m²"));
        assert!(text.contains("3 months"));
        assert!(text.contains("Gross Revenue"));
        assert!(text.contains("axis $0K .. $407K"));
        assert!(text.contains("peak Jun  Gross Revenue: $406,639"));
        assert!(text.contains("peak Jun  Partner Share: $205,743"));
        let json = TerminalView {
            locale: Locale::En,
            json: true,
        }
        .render(&cfg, &result)
        .unwrap();
        assert!(json.contains("\"breakeven\": 3"));
    }

    #[test]
    fn snapshot_file_keeps_configured_prices() {
        let cfg = ProjectionConfig {
            base_ticket_price: 40.0,
            vip_upgrade_price: 60.0,
            ..ProjectionConfig::default()
        };
        let snap = merge_snapshot("capacity: 400\noccupancy: 0.5\n", &cfg).unwrap();
        assert_eq!(snap.capacity, 400);
        assert_eq!(snap.occupancy, 0.5);
        assert_eq!(snap.ticket_price, 40.0);
        assert_eq!(snap.vip_price, 60.0);
        assert_eq!(merge_snapshot("", &cfg).unwrap(), InputSnapshot::defaults_for(&cfg));
        let explicit = merge_snapshot(r#"{"ticketPrice": 25}"#, &cfg).unwrap();
        assert_eq!(explicit.ticket_price, 25.0);
        assert!(merge_snapshot("- 1\n- 2\n", &cfg).is_err());
    }

    #[test]
    fn chart_export_creates_missing_directories() {
        let dir = std::env::temp_dir().join(format!("venue-calc-chart-{}", std::process::id()));
        let path = dir.join("out").join("chart.json");
        let cfg = ProjectionConfig::default();
        let result = proj_engine::project(&InputSnapshot::default(), &cfg);
        let mut exporter = ChartExporter {
            path: path.clone(),
            locale: Locale::En,
        };
        exporter.on_projection(&cfg, &result);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"datasets\""));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn default_config_loads_without_file() {
        assert_eq!(load_config(None).unwrap(), ProjectionConfig::default());
    }
}
