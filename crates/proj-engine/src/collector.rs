//! Input collection from raw UI values.
//!
//! Sliders report integers on a 0-100 scale for percentage fields; those are
//! divided by 100 here. Missing or digitless values fall back to defaults and
//! are never reported as errors. No range checks are applied.

use proj_core::InputSnapshot;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use tracing::debug;

/// Field keys as named by the host page controls.
pub mod keys {
    pub const CAPACITY: &str = "capacity";
    pub const TICKET_PRICE: &str = "ticketPrice";
    pub const DAYS_PER_WEEK: &str = "daysPerWeek";
    pub const SHOWS_PER_DAY: &str = "showsPerDay";
    pub const OCCUPANCY: &str = "occupancy";
    pub const COSTUME_REPLACEMENT: &str = "costumeReplacement";
    pub const MASK_REPLACEMENT: &str = "maskReplacement";
    pub const VIP_PRICE: &str = "vipPrice";
    pub const MERCH_CONVERSION: &str = "merchConversion";
    pub const CORPORATE_EVENTS: &str = "corporateEvents";

    /// Every recognised key.
    pub const ALL: [&str; 10] = [
        CAPACITY,
        TICKET_PRICE,
        DAYS_PER_WEEK,
        SHOWS_PER_DAY,
        OCCUPANCY,
        COSTUME_REPLACEMENT,
        MASK_REPLACEMENT,
        VIP_PRICE,
        MERCH_CONVERSION,
        CORPORATE_EVENTS,
    ];
}

/// Anything that can hand out the raw string value of a control.
pub trait InputSource {
    fn raw(&self, key: &str) -> Option<&str>;
}

impl<S: BuildHasher> InputSource for HashMap<String, String, S> {
    fn raw(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl InputSource for BTreeMap<String, String> {
    fn raw(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Collect a snapshot using the documented defaults.
pub fn collect(source: &dyn InputSource) -> InputSnapshot {
    collect_with_defaults(source, &InputSnapshot::default())
}

/// Collect a snapshot, substituting fields of `defaults` for absent values.
///
/// `defaults` is already in fraction form.
pub fn collect_with_defaults(source: &dyn InputSource, defaults: &InputSnapshot) -> InputSnapshot {
    let int = |key: &str, default: i64| -> i64 {
        match source.raw(key).and_then(parse_int_prefix) {
            Some(v) => v,
            None => {
                debug!(field = key, fallback = default, "input missing, using default");
                default
            }
        }
    };
    let amount = |key: &str, default: f64| -> f64 {
        match source.raw(key).and_then(parse_int_prefix) {
            Some(v) => v as f64,
            None => {
                debug!(field = key, fallback = default, "input missing, using default");
                default
            }
        }
    };
    let percent = |key: &str, default: f64| -> f64 {
        match source.raw(key).and_then(parse_int_prefix) {
            Some(v) => v as f64 / 100.0,
            None => {
                debug!(field = key, fallback = default, "input missing, using default");
                default
            }
        }
    };

    InputSnapshot {
        capacity: int(keys::CAPACITY, defaults.capacity),
        ticket_price: amount(keys::TICKET_PRICE, defaults.ticket_price),
        days_per_week: int(keys::DAYS_PER_WEEK, defaults.days_per_week),
        shows_per_day: int(keys::SHOWS_PER_DAY, defaults.shows_per_day),
        occupancy: percent(keys::OCCUPANCY, defaults.occupancy),
        costume_replacement: percent(keys::COSTUME_REPLACEMENT, defaults.costume_replacement),
        mask_replacement: percent(keys::MASK_REPLACEMENT, defaults.mask_replacement),
        vip_price: amount(keys::VIP_PRICE, defaults.vip_price),
        merch_conversion: percent(keys::MERCH_CONVERSION, defaults.merch_conversion),
        corporate_events: source
            .raw(keys::CORPORATE_EVENTS)
            .map_or(defaults.corporate_events, parse_flag),
    }
}

/// Leading-integer parse: skips leading whitespace, accepts one sign, then
/// takes decimal digits up to the first non-digit. `None` when no digit is
/// found. Out-of-range values saturate.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut value: i64 = 0;
    let mut seen = false;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        seen = true;
        let d = i64::from(b - b'0');
        value = value.saturating_mul(10).saturating_add(d);
    }
    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Checkbox-style flag. Unrecognised text is `false`.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "on" | "yes" | "checked"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proj_core::ProjectionConfig;

    fn source(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_source_yields_documented_defaults() {
        let snap = collect(&BTreeMap::<String, String>::new());
        assert_eq!(snap, InputSnapshot::default());
        assert_eq!(snap.capacity, 250);
        assert_eq!(snap.mask_replacement, 1.0);
        assert!(!snap.corporate_events);
    }

    #[test]
    fn percent_fields_are_scaled_to_fractions() {
        let snap = collect(&source(&[
            ("occupancy", "85"),
            ("costumeReplacement", "10"),
            ("maskReplacement", "50"),
            ("merchConversion", "40"),
        ]));
        assert_eq!(snap.occupancy, 0.85);
        assert_eq!(snap.costume_replacement, 0.10);
        assert_eq!(snap.mask_replacement, 0.50);
        assert_eq!(snap.merch_conversion, 0.40);
    }

    #[test]
    fn unparseable_values_fall_back() {
        let snap = collect(&source(&[
            ("capacity", "lots"),
            ("ticketPrice", ""),
            ("daysPerWeek", "  "),
            ("occupancy", "%"),
        ]));
        assert_eq!(snap.capacity, 250);
        assert_eq!(snap.ticket_price, 32.0);
        assert_eq!(snap.days_per_week, 4);
        assert_eq!(snap.occupancy, 0.70);
    }

    #[test]
    fn leading_integer_is_taken() {
        assert_eq!(parse_int_prefix("32.9"), Some(32));
        assert_eq!(parse_int_prefix("  180 people"), Some(180));
        assert_eq!(parse_int_prefix("+7"), Some(7));
        assert_eq!(parse_int_prefix("-12"), Some(-12));
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("x1"), None);
        assert_eq!(parse_int_prefix("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn out_of_range_values_pass_through() {
        let snap = collect(&source(&[
            ("capacity", "-40"),
            ("occupancy", "150"),
            ("daysPerWeek", "9"),
        ]));
        assert_eq!(snap.capacity, -40);
        assert_eq!(snap.occupancy, 1.5);
        assert_eq!(snap.days_per_week, 9);
    }

    #[test]
    fn corporate_flag_parsing() {
        assert!(collect(&source(&[("corporateEvents", "on")])).corporate_events);
        assert!(collect(&source(&[("corporateEvents", "TRUE")])).corporate_events);
        assert!(!collect(&source(&[("corporateEvents", "off")])).corporate_events);
        assert!(!collect(&source(&[("corporateEvents", "")])).corporate_events);
    }

    #[test]
    fn hash_map_source_and_config_defaults() {
        let mut map: HashMap<String, String> = HashMap::new();
        map.insert("capacity".into(), "120".into());
        let cfg = ProjectionConfig {
            base_ticket_price: 28.0,
            ..ProjectionConfig::default()
        };
        let snap = collect_with_defaults(&map, &InputSnapshot::defaults_for(&cfg));
        assert_eq!(snap.capacity, 120);
        assert_eq!(snap.ticket_price, 28.0);
    }

    #[test]
    fn key_list_is_complete() {
        let all = keys::ALL
            .iter()
            .map(|k| (*k, "1"))
            .collect::<Vec<_>>();
        let snap = collect(&source(&all));
        assert_eq!(snap.capacity, 1);
        assert_eq!(snap.vip_price, 1.0);
        assert_eq!(snap.merch_conversion, 0.01);
        assert!(snap.corporate_events);
    }
}
