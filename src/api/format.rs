//! Label formatting supplied by the chart to its axes.
//!
//! Axes only call the formatter they are given; these helpers build the
//! defaults a chart installs based on the data's declared types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::axis::TickFormatter;
use crate::core::{DataType, TickValue};

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

const MINUTE_MS: f64 = 60_000.0;
const DAY_MS: f64 = 86_400_000.0;
const YEAR_MS: f64 = 365.0 * DAY_MS;

/// Rounds to `decimals` places and drops trailing zeros.
#[must_use]
pub fn clean_decimal(value: f64, decimals: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    match Decimal::from_f64_retain(value) {
        Some(decimal) => {
            let cleaned = decimal.round_dp(decimals).normalize();
            if cleaned.is_zero() {
                "0".to_owned()
            } else {
                cleaned.to_string()
            }
        }
        None => format!("{value}"),
    }
}

/// SI-prefixed number, e.g. `1500 -> "1.5k"`, keeping `decimals` places.
#[must_use]
pub fn format_si(value: f64, decimals: u32) -> String {
    if !value.is_finite() || value == 0.0 {
        return clean_decimal(value, decimals);
    }
    let exponent = (value.abs().log10() / 3.0).floor().clamp(-8.0, 8.0) as i32;
    let scaled = value / 10_f64.powi(exponent * 3);
    let mut text = clean_decimal(scaled, decimals);
    let mut exponent = exponent;
    // Rounding can carry into the next prefix (999.99k -> 1000k).
    if text.trim_start_matches('-') == "1000" && exponent < 8 {
        exponent += 1;
        text = if value < 0.0 { "-1" } else { "1" }.to_owned();
    }
    let prefix = SI_PREFIXES[(exponent + 8) as usize];
    format!("{text}{prefix}")
}

/// Fixed number of decimals, trailing zeros kept.
#[must_use]
pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Plain rendering below one thousand, SI prefixes above.
#[must_use]
pub fn format_compact(value: f64) -> String {
    if value.abs() >= 1_000.0 {
        format_si(value, 2)
    } else {
        clean_decimal(value, 2)
    }
}

/// Currency with thousands separators and two decimals, e.g. `-$1,234.50`.
#[must_use]
pub fn format_currency(value: f64, symbol: &str) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{fraction}")
}

/// strftime pattern suited to a visible span in milliseconds.
#[must_use]
pub fn date_pattern_for_span(span_ms: f64) -> &'static str {
    let span = span_ms.abs();
    if span <= 5.0 * MINUTE_MS {
        "%H:%M:%S"
    } else if span <= 2.0 * DAY_MS {
        "%H:%M"
    } else if span <= YEAR_MS / 2.0 {
        "%b %d"
    } else if span <= 5.0 * YEAR_MS {
        "%b %Y"
    } else {
        "%Y"
    }
}

/// Formats epoch milliseconds (UTC) with a strftime pattern.
#[must_use]
pub fn format_date(epoch_ms: f64, pattern: &str) -> Option<String> {
    if !epoch_ms.is_finite() {
        return None;
    }
    let dt = DateTime::<Utc>::from_timestamp_millis(epoch_ms.round() as i64)?;
    Some(dt.format(pattern).to_string())
}

/// Tick formatter for a time axis spanning `domain` (epoch milliseconds).
#[must_use]
pub fn time_tick_formatter(domain: (f64, f64)) -> TickFormatter {
    let pattern = date_pattern_for_span(domain.1 - domain.0);
    TickFormatter::new(move |value, _| match value {
        TickValue::Number(ms) => format_date(*ms, pattern).unwrap_or_else(|| value.default_label()),
        TickValue::Category { label, .. } => label.clone(),
    })
}

/// Default value formatter for a declared data type.
#[must_use]
pub fn value_formatter(data_type: Option<DataType>) -> TickFormatter {
    match data_type {
        Some(DataType::Currency) => TickFormatter::new(|value, _| match value.as_number() {
            Some(number) => format_currency(number, "$"),
            None => value.default_label(),
        }),
        _ => TickFormatter::new(|value, _| match value.as_number() {
            Some(number) => format_compact(number),
            None => value.default_label(),
        }),
    }
}
