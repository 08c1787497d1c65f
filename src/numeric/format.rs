//! Human-readable currency formatting.

use super::credits::Credits;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Short-scale suffixes; index is `floor(exponent / 3)`.
const SUFFIXES: [&str; 12] = [
    "", "K", "M", "B", "T", "Qa", "Qi", "Sx", "Sp", "Oc", "No", "Dc",
];

/// How large numbers are shown. Values below 1000 are always fixed-point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberFormat {
    /// `1.50K`, `12.00Qa`, scientific once the suffix table runs out.
    #[default]
    Suffix,
    /// `1.50e3`
    Scientific,
    /// `15.00e3`, exponent always a multiple of three.
    Engineering,
}

/// Formats a currency value for display.
pub fn format_credits(value: &Credits, format: NumberFormat) -> String {
    if value.exponent() < 3 {
        return format_fixed(value.to_f64());
    }
    let mantissa = value.mantissa().to_f64().unwrap_or(0.0);
    match format {
        NumberFormat::Suffix => format_suffix(mantissa, value.exponent()),
        NumberFormat::Scientific => format_scientific(mantissa, value.exponent()),
        NumberFormat::Engineering => format_engineering(mantissa, value.exponent()),
    }
}

/// Two decimals at most, trailing zeros trimmed.
fn format_fixed(value: f64) -> String {
    let text = format!("{:.2}", value);
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn format_suffix(mantissa: f64, exponent: i64) -> String {
    let mut tier = (exponent / 3) as usize;
    let mut scaled = round2(mantissa * 10f64.powi((exponent % 3) as i32));
    if scaled >= 1000.0 {
        scaled /= 1000.0;
        tier += 1;
    }
    match SUFFIXES.get(tier) {
        Some(suffix) => format!("{:.2}{}", scaled, suffix),
        None => format_scientific(mantissa, exponent),
    }
}

fn format_scientific(mantissa: f64, exponent: i64) -> String {
    let mut m = round2(mantissa);
    let mut e = exponent;
    if m >= 10.0 {
        m /= 10.0;
        e += 1;
    }
    format!("{:.2}e{}", m, e)
}

fn format_engineering(mantissa: f64, exponent: i64) -> String {
    let mut e = exponent.div_euclid(3) * 3;
    let mut scaled = round2(mantissa * 10f64.powi((exponent - e) as i32));
    if scaled >= 1000.0 {
        scaled /= 1000.0;
        e += 3;
    }
    format!("{:.2}e{}", scaled, e)
}
