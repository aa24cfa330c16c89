//! Raw price values, the per-fetch name→price map, and price rendering.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use serde_json::Value;

use crate::category::PriceStyle;

/// Rendered in place of a price that is neither numeric nor meaningful text.
pub const UNKNOWN_PRICE: &str = "نامشخص";

/// A price exactly as the upstream feed sent it. Never JSON `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceValue(Value);

impl PriceValue {
    /// Wraps a raw JSON value; `null` is the only rejected value.
    pub fn from_json(value: Value) -> Option<Self> {
        if value.is_null() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    /// Whether the raw value counts as present for display purposes.
    pub fn is_truthy(&self) -> bool {
        is_truthy(&self.0)
    }

    /// Whole-number interpretation: integers as-is, floats truncated toward
    /// zero, booleans as 1/0, and strings holding an optionally signed run
    /// of decimal digits (surrounding whitespace ignored).
    pub fn as_whole(&self) -> Option<WholeNumber> {
        match &self.0 {
            Value::Bool(flag) => {
                let digit = if *flag { "1" } else { "0" };
                Some(WholeNumber::from_digits(false, digit))
            }
            Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    let digits = value.unsigned_abs().to_string();
                    Some(WholeNumber::from_digits(value < 0, &digits))
                } else if let Some(value) = number.as_u64() {
                    Some(WholeNumber::from_digits(false, &value.to_string()))
                } else {
                    let value = number.as_f64()?.trunc();
                    let rendered = format!("{:.0}", value.abs());
                    Some(WholeNumber::from_digits(value < 0.0, &rendered))
                }
            }
            Value::String(text) => WholeNumber::parse(text),
            Value::Array(_) | Value::Object(_) | Value::Null => None,
        }
    }

    /// Floating-point interpretation, accepting numeric strings including
    /// exponents, `inf` and `nan`.
    pub fn as_float(&self) -> Option<f64> {
        match &self.0 {
            Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            Value::Number(number) => number.as_f64(),
            Value::String(text) => {
                let normalized = normalize_digits(text.trim());
                if normalized.is_empty() || normalized.contains('_') {
                    return None;
                }
                normalized.parse::<f64>().ok()
            }
            Value::Array(_) | Value::Object(_) | Value::Null => None,
        }
    }

    /// Text shown when the value cannot be parsed for its category.
    pub fn fallback_text(&self) -> String {
        if !self.is_truthy() {
            return String::from(UNKNOWN_PRICE);
        }
        match &self.0 {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }

    /// Renders the value with the category's style.
    pub fn render(&self, style: PriceStyle) -> RenderedPrice {
        let parsed = match style {
            PriceStyle::Integer => self.as_whole().map(|whole| whole.to_grouped()),
            PriceStyle::Decimal => self.as_float().map(format_decimal),
        };
        match parsed {
            Some(text) => RenderedPrice::Formatted(text),
            None => RenderedPrice::Fallback(self.fallback_text()),
        }
    }
}

impl Display for PriceValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Value::String(text) => f.write_str(text),
            other => write!(f, "{other}"),
        }
    }
}

/// JSON truthiness: `null`, `false`, zero, and empty strings, arrays and
/// objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Result of rendering a price for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedPrice {
    Formatted(String),
    /// The value did not parse; holds the textual fallback.
    Fallback(String),
}

impl RenderedPrice {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Formatted(text) | Self::Fallback(text) => text,
        }
    }

    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Arbitrary-size whole number kept as canonical decimal digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WholeNumber {
    negative: bool,
    digits: String,
}

impl WholeNumber {
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = normalize_digits(input.trim());
        let (negative, digits) = match normalized.as_bytes().first() {
            Some(b'-') => (true, &normalized[1..]),
            Some(b'+') => (false, &normalized[1..]),
            _ => (false, normalized.as_str()),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self::from_digits(negative, digits))
    }

    fn from_digits(negative: bool, digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            return Self {
                negative: false,
                digits: String::from("0"),
            };
        }
        Self {
            negative,
            digits: trimmed.to_owned(),
        }
    }

    /// Decimal digits with `,` between each group of three.
    pub fn to_grouped(&self) -> String {
        let grouped = group_thousands(&self.digits);
        if self.negative {
            format!("-{grouped}")
        } else {
            grouped
        }
    }
}

/// Inserts `,` separators into a run of ASCII digits.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Shortest round-trip rendering with thousands separators. Integral values
/// keep a trailing `.0`; magnitudes of at least 1e16 or below 1e-4 use
/// exponent notation (`1e+16`, `1.5e-05`).
pub fn format_decimal(value: f64) -> String {
    if value.is_nan() {
        return String::from("nan");
    }
    if value.is_infinite() {
        return String::from(if value < 0.0 { "-inf" } else { "inf" });
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return format_exponent(value);
    }

    let plain = format!("{}", magnitude);
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (plain.as_str(), "0"),
    };
    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{sign}{}.{frac_part}", group_thousands(int_part))
}

fn format_exponent(value: f64) -> String {
    let raw = format!("{:e}", value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
        }
        None => raw,
    }
}

/// Maps Persian and Arabic-Indic digits to ASCII.
fn normalize_digits(input: &str) -> String {
    input
        .chars()
        .map(|ch| match ch {
            '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (ch as u32 - 0x06F0) as u8),
            '\u{0660}'..='\u{0669}' => char::from(b'0' + (ch as u32 - 0x0660) as u8),
            other => other,
        })
        .collect()
}

/// Name→price mapping for one category of one fetch.
///
/// Iteration follows first-insertion order; inserting an existing name
/// replaces its price in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceMap {
    entries: Vec<(String, PriceValue)>,
    index: HashMap<String, usize>,
}

impl PriceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, price: PriceValue) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&position) => self.entries[position].1 = price,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, price));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&PriceValue> {
        self.index.get(name).map(|&position| &self.entries[position].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PriceValue)> {
        self.entries.iter().map(|(name, price)| (name.as_str(), price))
    }
}
