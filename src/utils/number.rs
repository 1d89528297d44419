//! Lenient numeric reads for backend payloads.
//!
//! Amounts arrive as JSON numbers or as decimal strings depending on the
//! endpoint. Anything that does not parse to a finite number is absent.

use rust_decimal::prelude::*;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::json_converter::value_to_short_string;

pub fn amount(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Missing or malformed amounts count as zero.
pub fn amount_or_zero(value: Option<&Value>) -> f64 {
    value.and_then(amount).unwrap_or(0.0)
}

/// Money math runs in `Decimal`; `f64` is only the wire format.
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

pub fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(amount_or_zero(raw.as_ref()))
}

pub fn lenient_opt_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(amount))
}

/// Counts such as months or quantities; negative or fractional input is rejected.
pub fn lenient_opt_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(amount)
        .filter(|v| *v >= 0.0 && v.fract() == 0.0 && *v <= u32::MAX as f64)
        .map(|v| v as u32))
}

/// Identifiers come back as numbers from some endpoints and strings from others.
pub fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .map(value_to_short_string)
        .filter(|s| !s.is_empty()))
}
