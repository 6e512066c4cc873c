//! Tolerant field decoders.
//!
//! The backend is loose about types: amounts arrive as numbers or numeric
//! strings, ids as strings or integers, and any field may be `null`. These
//! helpers are used with `#[serde(deserialize_with = ...)]` on fields that
//! also carry `#[serde(default)]`, so a missing field never fails a decode.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Number or numeric string; anything else is `None`.
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_f64(&value))
}

/// Like [`number`] but missing values become `0.0`.
pub fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    number(deserializer).map(Option::unwrap_or_default)
}

/// Non-negative count; fractional or negative input is clamped.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = number(deserializer)?.unwrap_or_default();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = if value > 0.0 { value.trunc() as u64 } else { 0 };
    Ok(count)
}

/// String or number rendered as a string; `null` becomes empty.
pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    optional_string(deserializer).map(Option::unwrap_or_default)
}

/// String, or a number rendered as a string; `null` and other shapes are `None`.
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    })
}

/// Boolean; `null` is `false`, `"true"` and non-zero numbers are `true`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(flag) => flag,
        Value::String(text) => text.eq_ignore_ascii_case("true"),
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    })
}

/// Array of `T`; `null` or a non-array is empty, undecodable entries are skipped.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Probe {
        #[serde(deserialize_with = "number")]
        amount: Option<f64>,
        #[serde(deserialize_with = "count")]
        total: u64,
        #[serde(deserialize_with = "id")]
        id: String,
        #[serde(deserialize_with = "flag")]
        active: bool,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_numeric_strings_are_numbers() {
        assert_eq!(probe(r#"{"amount":"25.5"}"#).amount, Some(25.5));
        assert_eq!(probe(r#"{"amount":12}"#).amount, Some(12.0));
        assert_eq!(probe(r#"{"amount":"abc"}"#).amount, None);
        assert_eq!(probe(r#"{"amount":null}"#).amount, None);
        assert_eq!(probe("{}").amount, None);
    }

    #[test]
    fn test_counts_clamp() {
        assert_eq!(probe(r#"{"total":"7"}"#).total, 7);
        assert_eq!(probe(r#"{"total":-3}"#).total, 0);
        assert_eq!(probe(r#"{"total":null}"#).total, 0);
    }

    #[test]
    fn test_ids_accept_numbers() {
        assert_eq!(probe(r#"{"id":1001}"#).id, "1001");
        assert_eq!(probe(r#"{"id":"abc"}"#).id, "abc");
        assert_eq!(probe(r#"{"id":null}"#).id, "");
    }

    #[test]
    fn test_flags() {
        assert!(probe(r#"{"active":true}"#).active);
        assert!(!probe(r#"{"active":null}"#).active);
        assert!(probe(r#"{"active":"true"}"#).active);
        assert!(probe(r#"{"active":1}"#).active);
    }
}
