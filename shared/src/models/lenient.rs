//! Forgiving field deserializers for records produced by AI extraction.
//!
//! A single malformed attribute must not reject the whole wine list, so
//! unknown values collapse to "absent" or to the store default instead.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a field, yielding `None` when it is missing, null, or not a
/// recognised value.
pub(crate) fn or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Deserialize a field, falling back to `T::default()` on anything
/// unrecognised.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(or_none(deserializer)?.unwrap_or_default())
}

/// Accept strings and numbers alike (`"2019"` and `2019` are the same vintage).
pub(crate) fn string_like<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Read a price from a number or a numeric string. Null, blank and
/// unparsable values read as zero, like a cleared cell in the review table.
pub(crate) fn price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let text = match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        _ => return Ok(Decimal::ZERO),
    };
    Ok(Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .unwrap_or(Decimal::ZERO))
}

/// Keep the non-blank strings of a list, trimmed. Anything that is not a
/// list reads as empty.
pub(crate) fn non_blank_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TasteLevel;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "or_none")]
        level: Option<TasteLevel>,
        #[serde(default, deserialize_with = "or_default")]
        fallback: TasteLevel,
        #[serde(default, deserialize_with = "string_like")]
        year: Option<String>,
        #[serde(default, deserialize_with = "price")]
        price: Decimal,
        #[serde(default, deserialize_with = "non_blank_strings")]
        notes: Vec<String>,
    }

    fn sample(json: &str) -> Sample {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_unknown_values_collapse() {
        let parsed = sample(r#"{"level": "extreme", "fallback": 7, "year": 2019}"#);
        assert_eq!(parsed.level, None);
        assert_eq!(parsed.fallback, TasteLevel::Medium);
        assert_eq!(parsed.year.as_deref(), Some("2019"));
    }

    #[test]
    fn test_missing_fields() {
        let parsed = sample("{}");
        assert_eq!(parsed.level, None);
        assert_eq!(parsed.year, None);
        assert_eq!(parsed.price, Decimal::ZERO);
        assert!(parsed.notes.is_empty());
    }

    #[test]
    fn test_price_reads_numbers_and_numeric_strings() {
        assert_eq!(sample(r#"{"price": 45}"#).price, Decimal::from(45));
        assert_eq!(sample(r#"{"price": 12.5}"#).price, Decimal::new(125, 1));
        assert_eq!(sample(r#"{"price": " 38 "}"#).price, Decimal::from(38));
        assert_eq!(sample(r#"{"price": "-4"}"#).price, Decimal::from(-4));
    }

    #[test]
    fn test_cleared_price_reads_as_zero() {
        for json in [
            r#"{"price": null}"#,
            r#"{"price": ""}"#,
            r#"{"price": "   "}"#,
            r#"{"price": "market"}"#,
            r#"{"price": true}"#,
            r#"{"price": [45]}"#,
        ] {
            assert_eq!(sample(json).price, Decimal::ZERO, "{}", json);
        }
    }

    #[test]
    fn test_blank_and_non_string_notes_are_dropped() {
        let parsed = sample(r#"{"notes": ["oak", " ", "", 7, " citrus "]}"#);
        assert_eq!(parsed.notes, vec!["oak", "citrus"]);
        assert!(sample(r#"{"notes": "oak"}"#).notes.is_empty());
    }
}
