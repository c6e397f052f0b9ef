//! Lenient field decoding for form submissions.
//!
//! Form controls hand over whatever the browser produced: numbers as
//! strings, checkboxes as `"on"`, single selections as a bare string. These
//! helpers accept any JSON value and fall back to the field's default when
//! the value cannot be read. None of them ever return an error for a value
//! that is valid JSON.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Non-negative integer that saturates at `u32::MAX`
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(u32::try_from(integer_from_value(&value)).unwrap_or(u32::MAX))
}

/// Non-negative monetary amount in whole units
pub fn amount<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(integer_from_value(&value))
}

/// Checkbox-style boolean
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(flag_from_value(&value))
}

/// List of labels; a bare string counts as a one-element list
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(list_from_value(&value))
}

pub fn integer_from_value(value: &Value) -> u64 {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u
            } else {
                match n.as_f64() {
                    // `as` saturates at u64::MAX
                    Some(f) if f.is_finite() && f > 0.0 => f.trunc() as u64,
                    _ => 0,
                }
            }
        }
        Value::String(s) => parse_leading_integer(s),
        _ => 0,
    }
}

/// Read the integer prefix of `text` the way a browser's `parseInt` does:
/// leading whitespace and an optional sign are skipped, digits are read up
/// to the first non-digit. Negative or digit-less input yields 0.
pub fn parse_leading_integer(text: &str) -> u64 {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: &str = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest, |end| &rest[..end]);

    if negative || digits.is_empty() {
        return 0;
    }

    // Only overflow can fail here
    digits.parse().unwrap_or(u64::MAX)
}

pub fn flag_from_value(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "on" | "yes" | "oui" | "1"
        ),
        _ => false,
    }
}

pub fn list_from_value(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Value::String(s) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}
