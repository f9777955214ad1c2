//! Helpers shared across models
//!
//! Catalog producers are not consistent about numeric encoding: the same field
//! may arrive as `5`, `"5"` or `" 5 "` depending on the collector version.

use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;

/// Read a non-negative integer from a JSON number or a numeric string.
pub fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Read a controller id; ids outside `u32` are treated as absent.
pub fn value_as_u32(value: &Value) -> Option<u32> {
    value_as_u64(value).and_then(|id| u32::try_from(id).ok())
}

/// Read a string field, rendering numbers as their decimal form.
pub fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Serde adapter for `u64` fields that may be encoded as strings.
pub fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_as_u64(&value)
        .ok_or_else(|| D::Error::custom(format!("expected an unsigned integer, got {value}")))
}

/// Serde adapter for string fields where `null` means empty.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_string).unwrap_or_default())
}

/// Serde adapter for optional string fields that may be encoded as numbers.
pub fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_string))
}
