use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

/// A callback payload after base64 and JSON decoding, with keys normalized
/// to lowercase so downstream lookups are exact-key.
#[derive(Debug, Default)]
pub struct Payload {
    fields: Map<String, Value>,
}

impl Payload {
    /// Decodes a base64 JSON payload, recovering any failure into an empty
    /// payload. Callers only reach this after signature verification, so a
    /// payload that does not decode is a gateway-side anomaly on an
    /// authentic message: logged, never raised.
    pub fn from_base64(data: &str) -> Self {
        match decode_object(data) {
            Some(fields) => Self {
                fields: normalize_keys(fields),
            },
            None => {
                tracing::warn!("signed payload is not a base64 JSON object, decoding as empty");
                Self::default()
            }
        }
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String value of a field. Bare numbers are rendered to their JSON
    /// text, since the gateway is inconsistent about quoting; null and
    /// composite values count as absent.
    pub fn str_field(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Decimal value of a field, quoted or bare.
    pub fn decimal_field(&self, key: &str) -> Option<Decimal> {
        match self.get(key)? {
            Value::String(s) => Decimal::from_str(s.trim()).ok(),
            Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
            _ => None,
        }
    }

    /// String value with the falsy rule: absent, `null` and `false` take
    /// the default; anything else is honored as sent, including `""`.
    pub fn str_field_or(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(value) if truthy(value) => match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
            _ => default.to_string(),
        }
    }

    /// Integer value with the falsy rule: absent, `null` and `false` take
    /// the default; an explicit `0` is honored as `0`.
    pub fn int_field_or(&self, key: &str, default: i64) -> i64 {
        match self.get(key) {
            Some(value) if truthy(value) => match value {
                Value::Number(n) => n.as_i64().unwrap_or(default),
                Value::String(s) => s.trim().parse().unwrap_or(default),
                _ => default,
            },
            _ => default,
        }
    }
}

fn decode_object(data: &str) -> Option<Map<String, Value>> {
    let bytes = BASE64.decode(data.trim()).ok()?;
    match serde_json::from_slice(&bytes).ok()? {
        Value::Object(fields) => Some(fields),
        _ => None,
    }
}

fn normalize_keys(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(key, value)| (key.to_ascii_lowercase(), value))
        .collect()
}

fn truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}
