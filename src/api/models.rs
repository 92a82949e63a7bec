//! Data model for the product record served by the API.

use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// A product as returned by the endpoint.
///
/// Every field is optional. Unknown fields (`id`, `brand`, `quantity`, ...)
/// are ignored and a missing or `null` field decodes to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// Image URL
    pub image: Option<FieldValue>,
    /// Product title
    pub name: Option<FieldValue>,
    /// Long description
    pub description: Option<FieldValue>,
    /// Price, either a JSON number or a numeric string
    pub price: Option<FieldValue>,
}

impl Product {
    /// Decodes a response body.
    ///
    /// Invalid JSON is a parse error and a literal `null` body is a fault.
    /// Any other non-object JSON value yields a product with no fields.
    pub fn from_json(body: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(body)?;

        match value {
            Value::Null => Err(LoadError::NullBody),
            Value::Object(_) => Ok(serde_json::from_value(value)?),
            _ => Ok(Self::default()),
        }
    }
}

/// A loosely-typed field value.
///
/// The API does not guarantee field types, so whatever JSON shape arrives is
/// kept and stringified on render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(Number),
    Flag(bool),
    Other(Value),
}

impl FieldValue {
    /// Returns false for empty strings, zero, `false` and null.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Number(n) => number_is_truthy(n),
            FieldValue::Flag(b) => *b,
            FieldValue::Other(v) => !v.is_null(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => f.write_str(&format_number(n)),
            FieldValue::Flag(b) => write!(f, "{}", b),
            FieldValue::Other(v) => f.write_str(&stringify(v)),
        }
    }
}

fn number_is_truthy(n: &Number) -> bool {
    n.as_f64().is_some_and(|v| v != 0.0)
}

/// Formats a number the way a browser would print it: no trailing `.0` on
/// whole values, no negative zero, and exponent notation outside
/// `1e-6 <= |v| < 1e21`.
fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }

    match n.as_f64() {
        Some(v) if v == 0.0 => "0".to_string(),
        Some(v) if v.abs() >= 1e21 || v.abs() < 1e-6 => format_exponent(v),
        Some(v) if v.fract() == 0.0 => format!("{:.0}", v),
        Some(v) => v.to_string(),
        None => n.to_string(),
    }
}

fn format_exponent(v: f64) -> String {
    let s = format!("{:e}", v);
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => s,
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => s.clone(),
        // Arrays join their items with commas; null items become empty.
        Value::Array(items) => items
            .iter()
            .map(|item| if item.is_null() { String::new() } else { stringify(item) })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
