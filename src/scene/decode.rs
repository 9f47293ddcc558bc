//! Lenient decoding helpers for editor-authored JSON.
//!
//! Scene data comes from an editor store that may be older or newer than this
//! crate, so every helper here maps unexpected shapes to a default instead of
//! failing the whole document.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::foundation::core::Point;

/// Read a number from a JSON number or a numeric string.
pub(crate) fn number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Read a point from `{ "x": .., "y": .. }` or `[x, y]`.
pub(crate) fn point(v: &Value) -> Option<Point> {
    match v {
        Value::Object(o) => Some(Point::new(number(o.get("x")?)?, number(o.get("y")?)?)),
        Value::Array(a) if a.len() >= 2 => Some(Point::new(number(&a[0])?, number(&a[1])?)),
        _ => None,
    }
}

/// Read a list of points, skipping malformed entries.
pub(crate) fn points(v: &Value) -> Vec<Point> {
    v.as_array()
        .map(|a| a.iter().filter_map(point).collect())
        .unwrap_or_default()
}

pub(crate) fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(number(&v).unwrap_or(0.0))
}

pub(crate) fn duration_secs<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(number(&v).unwrap_or(crate::scene::model::DEFAULT_DURATION_SECS))
}

pub(crate) fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(number(&v))
}

pub(crate) fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

pub(crate) fn object_map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::Object(o) => o,
        _ => Map::new(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/decode.rs"]
mod tests;
