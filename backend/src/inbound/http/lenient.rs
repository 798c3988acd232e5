//! Lenient readers for loosely typed request fields.
//!
//! Clients of the user routes send scalars in whatever JSON type is at hand:
//! `"isActive": "false"`, a numeric `name`, or a `dob` in epoch milliseconds.
//! These readers coerce such scalars to the shape the domain expects and
//! reject arrays, objects and unrecognised flags as payload errors.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde::de::{self, Deserializer};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Read a string field, rendering numbers and booleans as text.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Bool(value) => value.to_string(),
        Scalar::Integer(value) => value.to_string(),
        Scalar::Float(value) => value.to_string(),
        Scalar::Text(value) => value,
    }))
}

/// Read a boolean flag.
///
/// Accepts `true`/`false`, `1`/`0` and the strings `"true"`, `"false"`,
/// `"1"`, `"0"`, `"yes"` and `"no"`.
pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(scalar) = Option::<Scalar>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let value = match scalar {
        Scalar::Bool(value) => Some(value),
        Scalar::Integer(1) => Some(true),
        Scalar::Integer(0) => Some(false),
        Scalar::Text(text) => match text.trim() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        Scalar::Integer(_) | Scalar::Float(_) => None,
    };
    value
        .map(Some)
        .ok_or_else(|| de::Error::custom("expected a boolean flag"))
}

/// Read a date of birth as text, turning epoch milliseconds into an RFC 3339
/// timestamp.
///
/// Text is passed through untouched; the domain validates its format.
pub fn date<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(scalar) = Option::<Scalar>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match scalar {
        Scalar::Text(text) => Ok(Some(text)),
        Scalar::Integer(millis) => DateTime::<Utc>::from_timestamp_millis(millis)
            .map(|stamp| Some(stamp.to_rfc3339_opts(SecondsFormat::Millis, true)))
            .ok_or_else(|| de::Error::custom(format!("timestamp {millis} is out of range"))),
        Scalar::Bool(_) | Scalar::Float(_) => Err(de::Error::custom(
            "expected a date string or epoch milliseconds",
        )),
    }
}
