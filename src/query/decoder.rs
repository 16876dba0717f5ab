//! ReQL response decoder.
//!
//! Maps raw wire values onto caller-requested native shapes. The engine is
//! driven by both sides: the wire value's physical shape and the target's
//! declared shape. Pseudo-type recognition runs first, regardless of the
//! requested target; a wire object carrying the reserved `$reql_type$`
//! discriminator is never surfaced as a plain field mapping.
//!
//! Two entry points share one tag-resolution routine:
//!
//! - [`decode_datum`] - the untyped path. Produces the structurally closest
//!   [`Datum`], with pseudo-types resolved into their rich variants
//!   (`Geometry`, `Time`, `Binary`).
//! - [`decode`] - the typed path. Rewrites tagged wire objects into
//!   serde-friendly plain forms, then deserializes into any
//!   `T: DeserializeOwned`. Unknown wire keys are ignored; callers opt into
//!   partial population with `#[serde(default)]`.

use crate::error::DecodeError;
use crate::reql::types::{
    PSEUDO_TYPE_BINARY, PSEUDO_TYPE_GEOMETRY, PSEUDO_TYPE_KEY, PSEUDO_TYPE_TIME,
};
use crate::reql::{Datum, Geometry, GeometryType};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::Bytes;
use chrono::{FixedOffset, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Decode a wire value into the untyped native model.
///
/// Pseudo-type objects resolve into rich variants; plain objects, arrays and
/// scalars decode structurally.
pub fn decode_datum(wire: &Value) -> Result<Datum, DecodeError> {
    match wire {
        Value::Null => Ok(Datum::Null),
        Value::Bool(b) => Ok(Datum::Boolean(*b)),
        Value::Number(n) => n
            .as_f64()
            .map(Datum::Number)
            .ok_or_else(|| DecodeError::OutOfRange(format!("{n} does not fit in an f64"))),
        Value::String(s) => Ok(Datum::String(s.clone())),
        Value::Array(items) => items
            .iter()
            .map(decode_datum)
            .collect::<Result<Vec<_>, _>>()
            .map(Datum::Array),
        Value::Object(fields) => match pseudo_tag(fields)? {
            Some(PSEUDO_TYPE_GEOMETRY) => decode_geometry(fields).map(Datum::Geometry),
            Some(PSEUDO_TYPE_TIME) => decode_time(fields).map(Datum::Time),
            Some(PSEUDO_TYPE_BINARY) => decode_binary(fields).map(Datum::Binary),
            Some(_) => unreachable!("pseudo_tag rejects unknown tags"),
            None => fields
                .iter()
                .map(|(k, v)| decode_datum(v).map(|d| (k.clone(), d)))
                .collect::<Result<HashMap<_, _>, _>>()
                .map(Datum::Object),
        },
    }
}

/// Decode a wire value into a caller-specified type.
pub fn decode<T: DeserializeOwned>(wire: &Value) -> Result<T, DecodeError> {
    let resolved = resolve_pseudo_types(wire)?;
    serde_json::from_value(resolved).map_err(classify_serde_error)
}

/// Rewrite pseudo-type objects into the plain forms serde targets consume.
///
/// GEOMETRY becomes an untagged GeoJSON `{type, coordinates}` object, TIME
/// an RFC 3339 string, BINARY an array of byte values. Unknown discriminator
/// tags fail; the decoder is closed over the known pseudo-type set.
pub fn resolve_pseudo_types(wire: &Value) -> Result<Value, DecodeError> {
    match wire {
        Value::Array(items) => items
            .iter()
            .map(resolve_pseudo_types)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(fields) => match pseudo_tag(fields)? {
            Some(PSEUDO_TYPE_GEOMETRY) => {
                let geo = decode_geometry(fields)?;
                serde_json::to_value(&geo)
                    .map_err(|e| DecodeError::Message(e.to_string()))
            }
            Some(PSEUDO_TYPE_TIME) => {
                let t = decode_time(fields)?;
                Ok(Value::String(t.to_rfc3339()))
            }
            Some(PSEUDO_TYPE_BINARY) => {
                let bytes = decode_binary(fields)?;
                Ok(Value::Array(
                    bytes.iter().map(|b| Value::Number((*b).into())).collect(),
                ))
            }
            Some(_) => unreachable!("pseudo_tag rejects unknown tags"),
            None => {
                let mut map = Map::new();
                for (key, value) in fields {
                    map.insert(key.clone(), resolve_pseudo_types(value)?);
                }
                Ok(Value::Object(map))
            }
        },
        other => Ok(other.clone()),
    }
}

/// Extract the pseudo-type tag of a wire object, if any.
///
/// Returns one of the known tag constants; an unrecognized tag is a decode
/// error rather than a plain object.
fn pseudo_tag(fields: &Map<String, Value>) -> Result<Option<&'static str>, DecodeError> {
    let Some(tag) = fields.get(PSEUDO_TYPE_KEY) else {
        return Ok(None);
    };
    match tag.as_str() {
        Some(PSEUDO_TYPE_GEOMETRY) => Ok(Some(PSEUDO_TYPE_GEOMETRY)),
        Some(PSEUDO_TYPE_TIME) => Ok(Some(PSEUDO_TYPE_TIME)),
        Some(PSEUDO_TYPE_BINARY) => Ok(Some(PSEUDO_TYPE_BINARY)),
        Some(other) => Err(DecodeError::UnknownPseudoType(other.to_string())),
        None => Err(DecodeError::UnknownPseudoType(tag.to_string())),
    }
}

fn decode_geometry(fields: &Map<String, Value>) -> Result<Geometry, DecodeError> {
    let tag = fields
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| DecodeError::ShapeMismatch {
            expected: "a GEOMETRY object with a string `type` field".to_string(),
            got: Value::Object(fields.clone()).to_string(),
        })?;
    let typ = GeometryType::from_name(tag).ok_or_else(|| DecodeError::ShapeMismatch {
        expected: "one of Point, LineString, Polygon".to_string(),
        got: tag.to_string(),
    })?;
    let coordinates = fields
        .get("coordinates")
        .ok_or_else(|| DecodeError::ShapeMismatch {
            expected: "a GEOMETRY object with a `coordinates` field".to_string(),
            got: Value::Object(fields.clone()).to_string(),
        })?;
    Geometry::from_parts(typ, coordinates).map_err(|e| DecodeError::ShapeMismatch {
        expected: format!("{typ} coordinates"),
        got: e,
    })
}

fn decode_time(
    fields: &Map<String, Value>,
) -> Result<chrono::DateTime<FixedOffset>, DecodeError> {
    let epoch = fields
        .get("epoch_time")
        .and_then(Value::as_f64)
        .ok_or_else(|| DecodeError::ShapeMismatch {
            expected: "a TIME object with a numeric `epoch_time` field".to_string(),
            got: Value::Object(fields.clone()).to_string(),
        })?;
    let offset = match fields.get("timezone").and_then(Value::as_str) {
        Some(tz) => parse_offset(tz)?,
        None => FixedOffset::east_opt(0).unwrap(),
    };
    let millis = (epoch * 1000.0).round();
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return Err(DecodeError::OutOfRange(format!(
            "epoch_time {epoch} out of timestamp range"
        )));
    }
    match Utc.timestamp_millis_opt(millis as i64) {
        chrono::LocalResult::Single(t) => Ok(t.with_timezone(&offset)),
        _ => Err(DecodeError::OutOfRange(format!(
            "epoch_time {epoch} out of timestamp range"
        ))),
    }
}

/// Parse a `[+-]HH:MM` timezone offset.
fn parse_offset(tz: &str) -> Result<FixedOffset, DecodeError> {
    let err = || DecodeError::ShapeMismatch {
        expected: "a timezone offset of the form +HH:MM".to_string(),
        got: tz.to_string(),
    };
    let (sign, rest) = match tz.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => return Err(err()),
    };
    let (hours, minutes) = rest.split_once(':').ok_or_else(err)?;
    let hours: i32 = hours.parse().map_err(|_| err())?;
    let minutes: i32 = minutes.parse().map_err(|_| err())?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(err)
}

fn decode_binary(fields: &Map<String, Value>) -> Result<Bytes, DecodeError> {
    let data = fields
        .get("data")
        .and_then(Value::as_str)
        .ok_or_else(|| DecodeError::ShapeMismatch {
            expected: "a BINARY object with a base64 `data` field".to_string(),
            got: Value::Object(fields.clone()).to_string(),
        })?;
    BASE64
        .decode(data)
        .map(Bytes::from)
        .map_err(|e| DecodeError::ShapeMismatch {
            expected: "valid base64 payload".to_string(),
            got: e.to_string(),
        })
}

/// Fold serde's error strings into the decode taxonomy.
fn classify_serde_error(e: serde_json::Error) -> DecodeError {
    let msg = e.to_string();
    if msg.contains("out of range") {
        return DecodeError::OutOfRange(msg);
    }
    for prefix in ["invalid type: ", "invalid value: "] {
        if let Some(rest) = msg.strip_prefix(prefix) {
            if let Some((got, expected)) = rest.split_once(", expected ") {
                // Narrowing a wire number into a smaller numeric target
                // surfaces as an invalid-value error in serde.
                if prefix == "invalid value: "
                    && (got.starts_with("integer") || got.starts_with("floating point"))
                {
                    return DecodeError::OutOfRange(msg);
                }
                return DecodeError::ShapeMismatch {
                    expected: expected.to_string(),
                    got: got.to_string(),
                };
            }
        }
    }
    DecodeError::Message(msg)
}
