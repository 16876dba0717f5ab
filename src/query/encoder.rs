//! ReQL query encoder.
//!
//! Serializes `Term` trees and native `Datum` values into the wire JSON the
//! transport transmits.
//!
//! # Wire Protocol Format
//!
//! Queries travel as JSON arrays in the format:
//! ```json
//! [term_type, [arg1, arg2, ...], {"optarg1": value1, ...}]
//! ```
//!
//! Where:
//! - `term_type` is the numeric ql2 operation code
//! - Second element is an array of positional arguments
//! - Third element (present only when non-empty) is an object of named
//!   arguments
//!
//! Literal data (DATUM terms) embeds as bare JSON values. Pseudo-type values
//! embed as tagged objects, e.g. for geometry:
//!
//! ```json
//! {"$reql_type$": "GEOMETRY", "type": "Point", "coordinates": [-122.4, 37.7]}
//! ```
//!
//! Encoding is a pure function of its input; the only failure modes are
//! native shapes the wire cannot carry (non-finite numbers).

use crate::error::{Error, Result};
use crate::reql::types::{
    QueryType, PSEUDO_TYPE_BINARY, PSEUDO_TYPE_GEOMETRY, PSEUDO_TYPE_KEY, PSEUDO_TYPE_TIME,
};
use crate::reql::{Datum, Geometry, Term, TermType};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, FixedOffset};
use serde_json::{json, Map, Value};

/// Encode a term tree into its wire representation.
pub fn encode_term(term: &Term) -> Result<Value> {
    if term.term_type == TermType::Datum {
        let datum = term
            .as_datum()
            .ok_or_else(|| Error::Encode("DATUM term without a value".to_string()))?;
        return encode_datum(datum);
    }

    let args = term
        .args
        .iter()
        .map(encode_term)
        .collect::<Result<Vec<_>>>()?;

    if term.optargs.is_empty() {
        return Ok(json!([term.term_type.to_u64(), args]));
    }

    let mut optargs = Map::new();
    for (key, value) in &term.optargs {
        optargs.insert(key.clone(), encode_term(value)?);
    }
    Ok(json!([term.term_type.to_u64(), args, optargs]))
}

/// Encode a native value into its wire representation.
///
/// Plain variants encode structurally; pseudo-type variants emit the tagged
/// object form the server expects.
pub fn encode_datum(datum: &Datum) -> Result<Value> {
    match datum {
        Datum::Null => Ok(Value::Null),
        Datum::Boolean(b) => Ok(Value::Bool(*b)),
        Datum::Number(n) => serde_json::Number::from_f64(*n)
            .map(Value::Number)
            .ok_or_else(|| Error::Encode(format!("number {n} is not representable on the wire"))),
        Datum::String(s) => Ok(Value::String(s.clone())),
        Datum::Array(items) => items
            .iter()
            .map(encode_datum)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Datum::Object(fields) => {
            let mut map = Map::new();
            for (key, value) in fields {
                map.insert(key.clone(), encode_datum(value)?);
            }
            Ok(Value::Object(map))
        }
        Datum::Geometry(geo) => Ok(encode_geometry(geo)),
        Datum::Time(t) => Ok(encode_time(t)),
        Datum::Binary(bytes) => Ok(json!({
            PSEUDO_TYPE_KEY: PSEUDO_TYPE_BINARY,
            "data": BASE64.encode(bytes),
        })),
    }
}

fn encode_geometry(geo: &Geometry) -> Value {
    json!({
        PSEUDO_TYPE_KEY: PSEUDO_TYPE_GEOMETRY,
        "type": geo.geometry_type().name(),
        "coordinates": geo.coordinates(),
    })
}

fn encode_time(t: &DateTime<FixedOffset>) -> Value {
    let offset_secs = t.offset().local_minus_utc();
    let sign = if offset_secs < 0 { '-' } else { '+' };
    let abs = offset_secs.unsigned_abs();
    json!({
        PSEUDO_TYPE_KEY: PSEUDO_TYPE_TIME,
        "epoch_time": t.timestamp_millis() as f64 / 1000.0,
        "timezone": format!("{sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60),
    })
}

/// Encode a complete client message: `[query_type, term, global_optargs]`.
pub fn encode_query(query_type: QueryType, term: &Term, global_optargs: &Map<String, Value>) -> Result<Value> {
    Ok(json!([query_type.to_u64(), encode_term(term)?, global_optargs]))
}
