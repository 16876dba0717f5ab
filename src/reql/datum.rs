//! Datum - the driver's JSON-like value model.
//!
//! A `Datum` represents any value the driver can send to or receive from the
//! server. It covers the plain JSON shapes plus the rich pseudo-type values
//! that travel as tagged wire objects.
//!
//! # Supported Types
//!
//! - **Null**: Absence of a value
//! - **Boolean**: true or false
//! - **Number**: f64 floating point numbers
//! - **String**: UTF-8 encoded text
//! - **Array**: Ordered list of datums
//! - **Object**: Key-value map (like JSON object)
//! - **Geometry**: GEOMETRY pseudo-type (point / line string / polygon)
//! - **Time**: TIME pseudo-type, offset-aware timestamp
//! - **Binary**: BINARY pseudo-type, raw bytes
//!
//! Conversion to and from the wire representation lives in
//! [`crate::query::encoder`] and [`crate::query::decoder`]; the wire
//! direction is fallible (unknown pseudo-type tags), so it is not modeled as
//! `From` impls here.

use super::geometry::Geometry;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;

/// A value stored in or returned by the database.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<Datum>),
    Object(HashMap<String, Datum>),
    Geometry(Geometry),
    Time(DateTime<FixedOffset>),
    Binary(Bytes),
}

impl Datum {
    /// Check if datum is null
    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }

    /// Get as string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Datum::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Datum::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Datum::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as array
    pub fn as_array(&self) -> Option<&Vec<Datum>> {
        match self {
            Datum::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Get as object
    pub fn as_object(&self) -> Option<&HashMap<String, Datum>> {
        match self {
            Datum::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Get as geometry
    pub fn as_geometry(&self) -> Option<&Geometry> {
        match self {
            Datum::Geometry(geo) => Some(geo),
            _ => None,
        }
    }

    /// Get as timestamp
    pub fn as_time(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Datum::Time(t) => Some(*t),
            _ => None,
        }
    }

    /// Get as binary payload
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Datum::Binary(b) => Some(b),
            _ => None,
        }
    }
}

// Conversions
impl From<bool> for Datum {
    fn from(b: bool) -> Self {
        Datum::Boolean(b)
    }
}

impl From<i32> for Datum {
    fn from(n: i32) -> Self {
        Datum::Number(n as f64)
    }
}

impl From<i64> for Datum {
    fn from(n: i64) -> Self {
        Datum::Number(n as f64)
    }
}

impl From<f64> for Datum {
    fn from(n: f64) -> Self {
        Datum::Number(n)
    }
}

impl From<String> for Datum {
    fn from(s: String) -> Self {
        Datum::String(s)
    }
}

impl From<&str> for Datum {
    fn from(s: &str) -> Self {
        Datum::String(s.to_string())
    }
}

impl From<Geometry> for Datum {
    fn from(geo: Geometry) -> Self {
        Datum::Geometry(geo)
    }
}

impl From<DateTime<FixedOffset>> for Datum {
    fn from(t: DateTime<FixedOffset>) -> Self {
        Datum::Time(t)
    }
}

impl From<Bytes> for Datum {
    fn from(b: Bytes) -> Self {
        Datum::Binary(b)
    }
}

impl<T: Into<Datum>> From<Vec<T>> for Datum {
    fn from(items: Vec<T>) -> Self {
        Datum::Array(items.into_iter().map(Into::into).collect())
    }
}

impl std::fmt::Display for Datum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Datum::Null => write!(f, "null"),
            Datum::Boolean(b) => write!(f, "{}", b),
            Datum::Number(n) => write!(f, "{}", n),
            Datum::String(s) => write!(f, "\"{}\"", s),
            Datum::Array(arr) => {
                write!(f, "[")?;
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Datum::Object(obj) => {
                write!(f, "{{")?;
                for (i, (key, value)) in obj.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{}\": {}", key, value)?;
                }
                write!(f, "}}")
            }
            Datum::Geometry(geo) => write!(f, "<geometry:{}>", geo.geometry_type()),
            Datum::Time(t) => write!(f, "<time:{}>", t.to_rfc3339()),
            Datum::Binary(b) => write!(f, "<binary:{} bytes>", b.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reql::geometry::Point;

    #[test]
    fn test_accessors() {
        assert!(Datum::Null.is_null());
        assert_eq!(Datum::from(42.5).as_number(), Some(42.5));
        assert_eq!(Datum::from("hi").as_string(), Some("hi"));
        assert_eq!(Datum::from(true).as_bool(), Some(true));
        assert_eq!(Datum::from(7).as_number(), Some(7.0));
    }

    #[test]
    fn test_geometry_variant() {
        let datum = Datum::from(Geometry::Point(Point::new(-122.4, 37.7)));
        let geo = datum.as_geometry().unwrap();
        assert_eq!(geo.as_point(), Some(&Point::new(-122.4, 37.7)));
        assert_eq!(datum.as_object(), None);
    }

    #[test]
    fn test_array_from_vec() {
        let datum = Datum::from(vec![1.0, 2.0, 3.0]);
        assert_eq!(datum.as_array().map(Vec::len), Some(3));
    }
}
