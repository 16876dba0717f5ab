//! Native geometry types backing the GEOMETRY pseudo-type.
//!
//! The server represents geometry as a GeoJSON-derived object whose payload
//! shape is determined by the `type` tag. On the Rust side that maps onto a
//! sum type: a [`Geometry`] is exactly one of a point, a line string, or a
//! polygon, and decode logic switches on the tag rather than on runtime type
//! identity.
//!
//! Serde impls here target the *plain* GeoJSON form `{type, coordinates}`
//! with no pseudo-type discriminator; the encoder and decoder add/strip the
//! `$reql_type$` tag around these impls.

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// A single WGS84 coordinate pair. Longitude first, like the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// An ordered, non-empty sequence of points.
pub type Line = Vec<Point>;

/// An ordered, non-empty sequence of rings. The first ring is the outer
/// boundary, subsequent rings are holes. Rings produced by the driver's own
/// polygon builder are closed (first point repeated as last).
pub type Lines = Vec<Line>;

/// GeoJSON type tags recognized by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
}

impl GeometryType {
    pub fn name(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Point" => Some(GeometryType::Point),
            "LineString" => Some(GeometryType::LineString),
            "Polygon" => Some(GeometryType::Polygon),
            _ => None,
        }
    }
}

impl std::fmt::Display for GeometryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A geometry value: exactly one payload, discriminated by its GeoJSON tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(Line),
    Polygon(Lines),
}

impl Geometry {
    /// The GeoJSON type tag for this value.
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
        }
    }

    pub fn as_point(&self) -> Option<&Point> {
        match self {
            Geometry::Point(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&Line> {
        match self {
            Geometry::LineString(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_lines(&self) -> Option<&Lines> {
        match self {
            Geometry::Polygon(ls) => Some(ls),
            _ => None,
        }
    }

    /// Rebuild a geometry from its GeoJSON parts.
    ///
    /// `coordinates` must match the nesting depth the tag implies:
    /// `[lon, lat]` for a point, pairs for a line string, rings of pairs for
    /// a polygon.
    pub fn from_parts(typ: GeometryType, coordinates: &serde_json::Value) -> Result<Self, String> {
        match typ {
            GeometryType::Point => parse_point(coordinates).map(Geometry::Point),
            GeometryType::LineString => parse_line(coordinates).map(Geometry::LineString),
            GeometryType::Polygon => {
                let rings = coordinates
                    .as_array()
                    .ok_or_else(|| format!("expected array of rings, got {coordinates}"))?;
                if rings.is_empty() {
                    return Err("polygon requires at least one ring".to_string());
                }
                rings
                    .iter()
                    .map(parse_line)
                    .collect::<Result<Lines, _>>()
                    .map(Geometry::Polygon)
            }
        }
    }

    /// The GeoJSON `coordinates` payload for this value.
    pub fn coordinates(&self) -> serde_json::Value {
        fn pair(p: &Point) -> serde_json::Value {
            serde_json::json!([p.lon, p.lat])
        }
        match self {
            Geometry::Point(p) => pair(p),
            Geometry::LineString(line) => {
                serde_json::Value::Array(line.iter().map(pair).collect())
            }
            Geometry::Polygon(lines) => serde_json::Value::Array(
                lines
                    .iter()
                    .map(|ring| serde_json::Value::Array(ring.iter().map(pair).collect()))
                    .collect(),
            ),
        }
    }
}

fn parse_point(value: &serde_json::Value) -> Result<Point, String> {
    let pair = value
        .as_array()
        .ok_or_else(|| format!("expected [lon, lat] pair, got {value}"))?;
    if pair.len() != 2 {
        return Err(format!("expected 2 coordinates, got {}", pair.len()));
    }
    let lon = pair[0]
        .as_f64()
        .ok_or_else(|| format!("longitude is not a number: {}", pair[0]))?;
    let lat = pair[1]
        .as_f64()
        .ok_or_else(|| format!("latitude is not a number: {}", pair[1]))?;
    Ok(Point::new(lon, lat))
}

fn parse_line(value: &serde_json::Value) -> Result<Line, String> {
    let points = value
        .as_array()
        .ok_or_else(|| format!("expected array of points, got {value}"))?;
    if points.is_empty() {
        return Err("line requires at least one point".to_string());
    }
    points.iter().map(parse_point).collect()
}

// Points serialize as their wire pair, so Line and Lines come for free
// through Vec.
impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&self.lon)?;
        seq.serialize_element(&self.lat)?;
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PointVisitor;

        impl<'de> Visitor<'de> for PointVisitor {
            type Value = Point;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a [lon, lat] coordinate pair")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Point, A::Error> {
                let lon = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let lat = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                if seq.next_element::<f64>()?.is_some() {
                    return Err(de::Error::invalid_length(3, &self));
                }
                Ok(Point { lon, lat })
            }
        }

        deserializer.deserialize_seq(PointVisitor)
    }
}

impl Serialize for Geometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", self.geometry_type().name())?;
        match self {
            Geometry::Point(p) => map.serialize_entry("coordinates", p)?,
            Geometry::LineString(line) => map.serialize_entry("coordinates", line)?,
            Geometry::Polygon(lines) => map.serialize_entry("coordinates", lines)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct GeoJson {
            #[serde(rename = "type")]
            typ: String,
            coordinates: serde_json::Value,
        }

        let raw = GeoJson::deserialize(deserializer)?;
        let typ = GeometryType::from_name(&raw.typ)
            .ok_or_else(|| de::Error::custom(format!("unknown geometry type: {}", raw.typ)))?;
        Geometry::from_parts(typ, &raw.coordinates).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_wire_pair() {
        let json = serde_json::to_value(Point::new(-122.423246, 37.779388)).unwrap();
        assert_eq!(json, serde_json::json!([-122.423246, 37.779388]));

        let back: Point = serde_json::from_value(json).unwrap();
        assert_eq!(back, Point::new(-122.423246, 37.779388));
    }

    #[test]
    fn test_geometry_geojson_round_trip() {
        let geo = Geometry::LineString(vec![
            Point::new(-122.423246, 37.779388),
            Point::new(-121.88642, 37.329898),
        ]);
        let json = serde_json::to_value(&geo).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "LineString",
                "coordinates": [[-122.423246, 37.779388], [-121.88642, 37.329898]],
            })
        );

        let back: Geometry = serde_json::from_value(json).unwrap();
        assert_eq!(back, geo);
    }

    #[test]
    fn test_geometry_rejects_unknown_tag() {
        let json = serde_json::json!({"type": "MultiPolygon", "coordinates": []});
        assert!(serde_json::from_value::<Geometry>(json).is_err());
    }

    #[test]
    fn test_polygon_requires_ring() {
        let err = Geometry::from_parts(GeometryType::Polygon, &serde_json::json!([]));
        assert!(err.is_err());
    }
}
