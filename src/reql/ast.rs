//! ReQL Abstract Syntax Tree (AST) implementation.
//!
//! A query is represented as a tree of `Term` nodes, where each node has:
//!
//! - A `TermType` specifying the operation
//! - Positional arguments (`args`): child terms, order significant
//! - Optional named arguments (`optargs`): key-value pairs
//! - Optional datum value for literal data
//!
//! Terms are immutable once built. Composing a term into a parent clones it,
//! so a sub-expression can be reused under any number of parents without
//! aliasing concerns.
//!
//! # Architecture
//!
//! Queries are built with associated constructors and chained operator
//! methods:
//!
//! ```rust,ignore
//! use photonql::reql::{Term, GetIntersectingOpts};
//!
//! let query = Term::db("test").table("geospatial").get_intersecting(
//!     Term::circle((-117.220406, 32.719464), 100_000.0, Default::default())?,
//!     GetIntersectingOpts { index: "area".into() },
//! );
//! ```
//!
//! Argument-shape violations (empty lines, non-point operands, non-positive
//! radii) are construction errors: they surface immediately and never reach
//! the encoder.

use super::datum::Datum;
use super::geometry;
use super::terms::TermType;
use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;

/// A ReQL Term - the fundamental building block of queries.
///
/// Represents a single node in the query AST tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    /// The type of this term
    pub term_type: TermType,

    /// Positional arguments
    pub args: Vec<Term>,

    /// Optional named arguments
    pub optargs: HashMap<String, Term>,

    /// Datum value (for Datum terms)
    pub datum: Option<Datum>,
}

impl Term {
    /// Create a new term with given type
    pub fn new(term_type: TermType) -> Self {
        Self {
            term_type,
            args: Vec::new(),
            optargs: HashMap::new(),
            datum: None,
        }
    }

    /// Create a datum term
    pub fn datum(datum: Datum) -> Self {
        Self {
            term_type: TermType::Datum,
            args: Vec::new(),
            optargs: HashMap::new(),
            datum: Some(datum),
        }
    }

    /// Add a positional argument
    pub fn with_arg(mut self, arg: Term) -> Self {
        self.args.push(arg);
        self
    }

    /// Add multiple positional arguments
    pub fn with_args(mut self, args: Vec<Term>) -> Self {
        self.args.extend(args);
        self
    }

    /// Add an optional named argument
    pub fn with_optarg<S: Into<String>>(mut self, name: S, value: Term) -> Self {
        self.optargs.insert(name.into(), value);
        self
    }

    /// Get argument at index
    pub fn arg(&self, index: usize) -> Option<&Term> {
        self.args.get(index)
    }

    /// Get optional argument by name
    pub fn optarg(&self, name: &str) -> Option<&Term> {
        self.optargs.get(name)
    }

    /// Check if this is a datum term
    pub fn is_datum(&self) -> bool {
        self.term_type == TermType::Datum
    }

    /// Get datum value if this is a datum term
    pub fn as_datum(&self) -> Option<&Datum> {
        self.datum.as_ref()
    }
}

/// A polymorphic point operand.
///
/// `line`, `polygon`, `circle` and `get_nearest` accept raw coordinate
/// pairs, native [`geometry::Point`] values, or previously built POINT terms
/// interchangeably.
#[derive(Debug, Clone)]
pub enum PointArg {
    Coords(f64, f64),
    Point(geometry::Point),
    Term(Term),
}

impl PointArg {
    /// Normalize into a POINT term.
    ///
    /// A term operand must itself be a POINT constructor; anything else is a
    /// construction error.
    pub fn into_term(self) -> Result<Term> {
        match self {
            PointArg::Coords(lon, lat) => Ok(Term::point(lon, lat)),
            PointArg::Point(p) => Ok(Term::point(p.lon, p.lat)),
            PointArg::Term(term) => {
                if term.term_type != TermType::Point {
                    return Err(Error::Construction(format!(
                        "expected a POINT term operand, got {}",
                        term.term_type
                    )));
                }
                Ok(term)
            }
        }
    }
}

impl From<[f64; 2]> for PointArg {
    fn from(pair: [f64; 2]) -> Self {
        PointArg::Coords(pair[0], pair[1])
    }
}

impl From<(f64, f64)> for PointArg {
    fn from((lon, lat): (f64, f64)) -> Self {
        PointArg::Coords(lon, lat)
    }
}

impl From<geometry::Point> for PointArg {
    fn from(p: geometry::Point) -> Self {
        PointArg::Point(p)
    }
}

impl From<Term> for PointArg {
    fn from(term: Term) -> Self {
        PointArg::Term(term)
    }
}

fn normalize_points<I>(points: I) -> Result<Vec<Term>>
where
    I: IntoIterator,
    I::Item: Into<PointArg>,
{
    points
        .into_iter()
        .map(|p| p.into().into_term())
        .collect()
}

/// Distance unit codes accepted by `distance`, `circle` and `get_nearest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Meter,
    Kilometer,
    InternationalMile,
    NauticalMile,
    InternationalFoot,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Meter => "m",
            Unit::Kilometer => "km",
            Unit::InternationalMile => "mi",
            Unit::NauticalMile => "nm",
            Unit::InternationalFoot => "ft",
        }
    }
}

/// Reference ellipsoid for geospatial computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeoSystem {
    #[default]
    Wgs84,
    UnitSphere,
}

impl GeoSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeoSystem::Wgs84 => "WGS84",
            GeoSystem::UnitSphere => "unit_sphere",
        }
    }
}

/// Options for [`Term::circle`].
#[derive(Debug, Clone, Default)]
pub struct CircleOpts {
    /// Number of boundary vertices to sample (server default 32).
    pub num_vertices: Option<u64>,
    pub geo_system: Option<GeoSystem>,
    pub unit: Option<Unit>,
    /// Render a closed polygon (server default) or just the boundary line.
    pub fill: Option<bool>,
}

/// Options for [`Term::distance`].
#[derive(Debug, Clone, Default)]
pub struct DistanceOpts {
    pub geo_system: Option<GeoSystem>,
    pub unit: Option<Unit>,
}

/// Options for [`Term::get_intersecting`]. The named geo index is required.
#[derive(Debug, Clone)]
pub struct GetIntersectingOpts {
    pub index: String,
}

/// Options for [`Term::get_nearest`]. The named geo index is required.
#[derive(Debug, Clone)]
pub struct GetNearestOpts {
    pub index: String,
    /// Upper bound on result distance, in `unit`.
    pub max_dist: Option<f64>,
    pub max_results: Option<u64>,
    pub unit: Option<Unit>,
    pub geo_system: Option<GeoSystem>,
}

impl GetNearestOpts {
    pub fn new<S: Into<String>>(index: S) -> Self {
        Self {
            index: index.into(),
            max_dist: None,
            max_results: None,
            unit: None,
            geo_system: None,
        }
    }
}

/// Options for [`Term::index_create`].
#[derive(Debug, Clone, Default)]
pub struct IndexCreateOpts {
    /// Build a geospatial index.
    pub geo: Option<bool>,
    /// Index arrays of keys rather than a single key.
    pub multi: Option<bool>,
}

fn string_datum<S: Into<String>>(s: S) -> Term {
    Term::datum(Datum::String(s.into()))
}

fn number_datum(n: f64) -> Term {
    Term::datum(Datum::Number(n))
}

fn bool_datum(b: bool) -> Term {
    Term::datum(Datum::Boolean(b))
}

// === Root constructors ===

impl Term {
    /// Embed a serializable native value as a literal expression.
    ///
    /// Serialization failures (e.g. a map with non-string keys) surface as
    /// encode errors before any network interaction.
    pub fn expr<T: Serialize>(value: T) -> Result<Self> {
        let wire = serde_json::to_value(value)
            .map_err(|e| Error::Encode(format!("unsupported native value: {e}")))?;
        Ok(Term::datum(crate::query::decoder::decode_datum(&wire)?))
    }

    /// Build an object term whose field values may themselves be terms.
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Term)>,
    {
        let mut term = Term::new(TermType::MakeObj);
        for (key, value) in fields {
            term = term.with_optarg(key, value);
        }
        term
    }

    /// Build an array term from child terms.
    pub fn array<I: IntoIterator<Item = Term>>(items: I) -> Self {
        Term::new(TermType::MakeArray).with_args(items.into_iter().collect())
    }

    // Database operations
    pub fn db<S: Into<String>>(name: S) -> Self {
        Term::new(TermType::Db).with_arg(string_datum(name))
    }

    pub fn db_create<S: Into<String>>(name: S) -> Self {
        Term::new(TermType::DbCreate).with_arg(string_datum(name))
    }

    pub fn db_drop<S: Into<String>>(name: S) -> Self {
        Term::new(TermType::DbDrop).with_arg(string_datum(name))
    }

    pub fn db_list() -> Self {
        Term::new(TermType::DbList)
    }

    // Geospatial constructors

    /// A point at (`lon`, `lat`). Coordinates are passed through unchecked.
    pub fn point(lon: f64, lat: f64) -> Self {
        Term::new(TermType::Point)
            .with_arg(number_datum(lon))
            .with_arg(number_datum(lat))
    }

    /// A line string through the given points, order preserved.
    pub fn line<I>(points: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<PointArg>,
    {
        let args = normalize_points(points)?;
        if args.len() < 2 {
            return Err(Error::Construction(format!(
                "line requires at least 2 points, got {}",
                args.len()
            )));
        }
        Ok(Term::new(TermType::Line).with_args(args))
    }

    /// A polygon outer ring through the given points.
    ///
    /// The server closes the ring; callers list each vertex once.
    pub fn polygon<I>(points: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<PointArg>,
    {
        let args = normalize_points(points)?;
        if args.len() < 3 {
            return Err(Error::Construction(format!(
                "polygon requires at least 3 points, got {}",
                args.len()
            )));
        }
        Ok(Term::new(TermType::Polygon).with_args(args))
    }

    /// A circle of `radius` around `center`.
    ///
    /// Renders as a closed polygon unless `opts.fill` is false, in which
    /// case the boundary line string is produced. Boundary points are
    /// trigonometric samples; closure is approximate, not bit-exact.
    pub fn circle<P: Into<PointArg>>(center: P, radius: f64, opts: CircleOpts) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::Construction(format!(
                "circle radius must be a positive finite number, got {radius}"
            )));
        }
        let mut term = Term::new(TermType::Circle)
            .with_arg(center.into().into_term()?)
            .with_arg(number_datum(radius));
        if let Some(n) = opts.num_vertices {
            term = term.with_optarg("num_vertices", number_datum(n as f64));
        }
        if let Some(gs) = opts.geo_system {
            term = term.with_optarg("geo_system", string_datum(gs.as_str()));
        }
        if let Some(unit) = opts.unit {
            term = term.with_optarg("unit", string_datum(unit.as_str()));
        }
        if let Some(fill) = opts.fill {
            term = term.with_optarg("fill", bool_datum(fill));
        }
        Ok(term)
    }

    /// Great-circle distance between two geometries.
    pub fn distance(a: Term, b: Term, opts: DistanceOpts) -> Self {
        let mut term = Term::new(TermType::Distance).with_arg(a).with_arg(b);
        if let Some(gs) = opts.geo_system {
            term = term.with_optarg("geo_system", string_datum(gs.as_str()));
        }
        if let Some(unit) = opts.unit {
            term = term.with_optarg("unit", string_datum(unit.as_str()));
        }
        term
    }

    /// Convert a plain GeoJSON object into a server geometry value.
    pub fn geojson<T: Serialize>(object: T) -> Result<Self> {
        Ok(Term::new(TermType::Geojson).with_arg(Term::expr(object)?))
    }
}

// === Chained operators ===

impl Term {
    pub fn table<S: Into<String>>(self, name: S) -> Self {
        Term::new(TermType::Table)
            .with_arg(self)
            .with_arg(string_datum(name))
    }

    pub fn table_create<S: Into<String>>(self, name: S) -> Self {
        Term::new(TermType::TableCreate)
            .with_arg(self)
            .with_arg(string_datum(name))
    }

    pub fn table_drop<S: Into<String>>(self, name: S) -> Self {
        Term::new(TermType::TableDrop)
            .with_arg(self)
            .with_arg(string_datum(name))
    }

    pub fn table_list(self) -> Self {
        Term::new(TermType::TableList).with_arg(self)
    }

    pub fn index_create<S: Into<String>>(self, name: S, opts: IndexCreateOpts) -> Self {
        let mut term = Term::new(TermType::IndexCreate)
            .with_arg(self)
            .with_arg(string_datum(name));
        if let Some(geo) = opts.geo {
            term = term.with_optarg("geo", bool_datum(geo));
        }
        if let Some(multi) = opts.multi {
            term = term.with_optarg("multi", bool_datum(multi));
        }
        term
    }

    pub fn index_drop<S: Into<String>>(self, name: S) -> Self {
        Term::new(TermType::IndexDrop)
            .with_arg(self)
            .with_arg(string_datum(name))
    }

    pub fn index_list(self) -> Self {
        Term::new(TermType::IndexList).with_arg(self)
    }

    pub fn index_wait<S: Into<String>>(self, name: S) -> Self {
        Term::new(TermType::IndexWait)
            .with_arg(self)
            .with_arg(string_datum(name))
    }

    pub fn get(self, key: Datum) -> Self {
        Term::new(TermType::Get)
            .with_arg(self)
            .with_arg(Term::datum(key))
    }

    pub fn get_all(self, keys: Vec<Datum>) -> Self {
        Term::new(TermType::GetAll)
            .with_arg(self)
            .with_args(keys.into_iter().map(Term::datum).collect())
    }

    pub fn insert(self, document: Term) -> Self {
        Term::new(TermType::Insert).with_arg(self).with_arg(document)
    }

    pub fn filter(self, predicate: Term) -> Self {
        Term::new(TermType::Filter).with_arg(self).with_arg(predicate)
    }

    pub fn count(self) -> Self {
        Term::new(TermType::Count).with_arg(self)
    }

    // Geospatial operators

    /// Ask the server to compute a filled polygon from this line's points.
    pub fn fill(self) -> Self {
        Term::new(TermType::Fill).with_arg(self)
    }

    /// Carve `hole` out of this polygon.
    pub fn polygon_sub(self, hole: Term) -> Self {
        Term::new(TermType::PolygonSub).with_arg(self).with_arg(hole)
    }

    /// Method form of [`Term::distance`].
    pub fn distance_to(self, other: Term, opts: DistanceOpts) -> Self {
        Term::distance(self, other, opts)
    }

    /// True when this geometry completely contains `geo`.
    pub fn includes(self, geo: Term) -> Self {
        Term::new(TermType::Includes).with_arg(self).with_arg(geo)
    }

    /// True when this geometry shares any portion of space with `geo`.
    pub fn intersects(self, geo: Term) -> Self {
        Term::new(TermType::Intersects).with_arg(self).with_arg(geo)
    }

    /// Convert this geometry into a plain GeoJSON object.
    pub fn to_geojson(self) -> Self {
        Term::new(TermType::ToGeojson).with_arg(self)
    }

    /// Rows of this table whose indexed geometry intersects `geo`.
    pub fn get_intersecting(self, geo: Term, opts: GetIntersectingOpts) -> Self {
        Term::new(TermType::GetIntersecting)
            .with_arg(self)
            .with_arg(geo)
            .with_optarg("index", string_datum(opts.index))
    }

    /// Rows of this table nearest to `point`, closest first.
    pub fn get_nearest<P: Into<PointArg>>(self, point: P, opts: GetNearestOpts) -> Result<Self> {
        let mut term = Term::new(TermType::GetNearest)
            .with_arg(self)
            .with_arg(point.into().into_term()?)
            .with_optarg("index", string_datum(opts.index));
        if let Some(max_dist) = opts.max_dist {
            term = term.with_optarg("max_dist", number_datum(max_dist));
        }
        if let Some(max_results) = opts.max_results {
            term = term.with_optarg("max_results", number_datum(max_results as f64));
        }
        if let Some(unit) = opts.unit {
            term = term.with_optarg("unit", string_datum(unit.as_str()));
        }
        if let Some(gs) = opts.geo_system {
            term = term.with_optarg("geo_system", string_datum(gs.as_str()));
        }
        Ok(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reql::geometry::Point;

    #[test]
    fn test_term_creation() {
        let term = Term::new(TermType::Db);
        assert_eq!(term.term_type, TermType::Db);
        assert!(term.args.is_empty());
    }

    #[test]
    fn test_datum_term() {
        let term = Term::datum(Datum::String("test".to_string()));
        assert!(term.is_datum());
        assert_eq!(term.as_datum().unwrap().as_string(), Some("test"));
    }

    #[test]
    fn test_point_term() {
        let term = Term::point(-122.423246, 37.779388);
        assert_eq!(term.term_type, TermType::Point);
        assert_eq!(term.args.len(), 2);
        assert_eq!(term.arg(0).unwrap().as_datum().unwrap().as_number(), Some(-122.423246));
    }

    #[test]
    fn test_line_accepts_mixed_point_shapes() {
        let from_pairs = Term::line([[-122.423246, 37.779388], [-121.88642, 37.329898]]).unwrap();
        let from_points = Term::line([
            Point::new(-122.423246, 37.779388),
            Point::new(-121.88642, 37.329898),
        ])
        .unwrap();
        let from_terms = Term::line([
            Term::point(-122.423246, 37.779388),
            Term::point(-121.88642, 37.329898),
        ])
        .unwrap();

        assert_eq!(from_pairs, from_points);
        assert_eq!(from_pairs, from_terms);
    }

    #[test]
    fn test_line_arity_is_checked() {
        let err = Term::line([[-122.4, 37.7]]).unwrap_err();
        assert!(matches!(err, Error::Construction(_)));
    }

    #[test]
    fn test_polygon_rejects_non_point_term() {
        let err = Term::polygon([
            Term::point(-122.4, 37.7),
            Term::point(-122.4, 37.3),
            Term::db("nope"),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::Construction(_)));
    }

    #[test]
    fn test_circle_radius_must_be_positive() {
        let err = Term::circle((-122.4, 37.7), 0.0, CircleOpts::default()).unwrap_err();
        assert!(matches!(err, Error::Construction(_)));
        assert!(Term::circle((-122.4, 37.7), 10.0, CircleOpts::default()).is_ok());
    }

    #[test]
    fn test_circle_opts_become_optargs() {
        let term = Term::circle(
            (-122.4, 37.7),
            10.0,
            CircleOpts {
                unit: Some(Unit::Kilometer),
                fill: Some(false),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(
            term.optarg("unit").unwrap().as_datum().unwrap().as_string(),
            Some("km")
        );
        assert_eq!(
            term.optarg("fill").unwrap().as_datum().unwrap().as_bool(),
            Some(false)
        );
        assert!(term.optarg("num_vertices").is_none());
    }

    #[test]
    fn test_composition_does_not_mutate_subterms() {
        let point = Term::point(-122.4, 37.7);
        let circle = Term::circle(point.clone(), 5.0, CircleOpts::default()).unwrap();
        let distance = Term::distance(point.clone(), Term::point(0.0, 0.0), DistanceOpts::default());

        // The shared sub-expression is intact in both parents.
        assert_eq!(circle.arg(0).unwrap(), &point);
        assert_eq!(distance.arg(0).unwrap(), &point);
    }

    #[test]
    fn test_get_nearest_requires_index_optarg() {
        let term = Term::db("test")
            .table("geospatial")
            .get_nearest((-117.220406, 32.719464), GetNearestOpts::new("area"))
            .unwrap();
        assert_eq!(term.term_type, TermType::GetNearest);
        assert_eq!(
            term.optarg("index").unwrap().as_datum().unwrap().as_string(),
            Some("area")
        );
    }
}
