//! ReQL (RethinkDB Query Language) expression model.
//!
//! This module provides the client-side half of the query language:
//!
//! - **Term Types**: operation codes bound to the ql2 wire protocol
//! - **AST**: immutable `Term` trees built by typed constructors
//! - **Datum**: JSON-like value model including pseudo-type values
//! - **Geometry**: native geometry types behind the GEOMETRY pseudo-type
//!
//! # Architecture
//!
//! The driver follows a three-layer design:
//!
//! 1. **Terms Layer** (`terms.rs`): operation codes as an enum
//! 2. **AST Layer** (`ast.rs`): query structure as `Term` nodes
//! 3. **Wire Layer** (`query::encoder` / `query::decoder`): conversion to
//!    and from the server's JSON representation
//!
//! # Example
//!
//! ```rust,ignore
//! use photonql::reql::Term;
//!
//! // r.db("test").table("places").get_intersecting(circle, {index: "area"})
//! let circle = Term::circle((-117.220406, 32.719464), 100_000.0, Default::default())?;
//! let query = Term::db("test").table("places");
//! ```

pub mod ast;
pub mod datum;
pub mod geometry;
pub mod terms;
pub mod types;

pub use ast::{
    CircleOpts, DistanceOpts, GeoSystem, GetIntersectingOpts, GetNearestOpts, IndexCreateOpts,
    PointArg, Term, Unit,
};
pub use datum::Datum;
pub use geometry::{Geometry, GeometryType, Line, Lines, Point};
pub use terms::TermType;
pub use types::*;
