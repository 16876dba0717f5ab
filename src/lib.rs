// PhotonQL - Client driver for PhotonDB and RethinkDB-compatible databases
//
// Queries are built as typed expression trees, compiled into the ql2 JSON
// wire format, submitted over a caller-provided session, and decoded back
// into caller-specified native types, including the GEOMETRY / TIME / BINARY
// pseudo-types.

#![warn(rust_2018_idioms)]

pub mod network;
pub mod query;
pub mod reql;

// Re-exports for convenience
pub use network::{Cursor, Response, RunOpts, Session};
pub use reql::{Datum, Geometry, Term};

/// Driver error types
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum Error {
        /// Malformed term arguments; raised at build time, never transmitted.
        #[error("Construction error: {0}")]
        Construction(String),

        /// Native value with no wire representation.
        #[error("Encode error: {0}")]
        Encode(String),

        /// Wire value incompatible with the requested target.
        #[error("Decode error: {0}")]
        Decode(#[from] DecodeError),

        /// Transport or session failure, reported as-is.
        #[error("Connection error: {0}")]
        Connection(String),

        /// Error reported by the server while running the query.
        #[error("Runtime error: {0}")]
        Runtime(String),

        /// Read on an exhausted cursor.
        #[error("Cursor is empty")]
        EmptyCursor,

        /// Read on a closed cursor.
        #[error("Cursor is closed")]
        ClosedCursor,
    }

    #[derive(Error, Debug)]
    pub enum DecodeError {
        #[error("shape mismatch: expected {expected}, got {got}")]
        ShapeMismatch { expected: String, got: String },

        #[error("unknown pseudo-type tag: {0}")]
        UnknownPseudoType(String),

        #[error("numeric value out of range: {0}")]
        OutOfRange(String),

        #[error("{0}")]
        Message(String),
    }

    pub type Result<T> = std::result::Result<T, Error>;
}

pub use error::{Error, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
