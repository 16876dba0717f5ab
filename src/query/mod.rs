//! Wire conversion engine: term/value encoding and response decoding.

pub mod decoder;
pub mod encoder;

pub use decoder::{decode, decode_datum, resolve_pseudo_types};
pub use encoder::{encode_datum, encode_query, encode_term};
