//! Session boundary and result-stream plumbing.

pub mod cursor;
pub mod session;

pub use cursor::Cursor;
pub use session::{QueryToken, Response, RunOpts, Session};
