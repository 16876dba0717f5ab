//! Wire protocol enumerations and pseudo-type tags.
//!
//! Numeric codes match the ql2 protocol so the driver interoperates with any
//! RethinkDB-compatible server.

use serde::{Deserialize, Serialize};

/// Reserved discriminator key reclassifying a wire object as a pseudo-type.
pub const PSEUDO_TYPE_KEY: &str = "$reql_type$";

/// Pseudo-type tag for geometry values.
pub const PSEUDO_TYPE_GEOMETRY: &str = "GEOMETRY";

/// Pseudo-type tag for timestamps.
pub const PSEUDO_TYPE_TIME: &str = "TIME";

/// Pseudo-type tag for raw byte payloads.
pub const PSEUDO_TYPE_BINARY: &str = "BINARY";

/// Query type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u64)]
pub enum QueryType {
    Start = 1,
    Continue = 2,
    Stop = 3,
    NoreplyWait = 4,
    ServerInfo = 5,
}

impl QueryType {
    pub fn to_u64(self) -> u64 {
        self as u64
    }
}

/// Response type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u64)]
pub enum ResponseType {
    SuccessAtom = 1,
    SuccessSequence = 2,
    SuccessPartial = 3,
    WaitComplete = 4,
    ServerInfo = 5,
    ClientError = 16,
    CompileError = 17,
    RuntimeError = 18,
}

impl ResponseType {
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            1 => Some(ResponseType::SuccessAtom),
            2 => Some(ResponseType::SuccessSequence),
            3 => Some(ResponseType::SuccessPartial),
            4 => Some(ResponseType::WaitComplete),
            5 => Some(ResponseType::ServerInfo),
            16 => Some(ResponseType::ClientError),
            17 => Some(ResponseType::CompileError),
            18 => Some(ResponseType::RuntimeError),
            _ => None,
        }
    }

    pub fn to_u64(self) -> u64 {
        self as u64
    }

    /// True for the error response family.
    pub fn is_error(self) -> bool {
        matches!(
            self,
            ResponseType::ClientError | ResponseType::CompileError | ResponseType::RuntimeError
        )
    }

    /// True when the server may hold further batches for this query.
    pub fn is_partial(self) -> bool {
        matches!(self, ResponseType::SuccessPartial)
    }
}
