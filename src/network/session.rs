//! Session boundary and query submission.
//!
//! The driver does not establish or manage connections itself; a [`Session`]
//! is whatever the transport layer provides, narrowed to the three wire
//! interactions the query core needs: START a query, CONTINUE a partial
//! result stream, STOP one. Handshake, pooling, failover and retry all live
//! behind this trait.
//!
//! Responses arrive as ql2 JSON envelopes:
//!
//! ```json
//! {"t": 3, "r": [ ...batch items... ]}
//! ```
//!
//! where `t` is the [`ResponseType`] code and `r` the result batch.

use crate::error::{Error, Result};
use crate::network::cursor::Cursor;
use crate::query::encoder::{encode_query, encode_term};
use crate::reql::types::{QueryType, ResponseType};
use crate::reql::Term;
use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

/// Token identifying one in-flight query on a session.
pub type QueryToken = u64;

/// One response envelope from the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub response_type: ResponseType,
    /// Raw result batch, in arrival order.
    pub results: Vec<Value>,
}

impl Response {
    pub fn new(response_type: ResponseType, results: Vec<Value>) -> Self {
        Self {
            response_type,
            results,
        }
    }

    /// Parse a `{"t": code, "r": [...]}` envelope.
    pub fn from_wire(wire: &Value) -> Result<Self> {
        let code = wire
            .get("t")
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::Connection("response missing type code".to_string()))?;
        let response_type = ResponseType::from_u64(code)
            .ok_or_else(|| Error::Connection(format!("unknown response type code {code}")))?;
        let results = match wire.get("r") {
            Some(Value::Array(items)) => items.clone(),
            Some(other) => vec![other.clone()],
            None => Vec::new(),
        };
        Ok(Self::new(response_type, results))
    }

    /// Convert an error-family response into the driver error taxonomy.
    pub fn into_error(self) -> Error {
        let message = self
            .results
            .first()
            .and_then(Value::as_str)
            .unwrap_or("server reported an error")
            .to_string();
        match self.response_type {
            ResponseType::CompileError => Error::Construction(message),
            ResponseType::ClientError | ResponseType::RuntimeError => Error::Runtime(message),
            _ => Error::Runtime(message),
        }
    }
}

/// Transport-side collaborator carrying encoded queries to the server.
///
/// Implementations must resolve each call before returning, so cursor reads
/// stay synchronous from the caller's perspective even when a network round
/// trip happens underneath.
#[async_trait]
pub trait Session: Send + Sync {
    /// Submit a START message, returning the query token and first response.
    async fn send_start(&self, query: Value) -> Result<(QueryToken, Response)>;

    /// Request the next batch of a partial result stream.
    async fn send_continue(&self, token: QueryToken) -> Result<Response>;

    /// Cancel an in-flight query.
    async fn send_stop(&self, token: QueryToken) -> Result<()>;
}

/// Per-query options applied at submission time.
#[derive(Debug, Clone, Default)]
pub struct RunOpts {
    /// Default database for table references in this query.
    pub db: Option<String>,
}

impl RunOpts {
    fn to_global_optargs(&self) -> Result<Map<String, Value>> {
        let mut optargs = Map::new();
        if let Some(db) = &self.db {
            optargs.insert("db".to_string(), encode_term(&Term::db(db.clone()))?);
        }
        Ok(optargs)
    }
}

impl Term {
    /// Encode this term, submit it over `session`, and wrap the response
    /// stream in a [`Cursor`].
    ///
    /// Construction and encode errors abort before any network interaction;
    /// server-reported errors map into the driver taxonomy.
    pub async fn run<'a>(&self, session: &'a dyn Session, opts: RunOpts) -> Result<Cursor<'a>> {
        let query = encode_query(QueryType::Start, self, &opts.to_global_optargs()?)?;
        debug!(term_type = %self.term_type, "submitting query");

        let (token, response) = session.send_start(query).await?;
        if response.response_type.is_error() {
            return Err(response.into_error());
        }

        debug!(
            token,
            response_type = ?response.response_type,
            batch_len = response.results.len(),
            "query accepted"
        );
        Ok(Cursor::new(session, token, response))
    }
}
