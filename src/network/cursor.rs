//! Cursor: forward-only reader over one query's result stream.
//!
//! A [`Cursor`] owns the current batch, the read position, and the
//! exhaustion flag for a single query. It is a lazy sequence: continuation
//! batches are fetched from the session only when a read outruns the
//! buffered items. One logical reader at a time; the cursor takes `&mut
//! self` on every read and is not meant to be shared.
//!
//! Read outcomes:
//!
//! - drained stream, no more batches: [`Error::EmptyCursor`] from `one`,
//!   clean return from `all`
//! - explicit [`Cursor::close`], decode failure, or transport failure:
//!   cursor transitions to closed; every later read is
//!   [`Error::ClosedCursor`]

use crate::error::{Error, Result};
use crate::network::session::{QueryToken, Response, Session};
use crate::query::decoder::decode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Reader over a possibly multi-batch result stream.
pub struct Cursor<'a> {
    session: &'a dyn Session,
    token: QueryToken,
    buffer: VecDeque<Value>,
    /// Server holds further batches for this token.
    more: bool,
    closed: bool,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(session: &'a dyn Session, token: QueryToken, first: Response) -> Self {
        let more = first.response_type.is_partial();
        Self {
            session,
            token,
            buffer: first.results.into(),
            more,
            closed: false,
        }
    }

    /// The query token this cursor reads.
    pub fn token(&self) -> QueryToken {
        self.token
    }

    /// True once the cursor can never yield another item.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Decode exactly one result item into `T`.
    ///
    /// Later items remain available for subsequent calls. An exhausted
    /// stream yields [`Error::EmptyCursor`], never a decode error.
    pub async fn one<T: DeserializeOwned>(&mut self) -> Result<T> {
        match self.next_raw().await? {
            Some(item) => self.decode_item(&item),
            None => Err(Error::EmptyCursor),
        }
    }

    /// Decode every remaining item, in arrival order, appending to `out`.
    ///
    /// The stream is exhausted afterwards.
    pub async fn all<T: DeserializeOwned>(&mut self, out: &mut Vec<T>) -> Result<()> {
        while let Some(item) = self.next_raw().await? {
            out.push(self.decode_item(&item)?);
        }
        Ok(())
    }

    /// Stop reading and release the server-side stream.
    pub async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.buffer.clear();
        if self.more {
            self.more = false;
            self.session.send_stop(self.token).await?;
        }
        Ok(())
    }

    fn decode_item<T: DeserializeOwned>(&mut self, item: &Value) -> Result<T> {
        decode(item).map_err(|e| {
            // Stopping further reads keeps the read position unambiguous.
            self.closed = true;
            Error::Decode(e)
        })
    }

    /// Next raw item, fetching continuation batches as needed.
    ///
    /// `Ok(None)` means the stream drained cleanly.
    async fn next_raw(&mut self) -> Result<Option<Value>> {
        if self.closed {
            return Err(Error::ClosedCursor);
        }
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }
            if !self.more {
                return Ok(None);
            }
            self.fetch_batch().await?;
        }
    }

    async fn fetch_batch(&mut self) -> Result<()> {
        debug!(token = self.token, "fetching continuation batch");
        let response = match self.session.send_continue(self.token).await {
            Ok(response) => response,
            Err(e) => {
                warn!(token = self.token, error = %e, "transport failure, closing cursor");
                self.closed = true;
                self.more = false;
                return Err(e);
            }
        };

        if response.response_type.is_error() {
            self.closed = true;
            self.more = false;
            return Err(response.into_error());
        }

        self.more = response.response_type.is_partial();
        self.buffer.extend(response.results);
        Ok(())
    }
}

impl std::fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("token", &self.token)
            .field("buffered", &self.buffer.len())
            .field("more", &self.more)
            .field("closed", &self.closed)
            .finish()
    }
}
