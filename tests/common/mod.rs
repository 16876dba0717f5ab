//! Scripted session standing in for the transport layer.

#![allow(dead_code)]

use async_trait::async_trait;
use photonql::error::{Error, Result};
use photonql::network::{QueryToken, Response, Session};
use photonql::reql::types::ResponseType;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Mutex, Once};
use tracing_subscriber::EnvFilter;

static INIT_TRACING: Once = Once::new();

/// Capture driver logs during tests, filtered by `RUST_LOG`.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

/// Replays a fixed list of responses, recording what the driver sent.
pub struct ScriptedSession {
    script: Mutex<VecDeque<Result<Response>>>,
    pub sent: Mutex<Vec<Value>>,
    pub stopped: Mutex<Vec<QueryToken>>,
}

impl ScriptedSession {
    pub fn new(script: Vec<Result<Response>>) -> Self {
        init_tracing();
        Self {
            script: Mutex::new(script.into()),
            sent: Mutex::new(Vec::new()),
            stopped: Mutex::new(Vec::new()),
        }
    }

    /// Session answering every query with one SUCCESS_ATOM item.
    pub fn atom(item: Value) -> Self {
        Self::new(vec![Ok(Response::new(
            ResponseType::SuccessAtom,
            vec![item],
        ))])
    }

    /// Session answering with a single complete sequence batch.
    pub fn sequence(items: Vec<Value>) -> Self {
        Self::new(vec![Ok(Response::new(
            ResponseType::SuccessSequence,
            items,
        ))])
    }

    pub fn sent_queries(&self) -> Vec<Value> {
        self.sent.lock().unwrap().clone()
    }

    fn next(&self) -> Result<Response> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Connection("script exhausted".to_string())))
    }
}

#[async_trait]
impl Session for ScriptedSession {
    async fn send_start(&self, query: Value) -> Result<(QueryToken, Response)> {
        self.sent.lock().unwrap().push(query);
        Ok((1, self.next()?))
    }

    async fn send_continue(&self, _token: QueryToken) -> Result<Response> {
        self.next()
    }

    async fn send_stop(&self, token: QueryToken) -> Result<()> {
        self.stopped.lock().unwrap().push(token);
        Ok(())
    }
}

/// Relative float tolerance check, 1e-8 unless `a` is huge.
pub fn kindaclose(a: f64, b: f64) -> bool {
    tolerance(a, b, 1e-8)
}

pub fn tolerance(a: f64, b: f64, e: f64) -> bool {
    let mut e = e;
    let mut d = a - b;
    if d < 0.0 {
        d = -d;
    }
    if a != 0.0 {
        e *= a;
        if e < 0.0 {
            e = -e;
        }
    }
    d < e
}
