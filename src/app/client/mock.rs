//! Scripted in-memory transport for unit tests

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use tokio::sync::Semaphore;

use super::transport::{RawResponse, Transport, TransportResult};

/// Canned reply for one request
#[derive(Debug, Clone)]
pub enum MockReply {
    Response(RawResponse),
    Unreachable(String),
}

/// Transport that replays scripted replies per path
///
/// Each path holds a queue of replies; the last reply repeats once the queue
/// is down to one entry. Unscripted paths answer `404 Not Found`.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<String, VecDeque<MockReply>>>,
    calls: Mutex<HashMap<String, usize>>,
    total_calls: AtomicUsize,
    gate: Option<Arc<Semaphore>>,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold every request until `gate` has a permit available
    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Default::default()
        }
    }

    /// Sleep before answering each request
    pub fn delayed(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn reply(&self, path: &str, reply: MockReply) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn respond(&self, path: &str, response: RawResponse) -> &Self {
        self.reply(path, MockReply::Response(response))
    }

    pub fn json<T: Serialize>(&self, path: &str, value: &T) -> &Self {
        let body = serde_json::to_vec(value).unwrap();
        self.respond(path, RawResponse::json(body))
    }

    pub fn unreachable(&self, path: &str, cause: &str) -> &Self {
        self.reply(path, MockReply::Unreachable(cause.to_string()))
    }

    /// Total number of requests seen
    pub fn calls(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }

    /// Number of requests seen for one path
    pub fn calls_for(&self, path: &str) -> usize {
        self.calls.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    fn next_reply(&self, path: &str) -> MockReply {
        let mut replies = self.replies.lock().unwrap();
        match replies.get_mut(path) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => MockReply::Response(RawResponse {
                status: 404,
                status_text: "Not Found".to_string(),
                content_type: Some("text/html".to_string()),
                body: Ok(b"<h1>Not Found</h1>".to_vec()),
            }),
        }
    }
}

impl Transport for MockTransport {
    fn get<'a>(&'a self, path: &'a str) -> BoxFuture<'a, TransportResult> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        *self
            .calls
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default() += 1;

        async move {
            if let Some(gate) = &self.gate {
                let _permit = gate.acquire().await.unwrap();
            }
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            match self.next_reply(path) {
                MockReply::Response(response) => Ok(response),
                MockReply::Unreachable(cause) => Err(cause.into()),
            }
        }
        .boxed()
    }
}
