//! # Mock Order Source
//!
//! An in-memory [`OrderSource`] driven by an expectation queue, for deterministic
//! tests of everything above the transport.
//!
//! Each call to `fetch_orders` consumes the next expectation:
//!
//! | Builder | Behavior |
//! |---------|----------|
//! | `return_ok(report)` | answers immediately with the report |
//! | `return_err(error)` | answers immediately with the error |
//! | `hold()` | blocks until the returned [`HeldFetch`] is released |
//!
//! A call with no expectation left answers with a transport error and is counted
//! as unexpected; [`MockOrderSource::verify`] fails on it.
//!
//! ```rust
//! use expoflow_sync::fetcher::mock::MockOrderSource;
//! use expoflow_sync::fetcher::{FetchError, OrderSource};
//! use expoflow_sync::model::Identity;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockOrderSource::new();
//!     mock.expect_fetch().return_err(FetchError::Transport("offline".into()));
//!
//!     let identity = Identity::new("tech-innovations", "TechFlow Innovations");
//!     assert!(mock.fetch_orders(&identity).await.is_err());
//!     assert_eq!(mock.calls(), 1);
//!     mock.verify();
//! }
//! ```

use crate::fetcher::{FetchError, OrderReport, OrderSource};
use crate::model::Identity;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{oneshot, watch};

type Reply = Result<OrderReport, FetchError>;

enum Expectation {
    Respond(Reply),
    Hold(oneshot::Receiver<Reply>),
}

#[derive(Default)]
struct Recorded {
    requested: Vec<String>,
    unexpected: usize,
}

/// A scripted order source. Clones share the same script and counters.
#[derive(Clone)]
pub struct MockOrderSource {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    recorded: Arc<Mutex<Recorded>>,
    calls: Arc<watch::Sender<usize>>,
}

impl Default for MockOrderSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockOrderSource {
    pub fn new() -> Self {
        Self {
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            recorded: Arc::new(Mutex::new(Recorded::default())),
            calls: Arc::new(watch::Sender::new(0)),
        }
    }

    /// Expects one more `fetch_orders` call.
    pub fn expect_fetch(&self) -> FetchExpectationBuilder {
        FetchExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Number of `fetch_orders` calls so far.
    pub fn calls(&self) -> usize {
        *self.calls.borrow()
    }

    /// Waits until at least `count` calls have been made.
    pub async fn wait_for_calls(&self, count: usize) {
        let mut calls = self.calls.subscribe();
        // The sender lives in `self`, so the channel cannot close while waiting.
        let _ = calls.wait_for(|made| *made >= count).await;
    }

    /// Display names the source was asked about, in call order.
    pub fn requested(&self) -> Vec<String> {
        self.recorded.lock().unwrap().requested.clone()
    }

    /// Verifies that every expectation was consumed and nothing unexpected arrived.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
        let unexpected = self.recorded.lock().unwrap().unexpected;
        if unexpected > 0 {
            panic!("{} fetch calls arrived without an expectation", unexpected);
        }
    }
}

#[async_trait]
impl OrderSource for MockOrderSource {
    async fn fetch_orders(&self, identity: &Identity) -> Result<OrderReport, FetchError> {
        let expectation = self.expectations.lock().unwrap().pop_front();
        {
            let mut recorded = self.recorded.lock().unwrap();
            recorded.requested.push(identity.display_name.clone());
            if expectation.is_none() {
                recorded.unexpected += 1;
            }
        }
        self.calls.send_modify(|made| *made += 1);

        match expectation {
            Some(Expectation::Respond(reply)) => reply,
            Some(Expectation::Hold(release)) => release
                .await
                .unwrap_or_else(|_| Err(FetchError::Transport("held fetch was abandoned".to_string()))),
            None => Err(FetchError::Transport("unexpected fetch".to_string())),
        }
    }
}

/// Builder for `fetch_orders` expectations.
pub struct FetchExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl FetchExpectationBuilder {
    /// Sets the expectation to return a report.
    pub fn return_ok(self, report: OrderReport) {
        self.push(Expectation::Respond(Ok(report)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FetchError) {
        self.push(Expectation::Respond(Err(error)));
    }

    /// Sets the expectation to block until released.
    pub fn hold(self) -> HeldFetch {
        let (sender, receiver) = oneshot::channel();
        self.push(Expectation::Hold(receiver));
        HeldFetch { sender }
    }

    fn push(self, expectation: Expectation) {
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

/// A fetch parked inside the mock until the test decides how it ends.
pub struct HeldFetch {
    sender: oneshot::Sender<Reply>,
}

impl HeldFetch {
    /// Completes the held call. Returns `false` if the caller already gave up on it.
    pub fn release(self, reply: Result<OrderReport, FetchError>) -> bool {
        self.sender.send(reply).is_ok()
    }
}
