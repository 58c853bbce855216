// tests/common/mod.rs
use std::collections::VecDeque;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::cache::token::TokenRecord;
use crate::config::credentials::Credentials;
use crate::error::FetchError;
use crate::sources::TokenFetcher;

pub fn credentials() -> Credentials {
    Credentials::new("app-a", "secret-a")
}

pub fn other_credentials() -> Credentials {
    Credentials::new("app-b", "secret-b")
}

/// One scripted fetch outcome: token value plus advertised ttl, or an error.
pub type Scripted = Result<(&'static str, i64), FetchError>;

/// Programmable fetcher: pops the next scripted outcome on every call,
/// counts invocations, and optionally holds each call open for a fixed
/// delay so tests can pile callers onto one in-flight refresh.
pub struct MockFetcher {
    outcomes: Mutex<VecDeque<Scripted>>,
    calls: Arc<AtomicUsize>,
    delay: Duration,
}

impl MockFetcher {
    pub fn scripted(outcomes: Vec<Scripted>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Arc::new(AtomicUsize::new(0)),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Handle to the invocation counter, usable after the fetcher has been
    /// moved into a coordinator.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl TokenFetcher for MockFetcher {
    async fn fetch(&self, _credentials: &Credentials) -> Result<TokenRecord, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let next = self
            .outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or(Err(FetchError::Transport("mock script exhausted".into())));
        next.map(|(value, ttl_seconds)| TokenRecord::new(value.to_string(), ttl_seconds))
    }
}
