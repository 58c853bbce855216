use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::cache::token::TokenRecord;
use crate::config::credentials::Credentials;
use crate::error::FetchError;
use crate::sources::TokenFetcher;
use crate::utils::constants::DEFAULT_SAFETY_MARGIN_SECS;

type RefreshOutcome = Result<TokenRecord, FetchError>;

/// Per-identity cache slot. `record` is the current token, if any fetch has
/// ever succeeded; `inflight` is present exactly while one refresh is
/// running, and every caller that finds it present subscribes instead of
/// fetching.
#[derive(Debug, Default)]
struct CacheEntry {
    record: Option<TokenRecord>,
    inflight: Option<broadcast::Sender<RefreshOutcome>>,
}

/// Serves valid tokens to arbitrarily many concurrent callers with at most
/// one fetch in flight per credential identity.
///
/// Each identity gets its own mutex-guarded slot, so unrelated identities
/// never block each other; the outer map is locked only to look up or create
/// a slot. The refresh itself runs on a spawned task publishing over a
/// broadcast channel: cancelling any single `get_token` call, the one that
/// started the refresh included, leaves the fetch running for the callers
/// still waiting on it.
pub struct TokenCoordinator<F> {
    fetcher: Arc<F>,
    safety_margin_seconds: i64,
    entries: RwLock<HashMap<Credentials, Arc<Mutex<CacheEntry>>>>,
}

impl<F> TokenCoordinator<F>
where
    F: TokenFetcher + Send + Sync + 'static,
{
    pub fn new(fetcher: F) -> Self {
        Self::with_safety_margin(fetcher, DEFAULT_SAFETY_MARGIN_SECS)
    }

    /// Override the default 300-second safety margin. A record whose ttl is
    /// at or below the margin is treated as expired on arrival, so every
    /// access refetches rather than serving a token about to be invalidated.
    pub fn with_safety_margin(fetcher: F, safety_margin_seconds: i64) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            safety_margin_seconds,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return a currently valid token value for `credentials`, fetching a
    /// fresh one if the cached record is absent or expired.
    ///
    /// When a refresh is already running for this identity the call waits
    /// for that refresh and observes its outcome; it never starts a second
    /// fetch. A failed refresh is propagated identically to everyone who
    /// waited on it and leaves the previously cached record, if any, in
    /// place.
    pub async fn get_token(&self, credentials: &Credentials) -> Result<String, FetchError> {
        let entry = self.entry(credentials).await;

        // The expiry check and the leader/follower decision share one
        // critical section, so a caller arriving right after a refresh
        // completed sees the installed record instead of racing a new fetch.
        let mut rx = {
            let mut slot = entry.lock().await;

            if let Some(record) = slot
                .record
                .as_ref()
                .filter(|record| record.is_valid(self.safety_margin_seconds))
            {
                debug!(app_id = %credentials.app_id, "serving cached access token");
                return Ok(record.value.clone());
            }

            match &slot.inflight {
                Some(tx) => tx.subscribe(),
                None => {
                    let (tx, rx) = broadcast::channel(1);
                    slot.inflight = Some(tx);
                    self.spawn_refresh(credentials.clone(), entry.clone());
                    rx
                }
            }
        };

        match rx.recv().await {
            Ok(Ok(record)) => Ok(record.value),
            Ok(Err(err)) => Err(err),
            // Sender dropped without publishing: the refresh task died.
            Err(_) => Err(FetchError::Transport(
                "token refresh aborted before completing".into(),
            )),
        }
    }

    /// Current cached record for `credentials`, valid or not, without
    /// triggering a refresh.
    pub async fn cached_record(&self, credentials: &Credentials) -> Option<TokenRecord> {
        let entries = self.entries.read().await;
        let entry = entries.get(credentials)?.clone();
        drop(entries);
        let record = entry.lock().await.record.clone();
        record
    }

    /// Look up the slot for this identity, creating it on first request.
    /// Steady state takes only the read lock.
    async fn entry(&self, credentials: &Credentials) -> Arc<Mutex<CacheEntry>> {
        if let Some(entry) = self.entries.read().await.get(credentials) {
            return entry.clone();
        }
        let mut entries = self.entries.write().await;
        entries
            .entry(credentials.clone())
            .or_insert_with(|| Arc::new(Mutex::new(CacheEntry::default())))
            .clone()
    }

    fn spawn_refresh(&self, credentials: Credentials, entry: Arc<Mutex<CacheEntry>>) {
        let fetcher = self.fetcher.clone();
        tokio::spawn(async move {
            debug!(app_id = %credentials.app_id, "refreshing access token");
            let outcome = fetcher.fetch(&credentials).await;

            let mut slot = entry.lock().await;
            let tx = slot.inflight.take();
            match &outcome {
                Ok(record) => {
                    info!(
                        app_id = %credentials.app_id,
                        ttl_seconds = record.ttl_seconds,
                        "access token refreshed"
                    );
                    slot.record = Some(record.clone());
                }
                Err(err) => {
                    warn!(
                        app_id = %credentials.app_id,
                        "access token refresh failed, keeping previous record: {err}"
                    );
                }
            }
            // Outcome is installed and the in-flight marker cleared before
            // waiters wake, still under the slot lock. Send fails only when
            // every waiter already gave up.
            if let Some(tx) = tx {
                let _ = tx.send(outcome);
            }
        });
    }
}
