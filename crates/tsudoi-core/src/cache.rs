//! Recommendation cache: single-flight fetch lifecycle per
//! (centre, radius) key.
//!
//! Mutex access uses `unwrap()` intentionally; lock poisoning means
//! another task panicked while holding the lock, which is unrecoverable
//! for in-memory state. The lock is never held across an await point.

use crate::models::{LatLng, RecommendationSet};
use crate::ports::{Invalidate, PoiSource};
use crate::recommend::Recommender;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

/// Identity of one recommendation request.
///
/// Coordinates compare bitwise: "the same key" means the exact same
/// request was reproduced, not an epsilon-close one.
#[derive(Debug, Clone, Copy)]
pub struct CacheKey {
    pub center: LatLng,
    pub radius_km: f64,
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        self.center.lat.to_bits() == other.center.lat.to_bits()
            && self.center.lon.to_bits() == other.center.lon.to_bits()
            && self.radius_km.to_bits() == other.radius_km.to_bits()
    }
}

impl Eq for CacheKey {}

/// Snapshot of the fetch lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchStatus {
    Idle,
    Fetching,
    Ready(RecommendationSet),
    Error(String),
}

/// What a subscriber receives when the fetch settles.
pub type FetchOutcome = std::result::Result<RecommendationSet, String>;

struct CacheInner {
    status: FetchStatus,
    key: Option<CacheKey>,
    /// Bumped by every `start` and `invalidate`; a completing fetch only
    /// applies its result when its generation is still current, so a
    /// slow, now-stale response can never overwrite newer state.
    generation: u64,
    waiters: Vec<oneshot::Sender<FetchOutcome>>,
}

/// Holds the fetch lifecycle for one (centre, radius) key.
///
/// `start` prefetches without blocking; `subscribe` hands out a future
/// resolved exactly once when the state first reaches Ready or Error.
/// That decouples "trigger the fetch early" from "render the result".
pub struct RecommendationCache<S: PoiSource + 'static> {
    recommender: Arc<Recommender<S>>,
    max_per_category: usize,
    inner: Arc<Mutex<CacheInner>>,
}

impl<S: PoiSource + 'static> RecommendationCache<S> {
    pub fn new(recommender: Recommender<S>, max_per_category: usize) -> Self {
        Self {
            recommender: Arc::new(recommender),
            max_per_category,
            inner: Arc::new(Mutex::new(CacheInner {
                status: FetchStatus::Idle,
                key: None,
                generation: 0,
                waiters: Vec::new(),
            })),
        }
    }

    /// Begin fetching recommendations for a key.
    ///
    /// A no-op when an equivalent request is already Fetching or Ready,
    /// which is the only guard needed to keep at most one fetch in
    /// flight per key. Any other state starts a fresh fetch for the new
    /// key; nothing from a prior key is ever merged in.
    pub fn start(&self, center: LatLng, radius_km: f64) {
        let key = CacheKey { center, radius_km };

        let generation = {
            let mut inner = self.inner.lock().unwrap();
            let same_key = inner.key == Some(key);
            if same_key
                && matches!(inner.status, FetchStatus::Fetching | FetchStatus::Ready(_))
            {
                return;
            }
            inner.generation += 1;
            inner.key = Some(key);
            inner.status = FetchStatus::Fetching;
            inner.generation
        };

        let recommender = self.recommender.clone();
        let inner = self.inner.clone();
        let max_per_category = self.max_per_category;

        tokio::spawn(async move {
            let outcome = recommender.recommend(center, radius_km, max_per_category).await;

            let mut guard = inner.lock().unwrap();
            if guard.generation != generation {
                tracing::debug!("dropping stale recommendation response");
                return;
            }

            let outcome = match outcome {
                Ok(set) => {
                    guard.status = FetchStatus::Ready(set.clone());
                    Ok(set)
                }
                Err(err) => {
                    let message = err.to_string();
                    tracing::warn!(%message, "recommendation fetch failed");
                    guard.status = FetchStatus::Error(message.clone());
                    Err(message)
                }
            };

            for waiter in guard.waiters.drain(..) {
                let _ = waiter.send(outcome.clone());
            }
        });
    }

    /// Reset to Idle and discard any stored result or error.
    ///
    /// An in-flight fetch is not aborted, but its completion will find a
    /// newer generation and be dropped. Pending subscribers are released
    /// by dropping their senders.
    pub fn invalidate(&self) {
        self.reset();
    }

    fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.generation += 1;
        inner.key = None;
        inner.status = FetchStatus::Idle;
        inner.waiters.clear();
    }

    /// Non-blocking snapshot of the current state. Never fetches.
    pub fn status(&self) -> FetchStatus {
        self.inner.lock().unwrap().status.clone()
    }

    /// Current key, if a request has been recorded.
    pub fn key(&self) -> Option<CacheKey> {
        self.inner.lock().unwrap().key
    }

    /// Register interest in the result before it is ready.
    ///
    /// The receiver resolves exactly once, at the moment the state first
    /// reaches Ready or Error; if the state is already settled it
    /// resolves immediately. Invalidation drops the sender, surfacing as
    /// a receive error the consumer treats as "no longer interested".
    pub fn subscribe(&self) -> oneshot::Receiver<FetchOutcome> {
        let (tx, rx) = oneshot::channel();
        let mut inner = self.inner.lock().unwrap();
        match &inner.status {
            FetchStatus::Ready(set) => {
                let _ = tx.send(Ok(set.clone()));
            }
            FetchStatus::Error(message) => {
                let _ = tx.send(Err(message.clone()));
            }
            FetchStatus::Idle | FetchStatus::Fetching => {
                inner.waiters.push(tx);
            }
        }
        rx
    }

    /// Await the result, but never resolve before `min_display` has
    /// elapsed.
    ///
    /// Two independent legs, the minimum-display timer and the fetch
    /// completion, are combined only once both have settled. Returns
    /// `None` when the subscription was cancelled by invalidation.
    pub async fn ready_after(&self, min_display: Duration) -> Option<FetchOutcome> {
        let subscription = self.subscribe();
        let (outcome, ()) = tokio::join!(subscription, tokio::time::sleep(min_display));
        outcome.ok()
    }
}

impl<S: PoiSource + 'static> Invalidate for RecommendationCache<S> {
    fn invalidate(&self) {
        self.reset();
    }
}
