//! In-memory store of registered weighted points.
//!
//! Lock access uses `RwLock::unwrap()` intentionally. Lock poisoning only
//! occurs when another thread panicked while holding the lock, which is an
//! unrecoverable state for an in-memory store.

use crate::error::{Result, TsudoiError};
use crate::models::{GeoPoint, LatLng, PointId};
use crate::ports::Invalidate;
use std::sync::{Arc, RwLock};

/// Owner of the registered point set.
///
/// Ids come from a monotonic counter and are never reused, so a stale id
/// held by a caller can never alias a newer point. Every effective
/// mutation bumps the revision and notifies registered observers; that
/// notification is the sole staleness trigger for derived state such as
/// cached centroids and recommendations.
#[derive(Clone, Default)]
pub struct PointStore {
    inner: Arc<RwLock<StoreInner>>,
    observers: Arc<RwLock<Vec<Arc<dyn Invalidate>>>>,
}

impl std::fmt::Debug for PointStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read().unwrap();
        f.debug_struct("PointStore")
            .field("points", &inner.points)
            .field("next_id", &inner.next_id)
            .field("revision", &inner.revision)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct StoreInner {
    points: Vec<GeoPoint>,
    next_id: u64,
    revision: u64,
}

impl PointStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dependent component to invalidate on mutation.
    pub fn register_observer(&self, observer: Arc<dyn Invalidate>) {
        self.observers.write().unwrap().push(observer);
    }

    /// Register a point. Weight must be at least 1; the store is left
    /// unchanged when it is not.
    pub fn add(&self, location: LatLng, weight: u32) -> Result<PointId> {
        if weight < 1 {
            return Err(TsudoiError::InvalidWeight { weight: i64::from(weight) });
        }

        let id = {
            let mut inner = self.inner.write().unwrap();
            let id = PointId(inner.next_id);
            inner.next_id += 1;
            inner.points.push(GeoPoint { id, location, weight });
            inner.revision += 1;
            id
        };

        tracing::debug!(%id, %location, weight, "registered point");
        self.notify_observers();
        Ok(id)
    }

    /// Remove a point by id. Removing an absent id is a no-op, not an
    /// error; returns whether anything was removed. Observers are only
    /// notified when the set actually changed.
    pub fn remove(&self, id: PointId) -> bool {
        let removed = {
            let mut inner = self.inner.write().unwrap();
            let before = inner.points.len();
            inner.points.retain(|p| p.id != id);
            let removed = inner.points.len() != before;
            if removed {
                inner.revision += 1;
            }
            removed
        };

        if removed {
            tracing::debug!(%id, "removed point");
            self.notify_observers();
        }
        removed
    }

    /// Remove every point.
    pub fn clear(&self) {
        {
            let mut inner = self.inner.write().unwrap();
            inner.points.clear();
            inner.revision += 1;
        }
        tracing::debug!("cleared point store");
        self.notify_observers();
    }

    /// Snapshot of all points in insertion order.
    pub fn points(&self) -> Vec<GeoPoint> {
        self.inner.read().unwrap().points.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Monotonic revision counter, bumped on every effective mutation.
    pub fn revision(&self) -> u64 {
        self.inner.read().unwrap().revision
    }

    fn notify_observers(&self) {
        let observers = self.observers.read().unwrap().clone();
        for observer in observers {
            observer.invalidate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingObserver {
        calls: AtomicUsize,
    }

    impl CountingObserver {
        fn new() -> Arc<Self> {
            Arc::new(Self { calls: AtomicUsize::new(0) })
        }

        fn count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Invalidate for CountingObserver {
        fn invalidate(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let store = PointStore::new();
        let a = store.add(LatLng::new(35.0, 135.0), 2).unwrap();
        let b = store.add(LatLng::new(36.0, 136.0), 1).unwrap();

        let points = store.points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].id, a);
        assert_eq!(points[1].id, b);
        assert_eq!(points[0].weight, 2);
    }

    #[test]
    fn test_ids_are_never_reused_after_removal() {
        let store = PointStore::new();
        let first = store.add(LatLng::new(35.0, 135.0), 1).unwrap();
        store.remove(first);

        let second = store.add(LatLng::new(36.0, 136.0), 1).unwrap();
        assert!(second.0 > first.0, "id {} must not reuse removed id {}", second, first);
    }

    #[test]
    fn test_zero_weight_is_rejected_without_mutation() {
        let store = PointStore::new();
        let revision = store.revision();

        let err = store.add(LatLng::new(35.0, 135.0), 0).unwrap_err();
        assert!(matches!(err, TsudoiError::InvalidWeight { weight: 0 }));
        assert!(store.is_empty());
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_remove_takes_point_out_of_list() {
        let store = PointStore::new();
        let a = store.add(LatLng::new(35.0, 135.0), 1).unwrap();
        let b = store.add(LatLng::new(36.0, 136.0), 1).unwrap();

        assert!(store.remove(a));
        assert!(store.points().iter().all(|p| p.id != a));
        assert!(store.points().iter().any(|p| p.id == b));
    }

    #[test]
    fn test_remove_absent_id_is_a_noop() {
        let store = PointStore::new();
        store.add(LatLng::new(35.0, 135.0), 1).unwrap();
        let revision = store.revision();

        assert!(!store.remove(PointId(999)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_clear_empties_the_store() {
        let store = PointStore::new();
        store.add(LatLng::new(35.0, 135.0), 1).unwrap();
        store.add(LatLng::new(36.0, 136.0), 3).unwrap();

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_observers_fire_on_effective_mutations_only() {
        let store = PointStore::new();
        let observer = CountingObserver::new();
        store.register_observer(observer.clone());

        let id = store.add(LatLng::new(35.0, 135.0), 1).unwrap();
        assert_eq!(observer.count(), 1);

        store.remove(PointId(999)); // absent: no change, no signal
        assert_eq!(observer.count(), 1);

        store.remove(id);
        assert_eq!(observer.count(), 2);

        store.clear();
        assert_eq!(observer.count(), 3);
    }

    #[test]
    fn test_invalid_weight_does_not_notify() {
        let store = PointStore::new();
        let observer = CountingObserver::new();
        store.register_observer(observer.clone());

        let _ = store.add(LatLng::new(35.0, 135.0), 0);
        assert_eq!(observer.count(), 0);
    }
}
