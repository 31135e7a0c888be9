//! In-memory query cache shared by the data hooks.
//!
//! Entries are keyed `resource?filters` and hold the last successful value plus
//! the last error. Subscribers are notified whenever an entry under their key
//! changes or is invalidated, so every mounted view of a collection refreshes
//! after a mutation.
//!
//! Each fetch is tagged with the cache epoch it started in. [`QueryCache::clear`]
//! starts a new epoch, and results from older fetches are dropped on arrival.

use std::any::Any;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use yew::Callback;

use crate::services::api::ApiError;

pub struct CacheEntry {
    pub data: Option<Rc<dyn Any>>,
    pub error: Option<ApiError>,
    pub stale: bool,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    subscribers: HashMap<String, Vec<(usize, Callback<()>)>>,
    in_flight: HashSet<String>,
    next_subscriber: usize,
    epoch: u64,
}

#[derive(Clone, Default)]
pub struct QueryCache {
    inner: Rc<RefCell<CacheInner>>,
}

impl PartialEq for QueryCache {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// `resource` or `resource?canonical-filters`.
pub fn cache_key(resource: &str, filters: &str) -> String {
    if filters.is_empty() {
        resource.to_string()
    } else {
        format!("{resource}?{filters}")
    }
}

fn matches_prefix(key: &str, prefix: &str) -> bool {
    key == prefix
        || key
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('?') || rest.starts_with('/'))
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: 'static>(&self, key: &str) -> Option<Rc<T>> {
        let inner = self.inner.borrow();
        let data = inner.entries.get(key)?.data.clone()?;
        data.downcast::<T>().ok()
    }

    pub fn error(&self, key: &str) -> Option<ApiError> {
        self.inner
            .borrow()
            .entries
            .get(key)
            .and_then(|entry| entry.error.clone())
    }

    /// True when there is no entry or it was invalidated since the last fetch.
    pub fn is_stale(&self, key: &str) -> bool {
        self.inner
            .borrow()
            .entries
            .get(key)
            .map_or(true, |entry| entry.stale)
    }

    /// Claim the fetch for `key`, returning the epoch to hand back to
    /// [`store`](Self::store). `None` when another view already has one running.
    pub fn try_begin(&self, key: &str) -> Option<u64> {
        let mut inner = self.inner.borrow_mut();
        let epoch = inner.epoch;
        inner.in_flight.insert(key.to_string()).then_some(epoch)
    }

    pub fn is_fetching(&self, key: &str) -> bool {
        self.inner.borrow().in_flight.contains(key)
    }

    /// Record a fetched value. Ignored when the cache was cleared after `epoch`.
    pub fn store<T: 'static>(&self, key: &str, epoch: u64, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.epoch != epoch {
                return;
            }
            inner.in_flight.remove(key);
            inner.entries.insert(
                key.to_string(),
                CacheEntry {
                    data: Some(Rc::new(value)),
                    error: None,
                    stale: false,
                },
            );
        }
        self.notify(|k| k == key);
    }

    /// Record a failed fetch. Cached data is kept.
    pub fn store_error(&self, key: &str, epoch: u64, error: ApiError) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.epoch != epoch {
                return;
            }
            inner.in_flight.remove(key);
            let entry = inner.entries.entry(key.to_string()).or_insert(CacheEntry {
                data: None,
                error: None,
                stale: false,
            });
            entry.error = Some(error);
            entry.stale = false;
        }
        self.notify(|k| k == key);
    }

    pub fn subscribe(&self, key: &str, callback: Callback<()>) -> usize {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_subscriber;
        inner.next_subscriber += 1;
        inner
            .subscribers
            .entry(key.to_string())
            .or_default()
            .push((id, callback));
        id
    }

    pub fn unsubscribe(&self, key: &str, id: usize) {
        let mut inner = self.inner.borrow_mut();
        if let Some(list) = inner.subscribers.get_mut(key) {
            list.retain(|(existing, _)| *existing != id);
            if list.is_empty() {
                inner.subscribers.remove(key);
            }
        }
    }

    /// Mark every entry under `prefix` stale and tell its subscribers to refetch.
    pub fn invalidate(&self, prefix: &str) {
        {
            let mut inner = self.inner.borrow_mut();
            for (key, entry) in inner.entries.iter_mut() {
                if matches_prefix(key, prefix) {
                    entry.stale = true;
                }
            }
        }
        self.notify(|key| matches_prefix(key, prefix));
    }

    /// Drop everything and start a new epoch, used on logout.
    pub fn clear(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.entries.clear();
            inner.in_flight.clear();
            inner.epoch += 1;
        }
        self.notify(|_| true);
    }

    fn notify(&self, wanted: impl Fn(&str) -> bool) {
        // Callbacks may touch the cache again, so collect them before emitting.
        let callbacks: Vec<Callback<()>> = {
            let inner = self.inner.borrow();
            inner
                .subscribers
                .iter()
                .filter(|(key, _)| wanted(key))
                .flat_map(|(_, list)| list.iter().map(|(_, cb)| cb.clone()))
                .collect()
        };
        for callback in callbacks {
            callback.emit(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter(cache: &QueryCache, key: &str) -> Rc<Cell<u32>> {
        let hits = Rc::new(Cell::new(0));
        let hits_cb = hits.clone();
        cache.subscribe(key, Callback::from(move |_| hits_cb.set(hits_cb.get() + 1)));
        hits
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(cache_key("clients", ""), "clients");
        assert_eq!(cache_key("shifts", "date=2025-03-10"), "shifts?date=2025-03-10");
    }

    fn put<T: 'static>(cache: &QueryCache, key: &str, value: T) {
        let epoch = cache.try_begin(key).unwrap();
        cache.store(key, epoch, value);
    }

    #[test]
    fn test_store_and_get_typed() {
        let cache = QueryCache::new();
        put(&cache, "clients", vec![1_i64, 2, 3]);
        assert_eq!(cache.get::<Vec<i64>>("clients").as_deref(), Some(&vec![1, 2, 3]));
        assert!(cache.get::<String>("clients").is_none());
        assert!(!cache.is_stale("clients"));
        assert!(cache.is_stale("users"));
    }

    #[test]
    fn test_error_keeps_previous_data() {
        let cache = QueryCache::new();
        put(&cache, "goals", 7_u32);
        let epoch = cache.try_begin("goals").unwrap();
        cache.store_error("goals", epoch, ApiError::Network("offline".to_string()));
        assert_eq!(cache.get::<u32>("goals").as_deref(), Some(&7));
        assert!(cache.error("goals").is_some());

        put(&cache, "goals", 8_u32);
        assert!(cache.error("goals").is_none());
    }

    #[test]
    fn test_in_flight_fetches_are_deduplicated() {
        let cache = QueryCache::new();
        let epoch = cache.try_begin("clients").unwrap();
        assert_eq!(cache.try_begin("clients"), None);
        assert!(cache.is_fetching("clients"));
        cache.store("clients", epoch, 1_u8);
        assert!(!cache.is_fetching("clients"));
        let epoch = cache.try_begin("clients").unwrap();
        cache.store_error("clients", epoch, ApiError::Unauthorized);
        assert!(!cache.is_fetching("clients"));
    }

    #[test]
    fn test_invalidate_by_prefix() {
        let cache = QueryCache::new();
        put(&cache, "shifts", 1_u8);
        put(&cache, "shifts?date=2025-03-10", 2_u8);
        put(&cache, "shifts_summary", 3_u8);
        let all = counter(&cache, "shifts");
        let today = counter(&cache, "shifts?date=2025-03-10");
        let other = counter(&cache, "shifts_summary");

        cache.invalidate("shifts");
        assert!(cache.is_stale("shifts"));
        assert!(cache.is_stale("shifts?date=2025-03-10"));
        assert!(!cache.is_stale("shifts_summary"));
        assert_eq!((all.get(), today.get(), other.get()), (1, 1, 0));
    }

    #[test]
    fn test_unsubscribe_and_clear() {
        let cache = QueryCache::new();
        let hits = Rc::new(Cell::new(0));
        let hits_cb = hits.clone();
        let id = cache.subscribe("users", Callback::from(move |_| hits_cb.set(hits_cb.get() + 1)));
        put(&cache, "users", ());
        cache.unsubscribe("users", id);
        cache.clear();
        assert_eq!(hits.get(), 1);
        assert!(cache.get::<()>("users").is_none());
    }

    #[test]
    fn test_fetch_finishing_after_clear_is_dropped() {
        let cache = QueryCache::new();
        let before_logout = cache.try_begin("clients").unwrap();
        cache.clear();

        cache.store("clients", before_logout, vec![1_i64]);
        assert!(cache.get::<Vec<i64>>("clients").is_none());
        cache.store_error("clients", before_logout, ApiError::Unauthorized);
        assert!(cache.error("clients").is_none());
        assert!(cache.is_stale("clients"));

        let after_login = cache.try_begin("clients").unwrap();
        assert_ne!(before_logout, after_login);
        cache.store("clients", before_logout, vec![1_i64]);
        assert!(cache.is_fetching("clients"));
        cache.store("clients", after_login, vec![2_i64]);
        assert_eq!(cache.get::<Vec<i64>>("clients").as_deref(), Some(&vec![2]));
        assert!(!cache.is_fetching("clients"));
    }
}
