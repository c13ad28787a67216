//! The process-wide query cache.
//!
//! One [`QueryCache`] is constructed at start-up and handed to whoever needs
//! it; clones share the same storage. Entries are addressed by hierarchical
//! [`QueryKey`]s and invalidated by key prefix. Invalidation marks entries
//! stale but keeps their data, so a view can keep rendering the old value
//! while it refetches.

use std::{
  any::Any,
  collections::HashMap,
  fmt,
  sync::{Arc, PoisonError, RwLock},
  time::{Duration, Instant},
};

use serde_json::Value;
use tokio::sync::broadcast;

// ─── QueryKey ────────────────────────────────────────────────────────────────

/// A hierarchical cache address such as
/// `["projects", "list", 1, 10, {"title": "Test"}]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryKey {
  segments: Vec<Value>,
}

impl QueryKey {
  pub fn new(group: &str) -> Self { Self { segments: vec![Value::from(group)] } }

  /// Append one segment.
  pub fn with(mut self, segment: impl Into<Value>) -> Self {
    self.segments.push(segment.into());
    self
  }

  pub fn segments(&self) -> &[Value] { &self.segments }

  pub fn group(&self) -> Option<&str> { self.segments.first().and_then(Value::as_str) }

  /// Whether every segment of `prefix` leads this key, in order.
  pub fn starts_with(&self, prefix: &QueryKey) -> bool {
    self.segments.starts_with(&prefix.segments)
  }

  /// Stable textual form; object segments serialise with sorted keys.
  fn canonical(&self) -> String { Value::Array(self.segments.clone()).to_string() }
}

impl fmt::Display for QueryKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.canonical()) }
}

// ─── Entries ─────────────────────────────────────────────────────────────────

struct Entry {
  key:        QueryKey,
  value:      Arc<dyn Any + Send + Sync>,
  updated_at: Instant,
  stale:      bool,
}

/// A typed view of a cached value.
#[derive(Debug)]
pub struct Cached<T> {
  pub data:       Arc<T>,
  pub updated_at: Instant,
  /// Set by invalidation; cleared when the entry is next written.
  pub stale:      bool,
}

impl<T> Cached<T> {
  /// Not invalidated and younger than `stale_after`.
  pub fn is_fresh(&self, stale_after: Duration) -> bool {
    !self.stale && self.updated_at.elapsed() < stale_after
  }
}

/// Notifications sent to every [`QueryCache::subscribe`] receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
  Updated(QueryKey),
  Invalidated { prefix: QueryKey, entries: usize },
  Removed { prefix: QueryKey, entries: usize },
}

// ─── QueryCache ──────────────────────────────────────────────────────────────

/// Shared query cache. Cheap to clone.
///
/// The lock is never held across an `.await`.
#[derive(Clone)]
pub struct QueryCache {
  entries: Arc<RwLock<HashMap<String, Entry>>>,
  events:  broadcast::Sender<CacheEvent>,
}

impl Default for QueryCache {
  fn default() -> Self { Self::new() }
}

impl QueryCache {
  pub fn new() -> Self {
    let (events, _) = broadcast::channel(64);
    Self { entries: Arc::new(RwLock::new(HashMap::new())), events }
  }

  /// The cached value under `key`, if present and of type `T`.
  pub fn get<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Cached<T>> {
    let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
    let entry = entries.get(&key.canonical())?;
    let data = entry.value.clone().downcast::<T>().ok()?;
    Some(Cached { data, updated_at: entry.updated_at, stale: entry.stale })
  }

  /// Store `value` under `key`, replacing any previous value and clearing
  /// its stale mark.
  pub fn set<T: Send + Sync + 'static>(&self, key: QueryKey, value: T) -> Arc<T> {
    let data = Arc::new(value);
    {
      let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
      entries.insert(
        key.canonical(),
        Entry {
          key:        key.clone(),
          value:      data.clone(),
          updated_at: Instant::now(),
          stale:      false,
        },
      );
    }
    tracing::trace!(%key, "cache updated");
    let _ = self.events.send(CacheEvent::Updated(key));
    data
  }

  /// Mark every entry under `prefix` stale. Returns how many were marked.
  pub fn invalidate(&self, prefix: &QueryKey) -> usize {
    let count = {
      let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
      let mut count = 0;
      for entry in entries.values_mut().filter(|e| e.key.starts_with(prefix)) {
        entry.stale = true;
        count += 1;
      }
      count
    };
    tracing::trace!(%prefix, count, "cache invalidated");
    let _ = self.events.send(CacheEvent::Invalidated { prefix: prefix.clone(), entries: count });
    count
  }

  /// Drop every entry under `prefix`. Returns how many were dropped.
  pub fn remove(&self, prefix: &QueryKey) -> usize {
    let count = {
      let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
      let before = entries.len();
      entries.retain(|_, e| !e.key.starts_with(prefix));
      before - entries.len()
    };
    let _ = self.events.send(CacheEvent::Removed { prefix: prefix.clone(), entries: count });
    count
  }

  /// True when `key` is cached and has been invalidated since it was written.
  pub fn is_stale(&self, key: &QueryKey) -> bool {
    let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
    entries.get(&key.canonical()).is_some_and(|e| e.stale)
  }

  pub fn contains(&self, key: &QueryKey) -> bool {
    let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
    entries.contains_key(&key.canonical())
  }

  /// All cached keys, in no particular order.
  pub fn keys(&self) -> Vec<QueryKey> {
    let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
    entries.values().map(|e| e.key.clone()).collect()
  }

  pub fn len(&self) -> usize {
    self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  pub fn clear(&self) {
    self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
  }

  pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> { self.events.subscribe() }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn list_key(page: u32, title: &str) -> QueryKey {
    QueryKey::new("projects")
      .with("list")
      .with(page)
      .with(10)
      .with(json!({ "title": title }))
  }

  #[test]
  fn keys_with_different_filters_do_not_collide() {
    let cache = QueryCache::new();
    cache.set(list_key(1, "a"), 1u32);
    cache.set(list_key(1, "b"), 2u32);
    assert_eq!(cache.len(), 2);
    assert_eq!(*cache.get::<u32>(&list_key(1, "a")).unwrap().data, 1);
    assert_eq!(*cache.get::<u32>(&list_key(1, "b")).unwrap().data, 2);
  }

  #[test]
  fn object_segments_are_order_insensitive() {
    let a = QueryKey::new("users").with(json!({ "role": "admin", "search": "x" }));
    let b = QueryKey::new("users").with(json!({ "search": "x", "role": "admin" }));
    assert_eq!(a.canonical(), b.canonical());
  }

  #[test]
  fn get_with_wrong_type_is_none() {
    let cache = QueryCache::new();
    let key = QueryKey::new("auth").with("me");
    cache.set(key.clone(), "not a number".to_string());
    assert!(cache.get::<u32>(&key).is_none());
    assert!(cache.get::<String>(&key).is_some());
  }

  #[test]
  fn invalidate_by_prefix_only_touches_matching_entries() {
    let cache = QueryCache::new();
    let detail = QueryKey::new("projects").with("detail").with("p1");
    let other = QueryKey::new("projectsArchive").with("list");
    let users = QueryKey::new("users").with("list");
    cache.set(list_key(1, "a"), 1u32);
    cache.set(list_key(2, "a"), 2u32);
    cache.set(detail.clone(), 3u32);
    cache.set(other.clone(), 4u32);
    cache.set(users.clone(), 5u32);

    let n = cache.invalidate(&QueryKey::new("projects").with("list"));
    assert_eq!(n, 2);
    assert!(cache.is_stale(&list_key(1, "a")));
    assert!(cache.is_stale(&list_key(2, "a")));
    assert!(!cache.is_stale(&detail));
    assert!(!cache.is_stale(&other));
    assert!(!cache.is_stale(&users));

    // Stale entries still serve data.
    let cached = cache.get::<u32>(&list_key(1, "a")).unwrap();
    assert!(cached.stale);
    assert_eq!(*cached.data, 1);
  }

  #[test]
  fn set_clears_stale_mark() {
    let cache = QueryCache::new();
    let key = QueryKey::new("starredProjects");
    cache.set(key.clone(), 1u32);
    cache.invalidate(&key);
    assert!(cache.is_stale(&key));
    cache.set(key.clone(), 2u32);
    assert!(!cache.is_stale(&key));
  }

  #[test]
  fn remove_drops_entries() {
    let cache = QueryCache::new();
    cache.set(list_key(1, "a"), 1u32);
    cache.set(QueryKey::new("users"), 1u32);
    assert_eq!(cache.remove(&QueryKey::new("projects")), 1);
    assert_eq!(cache.len(), 1);
    cache.clear();
    assert!(cache.is_empty());
  }

  #[test]
  fn freshness_respects_stale_after() {
    let cache = QueryCache::new();
    let key = QueryKey::new("auth").with("me");
    cache.set(key.clone(), 1u32);
    let cached = cache.get::<u32>(&key).unwrap();
    assert!(cached.is_fresh(Duration::from_secs(60)));
    assert!(!cached.is_fresh(Duration::ZERO));
  }

  #[tokio::test]
  async fn subscribers_see_invalidations() {
    let cache = QueryCache::new();
    let mut rx = cache.subscribe();
    let key = QueryKey::new("featuredProjects");
    cache.set(key.clone(), 1u32);
    cache.invalidate(&key);

    assert_eq!(rx.recv().await.unwrap(), CacheEvent::Updated(key.clone()));
    assert_eq!(
      rx.recv().await.unwrap(),
      CacheEvent::Invalidated { prefix: key, entries: 1 }
    );
  }
}
