//! Cached reads.

use std::{future::Future, sync::Arc, time::Duration};

use showcase_core::{ClientError, Result};

use crate::cache::{QueryCache, QueryKey};

// ─── Options ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
  /// When `false` the query reports [`QueryState::Idle`] without fetching.
  pub enabled:     bool,
  /// Extra attempts after a failed fetch.
  pub retry:       u32,
  pub retry_delay: Duration,
  /// Cached data younger than this is served without refetching.
  pub stale_after: Duration,
}

impl Default for QueryOptions {
  fn default() -> Self {
    Self {
      enabled:     true,
      retry:       1,
      retry_delay: Duration::from_millis(250),
      stale_after: Duration::from_secs(30),
    }
  }
}

impl QueryOptions {
  pub fn no_retry(self) -> Self { Self { retry: 0, ..self } }

  pub fn enabled(self, enabled: bool) -> Self { Self { enabled, ..self } }
}

// ─── State ───────────────────────────────────────────────────────────────────

/// What a view renders for one query.
#[derive(Debug)]
pub enum QueryState<T> {
  /// Disabled: a precondition (typically an id) is not available yet.
  Idle,
  Loading,
  Success(Arc<T>),
  Error(ClientError),
}

impl<T> Clone for QueryState<T> {
  fn clone(&self) -> Self {
    match self {
      Self::Idle => Self::Idle,
      Self::Loading => Self::Loading,
      Self::Success(data) => Self::Success(data.clone()),
      Self::Error(e) => Self::Error(e.clone()),
    }
  }
}

impl<T> Default for QueryState<T> {
  fn default() -> Self { Self::Idle }
}

impl<T> QueryState<T> {
  pub fn is_idle(&self) -> bool { matches!(self, Self::Idle) }

  pub fn is_loading(&self) -> bool { matches!(self, Self::Loading) }

  pub fn is_success(&self) -> bool { matches!(self, Self::Success(_)) }

  pub fn is_error(&self) -> bool { matches!(self, Self::Error(_)) }

  pub fn data(&self) -> Option<&T> {
    match self {
      Self::Success(data) => Some(data.as_ref()),
      _ => None,
    }
  }

  pub fn error(&self) -> Option<&ClientError> {
    match self {
      Self::Error(e) => Some(e),
      _ => None,
    }
  }

  pub fn into_result(self) -> Option<Result<Arc<T>>> {
    match self {
      Self::Success(data) => Some(Ok(data)),
      Self::Error(e) => Some(Err(e)),
      Self::Idle | Self::Loading => None,
    }
  }
}

impl<T> From<Result<Arc<T>>> for QueryState<T> {
  fn from(result: Result<Arc<T>>) -> Self {
    match result {
      Ok(data) => Self::Success(data),
      Err(e) => Self::Error(e),
    }
  }
}

// ─── Running a query ─────────────────────────────────────────────────────────

/// Errors worth a second attempt. Local preconditions never reached the
/// backend and a missing entity will still be missing.
fn retryable(err: &ClientError) -> bool {
  !matches!(err, ClientError::Precondition(_) | ClientError::NotFound(_))
}

/// Serve `key` from `cache` if fresh, otherwise call `fetch` (retrying per
/// `options`) and store the result.
///
/// Concurrent calls for the same key are not coalesced.
pub async fn fetch_query<T, F, Fut>(
  cache: &QueryCache,
  key: QueryKey,
  options: QueryOptions,
  fetch: F,
) -> QueryState<T>
where
  T: Send + Sync + 'static,
  F: Fn() -> Fut,
  Fut: Future<Output = Result<T>>,
{
  if !options.enabled {
    return QueryState::Idle;
  }
  if let Some(cached) = cache.get::<T>(&key)
    && cached.is_fresh(options.stale_after)
  {
    return QueryState::Success(cached.data);
  }

  let mut attempt = 0;
  loop {
    match fetch().await {
      Ok(value) => return QueryState::Success(cache.set(key, value)),
      Err(err) if attempt < options.retry && retryable(&err) => {
        attempt += 1;
        tracing::debug!(%key, attempt, error = %err, "retrying query");
        if !options.retry_delay.is_zero() {
          tokio::time::sleep(options.retry_delay).await;
        }
      }
      Err(err) => {
        tracing::warn!(%key, error = %err, "query failed");
        return QueryState::Error(err);
      }
    }
  }
}
