//! Query-string construction for list endpoints.
//!
//! Filters are plain `Serialize` structs. [`filter_object`] reduces one to the
//! fields that actually carry a value; the same reduced object is used for the
//! query string here and for cache keys in `showcase-query`, so a filter that
//! is not sent can never split the cache either.

use serde::Serialize;
use serde_json::{Map, Value};
use showcase_core::PageRequest;

/// Serialise `filters` and keep only meaningful fields: nulls, blank strings
/// and empty arrays are dropped, strings are trimmed.
pub fn filter_object<F: Serialize>(filters: &F) -> Map<String, Value> {
  let Ok(Value::Object(fields)) = serde_json::to_value(filters) else {
    return Map::new();
  };
  fields
    .into_iter()
    .filter_map(|(k, v)| match v {
      Value::Null => None,
      Value::String(s) if s.trim().is_empty() => None,
      Value::String(s) => Some((k, Value::String(s.trim().to_string()))),
      Value::Array(items) if items.is_empty() => None,
      other => Some((k, other)),
    })
    .collect()
}

fn param_value(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    Value::Array(items) => items.iter().map(param_value).collect::<Vec<_>>().join(","),
    other => other.to_string(),
  }
}

/// `page`, `limit`, then every non-empty filter field.
pub(crate) fn list_query<F: Serialize>(page: PageRequest, filters: &F) -> Vec<(String, String)> {
  let mut pairs = vec![
    ("page".to_string(), page.page.to_string()),
    ("limit".to_string(), page.limit.to_string()),
  ];
  pairs.extend(
    filter_object(filters)
      .into_iter()
      .map(|(k, v)| (k, param_value(&v))),
  );
  pairs
}
