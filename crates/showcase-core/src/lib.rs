//! Shared types for the Showcase project-showcase client.
//!
//! Mirrors of the backend's entities, the paginated envelope, the closed
//! [`ClientError`] and the message catalog. This crate has no HTTP or UI
//! dependencies; every other crate in the workspace builds on it.

pub mod catalog;
pub mod error;
pub mod i18n;
pub mod page;
pub mod project;
pub mod user;

pub use error::{ClientError, Resource, Result};
pub use page::{Page, PageRequest, Pagination};

/// `None` for absent or whitespace-only strings, trimmed otherwise.
pub fn non_blank(value: Option<String>) -> Option<String> {
  value
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty())
}

/// Trim every entry and drop the blank ones.
pub fn non_blank_list(values: Vec<String>) -> Vec<String> {
  values
    .into_iter()
    .filter_map(|v| non_blank(Some(v)))
    .collect()
}
