//! Response envelopes shared by every resource.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
  pub page:        u32,
  pub limit:       u32,
  pub total:       u64,
  pub total_pages: u32,
}

impl Pagination {
  pub fn has_next(&self) -> bool { self.page < self.total_pages }

  pub fn has_prev(&self) -> bool { self.page > 1 }
}

/// A paginated list. The backend names the list `data` for most resources and
/// `projects` for projects; both deserialise into [`Page::data`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
  #[serde(alias = "projects")]
  pub data:       Vec<T>,
  pub pagination: Pagination,
}

/// Page number and size sent with every list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageRequest {
  pub page:  u32,
  pub limit: u32,
}

impl PageRequest {
  pub const DEFAULT_LIMIT: u32 = 10;

  pub fn new(page: u32, limit: u32) -> Self { Self { page, limit } }

  pub fn first() -> Self { Self::new(1, Self::DEFAULT_LIMIT) }

  pub fn next(self) -> Self { Self { page: self.page + 1, ..self } }

  pub fn prev(self) -> Self { Self { page: self.page.saturating_sub(1).max(1), ..self } }
}

impl Default for PageRequest {
  fn default() -> Self { Self::first() }
}

/// `{ "message": "..." }` returned by most mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEnvelope {
  pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
  pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFiles {
  pub urls: Vec<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn page_accepts_projects_alias() {
    let page: Page<u32> = serde_json::from_value(serde_json::json!({
      "projects": [1, 2],
      "pagination": { "page": 1, "limit": 10, "total": 2, "totalPages": 1 }
    }))
    .unwrap();
    assert_eq!(page.data, vec![1, 2]);
    assert!(!page.pagination.has_next());
    assert!(!page.pagination.has_prev());
  }

  #[test]
  fn page_request_never_goes_below_one() {
    assert_eq!(PageRequest::first().prev().page, 1);
    assert_eq!(PageRequest::new(3, 20).prev(), PageRequest::new(2, 20));
    assert_eq!(PageRequest::first().next().page, 2);
  }
}
