//! Async HTTP clients for the Showcase REST backend.
//!
//! One [`ShowcaseClient`] owns the connection pool and the session cookie
//! jar. Each backend resource is reached through a borrowed view
//! (`client.projects()`, `client.users()`, ...) whose methods take typed
//! parameters and return typed bodies.
//!
//! All failures are normalised here into [`showcase_core::ClientError`]; no
//! caller ever looks at a raw response.

mod transport;

pub mod auth;
pub mod comments;
pub mod courses;
pub mod notify;
pub mod params;
pub mod projects;
pub mod schools;
pub mod suggestions;
pub mod uploads;
pub mod users;

use std::{sync::Arc, time::Duration};

use reqwest::{Client, Url, cookie::Jar};
use showcase_core::{ClientError, Result};

pub use params::filter_object;

/// Fallback API root when neither configuration nor the build environment
/// supplies one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// API root baked in at build time via `SHOWCASE_API_URL`, if set.
pub fn build_time_base_url() -> &'static str {
  option_env!("SHOWCASE_API_URL").unwrap_or(DEFAULT_BASE_URL)
}

/// Connection settings for the Showcase API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  /// API root, e.g. `https://showcase.uni.edu/api`.
  pub base_url:       String,
  /// A `name=value` session cookie to seed the jar with.
  pub session_cookie: Option<String>,
  pub timeout:        Duration,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url:       build_time_base_url().to_string(),
      session_cookie: None,
      timeout:        Duration::from_secs(30),
    }
  }
}

/// Async HTTP client for the Showcase REST API.
///
/// Cheap to clone; the pool and the cookie jar are shared.
#[derive(Clone)]
pub struct ShowcaseClient {
  http:     Client,
  base_url: Arc<str>,
  origin:   Url,
}

impl ShowcaseClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let base_url = config.base_url.trim_end_matches('/').to_string();
    let origin = Url::parse(&base_url).map_err(|e| {
      ClientError::Precondition(format!("invalid API url {base_url:?}: {e}"))
    })?;
    if origin.cannot_be_a_base() {
      return Err(ClientError::Precondition(format!("invalid API url {base_url:?}")));
    }

    let jar = Arc::new(Jar::default());
    if let Some(cookie) = config.session_cookie.as_deref().filter(|c| !c.trim().is_empty()) {
      jar.add_cookie_str(&format!("{}; Path=/", cookie.trim()), &origin);
    }

    let http = Client::builder()
      .timeout(config.timeout)
      .cookie_provider(jar)
      .build()
      .map_err(|e| ClientError::Network(format!("failed to build HTTP client: {e}")))?;

    Ok(Self { http, base_url: base_url.into(), origin })
  }

  pub fn base_url(&self) -> &str { &self.base_url }

  /// `base_url` followed by `segments`, each percent-encoded as a single
  /// path segment.
  pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
    let mut url = self.origin.clone();
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty().extend(segments);
    }
    url
  }

  // ── Resources ─────────────────────────────────────────────────────────────

  pub fn auth(&self) -> auth::AuthClient<'_> { auth::AuthClient::new(self) }

  pub fn projects(&self) -> projects::ProjectClient<'_> { projects::ProjectClient::new(self) }

  pub fn users(&self) -> users::UserClient<'_> { users::UserClient::new(self) }

  pub fn comments(&self) -> comments::CommentClient<'_> { comments::CommentClient::new(self) }

  pub fn courses(&self) -> courses::CourseClient<'_> { courses::CourseClient::new(self) }

  pub fn schools(&self) -> schools::SchoolClient<'_> { schools::SchoolClient::new(self) }

  pub fn suggestions(&self) -> suggestions::SuggestionClient<'_> {
    suggestions::SuggestionClient::new(self)
  }

  pub fn uploads(&self) -> uploads::UploadClient<'_> { uploads::UploadClient::new(self) }

  pub fn notify(&self) -> notify::NotifyClient<'_> { notify::NotifyClient::new(self) }
}

/// Fail before any request when a required id is blank.
pub(crate) fn require_id<'a>(
  resource: showcase_core::Resource,
  id: &'a str,
) -> Result<&'a str> {
  let id = id.trim();
  if id.is_empty() {
    return Err(ClientError::Precondition(format!("{} id is required", resource.label())));
  }
  Ok(id)
}

#[cfg(test)]
mod tests;
