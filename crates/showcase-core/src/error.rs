//! The closed error type raised at the resource-client boundary.
//!
//! Every failure a caller can observe is one of these variants. Higher layers
//! match on the variant; they never inspect response bodies themselves.

use thiserror::Error;

// ─── Resource ────────────────────────────────────────────────────────────────

/// A backend resource, used to build default and not-found messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
  Auth,
  Project,
  User,
  Comment,
  Course,
  School,
  Suggestion,
  Upload,
  Notification,
}

impl Resource {
  /// Capitalised singular label, e.g. `"Project"`.
  pub fn label(self) -> &'static str {
    match self {
      Self::Auth => "Session",
      Self::Project => "Project",
      Self::User => "User",
      Self::Comment => "Comment",
      Self::Course => "Course",
      Self::School => "School",
      Self::Suggestion => "Suggestion",
      Self::Upload => "File",
      Self::Notification => "Notification",
    }
  }

  /// Lowercase singular noun used in default messages.
  pub fn singular(self) -> &'static str {
    match self {
      Self::Auth => "current user",
      Self::Project => "project",
      Self::User => "user",
      Self::Comment => "comment",
      Self::Course => "course",
      Self::School => "school",
      Self::Suggestion => "suggestion",
      Self::Upload => "file",
      Self::Notification => "notification",
    }
  }

  /// Lowercase plural noun used in default messages.
  pub fn plural(self) -> &'static str {
    match self {
      Self::Auth => "sessions",
      Self::Project => "projects",
      Self::User => "users",
      Self::Comment => "comments",
      Self::Course => "courses",
      Self::School => "schools",
      Self::Suggestion => "suggestions",
      Self::Upload => "files",
      Self::Notification => "notifications",
    }
  }
}

// ─── ClientError ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
  /// No response was received (connect, timeout, TLS...).
  #[error("network error: {0}")]
  Network(String),

  /// The backend answered with a failure status.
  #[error("{message}")]
  Backend { status: u16, message: String },

  /// 404 on a detail, update or delete operation.
  #[error("{} not found", .0.label())]
  NotFound(Resource),

  /// A local requirement failed before any request was sent.
  #[error("{0}")]
  Precondition(String),

  /// The response body did not have the expected shape.
  #[error("unexpected response: {0}")]
  Decode(String),
}

impl ClientError {
  /// HTTP status carried by the error, if the backend answered.
  pub fn status(&self) -> Option<u16> {
    match self {
      Self::Backend { status, .. } => Some(*status),
      Self::NotFound(_) => Some(404),
      _ => None,
    }
  }

  /// Whether this failure came from the backend rejecting the session.
  pub fn is_unauthorized(&self) -> bool {
    matches!(self.status(), Some(401 | 403))
  }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
