//! Comments, courses, schools and suggestions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::project::ProjectStatus;

// ─── Comments ────────────────────────────────────────────────────────────────

/// Snapshot of the author taken when the comment was written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
  #[serde(default)]
  pub first_name: String,
  #[serde(default)]
  pub last_name:  String,
  pub email:      String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
  #[serde(rename = "_id")]
  pub id:         String,
  pub content:    String,
  pub user:       CommentAuthor,
  /// Id of the project the comment belongs to.
  pub project:    String,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
  pub project_id: String,
  pub content:    String,
}

// ─── Courses ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
  #[serde(rename = "_id")]
  pub id:    String,
  pub code:  String,
  pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CourseInput {
  pub code:  String,
  pub title: String,
}

// ─── Schools ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
  #[serde(rename = "_id")]
  pub id:     String,
  pub name:   String,
  #[serde(default)]
  pub majors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchoolInput {
  pub name:   String,
  pub majors: Vec<String>,
}

impl SchoolInput {
  /// Trim majors, drop blanks and duplicates while keeping order.
  pub fn normalized(self) -> Self {
    let mut majors: Vec<String> = Vec::with_capacity(self.majors.len());
    for m in crate::non_blank_list(self.majors) {
      if !majors.iter().any(|existing| existing.eq_ignore_ascii_case(&m)) {
        majors.push(m);
      }
    }
    Self { name: self.name.trim().to_string(), majors }
  }
}

// ─── Suggestions ─────────────────────────────────────────────────────────────

/// A bug report or piece of feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
  #[serde(rename = "_id")]
  pub id:         String,
  pub content:    String,
  #[serde(default)]
  pub image:      Option<String>,
  #[serde(default)]
  pub user:       Option<CommentAuthor>,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewSuggestion {
  pub content: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image:   Option<String>,
}

// ─── Notifications ───────────────────────────────────────────────────────────

/// Body of `POST /notify/project-status`: emails the team about a review
/// decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusNotice {
  pub project_id: String,
  pub status:     ProjectStatus,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message:    Option<String>,
}
