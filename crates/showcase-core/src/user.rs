//! Users and roles.
//!
//! Users are created by the backend on first sign-in. This crate only mirrors
//! their shape; completeness and role checks are computed on the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

// ─── Role ────────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
  #[default]
  Student,
  Supervisor,
  Admin,
}

impl Role {
  /// Whether a principal holding `self` meets a `required` role.
  ///
  /// Roles match themselves. `Admin` additionally meets `Supervisor`; the
  /// reverse does not hold.
  pub fn satisfies(self, required: Role) -> bool {
    self == required || (self == Role::Admin && required == Role::Supervisor)
  }
}

// ─── User ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  #[serde(rename = "_id")]
  pub id:               String,
  #[serde(default)]
  pub first_name:       String,
  #[serde(default)]
  pub last_name:        String,
  pub email:            String,
  #[serde(default)]
  pub role:             Role,
  #[serde(default, rename = "linkedInUrl")]
  pub linkedin_url:     Option<String>,
  #[serde(default)]
  pub github_url:       Option<String>,
  #[serde(default)]
  pub university_id:    Option<String>,
  #[serde(default)]
  pub school:           Option<String>,
  #[serde(default)]
  pub major:            Option<String>,
  #[serde(default)]
  pub profile_picture:  Option<String>,
  #[serde(default)]
  pub is_deactivated:   bool,
  #[serde(default)]
  pub starred_projects: Vec<String>,
  #[serde(default)]
  pub created_at:       Option<DateTime<Utc>>,
}

impl User {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
      .trim()
      .to_string()
  }

  /// Names of the profile fields that are absent or blank.
  pub fn missing_profile_fields(&self) -> Vec<&'static str> {
    [
      ("linkedInUrl", &self.linkedin_url),
      ("githubUrl", &self.github_url),
      ("universityId", &self.university_id),
      ("school", &self.school),
      ("major", &self.major),
    ]
    .into_iter()
    .filter(|(_, v)| v.as_deref().is_none_or(|s| s.trim().is_empty()))
    .map(|(name, _)| name)
    .collect()
  }

  pub fn is_profile_complete(&self) -> bool { self.missing_profile_fields().is_empty() }

  pub fn has_starred(&self, project_id: &str) -> bool {
    self.starred_projects.iter().any(|p| p == project_id)
  }
}

// ─── Payloads ────────────────────────────────────────────────────────────────

/// Body of `PUT /user/profile`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub first_name:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub last_name:       Option<String>,
  #[serde(rename = "linkedInUrl", skip_serializing_if = "Option::is_none")]
  pub linkedin_url:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub github_url:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub university_id:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub school:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub major:           Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub profile_picture: Option<String>,
}

impl ProfileUpdate {
  /// Turn blank strings into `None` so they are not sent.
  pub fn normalized(self) -> Self {
    Self {
      first_name:      crate::non_blank(self.first_name),
      last_name:       crate::non_blank(self.last_name),
      linkedin_url:    crate::non_blank(self.linkedin_url),
      github_url:      crate::non_blank(self.github_url),
      university_id:   crate::non_blank(self.university_id),
      school:          crate::non_blank(self.school),
      major:           crate::non_blank(self.major),
      profile_picture: crate::non_blank(self.profile_picture),
    }
  }
}

/// Body of the admin `PUT /user/{id}` edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub first_name:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub last_name:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub university_id: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub school:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub major:         Option<String>,
}

impl UserUpdate {
  pub fn normalized(self) -> Self {
    Self {
      first_name:    crate::non_blank(self.first_name),
      last_name:     crate::non_blank(self.last_name),
      email:         crate::non_blank(self.email),
      university_id: crate::non_blank(self.university_id),
      school:        crate::non_blank(self.school),
      major:         crate::non_blank(self.major),
    }
  }
}
