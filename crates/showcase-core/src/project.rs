//! Projects, the showcased unit.
//!
//! A project moves through review: it is created as `pending-ta`, then a
//! teaching assistant or supervisor accepts or rejects it. Only accepted
//! projects are visible to visitors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ─── Status ──────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ProjectStatus {
  #[default]
  PendingTa,
  Accepted,
  Rejected,
}

// ─── Team ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
  pub name:  String,
  pub email: String,
}

// ─── Project ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
  #[serde(rename = "_id")]
  pub id:                 String,
  pub title:              String,
  #[serde(default)]
  pub description:        String,
  #[serde(default)]
  pub technologies:       Vec<String>,
  #[serde(default)]
  pub tags:               Vec<String>,
  #[serde(default)]
  pub images:             Vec<String>,
  #[serde(default)]
  pub video_url:          Option<String>,
  #[serde(default)]
  pub github_url:         Option<String>,
  #[serde(default)]
  pub live_url:           Option<String>,
  #[serde(default)]
  pub team_leader:        Option<Member>,
  #[serde(default)]
  pub team_members:       Vec<Member>,
  #[serde(default)]
  pub supervisor:         Option<String>,
  #[serde(default)]
  pub teaching_assistant: Option<String>,
  /// Course *code*, not a course id.
  #[serde(default)]
  pub course:             Option<String>,
  #[serde(default)]
  pub status:             ProjectStatus,
  #[serde(default)]
  pub stars:              u32,
  #[serde(default)]
  pub created_at:         Option<DateTime<Utc>>,
}

// ─── Payloads ────────────────────────────────────────────────────────────────

/// Body of `POST /project`.
///
/// Optional links are omitted from the payload when unset; call
/// [`NewProject::normalized`] to fold blank strings into `None` first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
  pub title:              String,
  pub description:        String,
  pub technologies:       Vec<String>,
  pub tags:               Vec<String>,
  pub images:             Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub video_url:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub github_url:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub live_url:           Option<String>,
  pub team_leader:        Member,
  pub team_members:       Vec<Member>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub supervisor:         Option<String>,
  pub teaching_assistant: String,
  pub course:             String,
}

impl NewProject {
  pub fn normalized(self) -> Self {
    Self {
      video_url: crate::non_blank(self.video_url),
      github_url: crate::non_blank(self.github_url),
      live_url: crate::non_blank(self.live_url),
      supervisor: crate::non_blank(self.supervisor),
      technologies: crate::non_blank_list(self.technologies),
      tags: crate::non_blank_list(self.tags),
      ..self
    }
  }

  /// Whether the teaching assistant address belongs to `domain`
  /// (e.g. `"uni.edu"`). Matching is case-insensitive.
  pub fn teaching_assistant_in_domain(&self, domain: &str) -> bool {
    let ta = self.teaching_assistant.trim().to_ascii_lowercase();
    let suffix = format!("@{}", domain.trim_start_matches('@').to_ascii_lowercase());
    ta.len() > suffix.len() && ta.ends_with(&suffix)
  }
}

/// Body of `PUT /project/{id}`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title:              Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub technologies:       Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tags:               Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub images:             Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub video_url:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub github_url:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub live_url:           Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub team_members:       Option<Vec<Member>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub teaching_assistant: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub course:             Option<String>,
}

impl ProjectUpdate {
  pub fn normalized(self) -> Self {
    Self {
      title: crate::non_blank(self.title),
      description: crate::non_blank(self.description),
      video_url: crate::non_blank(self.video_url),
      github_url: crate::non_blank(self.github_url),
      live_url: crate::non_blank(self.live_url),
      teaching_assistant: crate::non_blank(self.teaching_assistant),
      course: crate::non_blank(self.course),
      ..self
    }
  }
}

/// `action` field of `POST /project/{id}/star`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StarAction {
  Add,
  Remove,
}

impl StarAction {
  /// The action that flips the current starred state.
  pub fn toggle(currently_starred: bool) -> Self {
    if currently_starred { Self::Remove } else { Self::Add }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> NewProject {
    NewProject {
      title: "Smart Parking".into(),
      description: "Sensors and a map".into(),
      technologies: vec!["Rust".into(), " ".into()],
      team_leader: Member { name: "Omar".into(), email: "omar@uni.edu".into() },
      teaching_assistant: "ta@uni.edu".into(),
      course: "CS491".into(),
      live_url: Some("".into()),
      ..Default::default()
    }
  }

  #[test]
  fn omitted_optional_fields_are_absent_from_payload() {
    let json = serde_json::to_value(sample().normalized()).unwrap();
    let obj = json.as_object().unwrap();
    assert!(!obj.contains_key("liveUrl"));
    assert!(!obj.contains_key("githubUrl"));
    assert_eq!(obj["technologies"], serde_json::json!(["Rust"]));
    assert_eq!(obj["teachingAssistant"], "ta@uni.edu");
  }

  #[test]
  fn teaching_assistant_domain_check() {
    let mut p = sample();
    assert!(p.teaching_assistant_in_domain("uni.edu"));
    assert!(p.teaching_assistant_in_domain("@UNI.edu"));
    p.teaching_assistant = "ta@gmail.com".into();
    assert!(!p.teaching_assistant_in_domain("uni.edu"));
    p.teaching_assistant = "@uni.edu".into();
    assert!(!p.teaching_assistant_in_domain("uni.edu"));
  }

  #[test]
  fn status_uses_kebab_case_on_the_wire() {
    assert_eq!(
      serde_json::to_value(ProjectStatus::PendingTa).unwrap(),
      serde_json::json!("pending-ta")
    );
    assert_eq!(ProjectStatus::Accepted.to_string(), "accepted");
    assert_eq!("rejected".parse::<ProjectStatus>().unwrap(), ProjectStatus::Rejected);
  }

  #[test]
  fn star_toggle() {
    assert_eq!(StarAction::toggle(false), StarAction::Add);
    assert_eq!(StarAction::toggle(true), StarAction::Remove);
  }
}
