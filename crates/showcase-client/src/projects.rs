//! `/project` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/project` | paginated; filters in [`ProjectFilters`] |
//! | `GET`    | `/project/featured` | |
//! | `GET`    | `/project/starred` | current user's stars |
//! | `GET`    | `/project/mine` | projects the current user leads or belongs to |
//! | `GET`    | `/project/ta` | review queue of the current TA/supervisor |
//! | `GET`    | `/project/{id}` | 404 ⇒ "Project not found" |
//! | `POST`   | `/project` | body: [`NewProject`] |
//! | `PUT`    | `/project/{id}` | body: [`ProjectUpdate`] |
//! | `DELETE` | `/project/{id}` | |
//! | `PUT`    | `/project/{id}/status` | body: `{"status": ...}` |
//! | `POST`   | `/project/{id}/star` | body: `{"action": "add"\|"remove"}` |

use serde::Serialize;
use serde_json::json;
use showcase_core::{
  Page, PageRequest, Resource, Result,
  project::{NewProject, Project, ProjectStatus, ProjectUpdate, StarAction},
};

use crate::{
  ShowcaseClient, params::list_query, require_id,
  transport::{Action, Op},
};

/// Filters accepted by `GET /project`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ProjectFilters {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status:     Option<ProjectStatus>,
  /// Course code.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub course:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub supervisor: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub technology: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tag:        Option<String>,
}

impl ProjectFilters {
  pub fn with_title(title: impl Into<String>) -> Self {
    Self { title: Some(title.into()), ..Default::default() }
  }
}

const R: Resource = Resource::Project;

pub struct ProjectClient<'a> {
  client: &'a ShowcaseClient,
}

impl<'a> ProjectClient<'a> {
  pub(crate) fn new(client: &'a ShowcaseClient) -> Self { Self { client } }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// `GET /project?page&limit[&title][&status]...`
  pub async fn list(&self, page: PageRequest, filters: &ProjectFilters) -> Result<Page<Project>> {
    let req = self.client.get(&["project"]).query(&list_query(page, filters));
    self.client.send_json(req, Op::new(R, Action::List)).await
  }

  /// `GET /project/{id}`
  pub async fn get(&self, id: &str) -> Result<Project> {
    let id = require_id(R, id)?;
    let req = self.client.get(&["project", id]);
    self.client.send_json(req, Op::new(R, Action::Fetch)).await
  }

  /// `GET /project/featured`
  pub async fn featured(&self) -> Result<Vec<Project>> {
    let req = self.client.get(&["project", "featured"]);
    self.client.send_json(req, Op::new(R, Action::Call("fetch featured projects"))).await
  }

  /// `GET /project/starred`
  pub async fn starred(&self) -> Result<Vec<Project>> {
    let req = self.client.get(&["project", "starred"]);
    self.client.send_json(req, Op::new(R, Action::Call("fetch starred projects"))).await
  }

  /// `GET /project/mine`
  pub async fn mine(&self) -> Result<Vec<Project>> {
    let req = self.client.get(&["project", "mine"]);
    self.client.send_json(req, Op::new(R, Action::Call("fetch your projects"))).await
  }

  /// `GET /project/ta?page&limit`
  pub async fn review_queue(&self, page: PageRequest) -> Result<Page<Project>> {
    let req = self.client.get(&["project", "ta"]).query(&list_query(page, &()));
    self.client.send_json(req, Op::new(R, Action::Call("fetch projects to review"))).await
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// `POST /project`. Blank optional fields are dropped from the payload.
  pub async fn create(&self, project: NewProject) -> Result<Project> {
    let req = self.client.post(&["project"]).json(&project.normalized());
    self.client.send_json(req, Op::new(R, Action::Create)).await
  }

  /// `PUT /project/{id}`
  pub async fn update(&self, id: &str, update: ProjectUpdate) -> Result<Project> {
    let id = require_id(R, id)?;
    let req = self.client.put(&["project", id]).json(&update.normalized());
    self.client.send_json(req, Op::new(R, Action::Update)).await
  }

  /// `DELETE /project/{id}`. Returns the backend's confirmation message.
  pub async fn delete(&self, id: &str) -> Result<String> {
    let id = require_id(R, id)?;
    let req = self.client.delete(&["project", id]);
    self.client.send_message(req, Op::new(R, Action::Delete)).await
  }

  /// `PUT /project/{id}/status`
  pub async fn set_status(&self, id: &str, status: ProjectStatus) -> Result<Project> {
    let id = require_id(R, id)?;
    let req = self
      .client
      .put(&["project", id, "status"])
      .json(&json!({ "status": status }));
    self.client.send_json(req, Op::new(R, Action::Act("update project status"))).await
  }

  /// `POST /project/{id}/star`. Returns the backend's success string.
  pub async fn star(&self, id: &str, action: StarAction) -> Result<String> {
    let id = require_id(R, id)?;
    let req = self
      .client
      .post(&["project", id, "star"])
      .json(&json!({ "action": action }));
    self.client.send_message(req, Op::new(R, Action::Act("star project"))).await
  }
}
