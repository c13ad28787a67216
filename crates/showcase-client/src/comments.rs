//! `/comment` endpoints.

use serde::Serialize;
use showcase_core::{
  Page, PageRequest, Resource, Result,
  catalog::{Comment, NewComment},
};

use crate::{
  ShowcaseClient, params::list_query, require_id,
  transport::{Action, Op},
};

/// Filters accepted by the admin `GET /comment` listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CommentFilters {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub search:  Option<String>,
  /// Project id.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub project: Option<String>,
}

const R: Resource = Resource::Comment;

pub struct CommentClient<'a> {
  client: &'a ShowcaseClient,
}

impl<'a> CommentClient<'a> {
  pub(crate) fn new(client: &'a ShowcaseClient) -> Self { Self { client } }

  /// `GET /comment/project/{project_id}`
  pub async fn for_project(&self, project_id: &str) -> Result<Vec<Comment>> {
    let project_id = require_id(Resource::Project, project_id)?;
    let req = self.client.get(&["comment", "project", project_id]);
    self.client.send_json(req, Op::new(R, Action::List)).await
  }

  /// `GET /comment?page&limit[&search][&project]`
  pub async fn list(&self, page: PageRequest, filters: &CommentFilters) -> Result<Page<Comment>> {
    let req = self.client.get(&["comment"]).query(&list_query(page, filters));
    self.client.send_json(req, Op::new(R, Action::List)).await
  }

  /// `POST /comment`
  pub async fn create(&self, project_id: &str, content: &str) -> Result<Comment> {
    let project_id = require_id(Resource::Project, project_id)?;
    let content = content.trim();
    if content.is_empty() {
      return Err(showcase_core::ClientError::Precondition(
        "Comment cannot be empty".into(),
      ));
    }
    let body = NewComment {
      project_id: project_id.to_string(),
      content:    content.to_string(),
    };
    let req = self.client.post(&["comment"]).json(&body);
    self.client.send_json(req, Op::new(R, Action::Create)).await
  }

  /// `DELETE /comment/{id}`
  pub async fn delete(&self, id: &str) -> Result<String> {
    let id = require_id(R, id)?;
    let req = self.client.delete(&["comment", id]);
    self.client.send_message(req, Op::new(R, Action::Delete)).await
  }
}
