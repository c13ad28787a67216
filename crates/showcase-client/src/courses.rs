//! `/course` endpoints.

use serde::Serialize;
use showcase_core::{
  Page, PageRequest, Resource, Result,
  catalog::{Course, CourseInput},
};

use crate::{
  ShowcaseClient, params::list_query, require_id,
  transport::{Action, Op},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CourseFilters {
  /// Matches code or title.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub search: Option<String>,
}

const R: Resource = Resource::Course;

pub struct CourseClient<'a> {
  client: &'a ShowcaseClient,
}

impl<'a> CourseClient<'a> {
  pub(crate) fn new(client: &'a ShowcaseClient) -> Self { Self { client } }

  pub async fn list(&self, page: PageRequest, filters: &CourseFilters) -> Result<Page<Course>> {
    let req = self.client.get(&["course"]).query(&list_query(page, filters));
    self.client.send_json(req, Op::new(R, Action::List)).await
  }

  /// Every course, unpaginated. Used to populate course pickers.
  pub async fn all(&self) -> Result<Vec<Course>> {
    let req = self.client.get(&["course", "all"]);
    self.client.send_json(req, Op::new(R, Action::List)).await
  }

  pub async fn create(&self, input: CourseInput) -> Result<Course> {
    let req = self.client.post(&["course"]).json(&trimmed(input));
    self.client.send_json(req, Op::new(R, Action::Create)).await
  }

  pub async fn update(&self, id: &str, input: CourseInput) -> Result<Course> {
    let id = require_id(R, id)?;
    let req = self.client.put(&["course", id]).json(&trimmed(input));
    self.client.send_json(req, Op::new(R, Action::Update)).await
  }

  pub async fn delete(&self, id: &str) -> Result<String> {
    let id = require_id(R, id)?;
    let req = self.client.delete(&["course", id]);
    self.client.send_message(req, Op::new(R, Action::Delete)).await
  }
}

fn trimmed(input: CourseInput) -> CourseInput {
  CourseInput {
    code:  input.code.trim().to_uppercase(),
    title: input.title.trim().to_string(),
  }
}
