//! `/school` endpoints. A school's majors are edited by replacing the list.

use showcase_core::{
  Resource, Result,
  catalog::{School, SchoolInput},
};

use crate::{
  ShowcaseClient, require_id,
  transport::{Action, Op},
};

const R: Resource = Resource::School;

pub struct SchoolClient<'a> {
  client: &'a ShowcaseClient,
}

impl<'a> SchoolClient<'a> {
  pub(crate) fn new(client: &'a ShowcaseClient) -> Self { Self { client } }

  pub async fn list(&self) -> Result<Vec<School>> {
    let req = self.client.get(&["school"]);
    self.client.send_json(req, Op::new(R, Action::List)).await
  }

  pub async fn get(&self, id: &str) -> Result<School> {
    let id = require_id(R, id)?;
    let req = self.client.get(&["school", id]);
    self.client.send_json(req, Op::new(R, Action::Fetch)).await
  }

  pub async fn create(&self, input: SchoolInput) -> Result<School> {
    let req = self.client.post(&["school"]).json(&input.normalized());
    self.client.send_json(req, Op::new(R, Action::Create)).await
  }

  pub async fn update(&self, id: &str, input: SchoolInput) -> Result<School> {
    let id = require_id(R, id)?;
    let req = self.client.put(&["school", id]).json(&input.normalized());
    self.client.send_json(req, Op::new(R, Action::Update)).await
  }

  pub async fn delete(&self, id: &str) -> Result<String> {
    let id = require_id(R, id)?;
    let req = self.client.delete(&["school", id]);
    self.client.send_message(req, Op::new(R, Action::Delete)).await
  }
}
