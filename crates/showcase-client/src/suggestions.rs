//! `/suggestion` endpoints: bug reports and feedback.

use showcase_core::{
  ClientError, Page, PageRequest, Resource, Result,
  catalog::{NewSuggestion, Suggestion},
};

use crate::{
  ShowcaseClient, params::list_query, require_id,
  transport::{Action, Op},
};

const R: Resource = Resource::Suggestion;

pub struct SuggestionClient<'a> {
  client: &'a ShowcaseClient,
}

impl<'a> SuggestionClient<'a> {
  pub(crate) fn new(client: &'a ShowcaseClient) -> Self { Self { client } }

  pub async fn list(&self, page: PageRequest) -> Result<Page<Suggestion>> {
    let req = self.client.get(&["suggestion"]).query(&list_query(page, &()));
    self.client.send_json(req, Op::new(R, Action::List)).await
  }

  pub async fn create(&self, suggestion: NewSuggestion) -> Result<Suggestion> {
    let content = suggestion.content.trim();
    if content.is_empty() {
      return Err(ClientError::Precondition("Please describe the issue".into()));
    }
    let body = NewSuggestion {
      content: content.to_string(),
      image:   showcase_core::non_blank(suggestion.image),
    };
    let req = self.client.post(&["suggestion"]).json(&body);
    self.client.send_json(req, Op::new(R, Action::Create)).await
  }

  pub async fn delete(&self, id: &str) -> Result<String> {
    let id = require_id(R, id)?;
    let req = self.client.delete(&["suggestion", id]);
    self.client.send_message(req, Op::new(R, Action::Delete)).await
  }
}
