//! Request dispatch and error normalisation shared by every resource.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use showcase_core::{ClientError, Resource, Result, page::MessageEnvelope};

use crate::ShowcaseClient;

// ─── Operation descriptor ────────────────────────────────────────────────────

/// What a request is doing, used to pick the default failure message and to
/// decide whether a 404 maps to [`ClientError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
  /// Fetch a collection.
  List,
  /// Fetch one entity by id.
  Fetch,
  Create,
  Update,
  Delete,
  /// A named action on one entity, e.g. `"star project"`.
  Act(&'static str),
  /// A named call with no target entity, e.g. `"upload image"`.
  Call(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Op {
  pub resource: Resource,
  pub action:   Action,
}

impl Op {
  pub fn new(resource: Resource, action: Action) -> Self { Self { resource, action } }

  fn targets_entity(&self) -> bool {
    matches!(
      self.action,
      Action::Fetch | Action::Update | Action::Delete | Action::Act(_)
    )
  }

  pub fn default_message(&self) -> String {
    let r = self.resource;
    match self.action {
      Action::List => format!("Failed to fetch {}", r.plural()),
      Action::Fetch => format!("Failed to fetch {}", r.singular()),
      Action::Create => format!("Failed to create {}", r.singular()),
      Action::Update => format!("Failed to update {}", r.singular()),
      Action::Delete => format!("Failed to delete {}", r.singular()),
      Action::Act(what) | Action::Call(what) => format!("Failed to {what}"),
    }
  }

  /// Map a failed response to the closed error type.
  pub fn failure(&self, status: StatusCode, backend_message: Option<String>) -> ClientError {
    if status == StatusCode::NOT_FOUND && self.targets_entity() {
      return ClientError::NotFound(self.resource);
    }
    ClientError::Backend {
      status:  status.as_u16(),
      message: backend_message.unwrap_or_else(|| self.default_message()),
    }
  }
}

/// Pull a human-readable message out of an error body, if there is one.
fn backend_message(body: &[u8]) -> Option<String> {
  let value: serde_json::Value = serde_json::from_slice(body).ok()?;
  ["message", "error"]
    .iter()
    .find_map(|k| value.get(k).and_then(|v| v.as_str()))
    .map(str::trim)
    .filter(|m| !m.is_empty())
    .map(str::to_string)
}

// ─── Dispatch ────────────────────────────────────────────────────────────────

impl ShowcaseClient {
  pub(crate) fn get(&self, path: &[&str]) -> RequestBuilder { self.http.get(self.endpoint(path)) }

  pub(crate) fn post(&self, path: &[&str]) -> RequestBuilder { self.http.post(self.endpoint(path)) }

  pub(crate) fn put(&self, path: &[&str]) -> RequestBuilder { self.http.put(self.endpoint(path)) }

  pub(crate) fn delete(&self, path: &[&str]) -> RequestBuilder {
    self.http.delete(self.endpoint(path))
  }

  /// Send `req` and return the raw body of a successful response.
  async fn dispatch(&self, req: RequestBuilder, op: Op) -> Result<Vec<u8>> {
    let req = req.build().map_err(|e| ClientError::Precondition(e.to_string()))?;
    let method = req.method().clone();
    let path = req.url().path().to_string();
    tracing::debug!(%method, %path, "showcase request");

    let resp: Response = self.http.execute(req).await.map_err(|e| {
      tracing::warn!(%method, %path, error = %e, "request failed before a response");
      ClientError::Network(e.to_string())
    })?;

    let status = resp.status();
    let body = resp
      .bytes()
      .await
      .map_err(|e| ClientError::Network(e.to_string()))?;

    if !status.is_success() {
      let err = op.failure(status, backend_message(&body));
      tracing::warn!(%method, %path, %status, error = %err, "request rejected");
      return Err(err);
    }
    Ok(body.to_vec())
  }

  /// Send `req` and deserialise the JSON body.
  pub(crate) async fn send_json<T: DeserializeOwned>(
    &self,
    req: RequestBuilder,
    op: Op,
  ) -> Result<T> {
    let body = self.dispatch(req, op).await?;
    serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
  }

  /// Send `req` and return the backend's success message.
  ///
  /// Accepts a `{ "message": ... }` envelope, a bare JSON string, or plain
  /// text.
  pub(crate) async fn send_message(&self, req: RequestBuilder, op: Op) -> Result<String> {
    let body = self.dispatch(req, op).await?;
    if let Ok(envelope) = serde_json::from_slice::<MessageEnvelope>(&body) {
      return Ok(envelope.message);
    }
    if let Ok(text) = serde_json::from_slice::<String>(&body) {
      return Ok(text);
    }
    String::from_utf8(body).map_err(|e| ClientError::Decode(e.to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn not_found_only_for_targeted_operations() {
    let fetch = Op::new(Resource::Course, Action::Fetch);
    assert_eq!(
      fetch.failure(StatusCode::NOT_FOUND, Some("no such doc".into())),
      ClientError::NotFound(Resource::Course)
    );

    let list = Op::new(Resource::Course, Action::List);
    assert_eq!(
      list.failure(StatusCode::NOT_FOUND, None),
      ClientError::Backend { status: 404, message: "Failed to fetch courses".into() }
    );
  }

  #[test]
  fn default_messages() {
    let cases = [
      (Op::new(Resource::Project, Action::Create), "Failed to create project"),
      (Op::new(Resource::School, Action::Update), "Failed to update school"),
      (Op::new(Resource::Comment, Action::Delete), "Failed to delete comment"),
      (Op::new(Resource::Project, Action::Act("star project")), "Failed to star project"),
      (Op::new(Resource::Upload, Action::Call("upload image")), "Failed to upload image"),
    ];
    for (op, expected) in cases {
      assert_eq!(op.default_message(), expected);
    }
  }

  #[test]
  fn backend_message_reads_message_then_error() {
    assert_eq!(backend_message(br#"{"message":"Bad title"}"#).as_deref(), Some("Bad title"));
    assert_eq!(backend_message(br#"{"error":"Nope"}"#).as_deref(), Some("Nope"));
    assert_eq!(backend_message(br#"{"message":"  "}"#), None);
    assert_eq!(backend_message(b"<html>oops</html>"), None);
  }
}
