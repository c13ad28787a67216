//! `/user` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/user` | paginated; filters in [`UserFilters`] |
//! | `GET`  | `/user/supervisors` | supervisors selectable on a project |
//! | `GET`  | `/user/{id}` | 404 ⇒ "User not found" |
//! | `PUT`  | `/user/profile` | current user's own profile |
//! | `PUT`  | `/user/{id}` | admin edit |
//! | `PUT`  | `/user/{id}/role` | body: `{"role": ...}` |
//! | `PUT`  | `/user/{id}/deactivate` | body: `{"isDeactivated": bool}` |

use serde::Serialize;
use serde_json::json;
use showcase_core::{
  Page, PageRequest, Resource, Result,
  user::{ProfileUpdate, Role, User, UserUpdate},
};

use crate::{
  ShowcaseClient, params::list_query, require_id,
  transport::{Action, Op},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilters {
  /// Matches name or email.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub search:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub role:           Option<Role>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_deactivated: Option<bool>,
}

const R: Resource = Resource::User;

pub struct UserClient<'a> {
  client: &'a ShowcaseClient,
}

impl<'a> UserClient<'a> {
  pub(crate) fn new(client: &'a ShowcaseClient) -> Self { Self { client } }

  pub async fn list(&self, page: PageRequest, filters: &UserFilters) -> Result<Page<User>> {
    let req = self.client.get(&["user"]).query(&list_query(page, filters));
    self.client.send_json(req, Op::new(R, Action::List)).await
  }

  pub async fn supervisors(&self) -> Result<Vec<User>> {
    let req = self.client.get(&["user", "supervisors"]);
    self.client.send_json(req, Op::new(R, Action::Call("fetch supervisors"))).await
  }

  pub async fn get(&self, id: &str) -> Result<User> {
    let id = require_id(R, id)?;
    let req = self.client.get(&["user", id]);
    self.client.send_json(req, Op::new(R, Action::Fetch)).await
  }

  pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User> {
    let req = self.client.put(&["user", "profile"]).json(&update.normalized());
    self.client.send_json(req, Op::new(R, Action::Call("update profile"))).await
  }

  pub async fn update(&self, id: &str, update: UserUpdate) -> Result<User> {
    let id = require_id(R, id)?;
    let req = self.client.put(&["user", id]).json(&update.normalized());
    self.client.send_json(req, Op::new(R, Action::Update)).await
  }

  pub async fn set_role(&self, id: &str, role: Role) -> Result<User> {
    let id = require_id(R, id)?;
    let req = self
      .client
      .put(&["user", id, "role"])
      .json(&json!({ "role": role }));
    self.client.send_json(req, Op::new(R, Action::Act("update user role"))).await
  }

  pub async fn set_deactivated(&self, id: &str, deactivated: bool) -> Result<User> {
    let id = require_id(R, id)?;
    let req = self
      .client
      .put(&["user", id, "deactivate"])
      .json(&json!({ "isDeactivated": deactivated }));
    self.client.send_json(req, Op::new(R, Action::Act("update user status"))).await
  }
}
