//! `/auth` endpoints. The session itself is a cookie held by the client's jar.

use showcase_core::{Resource, Result, user::User};

use crate::{
  ShowcaseClient,
  transport::{Action, Op},
};

const R: Resource = Resource::Auth;

pub struct AuthClient<'a> {
  client: &'a ShowcaseClient,
}

impl<'a> AuthClient<'a> {
  pub(crate) fn new(client: &'a ShowcaseClient) -> Self { Self { client } }

  /// `GET /auth/me`: the signed-in user. An anonymous session is reported
  /// by the backend as 401 and surfaces as [`showcase_core::ClientError::Backend`].
  pub async fn current_user(&self) -> Result<User> {
    let req = self.client.get(&["auth", "me"]);
    self.client.send_json(req, Op::new(R, Action::Call("fetch current user"))).await
  }

  /// `POST /auth/logout`
  pub async fn logout(&self) -> Result<String> {
    let req = self.client.post(&["auth", "logout"]);
    self.client.send_message(req, Op::new(R, Action::Call("sign out"))).await
  }

  /// Where a browser should be sent to start the sign-in flow. No request is
  /// made.
  pub fn login_url(&self) -> String { self.client.endpoint(&["auth", "google"]).to_string() }
}
