//! `/notify` endpoints: email notifications sent by the backend.

use showcase_core::{Resource, Result, catalog::StatusNotice};

use crate::{
  ShowcaseClient, require_id,
  transport::{Action, Op},
};

pub struct NotifyClient<'a> {
  client: &'a ShowcaseClient,
}

impl<'a> NotifyClient<'a> {
  pub(crate) fn new(client: &'a ShowcaseClient) -> Self { Self { client } }

  /// `POST /notify/project-status`: tell a project's team about a review
  /// decision.
  pub async fn project_status(&self, notice: StatusNotice) -> Result<String> {
    let project_id = require_id(Resource::Project, &notice.project_id)?.to_string();
    let notice = StatusNotice {
      project_id,
      message: showcase_core::non_blank(notice.message),
      ..notice
    };
    let req = self.client.post(&["notify", "project-status"]).json(&notice);
    self
      .client
      .send_message(req, Op::new(Resource::Notification, Action::Call("send notification")))
      .await
  }
}
