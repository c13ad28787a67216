//! The key hierarchy.
//!
//! Every key starts with an entity group, then a kind (`list`, `detail`, ...),
//! then discriminators. List keys carry page, limit and the reduced filter
//! object, so two calls that send different query strings never share an
//! entry, and two that send the same one always do.

use serde::Serialize;
use serde_json::Value;
use showcase_client::filter_object;
use showcase_core::PageRequest;

use crate::cache::QueryKey;

fn list_key<F: Serialize>(group: &str, page: PageRequest, filters: &F) -> QueryKey {
  QueryKey::new(group)
    .with("list")
    .with(page.page)
    .with(page.limit)
    .with(Value::Object(filter_object(filters)))
}

pub mod projects {
  use showcase_client::projects::ProjectFilters;

  use super::*;

  pub const GROUP: &str = "projects";

  pub fn root() -> QueryKey { QueryKey::new(GROUP) }

  pub fn lists() -> QueryKey { root().with("list") }

  pub fn list(page: PageRequest, filters: &ProjectFilters) -> QueryKey {
    list_key(GROUP, page, filters)
  }

  pub fn detail(id: &str) -> QueryKey { root().with("detail").with(id) }

  /// `["featuredProjects"]`
  pub fn featured() -> QueryKey { QueryKey::new("featuredProjects") }

  /// `["starredProjects"]`
  pub fn starred() -> QueryKey { QueryKey::new("starredProjects") }

  /// `["myProjects"]`
  pub fn mine() -> QueryKey { QueryKey::new("myProjects") }

  /// `["taProjects"]`
  pub fn review_queues() -> QueryKey { QueryKey::new("taProjects") }

  pub fn review_queue(page: PageRequest) -> QueryKey {
    review_queues().with(page.page).with(page.limit)
  }
}

pub mod auth {
  use super::*;

  pub fn root() -> QueryKey { QueryKey::new("auth") }

  pub fn current_user() -> QueryKey { root().with("me") }
}

pub mod users {
  use showcase_client::users::UserFilters;

  use super::*;

  pub const GROUP: &str = "users";

  pub fn root() -> QueryKey { QueryKey::new(GROUP) }

  pub fn lists() -> QueryKey { root().with("list") }

  pub fn list(page: PageRequest, filters: &UserFilters) -> QueryKey {
    list_key(GROUP, page, filters)
  }

  pub fn detail(id: &str) -> QueryKey { root().with("detail").with(id) }

  pub fn supervisors() -> QueryKey { root().with("supervisors") }
}

pub mod comments {
  use showcase_client::comments::CommentFilters;

  use super::*;

  pub const GROUP: &str = "comments";

  pub fn root() -> QueryKey { QueryKey::new(GROUP) }

  pub fn lists() -> QueryKey { root().with("list") }

  pub fn list(page: PageRequest, filters: &CommentFilters) -> QueryKey {
    list_key(GROUP, page, filters)
  }

  pub fn for_project(project_id: &str) -> QueryKey { root().with("project").with(project_id) }
}

pub mod courses {
  use showcase_client::courses::CourseFilters;

  use super::*;

  pub const GROUP: &str = "courses";

  pub fn root() -> QueryKey { QueryKey::new(GROUP) }

  pub fn lists() -> QueryKey { root().with("list") }

  pub fn list(page: PageRequest, filters: &CourseFilters) -> QueryKey {
    list_key(GROUP, page, filters)
  }

  /// The unpaginated picker list lives under `lists()` so course writes
  /// refresh it too.
  pub fn everything() -> QueryKey { lists().with("all") }
}

pub mod schools {
  use super::*;

  pub fn root() -> QueryKey { QueryKey::new("schools") }

  pub fn lists() -> QueryKey { root().with("list") }

  pub fn detail(id: &str) -> QueryKey { root().with("detail").with(id) }
}

pub mod suggestions {
  use super::*;

  pub const GROUP: &str = "suggestions";

  pub fn root() -> QueryKey { QueryKey::new(GROUP) }

  pub fn lists() -> QueryKey { root().with("list") }

  pub fn list(page: PageRequest) -> QueryKey { list_key(GROUP, page, &()) }
}
