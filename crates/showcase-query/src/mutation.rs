//! Every write the client can perform, and what it makes stale.
//!
//! A successful mutation invalidates each prefix returned by
//! [`Mutation::invalidates`]. The sets are deliberately broad: a refetch that
//! turns out unnecessary is preferred over any view showing stale data.

use crate::{cache::QueryKey, keys};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
  // ── Projects ──────────────────────────────────────────────────────────
  CreateProject,
  UpdateProject { id: String },
  DeleteProject { id: String },
  SetProjectStatus { id: String },
  StarProject { id: String },

  // ── Users ─────────────────────────────────────────────────────────────
  UpdateProfile,
  UpdateUser { id: String },
  SetUserRole { id: String },
  SetUserDeactivated { id: String },

  // ── Comments ──────────────────────────────────────────────────────────
  CreateComment { project_id: String },
  DeleteComment { id: String },

  // ── Catalog ───────────────────────────────────────────────────────────
  CreateCourse,
  UpdateCourse { id: String },
  DeleteCourse { id: String },
  CreateSchool,
  UpdateSchool { id: String },
  DeleteSchool { id: String },
  CreateSuggestion,
  DeleteSuggestion { id: String },

  // ── Side channels ─────────────────────────────────────────────────────
  Upload,
  NotifyStatus,
  Logout,
}

impl Mutation {
  /// Key prefixes to mark stale once this mutation succeeds.
  pub fn invalidates(&self) -> Vec<QueryKey> {
    use keys::{auth, comments, courses, projects, schools, suggestions, users};

    match self {
      Self::CreateProject => vec![projects::lists(), projects::mine()],
      Self::UpdateProject { id } => vec![
        projects::detail(id),
        projects::lists(),
        projects::mine(),
        projects::featured(),
      ],
      Self::DeleteProject { id } => vec![
        projects::detail(id),
        projects::lists(),
        projects::mine(),
        projects::featured(),
        projects::starred(),
      ],
      Self::SetProjectStatus { id } => vec![
        projects::detail(id),
        projects::lists(),
        projects::review_queues(),
        projects::featured(),
        auth::root(),
      ],
      Self::StarProject { id } => vec![
        projects::detail(id),
        projects::lists(),
        auth::root(),
        projects::starred(),
        projects::featured(),
      ],

      Self::UpdateProfile => vec![auth::root(), users::root()],
      Self::UpdateUser { id } | Self::SetUserRole { id } | Self::SetUserDeactivated { id } => {
        vec![users::detail(id), users::lists(), users::supervisors(), auth::root()]
      }

      Self::CreateComment { project_id } => {
        vec![comments::for_project(project_id), comments::lists()]
      }
      // The owning project is not known from a comment id.
      Self::DeleteComment { .. } => vec![comments::root()],

      Self::CreateCourse => vec![courses::lists()],
      Self::UpdateCourse { .. } | Self::DeleteCourse { .. } => {
        vec![courses::root(), projects::lists()]
      }
      Self::CreateSchool => vec![schools::lists()],
      Self::UpdateSchool { id } | Self::DeleteSchool { id } => {
        vec![schools::detail(id), schools::lists()]
      }
      Self::CreateSuggestion => vec![suggestions::lists()],
      Self::DeleteSuggestion { .. } => vec![suggestions::root()],

      Self::Upload | Self::NotifyStatus => Vec::new(),
      Self::Logout => vec![auth::root(), projects::starred(), projects::mine()],
    }
  }
}
