//! Pages and the guards in front of them.

use std::fmt;

use showcase_core::user::Role;
use showcase_guard::{GuardChain, Requirement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
  Projects,
  ProjectDetail(String),
  Starred,
  MyProjects,
  Review,
  Admin,
  Profile,
  Login,
  CompleteProfile,
}

impl Route {
  /// Pages reachable from the tab bar, by number key.
  pub const TABS: [Route; 7] = [
    Route::Projects,
    Route::Starred,
    Route::MyProjects,
    Route::Review,
    Route::Admin,
    Route::Profile,
    Route::Login,
  ];

  pub fn path(&self) -> String {
    match self {
      Self::Projects => "/".into(),
      Self::ProjectDetail(id) => format!("/projects/{id}"),
      Self::Starred => "/starred".into(),
      Self::MyProjects => "/my-projects".into(),
      Self::Review => "/review".into(),
      Self::Admin => "/admin".into(),
      Self::Profile => "/profile".into(),
      Self::Login => "/login".into(),
      Self::CompleteProfile => "/profile/complete".into(),
    }
  }

  pub fn parse(path: &str) -> Option<Self> {
    let path = path.trim_end_matches('/');
    let route = match path {
      "" => Self::Projects,
      "/starred" => Self::Starred,
      "/my-projects" => Self::MyProjects,
      "/review" => Self::Review,
      "/admin" => Self::Admin,
      "/profile" => Self::Profile,
      "/login" => Self::Login,
      "/profile/complete" => Self::CompleteProfile,
      other => {
        let id = other.strip_prefix("/projects/")?;
        if id.is_empty() || id.contains('/') {
          return None;
        }
        Self::ProjectDetail(id.to_string())
      }
    };
    Some(route)
  }

  pub fn title(&self) -> &'static str {
    match self {
      Self::Projects => "Projects",
      Self::ProjectDetail(_) => "Project",
      Self::Starred => "Starred",
      Self::MyProjects => "My projects",
      Self::Review => "Review",
      Self::Admin => "Admin",
      Self::Profile => "Profile",
      Self::Login => "Sign in",
      Self::CompleteProfile => "Complete profile",
    }
  }

  pub fn guards(&self) -> GuardChain {
    match self {
      Self::Projects | Self::ProjectDetail(_) | Self::Login => GuardChain::open(),
      Self::Starred | Self::Profile | Self::CompleteProfile => {
        GuardChain::standard([Requirement::Authenticated])
      }
      Self::MyProjects => GuardChain::standard([Requirement::CompleteProfile]),
      Self::Review => GuardChain::standard([Requirement::role(Role::Supervisor)]),
      Self::Admin => GuardChain::standard([Requirement::role(Role::Admin)]),
    }
  }
}

impl fmt::Display for Route {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.path()) }
}

#[cfg(test)]
mod tests {
  use showcase_guard::Requirement;

  use super::*;

  #[test]
  fn paths_round_trip() {
    let mut routes = Route::TABS.to_vec();
    routes.push(Route::ProjectDetail("p1".into()));
    routes.push(Route::CompleteProfile);
    for route in routes {
      assert_eq!(Route::parse(&route.path()), Some(route));
    }
    assert_eq!(Route::parse("/projects/"), None);
    assert_eq!(Route::parse("/nowhere"), None);
  }

  #[test]
  fn guarded_routes_check_authentication_then_activation() {
    for route in Route::TABS {
      let chain = route.guards();
      if chain.is_open() {
        continue;
      }
      let head: Vec<_> = chain.specs().iter().take(2).map(|s| s.requirement.clone()).collect();
      assert_eq!(head, [Requirement::Authenticated, Requirement::Active], "{route}");
    }
    assert!(Route::Projects.guards().is_open());
    assert!(Route::Admin.guards().requires_auth());
  }
}
