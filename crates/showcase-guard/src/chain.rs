//! Requirements and the ordered chain that checks them.

use showcase_core::{
  i18n::Message,
  user::{Role, User},
};
use showcase_query::QueryState;

use crate::{
  COMPLETE_PROFILE_PATH, HOME_PATH, LOGIN_PATH,
  runner::{Level, Notice},
};

// ─── Requirements ────────────────────────────────────────────────────────────

/// Roles of which the principal must hold at least one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSet(Vec<Role>);

impl RoleSet {
  pub fn of(roles: impl IntoIterator<Item = Role>) -> Self {
    let mut set = Vec::new();
    for role in roles {
      if !set.contains(&role) {
        set.push(role);
      }
    }
    Self(set)
  }

  pub fn roles(&self) -> &[Role] { &self.0 }

  /// Whether `role` meets any member, with admin counting as supervisor.
  pub fn allows(&self, role: Role) -> bool { self.0.iter().any(|&required| role.satisfies(required)) }
}

impl From<Role> for RoleSet {
  fn from(role: Role) -> Self { Self(vec![role]) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
  Authenticated,
  /// The account is not deactivated.
  Active,
  Role(RoleSet),
  CompleteProfile,
}

impl Requirement {
  pub fn role(role: Role) -> Self { Self::Role(role.into()) }

  /// Position in the standard chain; outer checks come first.
  fn rank(&self) -> u8 {
    match self {
      Self::Authenticated => 0,
      Self::Active => 1,
      Self::Role(_) => 2,
      Self::CompleteProfile => 3,
    }
  }

  /// Whether `user` passes. Authentication itself is decided by the chain.
  pub fn admits(&self, user: &User) -> bool {
    match self {
      Self::Authenticated => true,
      Self::Active => !user.is_deactivated,
      Self::Role(roles) => roles.allows(user.role),
      Self::CompleteProfile => user.is_profile_complete(),
    }
  }
}

// ─── Specs and chains ────────────────────────────────────────────────────────

/// One requirement with what happens when it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardSpec {
  pub requirement: Requirement,
  pub redirect:    &'static str,
  pub notice:      Notice,
}

impl GuardSpec {
  /// The standard redirect and notice for `requirement`. Every denial is a
  /// warning.
  pub fn for_requirement(requirement: Requirement) -> Self {
    let (redirect, message) = match requirement {
      Requirement::Authenticated => (LOGIN_PATH, Message::LoginRequired),
      Requirement::Active => (HOME_PATH, Message::AccountDeactivated),
      Requirement::Role(_) => (HOME_PATH, Message::InsufficientPermissions),
      Requirement::CompleteProfile => (COMPLETE_PROFILE_PATH, Message::CompleteProfile),
    };
    Self { requirement, redirect, notice: Notice::new(Level::Warning, message) }
  }
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<'a> {
  /// The auth query has not settled.
  Checking,
  Allowed,
  /// The first failing spec.
  Denied(&'a GuardSpec),
}

/// Guards evaluated first to last; the first failure decides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardChain {
  specs: Vec<GuardSpec>,
}

impl GuardChain {
  /// No guards: every visitor is allowed, signed in or not.
  pub fn open() -> Self { Self::default() }

  /// Standard specs for `requirements`, in canonical order
  /// (authenticated, active, role, complete profile).
  ///
  /// Any non-empty chain also checks authentication and then that the
  /// account is active. Role requirements merge into one any-of set.
  pub fn standard(requirements: impl IntoIterator<Item = Requirement>) -> Self {
    let mut roles = Vec::new();
    let mut requirements: Vec<Requirement> = requirements
      .into_iter()
      .filter(|r| match r {
        Requirement::Role(set) => {
          roles.extend_from_slice(set.roles());
          false
        }
        _ => true,
      })
      .collect();
    if !roles.is_empty() {
      requirements.push(Requirement::Role(RoleSet::of(roles)));
    }
    if !requirements.is_empty() {
      requirements.extend([Requirement::Authenticated, Requirement::Active]);
    }
    requirements.sort_by_key(Requirement::rank);
    requirements.dedup();
    Self { specs: requirements.into_iter().map(GuardSpec::for_requirement).collect() }
  }

  pub fn specs(&self) -> &[GuardSpec] { &self.specs }

  pub fn is_open(&self) -> bool { self.specs.is_empty() }

  pub fn requires_auth(&self) -> bool {
    self.specs.iter().any(|s| s.requirement == Requirement::Authenticated)
  }

  /// Evaluate against the auth query. An open chain never waits for it.
  pub fn evaluate(&self, auth: &QueryState<User>) -> Verdict<'_> {
    if self.is_open() {
      return Verdict::Allowed;
    }
    let user = match auth {
      QueryState::Idle | QueryState::Loading => return Verdict::Checking,
      QueryState::Success(user) => Some(user.as_ref()),
      QueryState::Error(_) => None,
    };
    for spec in &self.specs {
      let passed = match (&spec.requirement, user) {
        (Requirement::Authenticated, user) => user.is_some(),
        // Anything past authentication fails without a principal.
        (_, None) => false,
        (requirement, Some(user)) => requirement.admits(user),
      };
      if !passed {
        return Verdict::Denied(spec);
      }
    }
    Verdict::Allowed
  }
}
