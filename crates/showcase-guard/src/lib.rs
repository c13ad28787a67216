//! Route guards.
//!
//! A route declares what it needs from the signed-in principal as an ordered
//! [`GuardChain`]. A [`GuardRunner`] evaluates the chain against the current
//! auth query state and, the first time a route becomes unauthorized,
//! redirects through a [`Navigator`] and shows one notice through a
//! [`Notifier`].

pub mod chain;
pub mod runner;

pub use chain::{GuardChain, GuardSpec, Requirement, RoleSet, Verdict};
pub use runner::{GuardRunner, GuardState, Level, Navigator, Notice, Notifier};

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";
/// Where visitors lacking a role or an active account are sent.
pub const HOME_PATH: &str = "/";
/// Where users with an incomplete profile are sent.
pub const COMPLETE_PROFILE_PATH: &str = "/profile/complete";
