//! Per-route guard state and its side effects.

use showcase_core::{i18n::Message, user::User};
use showcase_query::QueryState;
use strum::Display;

use crate::chain::{GuardChain, Verdict};

// ─── Seams ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Level {
  Info,
  Success,
  Warning,
  Error,
}

/// A toast: a catalog message at a severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
  pub level:   Level,
  pub message: Message,
}

impl Notice {
  pub fn new(level: Level, message: Message) -> Self { Self { level, message } }
}

/// Moves the application to another route.
pub trait Navigator {
  fn redirect(&mut self, path: &str);
}

/// Shows a toast.
pub trait Notifier {
  fn notify(&mut self, notice: Notice);
}

// ─── Runner ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardState {
  #[default]
  Checking,
  Authorized,
  Unauthorized,
}

/// Evaluates one route's chain each time the auth state may have changed.
///
/// The redirect and the notice fire once, on the transition into
/// [`GuardState::Unauthorized`]; repeated evaluations in that state are
/// silent until [`GuardRunner::reset`].
#[derive(Debug, Clone)]
pub struct GuardRunner {
  chain: GuardChain,
  state: GuardState,
}

impl GuardRunner {
  pub fn new(chain: GuardChain) -> Self { Self { chain, state: GuardState::Checking } }

  pub fn chain(&self) -> &GuardChain { &self.chain }

  pub fn state(&self) -> GuardState { self.state }

  /// Forget the previous outcome, e.g. after navigating to a new route.
  pub fn reset(&mut self) { self.state = GuardState::Checking; }

  /// Install a new chain and reset.
  pub fn replace(&mut self, chain: GuardChain) {
    self.chain = chain;
    self.reset();
  }

  pub fn check(
    &mut self,
    auth: &QueryState<User>,
    navigator: &mut impl Navigator,
    notifier: &mut impl Notifier,
  ) -> GuardState {
    let next = match self.chain.evaluate(auth) {
      Verdict::Checking => GuardState::Checking,
      Verdict::Allowed => GuardState::Authorized,
      Verdict::Denied(spec) => {
        if self.state != GuardState::Unauthorized {
          tracing::debug!(
            requirement = ?spec.requirement,
            redirect = spec.redirect,
            "route guard denied access"
          );
          notifier.notify(spec.notice);
          navigator.redirect(spec.redirect);
        }
        GuardState::Unauthorized
      }
    };
    self.state = next;
    next
  }
}
