//! A cancellable quiet-period timer, polled from the event loop.

use std::time::{Duration, Instant};

/// Delay before a live search is sent.
pub const SEARCH_DELAY: Duration = Duration::from_millis(300);

/// Fires once after input has been quiet for `delay`.
///
/// Each [`Debouncer::start`] pushes the deadline back; [`Debouncer::poll`]
/// reports `true` exactly once when the deadline passes.
#[derive(Debug, Clone)]
pub struct Debouncer {
  delay:    Duration,
  deadline: Option<Instant>,
}

impl Default for Debouncer {
  fn default() -> Self { Self::new(SEARCH_DELAY) }
}

impl Debouncer {
  pub fn new(delay: Duration) -> Self { Self { delay, deadline: None } }

  /// (Re)start the quiet period at `now`.
  pub fn start(&mut self, now: Instant) { self.deadline = Some(now + self.delay); }

  /// Alias of [`Debouncer::start`] for a timer that is already running.
  pub fn reset(&mut self, now: Instant) { self.start(now) }

  pub fn cancel(&mut self) { self.deadline = None; }

  pub fn is_pending(&self) -> bool { self.deadline.is_some() }

  /// `true` once, when the quiet period has elapsed at `now`.
  pub fn poll(&mut self, now: Instant) -> bool {
    match self.deadline {
      Some(deadline) if now >= deadline => {
        self.deadline = None;
        true
      }
      _ => false,
    }
  }
}
