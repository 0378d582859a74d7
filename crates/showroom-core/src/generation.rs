//! Stale-response guard.
//!
//! Requests are fire-and-forget: nothing cancels them when the user moves on.
//! Every load instead carries the [`Ticket`] that was current when it started,
//! and navigation advances the [`Generation`]. A response whose ticket is no
//! longer current belongs to a screen the user has left and must be dropped.

/// Monotonic counter owned by the UI. Not shared across threads.
#[derive(Debug, Default)]
pub struct Generation {
  current: u64,
}

/// Snapshot of a [`Generation`] taken when a request starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Generation {
  pub fn new() -> Self { Self::default() }

  /// Ticket for a request started now. Several requests started in the same
  /// generation share a ticket.
  pub fn ticket(&self) -> Ticket { Ticket(self.current) }

  /// Invalidate every outstanding ticket and return the new current one.
  pub fn advance(&mut self) -> Ticket {
    self.current = self.current.wrapping_add(1);
    Ticket(self.current)
  }

  pub fn is_current(&self, ticket: Ticket) -> bool { ticket.0 == self.current }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tickets_in_one_generation_stay_current() {
    let generation = Generation::new();
    let a = generation.ticket();
    let b = generation.ticket();
    assert_eq!(a, b);
    assert!(generation.is_current(a));
  }

  #[test]
  fn advancing_invalidates_earlier_tickets() {
    let mut generation = Generation::new();
    let old = generation.ticket();
    let new = generation.advance();
    assert!(!generation.is_current(old));
    assert!(generation.is_current(new));
    assert_eq!(generation.ticket(), new);
  }
}
