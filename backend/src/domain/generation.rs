//! Request-generation tracking for view-state holders.
//!
//! Each fetch started for a view takes a [`LoadTicket`] stamped with the next
//! [`RequestGeneration`]. Only the ticket for the most recently started fetch
//! is admitted; older tickets and any ticket arriving after tear-down are
//! discarded.

use std::fmt;

/// Monotonically increasing fetch counter for one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestGeneration(u64);

impl RequestGeneration {
    /// Raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for RequestGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Proof that a fetch was started; consumed when its result is applied.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a load ticket must be returned with the fetch result"]
pub struct LoadTicket {
    generation: RequestGeneration,
}

impl LoadTicket {
    pub fn generation(&self) -> RequestGeneration {
        self.generation
    }
}

/// Why a fetch result was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// A newer fetch was started after this one.
    Superseded,
    /// The view was torn down while the fetch was in flight.
    TornDown,
}

/// Result of handing a fetch result back to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Discarded(DiscardReason),
}

/// Generation bookkeeping shared by the view holders.
#[derive(Debug, Default)]
pub(crate) struct GenerationTracker {
    latest: RequestGeneration,
    torn_down: bool,
}

impl GenerationTracker {
    pub(crate) fn issue(&mut self) -> LoadTicket {
        self.latest = self.latest.next();
        LoadTicket {
            generation: self.latest,
        }
    }

    pub(crate) fn admit(&self, ticket: &LoadTicket) -> Result<(), DiscardReason> {
        if self.torn_down {
            return Err(DiscardReason::TornDown);
        }
        if ticket.generation != self.latest {
            return Err(DiscardReason::Superseded);
        }
        Ok(())
    }

    pub(crate) fn latest(&self) -> RequestGeneration {
        self.latest
    }

    pub(crate) fn tear_down(&mut self) {
        self.torn_down = true;
    }

    pub(crate) fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn generations_increase_per_issue() {
        let mut tracker = GenerationTracker::default();
        let first = tracker.issue();
        let second = tracker.issue();
        assert!(second.generation() > first.generation());
        assert_eq!(tracker.latest(), second.generation());
    }

    #[rstest]
    fn only_latest_ticket_is_admitted() {
        let mut tracker = GenerationTracker::default();
        let stale = tracker.issue();
        let fresh = tracker.issue();
        assert_eq!(tracker.admit(&stale), Err(DiscardReason::Superseded));
        assert_eq!(tracker.admit(&fresh), Ok(()));
    }

    #[rstest]
    fn tear_down_rejects_every_ticket() {
        let mut tracker = GenerationTracker::default();
        let ticket = tracker.issue();
        tracker.tear_down();
        assert_eq!(tracker.admit(&ticket), Err(DiscardReason::TornDown));
        assert!(tracker.is_torn_down());
    }
}
