use super::{AccessEvent, AccessOutcome};
use std::cell::RefCell;

/// Ordered log of navigation attempts, attached to a
/// [`Router`](crate::Router) with `with_trail`.
///
/// ```
/// use route_guard::audit::{AccessEvent, AccessOutcome, AccessTrail};
///
/// let trail = AccessTrail::new();
/// trail.record(AccessEvent::new(1, "/reports", AccessOutcome::Unauthenticated));
/// trail.record(AccessEvent::new(2, "/login", AccessOutcome::Allowed));
///
/// assert_eq!(trail.outcomes(), [AccessOutcome::Unauthenticated, AccessOutcome::Allowed]);
/// assert_eq!(trail.denials().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct AccessTrail {
    events: RefCell<Vec<AccessEvent>>,
}

impl AccessTrail {
    /// An empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `event`.
    pub fn record(&self, event: AccessEvent) {
        self.events.borrow_mut().push(event);
    }

    /// Every event, oldest first.
    pub fn events(&self) -> Vec<AccessEvent> {
        self.events.borrow().clone()
    }

    /// The outcome of every event, oldest first.
    pub fn outcomes(&self) -> Vec<AccessOutcome> {
        self.events.borrow().iter().map(AccessEvent::outcome).collect()
    }

    /// Events the gate refused, either for a missing token or missing roles.
    ///
    /// Unmatched paths are not denials.
    pub fn denials(&self) -> Vec<AccessEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|e| {
                matches!(
                    e.outcome(),
                    AccessOutcome::Unauthenticated | AccessOutcome::Forbidden
                )
            })
            .cloned()
            .collect()
    }

    /// The most recent event.
    pub fn last(&self) -> Option<AccessEvent> {
        self.events.borrow().last().cloned()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Drops every recorded event.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}
