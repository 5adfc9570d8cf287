//! In-memory decision trail.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{DecisionEvent, Observer};

/// Records every decision it observes, in order.
///
/// Meant for tests and debugging endpoints. The trail is shared between
/// concurrent reviews, so access goes through a mutex.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use admission_core::audit::DecisionTrail;
/// use admission_core::{AdmissionRequest, Dispatcher, Registry};
///
/// let trail = Arc::new(DecisionTrail::new());
/// let dispatcher = Dispatcher::new(Registry::default()).with_observer(trail.clone());
///
/// dispatcher.review_pipeline(&AdmissionRequest::new("uid-1", "Pipeline", r#"{"metadata":{"name":"build"}}"#));
///
/// assert_eq!(trail.len(), 1);
/// assert!(trail.events()[0].allowed());
/// ```
#[derive(Debug, Default)]
pub struct DecisionTrail {
    events: Mutex<Vec<DecisionEvent>>,
}

impl DecisionTrail {
    /// Creates an empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an event.
    pub fn record(&self, event: DecisionEvent) {
        self.lock().push(event);
    }

    /// Returns a snapshot of all recorded events.
    pub fn events(&self) -> Vec<DecisionEvent> {
        self.lock().clone()
    }

    /// Returns the number of recorded events.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops all recorded events.
    pub fn clear(&self) {
        self.lock().clear();
    }

    // A panic while holding the lock cannot leave the Vec half-written.
    fn lock(&self) -> MutexGuard<'_, Vec<DecisionEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Observer for DecisionTrail {
    fn after_review(&self, event: &DecisionEvent) {
        self.record(event.clone());
    }
}
