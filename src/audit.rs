//! Observability around the review pipeline.
//!
//! This module provides:
//! - `Observer`: hooks called before and after each review
//! - `TracingObserver`: structured `tracing` output for every decision
//! - `DecisionEvent`: what is reported about a finished review
//! - `DecisionTrail`: in-memory recorder of decision events
//!
//! Events never carry the raw payload, only identifiers and the decision.

mod event;
mod observer;
mod trail;

pub use event::{DecisionEvent, DecisionOutcome};
pub use observer::{Observer, TracingObserver};
pub use trail::DecisionTrail;
