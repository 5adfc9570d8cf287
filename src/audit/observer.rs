//! Hooks invoked around each review.
//!
//! Validators never log. Everything observable about a review is reported
//! here, once before extraction and once after the decision is built.

use crate::request::AdmissionRequest;
use crate::resource::ResourceKind;

use super::{DecisionEvent, DecisionOutcome};

/// Observability collaborator attached to a [`Dispatcher`](crate::Dispatcher).
///
/// Observers are called synchronously on the review path and must not fail
/// or block for long. Both methods default to doing nothing.
pub trait Observer: Send + Sync {
    /// Called when a review starts, before the payload is decoded.
    fn before_review(&self, _request: &AdmissionRequest, _kind: ResourceKind) {}

    /// Called once the decision for a review has been built.
    fn after_review(&self, _event: &DecisionEvent) {}
}

/// Emits review events through `tracing`.
///
/// Decisions are logged under the `admission_audit` target. Rejections log
/// at `info`, input errors at `warn`, validator malfunctions at `error` so
/// engine defects stand apart from bad resources.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn before_review(&self, request: &AdmissionRequest, kind: ResourceKind) {
        tracing::debug!(
            target: "admission_audit",
            uid = %request.uid,
            kind = %kind,
            declared_kind = %request.kind,
            payload_len = request.object.len(),
            "admission review started"
        );
    }

    fn after_review(&self, event: &DecisionEvent) {
        match event.outcome() {
            DecisionOutcome::Allowed | DecisionOutcome::Rejected => tracing::info!(
                target: "admission_audit",
                uid = %event.uid(),
                kind = %event.kind(),
                resource = ?event.resource_name(),
                operation = ?event.operation(),
                namespace = ?event.namespace(),
                outcome = %event.outcome(),
                allowed = event.allowed(),
                code = event.code(),
                message = %event.message(),
                "admission decision"
            ),
            DecisionOutcome::InvalidRequest => tracing::warn!(
                target: "admission_audit",
                uid = %event.uid(),
                kind = %event.kind(),
                outcome = %event.outcome(),
                code = event.code(),
                message = %event.message(),
                "admission request rejected before validation"
            ),
            DecisionOutcome::Malfunction => tracing::error!(
                target: "admission_audit",
                uid = %event.uid(),
                kind = %event.kind(),
                resource = ?event.resource_name(),
                code = event.code(),
                message = %event.message(),
                "validator malfunction"
            ),
        }
    }
}

impl<O: Observer + ?Sized> Observer for std::sync::Arc<O> {
    fn before_review(&self, request: &AdmissionRequest, kind: ResourceKind) {
        (**self).before_review(request, kind);
    }

    fn after_review(&self, event: &DecisionEvent) {
        (**self).after_review(event);
    }
}
