use std::sync::Arc;

use crate::aggregate::run_all;
use crate::audit::{DecisionEvent, DecisionOutcome, Observer, TracingObserver};
use crate::error::AdmissionError;
use crate::extract::extract;
use crate::registry::Registry;
use crate::request::AdmissionRequest;
use crate::resource::{Resource, ResourceKind};
use crate::review::AdmissionDecision;
use crate::validator::Verdict;
use crate::wire::AdmissionReview;

/// Entry point of the engine: turns a request into a decision.
///
/// The dispatcher owns a shared, read-only [`Registry`] and an
/// [`Observer`]. It keeps no per-request state and can be shared across
/// threads; cloning is cheap.
///
/// # Examples
///
/// ```
/// use admission_core::{AdmissionRequest, Dispatcher, Registry, StatusCode};
///
/// let dispatcher = Dispatcher::new(Registry::default());
///
/// let req = AdmissionRequest::new("uid-1", "Pipeline", r#"{"metadata":{"name":"offensive-build"}}"#);
/// let decision = dispatcher.review_pipeline(&req);
///
/// assert!(!decision.allowed);
/// assert_eq!(decision.uid, "uid-1");
/// assert_eq!(decision.status_code(), Some(StatusCode::Forbidden));
/// assert_eq!(decision.message(), r#"pipeline name contains "offensive""#);
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
    observer: Arc<dyn Observer>,
}

impl Dispatcher {
    /// Creates a dispatcher that reports through [`TracingObserver`].
    pub fn new(registry: impl Into<Arc<Registry>>) -> Self {
        Self {
            registry: registry.into(),
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replaces the observer.
    pub fn with_observer(mut self, observer: impl Observer + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Returns the registry in use.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Reviews `request` as a resource of kind `expected`.
    ///
    /// Never fails: extraction errors, validator malfunctions and rejections
    /// all end in a decision carrying the request's `uid`.
    pub fn review(&self, request: &AdmissionRequest, expected: ResourceKind) -> AdmissionDecision {
        let span = tracing::info_span!("admission_review", uid = %request.uid, kind = %expected);
        let _enter = span.enter();

        self.observer.before_review(request, expected);

        let resource = extract(request, expected);
        let resource_name = resource
            .as_ref()
            .ok()
            .map(|r| r.metadata().display_name().to_string());
        let outcome = resource.and_then(|r| self.validate(&r));

        let decision = AdmissionDecision::from_outcome(&request.uid, expected, &outcome);

        let mut event = DecisionEvent::new(
            request,
            expected,
            DecisionOutcome::classify(&outcome),
            &decision,
        );
        if let Some(name) = resource_name {
            event = event.with_resource_name(name);
        }
        self.observer.after_review(&event);

        decision
    }

    /// Reviews `request` as a pipeline.
    pub fn review_pipeline(&self, request: &AdmissionRequest) -> AdmissionDecision {
        self.review(request, ResourceKind::Pipeline)
    }

    /// Reviews `request` as a task.
    pub fn review_task(&self, request: &AdmissionRequest) -> AdmissionDecision {
        self.review(request, ResourceKind::Task)
    }

    /// Reviews an `AdmissionReview` envelope and wraps the decision in one.
    ///
    /// An envelope without a `request` block cannot be correlated; it gets a
    /// `400` response with an empty `uid`.
    pub fn review_envelope(&self, review: &AdmissionReview, expected: ResourceKind) -> AdmissionReview {
        let decision = match review.to_request() {
            Ok(request) => self.review(&request, expected),
            Err(err) => {
                tracing::warn!(error = %err, "unusable admission review envelope");
                AdmissionDecision::bad_request(review.uid().unwrap_or_default(), err.to_string())
            }
        };
        AdmissionReview::respond(decision)
    }

    /// Runs the registered validators for the resource's kind.
    fn validate(&self, resource: &Resource) -> Result<Verdict, AdmissionError> {
        match resource {
            Resource::Pipeline(p) => run_all(p, self.registry.pipeline_validators()),
            Resource::Task(t) => run_all(t, self.registry.task_validators()),
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
