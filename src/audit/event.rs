//! Decision event schema.
//!
//! One event describes one finished review. Events carry identifiers and the
//! decision message only, never the raw payload.

use std::fmt;

use crate::error::AdmissionError;
use crate::request::AdmissionRequest;
use crate::resource::ResourceKind;
use crate::review::AdmissionDecision;

/// How a review ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionOutcome {
    /// The resource was admitted
    Allowed,
    /// A rule rejected the resource
    Rejected,
    /// The request could not be extracted
    InvalidRequest,
    /// A validator could not complete its check
    Malfunction,
}

impl DecisionOutcome {
    /// Classifies a review result.
    pub fn classify(outcome: &Result<crate::Verdict, AdmissionError>) -> Self {
        match outcome {
            Ok(verdict) if verdict.valid => DecisionOutcome::Allowed,
            Ok(_) => DecisionOutcome::Rejected,
            Err(AdmissionError::ValidatorMalfunction { .. }) => DecisionOutcome::Malfunction,
            Err(_) => DecisionOutcome::InvalidRequest,
        }
    }
}

impl fmt::Display for DecisionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionOutcome::Allowed => write!(f, "allowed"),
            DecisionOutcome::Rejected => write!(f, "rejected"),
            DecisionOutcome::InvalidRequest => write!(f, "invalid_request"),
            DecisionOutcome::Malfunction => write!(f, "malfunction"),
        }
    }
}

/// A record of one admission decision.
///
/// # Example
///
/// ```
/// use admission_core::audit::{DecisionEvent, DecisionOutcome};
/// use admission_core::{AdmissionDecision, AdmissionRequest, ResourceKind, Verdict};
///
/// let request = AdmissionRequest::new("uid-1", "Pipeline", "{}");
/// let decision = AdmissionDecision::from_verdict("uid-1", ResourceKind::Pipeline, &Verdict::pass("ok"));
///
/// let event = DecisionEvent::new(&request, ResourceKind::Pipeline, DecisionOutcome::Allowed, &decision)
///     .with_resource_name("build");
///
/// assert_eq!(event.uid(), "uid-1");
/// assert_eq!(event.code(), 202);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionEvent {
    uid: String,
    kind: ResourceKind,
    outcome: DecisionOutcome,
    allowed: bool,
    code: u16,
    message: String,
    /// Display name of the resource (explicit or generate-name template),
    /// falling back to the name the control plane reported
    resource_name: Option<String>,
    operation: Option<String>,
    namespace: Option<String>,
}

impl DecisionEvent {
    /// Creates an event from a request and the decision returned for it.
    ///
    /// The resource name starts out as the request's own `name`, if any.
    pub fn new(
        request: &AdmissionRequest,
        kind: ResourceKind,
        outcome: DecisionOutcome,
        decision: &AdmissionDecision,
    ) -> Self {
        Self {
            uid: decision.uid.clone(),
            kind,
            outcome,
            allowed: decision.allowed,
            code: decision.status.code,
            message: decision.status.message.clone(),
            resource_name: request.name.clone(),
            operation: request.operation.clone(),
            namespace: request.namespace.clone(),
        }
    }

    /// Sets the resource display name.
    pub fn with_resource_name(mut self, name: impl Into<String>) -> Self {
        self.resource_name = Some(name.into());
        self
    }

    /// Returns the correlation identifier.
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Returns the kind under review.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Returns the outcome class.
    pub fn outcome(&self) -> DecisionOutcome {
        self.outcome
    }

    /// Returns whether the resource was admitted.
    pub fn allowed(&self) -> bool {
        self.allowed
    }

    /// Returns the numeric status code.
    pub fn code(&self) -> u16 {
        self.code
    }

    /// Returns the decision message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the resource display name, if one was known.
    pub fn resource_name(&self) -> Option<&str> {
        self.resource_name.as_deref()
    }

    /// Returns the operation, if known.
    pub fn operation(&self) -> Option<&str> {
        self.operation.as_deref()
    }

    /// Returns the namespace, if known.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

impl fmt::Display for DecisionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} -> {} ({})",
            self.uid,
            self.kind,
            self.resource_name.as_deref().unwrap_or("<unknown>"),
            self.outcome,
            self.code
        )
    }
}
