//! Wire-format admission decisions.
//!
//! A decision always echoes the request's correlation identifier. Its status
//! code tells the caller where a denial came from:
//!
//! | Outcome                    | allowed | code |
//! |----------------------------|---------|------|
//! | resource passed            | true    | 202  |
//! | rule rejected the resource | false   | 403  |
//! | extraction failed          | false   | 400  |
//! | validator malfunctioned    | false   | 400  |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AdmissionError;
use crate::resource::ResourceKind;
use crate::validator::Verdict;

/// HTTP-style status code carried by a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// 202: the resource was admitted
    Accepted,
    /// 400: the request could not be processed
    BadRequest,
    /// 403: a rule rejected the resource
    Forbidden,
}

impl StatusCode {
    /// Returns the numeric code.
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Accepted => 202,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
        }
    }

    /// Parses a numeric code this engine emits.
    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            202 => Some(StatusCode::Accepted),
            400 => Some(StatusCode::BadRequest),
            403 => Some(StatusCode::Forbidden),
            _ => None,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::Accepted => write!(f, "202 Accepted"),
            StatusCode::BadRequest => write!(f, "400 Bad Request"),
            StatusCode::Forbidden => write!(f, "403 Forbidden"),
        }
    }
}

/// Status block of a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Numeric status code
    pub code: u16,
    /// Human-readable explanation
    pub message: String,
}

/// The allow/deny decision returned to the control plane.
///
/// Serializes to the Kubernetes `AdmissionResponse` shape:
///
/// ```
/// use admission_core::{AdmissionDecision, ResourceKind, Verdict};
///
/// let decision = AdmissionDecision::from_verdict("uid-1", ResourceKind::Pipeline, &Verdict::pass("ok"));
/// let json = serde_json::to_value(&decision).unwrap();
///
/// assert_eq!(json["uid"], "uid-1");
/// assert_eq!(json["allowed"], true);
/// assert_eq!(json["status"]["code"], 202);
/// assert_eq!(json["status"]["message"], "valid pipeline");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionDecision {
    /// Correlation identifier copied from the request
    pub uid: String,
    /// Whether the resource is admitted
    pub allowed: bool,
    /// Status code and message
    pub status: Status,
}

impl AdmissionDecision {
    fn new(uid: &str, allowed: bool, code: StatusCode, message: String) -> Self {
        Self {
            uid: uid.to_string(),
            allowed,
            status: Status {
                code: code.as_u16(),
                message,
            },
        }
    }

    /// Builds the decision for a verdict reached by the aggregator.
    pub fn from_verdict(uid: &str, kind: ResourceKind, verdict: &Verdict) -> Self {
        if verdict.valid {
            Self::new(uid, true, StatusCode::Accepted, format!("valid {}", kind.noun()))
        } else {
            Self::new(uid, false, StatusCode::Forbidden, verdict.reason.clone())
        }
    }

    /// Builds the decision for a review that failed before a verdict.
    pub fn from_error(uid: &str, kind: ResourceKind, err: &AdmissionError) -> Self {
        let message = match err {
            AdmissionError::KindMismatch { .. } | AdmissionError::Decode { .. } => format!(
                "could not parse {} in admission review request: {}",
                kind.noun(),
                err
            ),
            AdmissionError::ValidatorMalfunction { .. } => {
                format!("could not validate {}: {}", kind.noun(), err)
            }
        };
        Self::new(uid, false, err.status_code(), message)
    }

    /// Builds a `400` denial for a request that never reached extraction,
    /// such as an unusable envelope.
    pub fn bad_request(uid: &str, message: impl Into<String>) -> Self {
        Self::new(uid, false, StatusCode::BadRequest, message.into())
    }

    /// Builds the decision for any review outcome.
    pub fn from_outcome(uid: &str, kind: ResourceKind, outcome: &Result<Verdict, AdmissionError>) -> Self {
        match outcome {
            Ok(verdict) => Self::from_verdict(uid, kind, verdict),
            Err(err) => Self::from_error(uid, kind, err),
        }
    }

    /// Returns the correlation identifier.
    pub fn correlation_id(&self) -> &str {
        &self.uid
    }

    /// Returns the status code, if it is one this engine emits.
    pub fn status_code(&self) -> Option<StatusCode> {
        StatusCode::from_u16(self.status.code)
    }

    /// Returns the status message.
    pub fn message(&self) -> &str {
        &self.status.message
    }
}
