use thiserror::Error;

use crate::resource::ResourceKind;
use crate::review::StatusCode;

/// Errors that stop an admission review before a verdict is reached.
///
/// A deliberate policy rejection is not an error: it is a
/// [`Verdict`](crate::Verdict) with `valid == false`.
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// The request's declared kind is not the kind being processed.
    #[error("expected kind \"{expected}\", got {found:?}")]
    KindMismatch {
        /// Kind the caller asked to extract
        expected: ResourceKind,
        /// Kind tag carried by the request
        found: String,
    },

    /// The payload does not decode into the variant's schema.
    #[error("failed to decode {kind} payload: {source}")]
    Decode {
        /// Kind being decoded
        kind: ResourceKind,
        /// Underlying decoder diagnostic
        #[source]
        source: serde_json::Error,
    },

    /// A validator could not complete its check.
    #[error("validator {validator} malfunctioned: {source}")]
    ValidatorMalfunction {
        /// Name of the failing validator
        validator: String,
        /// What went wrong inside it
        #[source]
        source: ValidatorFault,
    },
}

impl AdmissionError {
    /// Returns the status code this error is surfaced with.
    ///
    /// Every error is a processing failure, so all map to `BadRequest`.
    /// Rejections (403) never travel as errors.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdmissionError::KindMismatch { .. }
            | AdmissionError::Decode { .. }
            | AdmissionError::ValidatorMalfunction { .. } => StatusCode::BadRequest,
        }
    }

    /// Returns true if the error originates from the caller's input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AdmissionError::KindMismatch { .. } | AdmissionError::Decode { .. }
        )
    }
}

/// Raised by a validator that could not determine validity.
///
/// Distinct from a rejection: the resource may be fine, the check is not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidatorFault {
    message: String,
}

impl ValidatorFault {
    /// Creates a new fault.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the fault message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors raised while loading [`AdmissionConfig`](crate::AdmissionConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid TOML for the config schema.
    #[error("invalid admission config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting holds a value the registry cannot use.
    #[error("invalid admission config: {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_mismatch_names_expected_kind() {
        let err = AdmissionError::KindMismatch {
            expected: ResourceKind::Pipeline,
            found: "Task".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("Pipeline"));
        assert!(msg.contains("Task"));
        assert_eq!(err.status_code(), StatusCode::BadRequest);
        assert!(err.is_input_error());
    }

    #[test]
    fn malfunction_is_not_input_error() {
        let err = AdmissionError::ValidatorMalfunction {
            validator: "pipeline_name_validator".to_string(),
            source: ValidatorFault::new("missing metadata"),
        };

        assert!(!err.is_input_error());
        assert_eq!(err.status_code(), StatusCode::BadRequest);
        assert_eq!(
            err.to_string(),
            "validator pipeline_name_validator malfunctioned: missing metadata"
        );
    }

    #[test]
    fn decode_error_keeps_source() {
        let source = serde_json::from_slice::<serde_json::Value>(b"{\"a\":").unwrap_err();
        let err = AdmissionError::Decode {
            kind: ResourceKind::Task,
            source,
        };

        assert!(err.to_string().starts_with("failed to decode Task payload"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
