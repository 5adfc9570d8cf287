//! Resource extraction from raw admission requests.
//!
//! Extraction is gated on the request's declared kind: a request tagged with
//! a different kind than the one asked for is refused before its payload is
//! looked at.

use crate::error::AdmissionError;
use crate::request::AdmissionRequest;
use crate::resource::{Kinded, Pipeline, Resource, ResourceKind, Task};

/// Decodes the request payload as `T`.
///
/// # Errors
///
/// Returns [`AdmissionError::KindMismatch`] if `request.kind` is not exactly
/// `T::KIND`, and [`AdmissionError::Decode`] if the payload does not decode.
///
/// # Examples
///
/// ```
/// use admission_core::{extract_as, AdmissionRequest, Pipeline};
///
/// let req = AdmissionRequest::new("uid-1", "Pipeline", r#"{"metadata":{"name":"build"}}"#);
/// let pipeline: Pipeline = extract_as(&req).expect("decodes");
/// assert_eq!(pipeline.metadata.name, "build");
/// ```
pub fn extract_as<T: Kinded>(request: &AdmissionRequest) -> Result<T, AdmissionError> {
    check_kind(request, T::KIND)?;

    serde_json::from_slice(&request.object).map_err(|source| AdmissionError::Decode {
        kind: T::KIND,
        source,
    })
}

/// Decodes the request payload as the variant named by `expected`.
///
/// # Errors
///
/// Same as [`extract_as`].
pub fn extract(request: &AdmissionRequest, expected: ResourceKind) -> Result<Resource, AdmissionError> {
    match expected {
        ResourceKind::Pipeline => extract_as::<Pipeline>(request).map(Resource::Pipeline),
        ResourceKind::Task => extract_as::<Task>(request).map(Resource::Task),
    }
}

fn check_kind(request: &AdmissionRequest, expected: ResourceKind) -> Result<(), AdmissionError> {
    if request.kind != expected.as_str() {
        return Err(AdmissionError::KindMismatch {
            expected,
            found: request.kind.clone(),
        });
    }
    Ok(())
}
