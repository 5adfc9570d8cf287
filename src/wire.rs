//! The `AdmissionReview` envelope exchanged with the Kubernetes API server.
//!
//! The engine itself works on [`AdmissionRequest`] and [`AdmissionDecision`].
//! This module maps between those and the `admission.k8s.io/v1` envelope for
//! transports that hand over the review body untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::request::AdmissionRequest;
use crate::review::AdmissionDecision;

/// API version of the envelope.
pub const API_VERSION: &str = "admission.k8s.io/v1";

/// Kind of the envelope.
pub const KIND: &str = "AdmissionReview";

/// Errors mapping an envelope to an engine request.
#[derive(Debug, Error)]
pub enum WireError {
    /// The envelope carries no `request` block.
    #[error("admission review has no request")]
    MissingRequest,

    /// The envelope body is not valid JSON for the review schema.
    #[error("malformed admission review: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Group, version and kind of the object under review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupVersionKind {
    /// API group (`tekton.dev`)
    pub group: String,
    /// API version (`v1`)
    pub version: String,
    /// Kind (`Pipeline`)
    pub kind: String,
}

/// The `request` block of an envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewRequest {
    /// Correlation identifier
    pub uid: String,
    /// Kind of the object under review
    pub kind: GroupVersionKind,
    /// Operation (`CREATE`, `UPDATE`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    /// Target namespace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Name of the object, if known at admission time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The object under review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<serde_json::Value>,
}

/// An `admission.k8s.io/v1` `AdmissionReview`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionReview {
    /// Always [`API_VERSION`] on responses
    pub api_version: String,
    /// Always [`KIND`] on responses
    pub kind: String,
    /// Present on reviews sent by the API server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<ReviewRequest>,
    /// Present on reviews sent back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<AdmissionDecision>,
}

impl AdmissionReview {
    /// Parses an envelope from its JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Malformed`] if the body does not decode.
    pub fn from_slice(body: &[u8]) -> Result<Self, WireError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Wraps a decision in a response envelope.
    pub fn respond(decision: AdmissionDecision) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            request: None,
            response: Some(decision),
        }
    }

    /// Returns the correlation identifier of the request block, if any.
    pub fn uid(&self) -> Option<&str> {
        self.request.as_ref().map(|r| r.uid.as_str())
    }

    /// Maps the request block to an engine request.
    ///
    /// A missing `object` becomes an empty payload, which the extractor will
    /// report as a decode failure.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::MissingRequest`] if the envelope has no request.
    pub fn to_request(&self) -> Result<AdmissionRequest, WireError> {
        let req = self.request.as_ref().ok_or(WireError::MissingRequest)?;

        let object = match &req.object {
            Some(value) => serde_json::to_vec(value)?,
            None => Vec::new(),
        };

        let mut request = AdmissionRequest::new(req.uid.clone(), req.kind.kind.clone(), object);
        request.operation = req.operation.clone();
        request.namespace = req.namespace.clone();
        request.name = req.name.clone();
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceKind;
    use crate::validator::Verdict;

    const REVIEW: &str = r#"{
        "apiVersion": "admission.k8s.io/v1",
        "kind": "AdmissionReview",
        "request": {
            "uid": "705ab4f5-6393-11e8-b7cc-42010a800002",
            "kind": {"group": "tekton.dev", "version": "v1", "kind": "Pipeline"},
            "resource": {"group": "tekton.dev", "version": "v1", "resource": "pipelines"},
            "operation": "CREATE",
            "namespace": "ci",
            "object": {"apiVersion": "tekton.dev/v1", "kind": "Pipeline", "metadata": {"name": "build"}}
        }
    }"#;

    #[test]
    fn parses_api_server_review() {
        let review = AdmissionReview::from_slice(REVIEW.as_bytes()).unwrap();

        assert_eq!(review.uid(), Some("705ab4f5-6393-11e8-b7cc-42010a800002"));

        let request = review.to_request().unwrap();
        assert_eq!(request.kind, "Pipeline");
        assert_eq!(request.operation.as_deref(), Some("CREATE"));
        assert_eq!(request.namespace.as_deref(), Some("ci"));

        let object: serde_json::Value = serde_json::from_slice(&request.object).unwrap();
        assert_eq!(object["metadata"]["name"], "build");
    }

    #[test]
    fn request_name_is_carried_over() {
        let review = AdmissionReview::from_slice(
            br#"{"apiVersion":"admission.k8s.io/v1","kind":"AdmissionReview","request":{"uid":"e","kind":{"kind":"Task"},"name":"lint","object":{}}}"#,
        )
        .unwrap();

        let request = review.to_request().unwrap();

        assert_eq!(request.uid, "e");
        assert_eq!(request.name.as_deref(), Some("lint"));
    }

    #[test]
    fn missing_request_is_an_error() {
        let review = AdmissionReview::from_slice(br#"{"apiVersion":"admission.k8s.io/v1","kind":"AdmissionReview"}"#)
            .unwrap();

        assert!(matches!(review.to_request(), Err(WireError::MissingRequest)));
    }

    #[test]
    fn missing_object_becomes_empty_payload() {
        let review = AdmissionReview::from_slice(
            br#"{"apiVersion":"admission.k8s.io/v1","kind":"AdmissionReview","request":{"uid":"u","kind":{"kind":"Task"}}}"#,
        )
        .unwrap();

        let request = review.to_request().unwrap();
        assert!(request.object.is_empty());
    }

    #[test]
    fn malformed_body_is_an_error() {
        let err = AdmissionReview::from_slice(b"{\"apiVersion\":").unwrap_err();
        assert!(matches!(err, WireError::Malformed(_)));
    }

    #[test]
    fn response_envelope_shape() {
        let decision = AdmissionDecision::from_verdict("u-1", ResourceKind::Task, &Verdict::pass("ok"));

        let json = serde_json::to_value(AdmissionReview::respond(decision)).unwrap();

        assert_eq!(json["apiVersion"], API_VERSION);
        assert_eq!(json["kind"], KIND);
        assert_eq!(json["response"]["uid"], "u-1");
        assert_eq!(json["response"]["allowed"], true);
        assert!(json.get("request").is_none());
    }
}
