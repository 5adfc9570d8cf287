//! Answering a raw `AdmissionReview` body the way a webhook handler would.
//!
//! This example shows the envelope round trip:
//! 1. Parse the body sent by the API server
//! 2. Review it as a task
//! 3. Serialize the response envelope
//!
//! Run with: `cargo run --example envelope`

use admission_core::wire::AdmissionReview;
use admission_core::{Dispatcher, Registry, ResourceKind};

const BODY: &str = r#"{
    "apiVersion": "admission.k8s.io/v1",
    "kind": "AdmissionReview",
    "request": {
        "uid": "705ab4f5-6393-11e8-b7cc-42010a800002",
        "kind": {"group": "tekton.dev", "version": "v1", "kind": "Task"},
        "operation": "CREATE",
        "namespace": "ci",
        "name": "offensive-lint",
        "object": {
            "apiVersion": "tekton.dev/v1",
            "kind": "Task",
            "metadata": {"name": "offensive-lint", "labels": null},
            "spec": {"steps": [{"name": "run", "image": "alpine"}]}
        }
    }
}"#;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== AdmissionReview Envelope Example ===\n");

    let dispatcher = Dispatcher::new(Registry::default());

    let review = match AdmissionReview::from_slice(BODY.as_bytes()) {
        Ok(review) => review,
        Err(e) => {
            println!("Unreadable body: {}", e);
            return;
        }
    };
    println!("request uid: {:?}", review.uid());

    let response = dispatcher.review_envelope(&review, ResourceKind::Task);
    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("\nresponse:\n{}", json),
        Err(e) => println!("Could not encode response: {}", e),
    }

    // An envelope without a request block still gets an answer.
    println!("\n--- Envelope Without Request ---");
    let empty = AdmissionReview::from_slice(br#"{"apiVersion":"admission.k8s.io/v1","kind":"AdmissionReview"}"#);
    if let Ok(empty) = empty {
        let response = dispatcher.review_envelope(&empty, ResourceKind::Task);
        if let Some(decision) = response.response {
            println!("code={} message={:?}", decision.status.code, decision.status.message);
        }
    }
}
