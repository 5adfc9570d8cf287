//! Property tests for the review pipeline.
//!
//! These validate invariants that must hold for every request, whatever its
//! payload or declared kind.

use admission_core::{
    extract, run_all, AdmissionError, AdmissionRequest, Dispatcher, NameBlocklist, Pipeline,
    Registry, ResourceKind, StatusCode,
};
use proptest::prelude::*;

// Strategy: arbitrary declared kind tags, valid or not
fn arb_kind_tag() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Pipeline".to_string()),
        Just("Task".to_string()),
        Just("pipeline".to_string()),
        Just("PipelineRun".to_string()),
        prop::string::string_regex("[A-Za-z]{0,12}").unwrap(),
    ]
}

// Strategy: payloads that are sometimes valid resources and sometimes junk
fn arb_payload() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::string::string_regex("[a-z0-9-]{0,20}")
            .unwrap()
            .prop_map(|name| format!(r#"{{"metadata":{{"name":"{name}"}}}}"#).into_bytes()),
        prop::string::string_regex("[a-z-]{0,20}")
            .unwrap()
            .prop_map(|template| format!(r#"{{"metadata":{{"generateName":"{template}"}}}}"#).into_bytes()),
        prop::collection::vec(any::<u8>(), 0..64),
    ]
}

fn arb_expected() -> impl Strategy<Value = ResourceKind> {
    prop_oneof![Just(ResourceKind::Pipeline), Just(ResourceKind::Task)]
}

proptest! {
    /// Property: the decision always carries the request's uid
    #[test]
    fn proptest_correlation_id_is_echoed(
        uid in prop::string::string_regex("[ -~]{0,40}").unwrap(),
        kind in arb_kind_tag(),
        payload in arb_payload(),
        expected in arb_expected(),
    ) {
        let dispatcher = Dispatcher::new(Registry::default());
        let req = AdmissionRequest::new(uid.clone(), kind, payload);

        let decision = dispatcher.review(&req, expected);

        prop_assert_eq!(decision.uid, uid);
    }

    /// Property: allowed decisions are 202, denied ones are 400 or 403
    #[test]
    fn proptest_status_matches_allowed(
        kind in arb_kind_tag(),
        payload in arb_payload(),
        expected in arb_expected(),
    ) {
        let dispatcher = Dispatcher::new(Registry::default());
        let req = AdmissionRequest::new("uid", kind, payload);

        let decision = dispatcher.review(&req, expected);

        match decision.status_code() {
            Some(StatusCode::Accepted) => prop_assert!(decision.allowed),
            Some(StatusCode::BadRequest) | Some(StatusCode::Forbidden) => prop_assert!(!decision.allowed),
            None => return Err(TestCaseError::fail("decision carries an unknown status code")),
        }
    }

    /// Property: the same request always yields the same decision
    #[test]
    fn proptest_review_is_deterministic(
        kind in arb_kind_tag(),
        payload in arb_payload(),
        expected in arb_expected(),
    ) {
        let dispatcher = Dispatcher::new(Registry::default());
        let req = AdmissionRequest::new("uid", kind, payload);

        let first = dispatcher.review(&req, expected);
        let second = dispatcher.review(&req, expected);

        prop_assert_eq!(first, second);
    }

    /// Property: a kind tag other than the expected one never reaches the decoder
    #[test]
    fn proptest_kind_gating(
        kind in arb_kind_tag(),
        payload in arb_payload(),
    ) {
        prop_assume!(kind != "Pipeline");
        let req = AdmissionRequest::new("uid", kind, payload);

        let result = extract(&req, ResourceKind::Pipeline);

        let is_kind_mismatch = matches!(result, Err(AdmissionError::KindMismatch { .. }));
        prop_assert!(is_kind_mismatch);
    }

    /// Property: with no validators registered, every decodable resource is admitted
    #[test]
    fn proptest_empty_registry_admits(
        name in prop::string::string_regex("[A-Za-z0-9_.-]{0,30}").unwrap(),
        expected in arb_expected(),
    ) {
        let dispatcher = Dispatcher::new(Registry::empty());
        let payload = format!(r#"{{"metadata":{{"name":"{name}"}}}}"#);
        let req = AdmissionRequest::new("uid", expected.as_str(), payload);

        let decision = dispatcher.review(&req, expected);

        prop_assert!(decision.allowed);
        prop_assert_eq!(decision.status_code(), Some(StatusCode::Accepted));
    }

    /// Property: the blocklist rejects exactly the names containing the substring
    #[test]
    fn proptest_blocklist_matches_contains(
        name in prop::string::string_regex("[a-z-]{0,24}").unwrap(),
        forbidden in prop::string::string_regex("[a-z]{1,4}").unwrap(),
    ) {
        let registry = Registry::builder()
            .pipeline(NameBlocklist::<Pipeline>::new(forbidden.clone()))
            .build();
        let mut pipeline = Pipeline::default();
        pipeline.metadata.name = name.clone();

        let verdict = run_all(&pipeline, registry.pipeline_validators()).unwrap();

        prop_assert_eq!(verdict.valid, !name.contains(forbidden.as_str()));
    }
}
