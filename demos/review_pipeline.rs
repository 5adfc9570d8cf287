//! Reviewing pipelines and tasks with the default and a configured registry.
//!
//! This example walks through the three decision classes:
//! 1. A clean pipeline is admitted (202)
//! 2. A pipeline with a forbidden name is rejected (403)
//! 3. A payload of the wrong kind is refused before validation (400)
//! 4. A registry built from TOML adds the name-format rule
//!
//! Run with: `cargo run --example review_pipeline`

use std::sync::Arc;

use admission_core::audit::DecisionTrail;
use admission_core::{AdmissionConfig, AdmissionRequest, Dispatcher, Registry, ResourceKind};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== Admission Review Example ===\n");

    let trail = Arc::new(DecisionTrail::new());
    let dispatcher = Dispatcher::new(Registry::default()).with_observer(trail.clone());

    // Scenario 1: clean pipeline
    println!("--- Scenario 1: Clean Pipeline ---");
    let clean = AdmissionRequest::new(
        "uid-clean",
        "Pipeline",
        r#"{"metadata":{"name":"build-and-test"},"spec":{"tasks":[{"name":"lint"}]}}"#,
    )
    .with_operation("CREATE")
    .with_namespace("ci");
    let decision = dispatcher.review_pipeline(&clean);
    println!(
        "allowed={} code={} message={:?}",
        decision.allowed, decision.status.code, decision.status.message
    );

    // Scenario 2: forbidden name
    println!("\n--- Scenario 2: Forbidden Name ---");
    let offensive = AdmissionRequest::new(
        "uid-offensive",
        "Pipeline",
        r#"{"metadata":{"name":"offensive-build"}}"#,
    );
    let decision = dispatcher.review_pipeline(&offensive);
    println!(
        "allowed={} code={} message={:?}",
        decision.allowed, decision.status.code, decision.status.message
    );

    // Scenario 3: wrong kind
    println!("\n--- Scenario 3: Wrong Kind ---");
    let task = AdmissionRequest::new("uid-task", "Task", r#"{"metadata":{"name":"lint"}}"#);
    let decision = dispatcher.review_pipeline(&task);
    println!(
        "allowed={} code={} message={:?}",
        decision.allowed, decision.status.code, decision.status.message
    );

    println!("\n--- Recorded Decisions ---");
    for event in trail.events() {
        println!("{}", event);
    }

    // Scenario 4: registry from configuration
    println!("\n--- Scenario 4: Configured Registry ---");
    let config = AdmissionConfig::from_toml_str(
        r#"
        forbidden_substring = "forbidden"
        enforce_name_format = true
        "#,
    );
    match config.and_then(|c| Registry::from_config(&c)) {
        Ok(registry) => {
            println!("task validators: {:?}", registry.validator_names(ResourceKind::Task));
            let dispatcher = Dispatcher::new(registry);
            let upper = AdmissionRequest::new("uid-upper", "Task", r#"{"metadata":{"name":"Lint"}}"#);
            let decision = dispatcher.review_task(&upper);
            println!(
                "allowed={} code={} message={:?}",
                decision.allowed, decision.status.code, decision.status.message
            );
        }
        Err(e) => println!("Configuration error: {}", e),
    }
}
