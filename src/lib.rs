//! Admission-review decision engine for Tekton pipelines and tasks.
//!
//! Given a resource the control plane is about to persist, this crate decides
//! whether to admit it and builds the decision the control plane expects:
//! - **Extraction**: the kind-tagged raw payload is decoded into a typed
//!   resource, refused if the declared kind is not the expected one
//! - **Validation**: the resource runs through an ordered list of
//!   validators registered for its kind, stopping at the first rejection
//! - **Review**: the outcome becomes an `AdmissionDecision` that always
//!   echoes the request's correlation identifier
//!
//! # Core Types
//!
//! - [`Dispatcher`]: Runs a request through the whole pipeline
//! - [`Registry`]: Immutable, ordered validator lists per resource kind
//! - [`Validator`]: A single named rule bound to one resource variant
//! - [`Verdict`]: Pass/fail plus reason
//! - [`AdmissionDecision`]: Wire-format decision (`uid`, `allowed`, `status`)
//!
//! # Examples
//!
//! ```
//! use admission_core::{AdmissionRequest, Dispatcher, Registry, StatusCode};
//!
//! let dispatcher = Dispatcher::new(Registry::default());
//!
//! let req = AdmissionRequest::new("uid-1", "Pipeline", r#"{"metadata":{"name":"build"}}"#);
//! let decision = dispatcher.review_pipeline(&req);
//!
//! assert!(decision.allowed);
//! assert_eq!(decision.uid, "uid-1");
//! assert_eq!(decision.status_code(), Some(StatusCode::Accepted));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aggregate;
pub mod audit;
mod config;
mod dispatch;
mod error;
mod extract;
mod registry;
mod request;
mod resource;
mod review;
mod validator;
pub mod validators;
pub mod wire;

pub use aggregate::run_all;
pub use config::AdmissionConfig;
pub use dispatch::Dispatcher;
pub use error::{AdmissionError, ConfigError, ValidatorFault};
pub use extract::{extract, extract_as};
pub use registry::{Registry, RegistryBuilder, DEFAULT_FORBIDDEN_SUBSTRING};
pub use request::AdmissionRequest;
pub use resource::{
    Kinded, ObjectMeta, ParamSpec, Pipeline, PipelineSpec, PipelineTask, Resource, ResourceKind,
    Step, Task, TaskRef, TaskSpec,
};
pub use review::{AdmissionDecision, Status, StatusCode};
pub use validator::{BoxedValidator, Validator, Verdict};
pub use validators::{NameBlocklist, NameFormat};
