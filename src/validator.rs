use crate::error::ValidatorFault;

/// Pass/fail outcome of a validation run, with a human-readable reason.
///
/// A passing verdict carries an affirmative reason. A failing verdict names
/// the rule that rejected the resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the resource passed
    pub valid: bool,
    /// Why
    pub reason: String,
}

impl Verdict {
    /// Creates a passing verdict.
    pub fn pass(reason: impl Into<String>) -> Self {
        Self {
            valid: true,
            reason: reason.into(),
        }
    }

    /// Creates a failing verdict.
    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: reason.into(),
        }
    }
}

/// A single named rule evaluated against one resource variant.
///
/// Validators are bound to a concrete variant through `R`, so a pipeline
/// rule cannot be registered against tasks. They must be side-effect free:
/// the registry shares them across concurrent reviews.
///
/// # Errors
///
/// `validate` returns `Err(ValidatorFault)` only when the check itself could
/// not run. A resource that breaks the rule yields `Ok(Verdict::fail(..))`.
///
/// # Examples
///
/// ```
/// use admission_core::{Pipeline, Validator, ValidatorFault, Verdict};
///
/// struct RequiresTasks;
///
/// impl Validator<Pipeline> for RequiresTasks {
///     fn name(&self) -> &str {
///         "pipeline_requires_tasks"
///     }
///
///     fn validate(&self, pipeline: &Pipeline) -> Result<Verdict, ValidatorFault> {
///         if pipeline.spec.tasks.is_empty() {
///             return Ok(Verdict::fail("pipeline has no tasks"));
///         }
///         Ok(Verdict::pass("pipeline has tasks"))
///     }
/// }
///
/// let verdict = RequiresTasks.validate(&Pipeline::default()).unwrap();
/// assert!(!verdict.valid);
/// ```
pub trait Validator<R>: Send + Sync {
    /// Stable identifier of the rule.
    ///
    /// Configuration keys on this value, so it must not change between
    /// versions of the same rule.
    fn name(&self) -> &str;

    /// Inspects the resource.
    fn validate(&self, resource: &R) -> Result<Verdict, ValidatorFault>;
}

/// Boxed validator as stored by the registry.
pub type BoxedValidator<R> = Box<dyn Validator<R>>;
