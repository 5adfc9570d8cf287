use crate::resource::{Pipeline, ResourceKind, Task};
use crate::validator::{BoxedValidator, Validator};
use crate::validators::NameBlocklist;

/// Forbidden substring used by the stock registry.
pub const DEFAULT_FORBIDDEN_SUBSTRING: &str = "offensive";

/// Ordered validator lists, one per resource variant.
///
/// A `Registry` is built once, at startup, and is read-only afterwards. It is
/// `Send + Sync` and meant to be shared across concurrent reviews.
///
/// # Examples
///
/// ```
/// use admission_core::{NameBlocklist, NameFormat, Pipeline, Registry, ResourceKind, Task};
///
/// let registry = Registry::builder()
///     .pipeline(NameFormat::<Pipeline>::new())
///     .pipeline(NameBlocklist::<Pipeline>::new("offensive"))
///     .task(NameBlocklist::<Task>::new("offensive"))
///     .build();
///
/// assert_eq!(
///     registry.validator_names(ResourceKind::Pipeline),
///     vec!["pipeline_name_format_validator", "pipeline_name_validator"]
/// );
/// ```
pub struct Registry {
    pipeline: Vec<BoxedValidator<Pipeline>>,
    task: Vec<BoxedValidator<Task>>,
}

impl Registry {
    /// Starts building a registry with no validators.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            pipeline: Vec::new(),
            task: Vec::new(),
        }
    }

    /// Returns a registry with no validators; every resource is admitted.
    pub fn empty() -> Self {
        Self::builder().build()
    }

    /// Returns the pipeline validators in execution order.
    pub fn pipeline_validators(&self) -> &[BoxedValidator<Pipeline>] {
        &self.pipeline
    }

    /// Returns the task validators in execution order.
    pub fn task_validators(&self) -> &[BoxedValidator<Task>] {
        &self.task
    }

    /// Returns the names of the validators registered for `kind`, in order.
    pub fn validator_names(&self, kind: ResourceKind) -> Vec<&str> {
        match kind {
            ResourceKind::Pipeline => self.pipeline.iter().map(|v| v.name()).collect(),
            ResourceKind::Task => self.task.iter().map(|v| v.name()).collect(),
        }
    }
}

impl Default for Registry {
    /// The stock configuration: the name blocklist for both kinds.
    fn default() -> Self {
        Self::builder()
            .pipeline(NameBlocklist::<Pipeline>::new(DEFAULT_FORBIDDEN_SUBSTRING))
            .task(NameBlocklist::<Task>::new(DEFAULT_FORBIDDEN_SUBSTRING))
            .build()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("pipeline", &self.validator_names(ResourceKind::Pipeline))
            .field("task", &self.validator_names(ResourceKind::Task))
            .finish()
    }
}

/// Builder for [`Registry`].
///
/// Validators run in the order they are added. Adding a validator whose name
/// is already registered for the same kind is a no-op: the first
/// registration wins.
pub struct RegistryBuilder {
    pipeline: Vec<BoxedValidator<Pipeline>>,
    task: Vec<BoxedValidator<Task>>,
}

impl RegistryBuilder {
    /// Appends a pipeline validator.
    pub fn pipeline(mut self, validator: impl Validator<Pipeline> + 'static) -> Self {
        push_unique(&mut self.pipeline, Box::new(validator), ResourceKind::Pipeline);
        self
    }

    /// Appends a task validator.
    pub fn task(mut self, validator: impl Validator<Task> + 'static) -> Self {
        push_unique(&mut self.task, Box::new(validator), ResourceKind::Task);
        self
    }

    /// Appends an already boxed pipeline validator.
    pub fn boxed_pipeline(mut self, validator: BoxedValidator<Pipeline>) -> Self {
        push_unique(&mut self.pipeline, validator, ResourceKind::Pipeline);
        self
    }

    /// Appends an already boxed task validator.
    pub fn boxed_task(mut self, validator: BoxedValidator<Task>) -> Self {
        push_unique(&mut self.task, validator, ResourceKind::Task);
        self
    }

    /// Freezes the registry.
    pub fn build(self) -> Registry {
        Registry {
            pipeline: self.pipeline,
            task: self.task,
        }
    }
}

fn push_unique<R>(list: &mut Vec<BoxedValidator<R>>, validator: BoxedValidator<R>, kind: ResourceKind) {
    if list.iter().any(|v| v.name() == validator.name()) {
        tracing::warn!(
            kind = %kind,
            validator = validator.name(),
            "validator already registered, ignoring duplicate"
        );
        return;
    }
    list.push(validator);
}
