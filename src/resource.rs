//! Typed views of the resources this engine admits.
//!
//! The set of variants is closed: every kind the engine understands has a
//! `ResourceKind` tag, a concrete type implementing [`Kinded`], and a
//! [`Resource`] variant. Field names follow the Tekton `v1` JSON schema.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Kind tag of a resource variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A Tekton `Pipeline`
    Pipeline,
    /// A Tekton `Task`
    Task,
}

impl ResourceKind {
    /// Returns the exact kind tag as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Pipeline => "Pipeline",
            ResourceKind::Task => "Task",
        }
    }

    /// Returns the lowercase noun used in human-readable messages.
    pub fn noun(&self) -> &'static str {
        match self {
            ResourceKind::Pipeline => "pipeline",
            ResourceKind::Task => "task",
        }
    }

    /// Parses a wire kind tag. Matching is exact and case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Pipeline" => Some(ResourceKind::Pipeline),
            "Task" => Some(ResourceKind::Task),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decodes an explicit JSON `null` as the field's default value.
///
/// The API server passes objects through unchanged, and clients commonly
/// emit `null` for unset lists, maps and strings.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Standard object metadata shared by every variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectMeta {
    /// Explicit name; empty when the control plane is asked to generate one
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Prefix template for a generated name
    #[serde(deserialize_with = "null_as_default")]
    pub generate_name: String,
    /// Target namespace
    #[serde(deserialize_with = "null_as_default")]
    pub namespace: String,
    /// Labels
    #[serde(deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,
    /// Annotations
    #[serde(deserialize_with = "null_as_default")]
    pub annotations: BTreeMap<String, String>,
}

impl ObjectMeta {
    /// Returns the name to show in diagnostics.
    ///
    /// Falls back to the generate-name template when no explicit name is set.
    /// The result is for logging only and must not be used as the subject of
    /// a content rule.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.generate_name
        } else {
            &self.name
        }
    }
}

/// A declared parameter of a pipeline or task.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParamSpec {
    /// Parameter name
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Declared type (`string`, `array`, `object`)
    #[serde(rename = "type")]
    pub param_type: Option<String>,
    /// Free-form description
    pub description: Option<String>,
    /// Default value, kept undecoded
    pub default: Option<serde_json::Value>,
}

/// Reference from a pipeline task to a task definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskRef {
    /// Name of the referenced task
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Kind of the referenced task
    pub kind: Option<String>,
}

/// One entry of a pipeline's task graph.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineTask {
    /// Name of this task within the pipeline
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Referenced task definition
    pub task_ref: Option<TaskRef>,
    /// Names of tasks that must complete first
    #[serde(deserialize_with = "null_as_default")]
    pub run_after: Vec<String>,
}

/// Spec of a Tekton pipeline.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineSpec {
    /// Free-form description
    pub description: Option<String>,
    /// Declared parameters
    #[serde(deserialize_with = "null_as_default")]
    pub params: Vec<ParamSpec>,
    /// Task graph
    #[serde(deserialize_with = "null_as_default")]
    pub tasks: Vec<PipelineTask>,
    /// Tasks run after the graph finishes
    #[serde(deserialize_with = "null_as_default")]
    pub finally: Vec<PipelineTask>,
}

/// One step of a Tekton task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Step {
    /// Step name
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Container image
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,
    /// Inline script
    pub script: Option<String>,
    /// Command override
    #[serde(deserialize_with = "null_as_default")]
    pub command: Vec<String>,
    /// Arguments
    #[serde(deserialize_with = "null_as_default")]
    pub args: Vec<String>,
}

/// Spec of a Tekton task.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskSpec {
    /// Free-form description
    pub description: Option<String>,
    /// Declared parameters
    #[serde(deserialize_with = "null_as_default")]
    pub params: Vec<ParamSpec>,
    /// Steps, run in order
    #[serde(deserialize_with = "null_as_default")]
    pub steps: Vec<Step>,
}

/// A Tekton `Pipeline`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pipeline {
    /// API version of the encoded object
    #[serde(deserialize_with = "null_as_default")]
    pub api_version: String,
    /// Kind of the encoded object
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    /// Object metadata
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,
    /// Pipeline spec
    #[serde(deserialize_with = "null_as_default")]
    pub spec: PipelineSpec,
}

/// A Tekton `Task`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
    /// API version of the encoded object
    #[serde(deserialize_with = "null_as_default")]
    pub api_version: String,
    /// Kind of the encoded object
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    /// Object metadata
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,
    /// Task spec
    #[serde(deserialize_with = "null_as_default")]
    pub spec: TaskSpec,
}

/// A resource variant with a fixed kind tag.
///
/// Implemented by every concrete variant so extraction and validation can be
/// written once and stay statically typed per variant.
pub trait Kinded: DeserializeOwned {
    /// The kind tag this variant decodes from.
    const KIND: ResourceKind;

    /// Returns the object metadata.
    fn metadata(&self) -> &ObjectMeta;
}

impl Kinded for Pipeline {
    const KIND: ResourceKind = ResourceKind::Pipeline;

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }
}

impl Kinded for Task {
    const KIND: ResourceKind = ResourceKind::Task;

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }
}

/// Any resource the engine understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    /// A decoded pipeline
    Pipeline(Pipeline),
    /// A decoded task
    Task(Task),
}

impl Resource {
    /// Returns the kind tag of the contained variant.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Pipeline(_) => ResourceKind::Pipeline,
            Resource::Task(_) => ResourceKind::Task,
        }
    }

    /// Returns the object metadata of the contained variant.
    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            Resource::Pipeline(p) => &p.metadata,
            Resource::Task(t) => &t.metadata,
        }
    }
}

impl From<Pipeline> for Resource {
    fn from(p: Pipeline) -> Self {
        Resource::Pipeline(p)
    }
}

impl From<Task> for Resource {
    fn from(t: Task) -> Self {
        Resource::Task(t)
    }
}
