use std::marker::PhantomData;

use crate::error::ValidatorFault;
use crate::resource::Kinded;
use crate::validator::{Validator, Verdict};

/// Maximum length of a DNS-1123 label.
const MAX_LABEL_LEN: usize = 63;

/// Rejects resources whose explicit name contains a forbidden substring.
///
/// Matching is case-sensitive. Only the explicit name is inspected: a
/// generate-name template is a prefix with placeholders still to be filled,
/// so matching on it would reject names that may never exist.
///
/// # Examples
///
/// ```
/// use admission_core::{NameBlocklist, Pipeline, Validator};
///
/// let rule = NameBlocklist::<Pipeline>::new("offensive");
/// assert_eq!(rule.name(), "pipeline_name_validator");
///
/// let mut pipeline = Pipeline::default();
/// pipeline.metadata.name = "offensive-build".to_string();
///
/// let verdict = rule.validate(&pipeline).unwrap();
/// assert!(!verdict.valid);
/// assert_eq!(verdict.reason, r#"pipeline name contains "offensive""#);
/// ```
pub struct NameBlocklist<R> {
    name: String,
    forbidden: String,
    _resource: PhantomData<fn(&R)>,
}

impl<R: Kinded> NameBlocklist<R> {
    /// Creates a blocklist rule for the given substring.
    pub fn new(forbidden: impl Into<String>) -> Self {
        Self {
            name: format!("{}_name_validator", R::KIND.noun()),
            forbidden: forbidden.into(),
            _resource: PhantomData,
        }
    }

    /// Returns the forbidden substring.
    pub fn forbidden(&self) -> &str {
        &self.forbidden
    }
}

impl<R: Kinded> Validator<R> for NameBlocklist<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, resource: &R) -> Result<Verdict, ValidatorFault> {
        if self.forbidden.is_empty() {
            return Err(ValidatorFault::new("forbidden substring is empty"));
        }

        if resource.metadata().name.contains(self.forbidden.as_str()) {
            return Ok(Verdict::fail(format!(
                "{} name contains {:?}",
                R::KIND.noun(),
                self.forbidden
            )));
        }

        Ok(Verdict::pass("valid name"))
    }
}

/// Rejects explicit names that are not DNS-1123 labels.
///
/// An empty name passes: the control plane generates one from the template.
/// Register this before content rules so they only ever see well-formed
/// names.
pub struct NameFormat<R> {
    name: String,
    _resource: PhantomData<fn(&R)>,
}

impl<R: Kinded> NameFormat<R> {
    /// Creates the format rule.
    pub fn new() -> Self {
        Self {
            name: format!("{}_name_format_validator", R::KIND.noun()),
            _resource: PhantomData,
        }
    }
}

impl<R: Kinded> Default for NameFormat<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Kinded> Validator<R> for NameFormat<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, resource: &R) -> Result<Verdict, ValidatorFault> {
        let name = resource.metadata().name.as_str();
        if name.is_empty() {
            return Ok(Verdict::pass("name will be generated"));
        }

        match label_violation(name) {
            Some(problem) => Ok(Verdict::fail(format!(
                "{} name {:?} is not a valid DNS-1123 label: {}",
                R::KIND.noun(),
                name,
                problem
            ))),
            None => Ok(Verdict::pass("valid name format")),
        }
    }
}

fn label_violation(name: &str) -> Option<&'static str> {
    if name.len() > MAX_LABEL_LEN {
        return Some("must be no more than 63 characters");
    }

    let allowed = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-';
    if !name.chars().all(allowed) {
        return Some("must consist of lower case alphanumeric characters or '-'");
    }

    let alnum = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    let starts = name.chars().next().is_some_and(alnum);
    let ends = name.chars().last().is_some_and(alnum);
    if !starts || !ends {
        return Some("must start and end with an alphanumeric character");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{ObjectMeta, Pipeline, Task};

    fn pipeline(name: &str, generate_name: &str) -> Pipeline {
        Pipeline {
            metadata: ObjectMeta {
                name: name.to_string(),
                generate_name: generate_name.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn blocklist_names_follow_kind() {
        assert_eq!(
            NameBlocklist::<Pipeline>::new("x").name(),
            "pipeline_name_validator"
        );
        assert_eq!(NameBlocklist::<Task>::new("x").name(), "task_name_validator");
    }

    #[test]
    fn blocklist_passes_clean_name() {
        let rule = NameBlocklist::<Pipeline>::new("offensive");

        let verdict = rule.validate(&pipeline("build", "")).unwrap();

        assert_eq!(verdict, Verdict::pass("valid name"));
    }

    #[test]
    fn blocklist_rejects_substring_anywhere() {
        let rule = NameBlocklist::<Pipeline>::new("offensive");

        for name in ["offensive", "offensive-build", "my-offensive-build", "build-offensive"] {
            let verdict = rule.validate(&pipeline(name, "")).unwrap();
            assert!(!verdict.valid, "{name} should be rejected");
            assert_eq!(verdict.reason, "pipeline name contains \"offensive\"");
        }
    }

    #[test]
    fn blocklist_is_case_sensitive() {
        let rule = NameBlocklist::<Pipeline>::new("offensive");

        let verdict = rule.validate(&pipeline("Offensive-build", "")).unwrap();

        assert!(verdict.valid);
    }

    #[test]
    fn blocklist_ignores_generate_name_template() {
        let rule = NameBlocklist::<Pipeline>::new("offensive");

        let verdict = rule.validate(&pipeline("", "offensive-")).unwrap();

        assert!(verdict.valid);
    }

    #[test]
    fn blocklist_task_reason_uses_task_noun() {
        let rule = NameBlocklist::<Task>::new("offensive");
        let mut task = Task::default();
        task.metadata.name = "offensive-lint".to_string();

        let verdict = rule.validate(&task).unwrap();

        assert_eq!(verdict.reason, "task name contains \"offensive\"");
    }

    #[test]
    fn blocklist_with_empty_substring_malfunctions() {
        let rule = NameBlocklist::<Pipeline>::new("");

        let err = rule.validate(&pipeline("build", "")).unwrap_err();

        assert_eq!(err.message(), "forbidden substring is empty");
    }

    #[test]
    fn format_accepts_dns_labels() {
        let rule = NameFormat::<Pipeline>::new();

        for name in ["build", "build-2", "a", "0abc"] {
            assert!(rule.validate(&pipeline(name, "")).unwrap().valid, "{name}");
        }
    }

    #[test]
    fn format_rejects_malformed_names() {
        let rule = NameFormat::<Pipeline>::new();
        let long = "a".repeat(64);

        for name in ["Build", "build_2", "-build", "build-", "bu.ild", long.as_str()] {
            let verdict = rule.validate(&pipeline(name, "")).unwrap();
            assert!(!verdict.valid, "{name} should be rejected");
            assert!(verdict.reason.starts_with("pipeline name"));
        }
    }

    #[test]
    fn format_skips_generated_names() {
        let rule = NameFormat::<Task>::default();

        let verdict = rule.validate(&Task::default()).unwrap();

        assert!(verdict.valid);
        assert_eq!(rule.name(), "task_name_format_validator");
    }
}
