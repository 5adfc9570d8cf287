use serde::Deserialize;

use crate::error::ConfigError;
use crate::registry::{Registry, DEFAULT_FORBIDDEN_SUBSTRING};
use crate::resource::{Pipeline, Task};
use crate::validator::BoxedValidator;
use crate::validators::{NameBlocklist, NameFormat};

/// Build-time settings for the stock validators.
///
/// Loaded once at startup and turned into a [`Registry`]. Nothing here is
/// consulted at request time.
///
/// ```toml
/// forbidden_substring = "offensive"
/// enforce_name_format = true
/// disabled_validators = ["task_name_validator"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdmissionConfig {
    /// Substring the name blocklist rejects
    pub forbidden_substring: String,
    /// Register the DNS-1123 name format rule ahead of the blocklist
    pub enforce_name_format: bool,
    /// Validator names to leave out of the registry
    pub disabled_validators: Vec<String>,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            forbidden_substring: DEFAULT_FORBIDDEN_SUBSTRING.to_string(),
            enforce_name_format: false,
            disabled_validators: Vec::new(),
        }
    }
}

impl AdmissionConfig {
    /// Parses and checks a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys, and
    /// [`ConfigError::Invalid`] for an empty forbidden substring.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.forbidden_substring.is_empty() {
            return Err(ConfigError::Invalid {
                field: "forbidden_substring",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    fn is_enabled(&self, name: &str) -> bool {
        !self.disabled_validators.iter().any(|d| d == name)
    }
}

impl Registry {
    /// Builds the stock registry described by `config`.
    ///
    /// Order per kind: name format (if enforced), then name blocklist.
    /// Validators named in `disabled_validators` are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the config does not pass its checks.
    pub fn from_config(config: &AdmissionConfig) -> Result<Self, ConfigError> {
        config.check()?;

        let mut pipeline: Vec<BoxedValidator<Pipeline>> = Vec::new();
        let mut task: Vec<BoxedValidator<Task>> = Vec::new();
        if config.enforce_name_format {
            pipeline.push(Box::new(NameFormat::<Pipeline>::new()));
            task.push(Box::new(NameFormat::<Task>::new()));
        }
        pipeline.push(Box::new(NameBlocklist::<Pipeline>::new(&config.forbidden_substring)));
        task.push(Box::new(NameBlocklist::<Task>::new(&config.forbidden_substring)));

        let mut builder = Registry::builder();
        for validator in pipeline {
            if config.is_enabled(validator.name()) {
                builder = builder.boxed_pipeline(validator);
            } else {
                tracing::info!(validator = validator.name(), "validator disabled by config");
            }
        }
        for validator in task {
            if config.is_enabled(validator.name()) {
                builder = builder.boxed_task(validator);
            } else {
                tracing::info!(validator = validator.name(), "validator disabled by config");
            }
        }
        Ok(builder.build())
    }
}
