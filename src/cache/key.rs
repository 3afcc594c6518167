//! Module-key rendering
//!
//! Server-side module keys are derived from the bound project key and a local
//! project identifier. The observed server contract repeats the project key
//! (`project:project:guid`); that layout is only the default template.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const PROJECT_PLACEHOLDER: &str = "{project}";
const MODULE_PLACEHOLDER: &str = "{module}";

/// Template used to build module keys from a project key and a module id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleKeyFormat {
    template: String,
}

impl ModuleKeyFormat {
    /// `{project}:{project}:{module}`
    pub const DEFAULT_TEMPLATE: &'static str = "{project}:{project}:{module}";

    /// Parse a template. It must reference `{module}`.
    pub fn new(template: impl Into<String>) -> Result<Self, ConfigError> {
        let template = template.into();
        if !template.contains(MODULE_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "module key format '{}' must contain {}",
                template, MODULE_PLACEHOLDER
            )));
        }
        Ok(Self { template })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render the module key for `module` within `project_key`.
    ///
    /// Placeholders are substituted in one pass over the template, so braces
    /// inside either value are copied literally.
    pub fn build(&self, project_key: &str, module: &str) -> String {
        let capacity = self.template.len() + 2 * project_key.len() + module.len();
        let mut key = String::with_capacity(capacity);
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            key.push_str(&rest[..open]);
            let tail = &rest[open..];
            if let Some(after) = tail.strip_prefix(PROJECT_PLACEHOLDER) {
                key.push_str(project_key);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(MODULE_PLACEHOLDER) {
                key.push_str(module);
                rest = after;
            } else {
                key.push('{');
                rest = &tail[1..];
            }
        }
        key.push_str(rest);
        key
    }
}

impl Default for ModuleKeyFormat {
    fn default() -> Self {
        Self {
            template: Self::DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl fmt::Display for ModuleKeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

impl TryFrom<String> for ModuleKeyFormat {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModuleKeyFormat> for String {
    fn from(format: ModuleKeyFormat) -> Self {
        format.template
    }
}
