//! Skill definition and payload validation result types.
//!
//! A skill is a user-defined structured capability. Its input and output
//! payloads are checked against the JSON Schemas declared here before they
//! are trusted.

use serde::{Deserialize, Serialize};

/// A user-defined skill with the schemas its payloads must satisfy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// JSON Schema for the skill's input payload.
    #[serde(default = "permissive_schema")]
    pub input_schema: serde_json::Value,
    /// JSON Schema for the skill's output payload.
    #[serde(default = "permissive_schema")]
    pub output_schema: serde_json::Value,
}

fn permissive_schema() -> serde_json::Value {
    serde_json::Value::Object(Default::default())
}

/// Outcome of validating a payload. Always produced, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// A passing result with no errors.
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// A failing result with a single error.
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![error.into()],
        }
    }

    /// A failing result carrying all the given errors.
    pub fn fail_all(errors: Vec<String>) -> Self {
        Self {
            valid: false,
            errors,
        }
    }

    /// Combine results: errors concatenated in order, validity AND-ed.
    ///
    /// Merging nothing yields a passing result.
    pub fn merge<I>(results: I) -> Self
    where
        I: IntoIterator<Item = ValidationResult>,
    {
        results
            .into_iter()
            .fold(ValidationResult::ok(), |mut acc, result| {
                acc.valid &= result.valid;
                acc.errors.extend(result.errors);
                acc
            })
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}
