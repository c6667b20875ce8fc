//! Size-bounded JSON Schema validation for skill payloads.
//!
//! Nothing here returns an error: every outcome, including a schema that
//! fails to compile, is a [`ValidationResult`]. Size is checked before the
//! schema because it is cheaper and bounds the work the schema check does.

use jsonschema::JSONSchema;
use serde_json::Value;
use tracing::debug;

use advisor_types::config::SkillLimits;
use advisor_types::skill::{SkillDefinition, ValidationResult};

const BYTES_PER_KB: usize = 1024;

/// Validate `payload` against `schema`, collecting every error.
///
/// Errors read `"<instance path> <message>"`, with `(root)` for the
/// payload itself.
pub fn validate(payload: &Value, schema: &Value) -> ValidationResult {
    let compiled = match JSONSchema::compile(schema) {
        Ok(compiled) => compiled,
        Err(e) => return ValidationResult::fail(format!("invalid schema: {e}")),
    };

    match compiled.validate(payload) {
        Ok(()) => ValidationResult::ok(),
        Err(errors) => ValidationResult::fail_all(
            errors
                .map(|e| {
                    let path = e.instance_path.to_string();
                    let path = if path.is_empty() { "(root)".to_string() } else { path };
                    format!("{path} {e}")
                })
                .collect(),
        ),
    }
}

/// Fail when the serialized payload exceeds `max_kb` kilobytes.
pub fn validate_size(payload: &Value, max_kb: u32) -> ValidationResult {
    let size = serialized_len(payload);
    let limit = max_kb as usize * BYTES_PER_KB;
    if size > limit {
        debug!(size, limit, "payload over size limit");
        ValidationResult::fail(format!(
            "payload size {:.1}KB exceeds maximum of {max_kb}KB",
            size as f64 / BYTES_PER_KB as f64
        ))
    } else {
        ValidationResult::ok()
    }
}

pub fn validate_skill_input(payload: &Value, schema: &Value, max_kb: u32) -> ValidationResult {
    size_then_schema(payload, schema, max_kb)
}

pub fn validate_skill_output(payload: &Value, schema: &Value, max_kb: u32) -> ValidationResult {
    size_then_schema(payload, schema, max_kb)
}

fn size_then_schema(payload: &Value, schema: &Value, max_kb: u32) -> ValidationResult {
    let size = validate_size(payload, max_kb);
    if !size.valid {
        return size;
    }
    validate(payload, schema)
}

fn serialized_len(payload: &Value) -> usize {
    // Serializing a Value cannot fail: every map key is a string.
    serde_json::to_vec(payload).map(|bytes| bytes.len()).unwrap_or(0)
}

/// Validates payloads for one skill under the configured limits.
#[derive(Debug, Clone)]
pub struct SkillValidator {
    skill: SkillDefinition,
    limits: SkillLimits,
}

impl SkillValidator {
    pub fn new(skill: SkillDefinition, limits: SkillLimits) -> Self {
        Self { skill, limits }
    }

    pub fn skill(&self) -> &SkillDefinition {
        &self.skill
    }

    pub fn validate_input(&self, payload: &Value) -> ValidationResult {
        validate_skill_input(payload, &self.skill.input_schema, self.limits.max_input_kb)
    }

    pub fn validate_output(&self, payload: &Value) -> ValidationResult {
        validate_skill_output(payload, &self.skill.output_schema, self.limits.max_output_kb)
    }
}
