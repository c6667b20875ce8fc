//! `advisor skill validate`: check a payload against a skill definition.

use std::path::Path;

use anyhow::{Context, bail};
use console::style;
use serde_json::Value;

use advisor_core::skill::SkillValidator;
use advisor_types::skill::{SkillDefinition, ValidationResult};

use crate::state::AppState;

pub async fn validate(
    state: &AppState,
    definition_path: &Path,
    payload_path: &Path,
    output: bool,
    json: bool,
) -> anyhow::Result<()> {
    let skill: SkillDefinition = read_json(definition_path).await?;
    let payload: Value = read_json(payload_path).await?;

    let validator = SkillValidator::new(skill, state.config.skills);
    let result = if output {
        validator.validate_output(&payload)
    } else {
        validator.validate_input(&payload)
    };
    let direction = if output { "output" } else { "input" };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&validator.skill().name, direction, &result);
    }

    if !result.valid {
        bail!("{direction} payload for skill '{}' is invalid", validator.skill().name);
    }
    Ok(())
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_result(skill: &str, direction: &str, result: &ValidationResult) {
    println!();
    if result.valid {
        println!(
            "  {} {} payload is valid for '{}'",
            style("✓").green().bold(),
            direction,
            style(skill).cyan()
        );
    } else {
        println!(
            "  {} {} payload is invalid for '{}'",
            style("✗").red().bold(),
            direction,
            style(skill).cyan()
        );
        for error in &result.errors {
            println!("    {} {}", style("-").dim(), error);
        }
    }
    println!();
}
