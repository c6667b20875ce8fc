//! Advisor persona types.
//!
//! An advisor is a named persona the user converses with. The persona's
//! system prompt travels with every completion request.

use serde::{Deserialize, Serialize};

/// A configured advisor persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorProfile {
    /// URL-safe identifier (e.g., "career-coach").
    pub slug: String,
    /// Display name shown in the chat banner.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Persona instructions sent as the system prompt.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl AdvisorProfile {
    /// The built-in persona used when none is configured.
    pub fn general() -> Self {
        Self {
            slug: "general".to_string(),
            name: "Advisor".to_string(),
            description: "A thoughtful general-purpose advisor".to_string(),
            system_prompt: None,
        }
    }
}
