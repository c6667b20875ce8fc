//! Global configuration types for the advisor client.
//!
//! `AdvisorConfig` represents the top-level `config.toml` that controls the
//! completion endpoint, stream decoding limits, skill payload limits and
//! the advisor personas available to chat with.

use serde::{Deserialize, Serialize};

use crate::advisor::AdvisorProfile;

/// Top-level configuration.
///
/// Loaded from `~/.advisor/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// URL of the streaming completion endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model requested from the service; the service default when unset.
    #[serde(default)]
    pub model: Option<String>,

    /// Name of the environment variable holding the bearer credential.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default)]
    pub stream: StreamSettings,

    #[serde(default)]
    pub skills: SkillLimits,

    /// Advisor personas. The built-in general advisor is used when empty.
    #[serde(default)]
    pub advisors: Vec<AdvisorProfile>,
}

fn default_endpoint() -> String {
    "http://localhost:54321/functions/v1/advisor-chat".to_string()
}

fn default_api_key_env() -> String {
    "ADVISOR_API_KEY".to_string()
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: None,
            api_key_env: default_api_key_env(),
            stream: StreamSettings::default(),
            skills: SkillLimits::default(),
            advisors: Vec::new(),
        }
    }
}

impl AdvisorConfig {
    /// Find an advisor by slug, falling back to the built-in advisor for
    /// `"general"` when it is not configured explicitly.
    pub fn advisor(&self, slug: &str) -> Option<AdvisorProfile> {
        self.advisors
            .iter()
            .find(|a| a.slug == slug)
            .cloned()
            .or_else(|| (slug == "general").then(AdvisorProfile::general))
    }

    /// All advisors available to chat with.
    pub fn available_advisors(&self) -> Vec<AdvisorProfile> {
        if self.advisors.is_empty() {
            vec![AdvisorProfile::general()]
        } else {
            self.advisors.clone()
        }
    }
}

/// Stream decoding settings.
///
/// Both limits are off by default: the decoder then waits indefinitely for
/// data and retries an unparsable payload until the stream ends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamSettings {
    /// Abort a stream when no chunk arrives for this many seconds.
    #[serde(default)]
    pub idle_timeout_secs: Option<u64>,

    /// Drop a payload after this many failed re-parses.
    #[serde(default)]
    pub max_payload_retries: Option<u32>,
}

/// Size bounds for skill payloads, in kilobytes (1 KB = 1024 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillLimits {
    #[serde(default = "default_skill_kb")]
    pub max_input_kb: u32,
    #[serde(default = "default_skill_kb")]
    pub max_output_kb: u32,
}

fn default_skill_kb() -> u32 {
    100
}

impl Default for SkillLimits {
    fn default() -> Self {
        Self {
            max_input_kb: default_skill_kb(),
            max_output_kb: default_skill_kb(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = AdvisorConfig::default();
        assert_eq!(config.api_key_env, "ADVISOR_API_KEY");
        assert!(config.stream.idle_timeout_secs.is_none());
        assert!(config.stream.max_payload_retries.is_none());
        assert_eq!(config.skills.max_input_kb, 100);
        assert_eq!(config.skills.max_output_kb, 100);
    }

    #[test]
    fn test_config_deserialize_with_defaults() {
        let config: AdvisorConfig = toml::from_str("").unwrap();
        assert_eq!(config.endpoint, default_endpoint());
        assert!(config.advisors.is_empty());
    }

    #[test]
    fn test_config_deserialize_with_values() {
        let toml_str = r#"
endpoint = "https://example.supabase.co/functions/v1/chat"
model = "gpt-4o-mini"

[stream]
idle_timeout_secs = 45
max_payload_retries = 8

[skills]
max_output_kb = 250

[[advisors]]
slug = "cfo"
name = "The CFO"
description = "Numbers first"
system_prompt = "You are a pragmatic CFO."
"#;
        let config: AdvisorConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(config.stream.idle_timeout_secs, Some(45));
        assert_eq!(config.stream.max_payload_retries, Some(8));
        assert_eq!(config.skills.max_input_kb, 100);
        assert_eq!(config.skills.max_output_kb, 250);
        assert_eq!(config.advisors.len(), 1);
        assert_eq!(config.advisors[0].name, "The CFO");
    }

    #[test]
    fn test_advisor_lookup_falls_back_to_general() {
        let config = AdvisorConfig::default();
        assert_eq!(config.advisor("general").unwrap().name, "Advisor");
        assert!(config.advisor("cfo").is_none());
        assert_eq!(config.available_advisors().len(), 1);
    }
}
