//! Application state shared by CLI commands.
//!
//! Resolves the data directory, loads `config.toml` and wires a
//! [`ChatSession`] to the HTTP transport on request.

use std::path::PathBuf;

use advisor_core::chat::{ChatOptions, ChatSession};
use advisor_infra::config::{load_config, resolve_data_dir};
use advisor_infra::credential::credential_for;
use advisor_infra::llm::HttpTransport;
use advisor_types::advisor::AdvisorProfile;
use advisor_types::config::AdvisorConfig;
use advisor_types::error::ConfigError;

/// Chat session pinned to the HTTP transport.
pub type HttpChatSession = ChatSession<HttpTransport>;

pub struct AppState {
    pub data_dir: PathBuf,
    pub config: AdvisorConfig,
}

impl AppState {
    /// Resolve the data directory and load configuration.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = load_config(&data_dir).await;
        tracing::debug!(data_dir = %data_dir.display(), endpoint = %config.endpoint, "configuration loaded");
        Ok(Self { data_dir, config })
    }

    pub fn advisor(&self, slug: &str) -> Result<AdvisorProfile, ConfigError> {
        self.config
            .advisor(slug)
            .ok_or_else(|| ConfigError::UnknownAdvisor(slug.to_string()))
    }

    /// Build a chat session with the given advisor.
    pub fn session(&self, slug: &str) -> anyhow::Result<HttpChatSession> {
        let advisor = self.advisor(slug)?;
        let api_key = credential_for(&self.config)?;
        let transport = HttpTransport::new(self.config.endpoint.clone(), api_key)?;
        Ok(ChatSession::new(
            transport,
            advisor,
            ChatOptions::from_config(&self.config),
        ))
    }
}
