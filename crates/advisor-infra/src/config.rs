//! Configuration loader for the advisor client.
//!
//! Reads `config.toml` from the data directory (`~/.advisor/` in production)
//! and deserializes it into [`AdvisorConfig`]. Falls back to sensible defaults
//! when the file is missing or malformed.

use std::path::{Path, PathBuf};

use advisor_types::config::AdvisorConfig;
use advisor_types::error::ConfigError;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "ADVISOR_DATA_DIR";

/// Resolve the data directory.
///
/// Priority:
/// 1. `ADVISOR_DATA_DIR` environment variable
/// 2. `~/.advisor`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".advisor");
    }

    // Last resort: current directory
    PathBuf::from(".advisor")
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AdvisorConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> AdvisorConfig {
    match try_load_config(data_dir).await {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path(data_dir).display()
            );
            AdvisorConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            AdvisorConfig::default()
        }
    }
}

/// Load configuration, reporting read and parse failures.
///
/// Returns `Ok(None)` when there is no config file.
pub async fn try_load_config(data_dir: &Path) -> Result<Option<AdvisorConfig>, ConfigError> {
    let path = config_path(data_dir);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    toml::from_str::<AdvisorConfig>(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.api_key_env, "ADVISOR_API_KEY");
        assert!(config.advisors.is_empty());
        assert!(try_load_config(tmp.path()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            config_path(tmp.path()),
            r#"
endpoint = "https://project.supabase.co/functions/v1/advisor-chat"

[stream]
idle_timeout_secs = 60

[[advisors]]
slug = "mentor"
name = "The Mentor"
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(
            config.endpoint,
            "https://project.supabase.co/functions/v1/advisor-chat"
        );
        assert_eq!(config.stream.idle_timeout_secs, Some(60));
        assert_eq!(config.advisor("mentor").unwrap().name, "The Mentor");
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(config_path(tmp.path()), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert!(config.model.is_none());

        let err = try_load_config(tmp.path()).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn config_path_is_inside_data_dir() {
        let path = config_path(Path::new("/tmp/advisor-data"));
        assert_eq!(path, PathBuf::from("/tmp/advisor-data/config.toml"));
    }
}
