//! Credential lookup.
//!
//! The bearer credential for the completion service comes from the
//! environment variable named by `api_key_env` in the config. It is wrapped
//! in a [`SecretString`] as soon as it is read.

use secrecy::SecretString;

use advisor_types::config::AdvisorConfig;
use advisor_types::error::ConfigError;

/// Read the credential from the variable named `var`.
///
/// A missing, empty or non-Unicode variable is reported as missing.
pub fn resolve_credential(var: &str) -> Result<SecretString, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(SecretString::from(value.trim().to_string())),
        _ => Err(ConfigError::MissingCredential(var.to_string())),
    }
}

/// Read the credential configured for `config`.
pub fn credential_for(config: &AdvisorConfig) -> Result<SecretString, ConfigError> {
    resolve_credential(&config.api_key_env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn missing_variable_is_reported_by_name() {
        let err = resolve_credential("ADVISOR_TEST_SURELY_UNSET_VAR").unwrap_err();
        assert_eq!(
            err.to_string(),
            "credential 'ADVISOR_TEST_SURELY_UNSET_VAR' is not set"
        );
    }

    #[test]
    fn present_variable_is_trimmed() {
        // PATH is set in any test environment; exercise the read path on it.
        let secret = resolve_credential("PATH").unwrap();
        assert!(!secret.expose_secret().is_empty());
        assert_eq!(secret.expose_secret(), secret.expose_secret().trim());
    }

    #[test]
    fn config_names_the_variable() {
        let mut config = AdvisorConfig::default();
        config.api_key_env = "ADVISOR_TEST_OTHER_UNSET_VAR".to_string();
        let err = credential_for(&config).unwrap_err();
        assert!(err.to_string().contains("ADVISOR_TEST_OTHER_UNSET_VAR"));
    }
}
