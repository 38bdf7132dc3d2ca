use thiserror::Error;

/// Errors raised while loading settings and secrets at start-up
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required secret '{secret_name}' is missing")]
    MissingSecret { secret_name: String },

    #[error("Secret '{secret_name}' must be at least {expected} characters, got {actual}")]
    SecretTooShort {
        secret_name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid setting '{setting_name}': {reason}")]
    InvalidSetting { setting_name: String, reason: String },

    #[error("MANAGER_USER_ID and MANAGER_PASSWORD must be set together")]
    IncompleteManagerSeed,
}

impl ConfigError {
    pub fn invalid_setting(setting_name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            setting_name: setting_name.to_string(),
            reason: reason.into(),
        }
    }
}
