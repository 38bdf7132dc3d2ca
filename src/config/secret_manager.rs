use std::fmt;
use std::sync::Arc;
use crate::config::{ConfigError, EnvironmentProvider, SecretConfig, SecretType, SystemEnvironment};

/// Centralized manager for application secrets
pub struct SecretManager {
    jwt_secret: String,
    password_pepper: String,
}

impl SecretManager {
    /// Load and validate all secrets from the process environment
    pub fn init() -> Result<Self, ConfigError> {
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    /// Load and validate all secrets through the given environment provider
    ///
    /// # Errors
    /// Returns `ConfigError` if any required secret is missing or too short
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, ConfigError> {
        let jwt_secret = Self::load_secret(env_provider.as_ref(), &Self::jwt_config())?;
        let password_pepper = Self::load_secret(env_provider.as_ref(), &Self::pepper_config())?;

        Ok(Self {
            jwt_secret,
            password_pepper,
        })
    }

    fn jwt_config() -> SecretConfig {
        SecretConfig::env_var("JWT_SECRET").required(true).min_length(32)
    }

    fn pepper_config() -> SecretConfig {
        SecretConfig::env_var("PASSWORD_PEPPER").required(true).min_length(16)
    }

    /// HS256 signing key for access tokens
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Argon2 secret parameter for password hashing
    pub fn password_pepper(&self) -> &str {
        &self.password_pepper
    }

    fn load_secret(
        env_provider: &(dyn EnvironmentProvider + Send + Sync),
        config: &SecretConfig,
    ) -> Result<String, ConfigError> {
        let value = match &config.secret_type {
            SecretType::EnvVar { name } => match env_provider.get_var(name) {
                Some(v) => v,
                None if !config.required => return Ok(String::new()),
                None => {
                    return Err(ConfigError::MissingSecret {
                        secret_name: name.clone(),
                    });
                }
            },
        };

        if let Some(min_len) = config.min_length {
            if value.len() < min_len {
                return Err(ConfigError::SecretTooShort {
                    secret_name: config.secret_type.name().to_string(),
                    expected: min_len,
                    actual: value.len(),
                });
            }
        }

        Ok(value)
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_secret", &"<redacted>")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretManager {{ secrets_loaded: 2 }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    const JWT: &str = "this-is-a-valid-jwt-secret-with-32-characters";
    const PEPPER: &str = "valid-pepper-16ch";

    fn manager_with(vars: &[(&str, &str)]) -> Result<SecretManager, ConfigError> {
        SecretManager::from_env_provider(Arc::new(MockEnvironment::empty().with_vars(vars)))
    }

    #[test]
    fn test_successful_initialization_with_valid_secrets() {
        let manager = manager_with(&[("JWT_SECRET", JWT), ("PASSWORD_PEPPER", PEPPER)]).unwrap();

        assert_eq!(manager.jwt_secret(), JWT);
        assert_eq!(manager.password_pepper(), PEPPER);
    }

    #[test]
    fn test_missing_jwt_secret() {
        let err = manager_with(&[("PASSWORD_PEPPER", PEPPER)]).unwrap_err();

        assert!(matches!(err, ConfigError::MissingSecret { ref secret_name } if secret_name == "JWT_SECRET"));
    }

    #[test]
    fn test_missing_pepper() {
        let err = manager_with(&[("JWT_SECRET", JWT)]).unwrap_err();

        assert!(matches!(err, ConfigError::MissingSecret { ref secret_name } if secret_name == "PASSWORD_PEPPER"));
    }

    #[test]
    fn test_jwt_secret_too_short() {
        let err = manager_with(&[("JWT_SECRET", "short"), ("PASSWORD_PEPPER", PEPPER)]).unwrap_err();

        match err {
            ConfigError::SecretTooShort { secret_name, expected, actual } => {
                assert_eq!(secret_name, "JWT_SECRET");
                assert_eq!(expected, 32);
                assert_eq!(actual, 5);
            }
            other => panic!("Expected SecretTooShort, got {:?}", other),
        }
    }

    #[test]
    fn test_pepper_too_short() {
        let err = manager_with(&[("JWT_SECRET", JWT), ("PASSWORD_PEPPER", "pepper")]).unwrap_err();

        assert!(matches!(err, ConfigError::SecretTooShort { expected: 16, .. }));
    }

    #[test]
    fn test_debug_and_display_redact_secrets() {
        let manager = manager_with(&[("JWT_SECRET", JWT), ("PASSWORD_PEPPER", PEPPER)]).unwrap();

        let debug = format!("{:?}", manager);
        let display = format!("{}", manager);

        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains(JWT));
        assert!(!debug.contains(PEPPER));
        assert!(!display.contains(JWT));
        assert!(!display.contains(PEPPER));
    }
}
