use std::fmt;
use std::sync::Arc;
use crate::config::{ConfigError, EnvironmentProvider, SystemEnvironment};

const DEFAULT_DATABASE_URL: &str = "sqlite://storefront.db?mode=rwc";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Manager account created at start-up when it does not exist yet
#[derive(Clone)]
pub struct ManagerSeed {
    pub user_id: String,
    pub password: String,
}

impl fmt::Debug for ManagerSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerSeed")
            .field("user_id", &self.user_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Infrastructure settings read once before anything else starts
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    cookie_domain: Option<String>,
    manager_seed: Option<ManagerSeed>,
}

impl BootstrapSettings {
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            env_provider
                .get_var(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let database_url = read("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let server_host = read("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let server_port = match read("PORT") {
            Some(value) => Self::parse_port(&value)?,
            None => DEFAULT_PORT,
        };
        let cookie_domain = read("COOKIE_DOMAIN");

        let manager_seed = match (read("MANAGER_USER_ID"), read("MANAGER_PASSWORD")) {
            (Some(user_id), Some(password)) => Some(ManagerSeed { user_id, password }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteManagerSeed),
        };

        Ok(Self {
            database_url,
            server_host,
            server_port,
            cookie_domain,
            manager_seed,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    fn parse_port(value: &str) -> Result<u16, ConfigError> {
        let port = value.parse::<u16>().map_err(|e| {
            ConfigError::invalid_setting(
                "PORT",
                format!("Expected port number (1-65535), got '{}': {}", value, e),
            )
        })?;

        if port == 0 {
            return Err(ConfigError::invalid_setting(
                "PORT",
                "Port number must be between 1 and 65535",
            ));
        }

        Ok(port)
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn cookie_domain(&self) -> Option<&str> {
        self.cookie_domain.as_deref()
    }

    pub fn manager_seed(&self) -> Option<&ManagerSeed> {
        self.manager_seed.as_ref()
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("cookie_domain", &self.cookie_domain)
            .field("manager_seed", &self.manager_seed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    fn settings_with(vars: &[(&str, &str)]) -> Result<BootstrapSettings, ConfigError> {
        BootstrapSettings::from_env_provider(Arc::new(MockEnvironment::empty().with_vars(vars)))
    }

    #[test]
    fn test_bootstrap_settings_with_all_vars() {
        let settings = settings_with(&[
            ("DATABASE_URL", "sqlite://test.db"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("COOKIE_DOMAIN", "shop.local"),
        ])
        .unwrap();

        assert_eq!(settings.database_url(), "sqlite://test.db");
        assert_eq!(settings.server_host(), "127.0.0.1");
        assert_eq!(settings.server_port(), 8080);
        assert_eq!(settings.cookie_domain(), Some("shop.local"));
        assert_eq!(settings.server_address(), "127.0.0.1:8080");
        assert!(settings.manager_seed().is_none());
    }

    #[test]
    fn test_bootstrap_settings_with_defaults() {
        let settings = settings_with(&[]).unwrap();

        assert_eq!(settings.database_url(), "sqlite://storefront.db?mode=rwc");
        assert_eq!(settings.server_address(), "0.0.0.0:3000");
        assert_eq!(settings.cookie_domain(), None);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(matches!(
            settings_with(&[("PORT", "not-a-port")]),
            Err(ConfigError::InvalidSetting { .. })
        ));
        assert!(matches!(
            settings_with(&[("PORT", "0")]),
            Err(ConfigError::InvalidSetting { .. })
        ));
        assert!(matches!(
            settings_with(&[("PORT", "70000")]),
            Err(ConfigError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_manager_seed_requires_both_vars() {
        let settings = settings_with(&[
            ("MANAGER_USER_ID", "master01"),
            ("MANAGER_PASSWORD", "pwmaster01++"),
        ])
        .unwrap();
        let seed = settings.manager_seed().unwrap();
        assert_eq!(seed.user_id, "master01");
        assert_eq!(seed.password, "pwmaster01++");

        assert!(matches!(
            settings_with(&[("MANAGER_USER_ID", "master01")]),
            Err(ConfigError::IncompleteManagerSeed)
        ));
    }

    #[test]
    fn test_debug_redacts_manager_password() {
        let settings = settings_with(&[
            ("MANAGER_USER_ID", "master01"),
            ("MANAGER_PASSWORD", "pwmaster01++"),
        ])
        .unwrap();

        let debug = format!("{:?}", settings);
        assert!(debug.contains("master01"));
        assert!(!debug.contains("pwmaster01++"));
    }
}
