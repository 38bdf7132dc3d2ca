use std::sync::Arc;
use crate::config::{BootstrapSettings, ConfigError, DatabaseConnections, SecretManager};
use crate::providers::{CredentialProvider, TokenProvider};
use crate::stores::{OrderGateway, OrderStore, ProductStore, UserStore};

/// Centralized application data following the main-owned stores pattern
///
/// Everything is created once in main.rs and shared across coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init()
///   ├─ connections (DatabaseConnections)
///   ├─ secret_manager (Arc<SecretManager>)
///   ├─ user_store / product_store (Arc)
///   ├─ order_gateway (Arc<dyn OrderGateway>)
///   └─ credential_provider / token_provider (Arc)
///   ↓ wrapped in Arc<AppData>
///   ├─ UserCoordinator::new(app_data)
///   ├─ AuthCoordinator::new(app_data)
///   ├─ ProductCoordinator::new(app_data)
///   └─ OrderCoordinator::new(app_data)
/// ```
pub struct AppData {
    pub connections: DatabaseConnections,
    pub secret_manager: Arc<SecretManager>,
    pub cookie_domain: Option<String>,
    pub user_store: Arc<UserStore>,
    pub product_store: Arc<ProductStore>,
    pub order_gateway: Arc<dyn OrderGateway>,
    pub credential_provider: Arc<CredentialProvider>,
    pub token_provider: Arc<TokenProvider>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database should be connected and migrated before calling this.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a secret is missing or invalid
    pub fn init(
        connections: DatabaseConnections,
        settings: &BootstrapSettings,
    ) -> Result<Self, ConfigError> {
        tracing::info!("Initializing AppData...");

        let secret_manager = Arc::new(SecretManager::init()?);
        tracing::debug!("Secret manager initialized: {}", secret_manager);

        let app_data = Self::with_secret_manager(
            connections,
            secret_manager,
            settings.cookie_domain().map(str::to_string),
        );

        tracing::info!("AppData initialization complete");
        Ok(app_data)
    }

    /// Build stores and providers over an open connection
    pub fn with_secret_manager(
        connections: DatabaseConnections,
        secret_manager: Arc<SecretManager>,
        cookie_domain: Option<String>,
    ) -> Self {
        let db = connections.db.clone();

        Self {
            user_store: Arc::new(UserStore::new(db.clone())),
            product_store: Arc::new(ProductStore::new(db.clone())),
            order_gateway: Arc::new(OrderStore::new(db)),
            credential_provider: Arc::new(CredentialProvider::new(secret_manager.clone())),
            token_provider: Arc::new(TokenProvider::new(secret_manager.clone())),
            connections,
            secret_manager,
            cookie_domain,
        }
    }

    /// Replace the order gateway (fault injection in tests)
    pub fn with_order_gateway(mut self, order_gateway: Arc<dyn OrderGateway>) -> Self {
        self.order_gateway = order_gateway;
        self
    }

    /// Replace the token provider (e.g. a shorter token lifetime)
    pub fn with_token_provider(mut self, token_provider: TokenProvider) -> Self {
        self.token_provider = Arc::new(token_provider);
        self
    }
}
