// Test utilities shared by unit tests
// Only compiled when running tests

use std::sync::Arc;
use sea_orm::{Database, DatabaseConnection};
use migration::{MigratorTrait, StoreMigrator};
use crate::app_data::AppData;
use crate::config::{DatabaseConnections, MockEnvironment, SecretManager};

pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";
pub const TEST_PASSWORD_PEPPER: &str = "test-pepper-for-unit-tests";

/// Fresh in-memory database with all migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    StoreMigrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

fn secret_manager(jwt_secret: &str, pepper: &str) -> Arc<SecretManager> {
    let env = MockEnvironment::empty()
        .with_var("JWT_SECRET", jwt_secret)
        .with_var("PASSWORD_PEPPER", pepper);

    Arc::new(SecretManager::from_env_provider(Arc::new(env)).expect("Failed to initialize test SecretManager"))
}

pub fn test_secret_manager() -> Arc<SecretManager> {
    secret_manager(TEST_JWT_SECRET, TEST_PASSWORD_PEPPER)
}

pub fn test_secret_manager_with_pepper(pepper: &str) -> Arc<SecretManager> {
    secret_manager(TEST_JWT_SECRET, pepper)
}

pub fn test_secret_manager_with_jwt_secret(jwt_secret: &str) -> Arc<SecretManager> {
    secret_manager(jwt_secret, TEST_PASSWORD_PEPPER)
}

/// Full application data over a fresh in-memory database
pub async fn setup_test_app_data() -> Arc<AppData> {
    let connections = DatabaseConnections::from_connection(setup_test_db().await);
    Arc::new(AppData::with_secret_manager(connections, test_secret_manager(), None))
}
