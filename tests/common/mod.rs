// Common test utilities for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use migration::{MigratorTrait, StoreMigrator};
use sea_orm::{Database, DatabaseConnection, DbErr};
use storefront_backend::app_data::AppData;
use storefront_backend::config::{DatabaseConnections, EnvironmentProvider, SecretManager};
use storefront_backend::errors::InternalError;
use storefront_backend::stores::{OrderGateway, OrderStore, ProductStore};
use storefront_backend::types::db::{order, product};

pub const TEST_JWT_SECRET: &str = "integration-secret-key-at-least-32-chars";
pub const TEST_PASSWORD_PEPPER: &str = "integration-pepper";

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    StoreMigrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Fixed environment for secret loading
struct StaticEnvironment(HashMap<&'static str, &'static str>);

impl EnvironmentProvider for StaticEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.0.get(key).map(|v| v.to_string())
    }
}

pub fn test_secret_manager() -> Arc<SecretManager> {
    let env = StaticEnvironment(HashMap::from([
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("PASSWORD_PEPPER", TEST_PASSWORD_PEPPER),
    ]));
    Arc::new(SecretManager::from_env_provider(Arc::new(env)).expect("Failed to initialize SecretManager"))
}

/// AppData over a fresh database, plus the connection for direct inspection
pub async fn setup_app_data() -> (DatabaseConnection, AppData) {
    let db = setup_test_db().await;
    let connections = DatabaseConnections::from_connection(db.clone());
    (db, AppData::with_secret_manager(connections, test_secret_manager(), None))
}

/// Insert products named `Product 1`, `Product 2`, ... returning their pids
pub async fn seed_products(db: &DatabaseConnection, count: usize) -> Vec<i64> {
    let store = ProductStore::new(db.clone());
    let mut pids = Vec::with_capacity(count);
    for i in 1..=count {
        pids.push(
            store
                .insert_product(&format!("Product {}", i), 100 * i as i64)
                .await
                .expect("Failed to seed product"),
        );
    }
    pids
}

/// Gateway operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOp {
    InsertOrder,
    TouchOrder,
    DeleteOrder,
    InsertOrderProduct,
    DeleteOrderProduct,
}

/// `OrderStore` decorator that fails chosen calls (1-based) of chosen operations
///
/// Each `(op, n)` fault fails the n-th call of `op`. Every other call goes
/// through to the real store.
pub struct FlakyGateway {
    inner: OrderStore,
    faults: Vec<(GatewayOp, usize)>,
    calls: Mutex<HashMap<GatewayOp, usize>>,
}

impl FlakyGateway {
    pub fn new(db: DatabaseConnection, op: GatewayOp, fail_on_call: usize) -> Self {
        Self::with_faults(db, &[(op, fail_on_call)])
    }

    pub fn with_faults(db: DatabaseConnection, faults: &[(GatewayOp, usize)]) -> Self {
        Self {
            inner: OrderStore::new(db),
            faults: faults.to_vec(),
            calls: Mutex::new(HashMap::new()),
        }
    }

    fn check(&self, op: GatewayOp) -> Result<(), InternalError> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            let count = calls.entry(op).or_insert(0);
            *count += 1;
            *count
        };
        if self.faults.contains(&(op, call)) {
            return Err(InternalError::database(
                "injected",
                DbErr::Custom(format!("injected failure on {:?} call {}", op, call)),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderGateway for FlakyGateway {
    async fn select_product(&self, pid: i64) -> Result<Option<product::Model>, InternalError> {
        self.inner.select_product(pid).await
    }

    async fn insert_order(&self, uid: i64) -> Result<i64, InternalError> {
        self.check(GatewayOp::InsertOrder)?;
        self.inner.insert_order(uid).await
    }

    async fn select_order(&self, oid: i64) -> Result<Option<order::Model>, InternalError> {
        self.inner.select_order(oid).await
    }

    async fn touch_order(&self, oid: i64) -> Result<(), InternalError> {
        self.check(GatewayOp::TouchOrder)?;
        self.inner.touch_order(oid).await
    }

    async fn delete_order(&self, oid: i64) -> Result<(), InternalError> {
        self.check(GatewayOp::DeleteOrder)?;
        self.inner.delete_order(oid).await
    }

    async fn insert_order_product(&self, oid: i64, pid: i64) -> Result<(), InternalError> {
        self.check(GatewayOp::InsertOrderProduct)?;
        self.inner.insert_order_product(oid, pid).await
    }

    async fn select_order_products(&self, oid: i64) -> Result<Vec<i64>, InternalError> {
        self.inner.select_order_products(oid).await
    }

    async fn delete_order_product(&self, oid: i64, pid: i64) -> Result<(), InternalError> {
        self.check(GatewayOp::DeleteOrderProduct)?;
        self.inner.delete_order_product(oid, pid).await
    }

    async fn select_user_orders(&self, uid: i64) -> Result<Vec<order::Model>, InternalError> {
        self.inner.select_user_orders(uid).await
    }

    async fn select_orders(&self) -> Result<Vec<order::Model>, InternalError> {
        self.inner.select_orders().await
    }
}
