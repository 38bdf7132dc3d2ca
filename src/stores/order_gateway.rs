use async_trait::async_trait;
use crate::errors::InternalError;
use crate::types::db::{order, product};

/// Row-level operations the order coordinator composes into workflows
///
/// Each call is an independent unit of failure. Implementations must not
/// hold state across calls.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn select_product(&self, pid: i64) -> Result<Option<product::Model>, InternalError>;

    /// Insert an order header dated now, returning its oid
    async fn insert_order(&self, uid: i64) -> Result<i64, InternalError>;

    async fn select_order(&self, oid: i64) -> Result<Option<order::Model>, InternalError>;

    /// Set the order date to now
    async fn touch_order(&self, oid: i64) -> Result<(), InternalError>;

    async fn delete_order(&self, oid: i64) -> Result<(), InternalError>;

    async fn insert_order_product(&self, oid: i64, pid: i64) -> Result<(), InternalError>;

    /// Product ids on the order, ascending
    async fn select_order_products(&self, oid: i64) -> Result<Vec<i64>, InternalError>;

    async fn delete_order_product(&self, oid: i64, pid: i64) -> Result<(), InternalError>;

    async fn select_user_orders(&self, uid: i64) -> Result<Vec<order::Model>, InternalError>;

    /// Every order, newest first
    async fn select_orders(&self) -> Result<Vec<order::Model>, InternalError>;
}
