use thiserror::Error;

/// Failures reported by the order coordinator
///
/// The `*Failed` variants are raised after compensation has run; whatever
/// compensation itself could not undo has already been logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Order must contain at least one product")]
    EmptyProducts,

    #[error("Duplicate product in request: {pid}")]
    DuplicateProduct { pid: i64 },

    #[error("Product not found: {pid}")]
    ProductNotFound { pid: i64 },

    #[error("Order not found: {oid}")]
    OrderNotFound { oid: i64 },

    #[error("Order {oid} does not belong to user {uid}")]
    NotOwner { oid: i64, uid: i64 },

    #[error("Order {oid} has no ordered products")]
    NoExistingLines { oid: i64 },

    #[error("Creating order {oid} failed after {inserted} of {requested} products")]
    OrderCreateFailed {
        oid: i64,
        inserted: usize,
        requested: usize,
    },

    #[error("Removing products from order {oid} failed")]
    DeleteFailed { oid: i64 },

    #[error("Adding products to order {oid} failed")]
    InsertFailed { oid: i64 },

    #[error("Removing ordered products of order {oid} failed")]
    LineDeleteFailed { oid: i64 },

    #[error("Removing order {oid} failed")]
    OrderDeleteFailed { oid: i64 },
}
