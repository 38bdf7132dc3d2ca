use thiserror::Error;

pub mod catalog;
pub mod credential;
pub mod database;
pub mod order;
pub mod validation;

pub use catalog::CatalogError;
pub use credential::CredentialError;
pub use database::DatabaseError;
pub use order::OrderError;
pub use validation::ValidationError;

/// Internal error type for store, provider and coordinator operations
///
/// Infrastructure errors (database, crypto) sit next to one domain error per
/// area. Not exposed via API - endpoints convert through `ApiError::from_internal_error`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    /// A spawned workflow task panicked or was cancelled
    #[error("Task error: {operation} failed: {message}")]
    Task {
        operation: String,
        message: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Order(#[from] OrderError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> InternalError {
        InternalError::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn task(operation: impl Into<String>, message: impl Into<String>) -> InternalError {
        InternalError::Task {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn transaction_begin(source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::TransactionBegin { source })
    }

    pub fn transaction_commit(source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::TransactionCommit { source })
    }
}
