use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Product not found: {pid}")]
    ProductNotFound { pid: i64 },
}
