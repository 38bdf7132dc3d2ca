use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid user id format")]
    InvalidUserId,

    #[error("Invalid password format: {0}")]
    InvalidPassword(&'static str),

    #[error("Invalid product name format")]
    InvalidProductName,

    #[error("Invalid price: {0}")]
    NegativePrice(i64),
}
