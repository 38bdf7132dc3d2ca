use crate::errors::internal::{
    CatalogError, CredentialError, DatabaseError, InternalError, OrderError,
};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Error responses shared by every endpoint
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Malformed or invalid input
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Missing, invalid or expired token, wrong owner or wrong role
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// User, product or order does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// User id already registered
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ApiError {
    pub fn bad_request(error: &str, message: impl Into<String>) -> Self {
        ApiError::BadRequest(Self::body(error, message, 400))
    }

    pub fn unauthorized(error: &str, message: impl Into<String>) -> Self {
        ApiError::Unauthorized(Self::body(error, message, 401))
    }

    pub fn not_found(error: &str, message: impl Into<String>) -> Self {
        ApiError::NotFound(Self::body(error, message, 404))
    }

    pub fn conflict(error: &str, message: impl Into<String>) -> Self {
        ApiError::Conflict(Self::body(error, message, 409))
    }

    /// Generic internal server error; never carries internal details
    pub fn internal_server_error() -> Self {
        ApiError::InternalError(Self::body(
            "internal_error",
            "An internal error occurred",
            500,
        ))
    }

    fn body(error: &str, message: impl Into<String>, status_code: u16) -> Json<ErrorResponse> {
        Json(ErrorResponse {
            error: error.to_string(),
            message: message.into(),
            status_code,
        })
    }

    /// Convert InternalError to ApiError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Infrastructure details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Database(DatabaseError::Operation { operation, .. }) => {
                tracing::error!("Database error in {}: {}", operation, err);
                Self::internal_server_error()
            }
            InternalError::Database(_) => {
                tracing::error!("Database error: {}", err);
                Self::internal_server_error()
            }
            InternalError::Crypto { operation, .. } => {
                tracing::error!("Crypto error in {}: {}", operation, err);
                Self::internal_server_error()
            }

            InternalError::Task { operation, .. } => {
                tracing::error!("Task error in {}: {}", operation, err);
                Self::internal_server_error()
            }

            InternalError::Validation(e) => {
                tracing::debug!("Validation failed: {}", e);
                Self::bad_request("validation_failed", e.to_string())
            }

            InternalError::Credential(e) => Self::from_credential_error(e),

            InternalError::Catalog(CatalogError::ProductNotFound { .. }) => {
                Self::not_found("product_not_found", "product not found")
            }

            InternalError::Order(e) => Self::from_order_error(e),
        }
    }

    fn from_credential_error(err: &CredentialError) -> Self {
        match err {
            CredentialError::InvalidCredentials => {
                tracing::debug!("Wrong password attempt");
                Self::unauthorized("invalid_credentials", "wrong password")
            }
            CredentialError::UserNotFound(user_id) => {
                tracing::debug!("User not found: {}", user_id);
                Self::not_found("user_not_found", "user not found")
            }
            CredentialError::DuplicateUserId(user_id) => {
                tracing::warn!("Duplicate registration attempt: {}", user_id);
                Self::conflict("already_registered", "already registered user")
            }
            CredentialError::MissingToken => Self::unauthorized("missing_token", "no cookie"),
            CredentialError::InvalidToken { reason } => {
                tracing::debug!("Invalid token: {}", reason);
                Self::unauthorized("invalid_token", "invalid jwt")
            }
            CredentialError::ExpiredToken => Self::unauthorized("expired_token", "jwt has expired"),
            CredentialError::AccessDenied { reason } => {
                tracing::debug!("Access denied: {}", reason);
                Self::unauthorized("access_denied", reason.clone())
            }
        }
    }

    fn from_order_error(err: &OrderError) -> Self {
        match err {
            OrderError::EmptyProducts => Self::bad_request("empty_products", "empty products"),
            OrderError::DuplicateProduct { .. } => Self::bad_request(
                "duplicate_product",
                "duplicate product found in request",
            ),
            OrderError::ProductNotFound { .. } => {
                Self::not_found("product_not_found", "product not found")
            }
            OrderError::OrderNotFound { .. } => Self::not_found("order_not_found", "order not found"),
            OrderError::NoExistingLines { .. } => {
                Self::not_found("order_not_found", "ordered product not found")
            }
            OrderError::NotOwner { .. } => Self::unauthorized("access_denied", "not order of user"),

            // Compensation has already run; one aggregate 500 regardless of how it went
            OrderError::OrderCreateFailed { .. }
            | OrderError::DeleteFailed { .. }
            | OrderError::InsertFailed { .. }
            | OrderError::LineDeleteFailed { .. }
            | OrderError::OrderDeleteFailed { .. } => {
                tracing::error!("Order workflow failed: {}", err);
                Self::internal_server_error()
            }
        }
    }

    pub fn status_code(&self) -> u16 {
        self.response().status_code
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        self.response().message.clone()
    }

    fn response(&self) -> &ErrorResponse {
        match self {
            ApiError::BadRequest(json)
            | ApiError::Unauthorized(json)
            | ApiError::NotFound(json)
            | ApiError::Conflict(json)
            | ApiError::InternalError(json) => &json.0,
        }
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
