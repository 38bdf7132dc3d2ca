use std::sync::Arc;
use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use crate::config::SecretManager;
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::types::internal::auth::{Claims, Role};

/// Access tokens live for one hour
pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 3600;

/// Issues and validates HS256 access tokens
pub struct TokenProvider {
    secret_manager: Arc<SecretManager>,
    expiration_seconds: i64,
}

impl TokenProvider {
    pub fn new(secret_manager: Arc<SecretManager>) -> Self {
        Self {
            secret_manager,
            expiration_seconds: ACCESS_TOKEN_TTL_SECONDS,
        }
    }

    /// Override the token lifetime (negative values issue already-expired tokens)
    pub fn with_expiration_seconds(mut self, expiration_seconds: i64) -> Self {
        self.expiration_seconds = expiration_seconds;
        self
    }

    pub fn expiration_seconds(&self) -> i64 {
        self.expiration_seconds
    }

    /// Sign a claim bundle for the given user
    pub fn issue_token(&self, uid: i64, user_id: &str, role: Role) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            uid,
            user_id: user_id.to_string(),
            role,
            exp: now + self.expiration_seconds,
            iat: now,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
        )
        .map_err(|e| InternalError::crypto("jwt_generation", e.to_string()))
    }

    /// Verify signature and expiry, returning the claims
    ///
    /// # Errors
    /// * `CredentialError::ExpiredToken` - past `exp`, no leeway
    /// * `CredentialError::InvalidToken` - malformed or bad signature
    pub fn validate_token(&self, token: &str) -> Result<Claims, InternalError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => CredentialError::ExpiredToken.into(),
            ErrorKind::InvalidSignature => CredentialError::invalid_token("invalid signature").into(),
            _ => CredentialError::invalid_token(e.to_string()).into(),
        })
    }
}
