use std::fmt;
use std::sync::Arc;
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use crate::config::SecretManager;
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;

/// Hashes and verifies passwords with Argon2id
///
/// The server-side pepper is passed to Argon2 as its secret parameter, so a
/// leaked hash cannot be checked offline without it.
pub struct CredentialProvider {
    secret_manager: Arc<SecretManager>,
}

impl CredentialProvider {
    pub fn new(secret_manager: Arc<SecretManager>) -> Self {
        Self { secret_manager }
    }

    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(
            self.secret_manager.password_pepper().as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }

    /// Hash a password with a fresh random salt, returning the PHC string
    pub fn hash_password(&self, password: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);

        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| InternalError::crypto("hash_password", e.to_string()))?;

        Ok(hash.to_string())
    }

    /// # Errors
    /// * `CredentialError::InvalidCredentials` - password does not match
    pub fn verify_password(&self, password: &str, password_hash: &str) -> Result<(), InternalError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|e| InternalError::crypto("parse_password_hash", e.to_string()))?;

        self.argon2()?
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| CredentialError::InvalidCredentials.into())
    }
}

impl fmt::Debug for CredentialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialProvider")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}
