use std::sync::Arc;
use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::identity_validator::{validate_password, validate_user_id};
use crate::providers::{CredentialProvider, TokenProvider};
use crate::stores::UserStore;
use crate::stores::user_store::parse_role;
use crate::types::internal::context::RequestContext;

/// Successful login: who logged in and the token to put in the cookie
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub uid: i64,
    pub access_token: String,
}

pub struct AuthCoordinator {
    user_store: Arc<UserStore>,
    credential_provider: Arc<CredentialProvider>,
    token_provider: Arc<TokenProvider>,
}

impl AuthCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_store: Arc::clone(&app_data.user_store),
            credential_provider: Arc::clone(&app_data.credential_provider),
            token_provider: Arc::clone(&app_data.token_provider),
        }
    }

    /// Check credentials and issue an access token
    ///
    /// # Errors
    /// * `ValidationError` - malformed user_id or password
    /// * `CredentialError::UserNotFound` - unknown user_id
    /// * `CredentialError::InvalidCredentials` - wrong password
    pub async fn login(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        password: &str,
    ) -> Result<LoginOutcome, InternalError> {
        validate_user_id(user_id)?;
        validate_password(password)?;

        let user = self.user_store.get_user_by_user_id(user_id).await?;

        if let Err(e) = self.credential_provider.verify_password(password, &user.password_hash) {
            tracing::info!(request_id = %ctx.request_id, ip = ?ctx.ip_address, user_id, "Login failed");
            return Err(e);
        }

        let role = parse_role(&user)?;
        let access_token = self.token_provider.issue_token(user.uid, &user.user_id, role)?;

        tracing::info!(request_id = %ctx.request_id, uid = user.uid, "Login succeeded");
        Ok(LoginOutcome {
            uid: user.uid,
            access_token,
        })
    }
}
