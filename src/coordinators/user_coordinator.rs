use std::sync::Arc;
use crate::app_data::AppData;
use crate::coordinators::OrderCoordinator;
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::providers::CredentialProvider;
use crate::providers::identity_validator::{validate_password, validate_user_id};
use crate::stores::UserStore;
use crate::stores::user_store::parse_role;
use crate::types::db::{order, user};
use crate::types::internal::auth::Role;
use crate::types::internal::context::{RequestContext, RequestSource};

/// Account workflows: registration, profile changes, removal
pub struct UserCoordinator {
    user_store: Arc<UserStore>,
    credential_provider: Arc<CredentialProvider>,
    order_coordinator: OrderCoordinator,
}

impl UserCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            user_store: Arc::clone(&app_data.user_store),
            credential_provider: Arc::clone(&app_data.credential_provider),
            order_coordinator: OrderCoordinator::new(app_data),
        }
    }

    /// Register an account, returning its uid
    ///
    /// Manager accounts can only be registered by a caller holding a manager token.
    pub async fn register(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        password: &str,
        role: Role,
    ) -> Result<i64, InternalError> {
        validate_user_id(user_id)?;
        validate_password(password)?;

        if role.is_manager() {
            ctx.require_manager("create manager account")?;
        }

        let password_hash = self.credential_provider.hash_password(password)?;
        let uid = self.user_store.insert_user(user_id, role, password_hash).await?;

        tracing::info!(request_id = %ctx.request_id, uid, %role, "User registered");
        Ok(uid)
    }

    /// Create a manager account outside the HTTP surface
    ///
    /// Only CLI and start-up contexts may call this; API requests go through `register`.
    pub async fn create_manager(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        password: &str,
    ) -> Result<i64, InternalError> {
        if ctx.source == RequestSource::API {
            return Err(CredentialError::access_denied("manager creation is not available over the API").into());
        }

        validate_user_id(user_id)?;
        validate_password(password)?;

        let password_hash = self.credential_provider.hash_password(password)?;
        let uid = self.user_store.insert_user(user_id, Role::Manager, password_hash).await?;

        tracing::info!(request_id = %ctx.request_id, uid, source = ?ctx.source, "Manager account created");
        Ok(uid)
    }

    /// Create the configured manager unless an account with that user_id exists
    ///
    /// Returns the new uid, or `None` when the account was already there.
    pub async fn seed_manager(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        password: &str,
    ) -> Result<Option<i64>, InternalError> {
        match self.create_manager(ctx, user_id, password).await {
            Ok(uid) => Ok(Some(uid)),
            Err(InternalError::Credential(CredentialError::DuplicateUserId(_))) => {
                tracing::debug!(user_id, "Seed manager already exists");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn get_user(&self, user_id: &str) -> Result<user::Model, InternalError> {
        self.user_store.get_user_by_user_id(user_id).await
    }

    /// Change password and role of the calling user
    ///
    /// A user may not promote themselves to manager.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        password: &str,
        role: Role,
    ) -> Result<(), InternalError> {
        let claims = ctx.require_user(user_id)?;
        if role.is_manager() && !claims.role.is_manager() {
            return Err(CredentialError::access_denied("user cannot become manager itself").into());
        }

        // The stored role wins over a stale token
        let user = self.user_store.get_user_by_user_id(user_id).await?;
        if role.is_manager() && !parse_role(&user)?.is_manager() {
            return Err(CredentialError::access_denied("user cannot become manager itself").into());
        }

        validate_password(password)?;
        let password_hash = self.credential_provider.hash_password(password)?;
        self.user_store.update_user(user.uid, password_hash, role).await?;

        tracing::info!(request_id = %ctx.request_id, uid = user.uid, %role, "User updated");
        Ok(())
    }

    /// Delete the calling user's account. Their orders are left in place.
    pub async fn delete_user(&self, ctx: &RequestContext, user_id: &str) -> Result<(), InternalError> {
        ctx.require_user(user_id)?;

        let user = self.user_store.get_user_by_user_id(user_id).await?;
        self.user_store.delete_user(user.uid).await?;

        tracing::info!(request_id = %ctx.request_id, uid = user.uid, "User deleted");
        Ok(())
    }

    /// Orders owned by the calling user
    pub async fn list_orders(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> Result<Vec<order::Model>, InternalError> {
        ctx.require_user(user_id)?;

        let user = self.user_store.get_user_by_user_id(user_id).await?;
        self.order_coordinator.list_user_orders(user.uid).await
    }
}
