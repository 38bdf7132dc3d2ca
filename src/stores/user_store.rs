use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set, SqlErr, TransactionTrait,
    sea_query::Expr,
};
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::types::db::user;
use crate::types::internal::auth::Role;

/// UserStore persists user accounts
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a user and return the generated uid
    ///
    /// # Errors
    /// * `CredentialError::DuplicateUserId` - the user_id is already registered
    pub async fn insert_user(
        &self,
        user_id: &str,
        role: Role,
        password_hash: String,
    ) -> Result<i64, InternalError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let existing = user::Entity::find()
            .filter(user::Column::UserId.eq(user_id))
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("check_user_exists", e))?;

        if existing.is_some() {
            return Err(CredentialError::DuplicateUserId(user_id.to_string()).into());
        }

        let new_user = user::ActiveModel {
            user_id: Set(user_id.to_string()),
            role: Set(role.as_str().to_string()),
            password_hash: Set(password_hash),
            ..Default::default()
        };

        let uid = user::Entity::insert(new_user)
            .exec(&txn)
            .await
            .map_err(|e| map_unique_violation(user_id, e))?
            .last_insert_id;

        txn.commit().await.map_err(InternalError::transaction_commit)?;

        tracing::debug!(uid, user_id, "user inserted");
        Ok(uid)
    }

    /// Look up a user by login name
    ///
    /// # Errors
    /// * `CredentialError::UserNotFound` - no such user
    pub async fn get_user_by_user_id(&self, user_id: &str) -> Result<user::Model, InternalError> {
        user::Entity::find()
            .filter(user::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_user_by_user_id", e))?
            .ok_or_else(|| CredentialError::UserNotFound(user_id.to_string()).into())
    }

    /// Replace password hash and role of an existing user
    pub async fn update_user(
        &self,
        uid: i64,
        password_hash: String,
        role: Role,
    ) -> Result<(), InternalError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let result = user::Entity::update_many()
            .col_expr(user::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(user::Column::Role, Expr::value(role.as_str()))
            .filter(user::Column::Uid.eq(uid))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("update_user", e))?;

        if result.rows_affected == 0 {
            return Err(CredentialError::UserNotFound(uid.to_string()).into());
        }

        txn.commit().await.map_err(InternalError::transaction_commit)
    }

    pub async fn delete_user(&self, uid: i64) -> Result<(), InternalError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let result = user::Entity::delete_by_id(uid)
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?;

        if result.rows_affected == 0 {
            return Err(CredentialError::UserNotFound(uid.to_string()).into());
        }

        txn.commit().await.map_err(InternalError::transaction_commit)
    }
}

/// Role column of a stored user
pub fn parse_role(user: &user::Model) -> Result<Role, InternalError> {
    user.role
        .parse()
        .map_err(|e: String| InternalError::database("parse_user_role", DbErr::Type(e)))
}

fn map_unique_violation(user_id: &str, err: DbErr) -> InternalError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            CredentialError::DuplicateUserId(user_id.to_string()).into()
        }
        _ => InternalError::database("insert_user", err),
    }
}
