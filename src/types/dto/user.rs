use poem_openapi::{ApiResponse, Object, payload::Json};
use crate::types::db::user;
use crate::types::dto::common::MessageResponse;
use crate::types::internal::auth::Role;

/// Request model for registration
#[derive(Object, Debug)]
pub struct CreateUserRequest {
    /// 3-18 letters or digits
    pub user_id: String,

    /// At least 8 characters with a letter, a digit and one of !@#$%^&*+
    pub password: String,

    /// Registering a manager requires a manager token
    pub role: Role,
}

/// Request model for updating the calling user
#[derive(Object, Debug)]
pub struct UpdateUserRequest {
    pub password: String,
    pub role: Role,
}

#[derive(Object, Debug)]
pub struct CreateUserResponse {
    pub uid: i64,
    pub message: String,
}

/// Stored user record
///
/// `password` is the Argon2 PHC hash, never the plaintext.
#[derive(Object, Debug)]
pub struct UserResponse {
    pub uid: i64,
    pub user_id: String,
    pub role: String,
    pub password: String,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            uid: u.uid,
            user_id: u.user_id,
            role: u.role,
            password: u.password_hash,
        }
    }
}

#[derive(ApiResponse)]
pub enum CreateUserApiResponse {
    /// User registered
    #[oai(status = 201)]
    Created(Json<CreateUserResponse>),
}

#[derive(ApiResponse)]
pub enum DeleteUserApiResponse {
    /// User deleted; the session cookie is cleared
    #[oai(status = 200)]
    Ok(
        Json<MessageResponse>,
        #[oai(header = "Set-Cookie")] String,
    ),
}
