use poem_openapi::{ApiResponse, Object, payload::Json};
use crate::types::dto::common::MessageResponse;

/// Request model for user login
#[derive(Object, Debug)]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
}

#[derive(Object, Debug)]
pub struct LoginResponse {
    pub uid: i64,
    pub message: String,
}

/// API response for login endpoint
#[derive(ApiResponse)]
pub enum LoginApiResponse {
    /// Login succeeded; the access token is set in the `access-token` cookie
    #[oai(status = 200)]
    Ok(
        Json<LoginResponse>,
        #[oai(header = "Set-Cookie")] String,
    ),
}

/// API response for logout endpoint
#[derive(ApiResponse)]
pub enum LogoutApiResponse {
    /// The `access-token` cookie is overwritten with an expired empty value
    #[oai(status = 200)]
    Ok(
        Json<MessageResponse>,
        #[oai(header = "Set-Cookie")] String,
    ),
}
