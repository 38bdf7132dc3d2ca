use std::sync::Arc;
use poem::Request;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use crate::api::session::cleared_session_cookie;
use crate::app_data::AppData;
use crate::coordinators::UserCoordinator;
use crate::errors::ApiError;
use crate::providers::TokenProvider;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::order::OrderSummary;
use crate::types::dto::user::{
    CreateUserApiResponse, CreateUserRequest, CreateUserResponse, DeleteUserApiResponse,
    UpdateUserRequest, UserResponse,
};
use crate::types::internal::context::RequestContext;

/// User account endpoints
pub struct UserApi {
    user_coordinator: Arc<UserCoordinator>,
    token_provider: Arc<TokenProvider>,
    cookie_domain: Option<String>,
}

impl UserApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: Arc::clone(&app_data.token_provider),
            cookie_domain: app_data.cookie_domain.clone(),
            user_coordinator: Arc::new(UserCoordinator::new(app_data)),
        }
    }
}

#[derive(Tags)]
enum UserTags {
    /// User accounts
    User,
}

#[OpenApi]
impl UserApi {
    /// Register a user
    ///
    /// Registering with role `manager` requires a manager's access token.
    #[oai(path = "/user", method = "post", tag = "UserTags::User")]
    async fn create_user(
        &self,
        req: &Request,
        body: Json<CreateUserRequest>,
    ) -> Result<CreateUserApiResponse, ApiError> {
        let ctx = RequestContext::from_request(req, &self.token_provider);

        let uid = self
            .user_coordinator
            .register(&ctx, &body.user_id, &body.password, body.role)
            .await?;

        Ok(CreateUserApiResponse::Created(Json(CreateUserResponse {
            uid,
            message: "sign up success".to_string(),
        })))
    }

    /// Get a user record
    #[oai(path = "/user/:user_id", method = "get", tag = "UserTags::User")]
    async fn get_user(&self, user_id: Path<String>) -> Result<Json<UserResponse>, ApiError> {
        let user = self.user_coordinator.get_user(&user_id.0).await?;
        Ok(Json(user.into()))
    }

    /// Change password and role of the calling user
    #[oai(path = "/user/:user_id", method = "put", tag = "UserTags::User")]
    async fn update_user(
        &self,
        req: &Request,
        user_id: Path<String>,
        body: Json<UpdateUserRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = RequestContext::from_request(req, &self.token_provider);

        self.user_coordinator
            .update_user(&ctx, &user_id.0, &body.password, body.role)
            .await?;

        Ok(Json(MessageResponse::new("user update success")))
    }

    /// Delete the calling user and clear their session cookie
    #[oai(path = "/user/:user_id", method = "delete", tag = "UserTags::User")]
    async fn delete_user(
        &self,
        req: &Request,
        user_id: Path<String>,
    ) -> Result<DeleteUserApiResponse, ApiError> {
        let ctx = RequestContext::from_request(req, &self.token_provider);

        self.user_coordinator.delete_user(&ctx, &user_id.0).await?;

        Ok(DeleteUserApiResponse::Ok(
            Json(MessageResponse::new("user delete success")),
            cleared_session_cookie(self.cookie_domain.as_deref()),
        ))
    }

    /// Orders owned by the calling user
    #[oai(path = "/user/:user_id/orders", method = "get", tag = "UserTags::User")]
    async fn get_user_orders(
        &self,
        req: &Request,
        user_id: Path<String>,
    ) -> Result<Json<Vec<OrderSummary>>, ApiError> {
        let ctx = RequestContext::from_request(req, &self.token_provider);

        let orders = self.user_coordinator.list_orders(&ctx, &user_id.0).await?;

        Ok(Json(orders.into_iter().map(OrderSummary::from).collect()))
    }
}
