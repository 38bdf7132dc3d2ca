use std::sync::Arc;
use poem::Request;
use poem_openapi::{payload::Json, OpenApi, Tags};
use crate::api::session::{cleared_session_cookie, session_cookie};
use crate::app_data::AppData;
use crate::coordinators::AuthCoordinator;
use crate::errors::ApiError;
use crate::providers::TokenProvider;
use crate::types::dto::auth::{LoginApiResponse, LoginRequest, LoginResponse, LogoutApiResponse};
use crate::types::dto::common::MessageResponse;
use crate::types::internal::context::RequestContext;

/// Login and logout endpoints
pub struct AuthApi {
    auth_coordinator: Arc<AuthCoordinator>,
    token_provider: Arc<TokenProvider>,
    cookie_domain: Option<String>,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: Arc::clone(&app_data.token_provider),
            cookie_domain: app_data.cookie_domain.clone(),
            auth_coordinator: Arc::new(AuthCoordinator::new(app_data)),
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi]
impl AuthApi {
    /// Login with user id and password
    ///
    /// On success the access token is returned in the HTTP-only `access-token` cookie.
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, req: &Request, body: Json<LoginRequest>) -> Result<LoginApiResponse, ApiError> {
        let ctx = RequestContext::from_request(req, &self.token_provider);

        let outcome = self
            .auth_coordinator
            .login(&ctx, &body.user_id, &body.password)
            .await?;

        let cookie = session_cookie(
            &outcome.access_token,
            self.token_provider.expiration_seconds(),
            self.cookie_domain.as_deref(),
        );

        Ok(LoginApiResponse::Ok(
            Json(LoginResponse {
                uid: outcome.uid,
                message: "login success".to_string(),
            }),
            cookie,
        ))
    }

    /// Logout
    ///
    /// Only clears the cookie; an already issued token stays valid until it expires.
    #[oai(path = "/logout", method = "post", tag = "AuthTags::Authentication")]
    async fn logout(&self) -> LogoutApiResponse {
        LogoutApiResponse::Ok(
            Json(MessageResponse::new("logout success")),
            cleared_session_cookie(self.cookie_domain.as_deref()),
        )
    }
}
