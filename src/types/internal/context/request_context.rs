use std::net::IpAddr;

use poem::Request;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::providers::TokenProvider;
use crate::types::internal::auth::Claims;

use super::{request_id::RequestId, request_source::RequestSource};

/// Name of the cookie carrying the access token
pub const ACCESS_TOKEN_COOKIE: &str = "access-token";

/// Request context that flows from the API layer into coordinators
///
/// Authentication is resolved once when the context is built. Endpoints that
/// need a caller ask for it through `require_claims`, which turns a missing
/// or bad token into the matching credential error.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    pub source: RequestSource,

    /// Validated token claims, if the request carried a good token
    pub claims: Option<Claims>,

    auth_error: Option<CredentialError>,
}

impl RequestContext {
    /// Context for CLI commands; always acts without a token
    pub fn for_cli(command_name: &str) -> Self {
        tracing::debug!(command = command_name, "CLI request context created");
        Self::unauthenticated(RequestSource::CLI)
    }

    /// Context for start-up tasks such as manager seeding
    pub fn for_system(operation_name: &str) -> Self {
        tracing::debug!(operation = operation_name, "System request context created");
        Self::unauthenticated(RequestSource::System)
    }

    fn unauthenticated(source: RequestSource) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::generate(),
            source,
            claims: None,
            auth_error: Some(CredentialError::MissingToken),
        }
    }

    /// Build the context for an HTTP request, validating the access-token cookie if present
    ///
    /// Requires the `CookieJarManager` middleware on the route.
    pub fn from_request(req: &Request, token_provider: &TokenProvider) -> Self {
        let token = req
            .cookie()
            .get(ACCESS_TOKEN_COOKIE)
            .map(|cookie| cookie.value_str().to_string())
            .filter(|value| !value.is_empty());

        let (claims, auth_error) = match token {
            None => (None, Some(CredentialError::MissingToken)),
            Some(token) => match token_provider.validate_token(&token) {
                Ok(claims) => (Some(claims), None),
                Err(InternalError::Credential(e)) => (None, Some(e)),
                Err(e) => (None, Some(CredentialError::invalid_token(e.to_string()))),
            },
        };

        let ctx = Self {
            ip_address: Self::extract_ip_address(req),
            request_id: RequestId::generate(),
            source: RequestSource::API,
            claims,
            auth_error,
        };

        tracing::debug!(
            request_id = %ctx.request_id,
            authenticated = ctx.is_authenticated(),
            "Request context created"
        );
        ctx
    }

    /// Extract IP address from request headers
    ///
    /// Checks X-Forwarded-For, X-Real-IP, and falls back to remote address.
    fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                return ip.trim().parse().ok();
            }
        }

        if let Some(real_ip) = req.header("X-Real-IP") {
            return real_ip.parse().ok();
        }

        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }

    pub fn is_authenticated(&self) -> bool {
        self.claims.is_some()
    }

    /// Claims of the caller, or the reason there are none
    pub fn require_claims(&self) -> Result<&Claims, InternalError> {
        match (&self.claims, &self.auth_error) {
            (Some(claims), _) => Ok(claims),
            (None, Some(e)) => Err(e.clone().into()),
            (None, None) => Err(CredentialError::MissingToken.into()),
        }
    }

    /// Claims of a caller with the manager role
    ///
    /// `action` completes the denial message, e.g. "register product".
    pub fn require_manager(&self, action: &str) -> Result<&Claims, InternalError> {
        let claims = self.require_claims()?;
        if !claims.role.is_manager() {
            return Err(CredentialError::access_denied(format!("general user cannot {}", action)).into());
        }
        Ok(claims)
    }

    /// Claims of the caller, who must be the user named in the path
    pub fn require_user(&self, user_id: &str) -> Result<&Claims, InternalError> {
        let claims = self.require_claims()?;
        if claims.user_id != user_id {
            return Err(CredentialError::access_denied("invalid access token for this user").into());
        }
        Ok(claims)
    }
}
