// API layer - HTTP endpoints
pub mod auth;
pub mod health;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

use std::sync::Arc;

pub use auth::AuthApi;
pub use health::HealthApi;
pub use order::OrderApi;
pub use product::ProductApi;
pub use user::UserApi;

use poem::{
    Endpoint, EndpointExt, Route,
    middleware::{CookieJarManager, Tracing},
};
use poem_openapi::OpenApiService;

use crate::app_data::AppData;

/// Compose every API under `/`, with Swagger UI at `/swagger`
///
/// `RequestContext::from_request` reads the token cookie through the
/// `CookieJarManager` installed here.
pub fn build_app(app_data: Arc<AppData>, server_url: &str) -> impl Endpoint + use<> {
    let api_service = OpenApiService::new(
        (
            HealthApi,
            UserApi::new(app_data.clone()),
            AuthApi::new(app_data.clone()),
            ProductApi::new(app_data.clone()),
            OrderApi::new(app_data),
        ),
        "Storefront API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(server_url);

    let ui = api_service.swagger_ui();
    let spec = api_service.spec_endpoint();

    Route::new()
        .nest("/swagger", ui)
        .at("/openapi.json", spec)
        .nest("/", api_service)
        .with(CookieJarManager::new())
        .with(Tracing)
}
