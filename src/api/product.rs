use std::sync::Arc;
use poem::Request;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use crate::app_data::AppData;
use crate::coordinators::ProductCoordinator;
use crate::errors::ApiError;
use crate::providers::TokenProvider;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::product::{
    CreateProductApiResponse, CreateProductResponse, ProductRequest, ProductResponse,
};
use crate::types::internal::context::RequestContext;

/// Product catalog endpoints
pub struct ProductApi {
    product_coordinator: Arc<ProductCoordinator>,
    token_provider: Arc<TokenProvider>,
}

impl ProductApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: Arc::clone(&app_data.token_provider),
            product_coordinator: Arc::new(ProductCoordinator::new(app_data)),
        }
    }
}

#[derive(Tags)]
enum ProductTags {
    /// Product catalog
    Product,
}

#[OpenApi]
impl ProductApi {
    /// Register a product (manager only)
    #[oai(path = "/product", method = "post", tag = "ProductTags::Product")]
    async fn create_product(
        &self,
        req: &Request,
        body: Json<ProductRequest>,
    ) -> Result<CreateProductApiResponse, ApiError> {
        let ctx = RequestContext::from_request(req, &self.token_provider);

        let pid = self
            .product_coordinator
            .create_product(&ctx, &body.name, body.price)
            .await?;

        Ok(CreateProductApiResponse::Created(Json(CreateProductResponse {
            pid,
            message: "register product success".to_string(),
        })))
    }

    #[oai(path = "/product/:pid", method = "get", tag = "ProductTags::Product")]
    async fn get_product(&self, pid: Path<i64>) -> Result<Json<ProductResponse>, ApiError> {
        let product = self.product_coordinator.get_product(pid.0).await?;
        Ok(Json(product.into()))
    }

    /// Update a product (manager only)
    #[oai(path = "/product/:pid", method = "put", tag = "ProductTags::Product")]
    async fn update_product(
        &self,
        req: &Request,
        pid: Path<i64>,
        body: Json<ProductRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = RequestContext::from_request(req, &self.token_provider);

        self.product_coordinator
            .update_product(&ctx, pid.0, &body.name, body.price)
            .await?;

        Ok(Json(MessageResponse::new("update product success")))
    }

    /// Delete a product (manager only)
    #[oai(path = "/product/:pid", method = "delete", tag = "ProductTags::Product")]
    async fn delete_product(
        &self,
        req: &Request,
        pid: Path<i64>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = RequestContext::from_request(req, &self.token_provider);

        self.product_coordinator.delete_product(&ctx, pid.0).await?;

        Ok(Json(MessageResponse::new("delete product success")))
    }
}
