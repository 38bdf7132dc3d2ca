use std::sync::Arc;
use poem::Request;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use crate::app_data::AppData;
use crate::coordinators::OrderCoordinator;
use crate::errors::ApiError;
use crate::providers::TokenProvider;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::order::{
    CreateOrderApiResponse, CreateOrderResponse, OrderDetailResponse, OrderRequest, order_line,
};
use crate::types::internal::context::RequestContext;

/// Order endpoints
pub struct OrderApi {
    order_coordinator: Arc<OrderCoordinator>,
    token_provider: Arc<TokenProvider>,
}

impl OrderApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: Arc::clone(&app_data.token_provider),
            order_coordinator: Arc::new(OrderCoordinator::new(app_data)),
        }
    }
}

#[derive(Tags)]
enum OrderTags {
    /// Orders and their product lines
    Order,
}

#[OpenApi]
impl OrderApi {
    /// Place an order for the calling user
    #[oai(path = "/order", method = "post", tag = "OrderTags::Order")]
    async fn create_order(
        &self,
        req: &Request,
        body: Json<OrderRequest>,
    ) -> Result<CreateOrderApiResponse, ApiError> {
        let ctx = RequestContext::from_request(req, &self.token_provider);
        let claims = ctx.require_claims()?;

        let oid = self
            .order_coordinator
            .create_order(claims.uid, body.0.products)
            .await?;

        Ok(CreateOrderApiResponse::Created(Json(CreateOrderResponse {
            oid,
            message: "create order success".to_string(),
        })))
    }

    /// Get one of the calling user's orders
    #[oai(path = "/order/:oid", method = "get", tag = "OrderTags::Order")]
    async fn get_order(&self, req: &Request, oid: Path<i64>) -> Result<Json<OrderDetailResponse>, ApiError> {
        let ctx = RequestContext::from_request(req, &self.token_provider);
        let claims = ctx.require_claims()?;

        let detail = self.order_coordinator.get_order(oid.0, claims.uid).await?;

        Ok(Json(detail.into()))
    }

    /// Replace the products of one of the calling user's orders
    #[oai(path = "/order/:oid", method = "put", tag = "OrderTags::Order")]
    async fn update_order(
        &self,
        req: &Request,
        oid: Path<i64>,
        body: Json<OrderRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = RequestContext::from_request(req, &self.token_provider);
        let claims = ctx.require_claims()?;

        self.order_coordinator
            .replace_order_lines(oid.0, claims.uid, body.0.products)
            .await?;

        Ok(Json(MessageResponse::new("update order success")))
    }

    /// Delete one of the calling user's orders
    #[oai(path = "/order/:oid", method = "delete", tag = "OrderTags::Order")]
    async fn delete_order(&self, req: &Request, oid: Path<i64>) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = RequestContext::from_request(req, &self.token_provider);
        let claims = ctx.require_claims()?;

        self.order_coordinator.delete_order(oid.0, claims.uid).await?;

        Ok(Json(MessageResponse::new("delete order success")))
    }

    /// Every order as `"oid,date"`, newest first
    #[oai(path = "/orders", method = "get", tag = "OrderTags::Order")]
    async fn get_orders(&self) -> Result<Json<Vec<String>>, ApiError> {
        let orders = self.order_coordinator.list_orders().await?;
        Ok(Json(orders.iter().map(order_line).collect()))
    }
}
