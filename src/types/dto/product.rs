use poem_openapi::{ApiResponse, Object, payload::Json};
use crate::types::db::product;

/// Request model for creating or updating a product
#[derive(Object, Debug)]
pub struct ProductRequest {
    /// 3-50 letters, digits or spaces
    pub name: String,

    /// Price in the smallest currency unit
    pub price: i64,
}

#[derive(Object, Debug)]
pub struct CreateProductResponse {
    pub pid: i64,
    pub message: String,
}

#[derive(Object, Debug)]
pub struct ProductResponse {
    pub pid: i64,
    pub name: String,
    pub price: i64,
}

impl From<product::Model> for ProductResponse {
    fn from(p: product::Model) -> Self {
        Self {
            pid: p.pid,
            name: p.name,
            price: p.price,
        }
    }
}

#[derive(ApiResponse)]
pub enum CreateProductApiResponse {
    /// Product registered
    #[oai(status = 201)]
    Created(Json<CreateProductResponse>),
}
