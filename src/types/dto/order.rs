use poem_openapi::{ApiResponse, Object, payload::Json};
use crate::types::db::order;
use crate::types::internal::order::OrderDetail;

/// Product ids for a new order, or the full new set for an existing one
#[derive(Object, Debug)]
pub struct OrderRequest {
    pub products: Vec<i64>,
}

#[derive(Object, Debug)]
pub struct CreateOrderResponse {
    pub oid: i64,
    pub message: String,
}

#[derive(Object, Debug)]
pub struct OrderDetailResponse {
    pub oid: i64,
    pub uid: i64,
    /// Product ids, ascending
    pub products: Vec<i64>,
}

impl From<OrderDetail> for OrderDetailResponse {
    fn from(d: OrderDetail) -> Self {
        Self {
            oid: d.oid,
            uid: d.uid,
            products: d.products,
        }
    }
}

/// Order header
#[derive(Object, Debug)]
pub struct OrderSummary {
    pub oid: i64,
    pub uid: i64,
    /// Last-touched time, unix milliseconds
    pub date: i64,
}

impl From<order::Model> for OrderSummary {
    fn from(o: order::Model) -> Self {
        Self {
            oid: o.oid,
            uid: o.uid,
            date: o.date,
        }
    }
}

/// `"oid,date"` line used by the global order listing
pub fn order_line(o: &order::Model) -> String {
    format!("{},{}", o.oid, o.date)
}

#[derive(ApiResponse)]
pub enum CreateOrderApiResponse {
    /// Order created with all its lines
    #[oai(status = 201)]
    Created(Json<CreateOrderResponse>),
}
