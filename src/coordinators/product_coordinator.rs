use std::sync::Arc;
use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::identity_validator::{validate_price, validate_product_name};
use crate::stores::ProductStore;
use crate::types::db::product;
use crate::types::internal::context::RequestContext;

/// Catalog workflows; every mutation needs a manager token
pub struct ProductCoordinator {
    product_store: Arc<ProductStore>,
}

impl ProductCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            product_store: Arc::clone(&app_data.product_store),
        }
    }

    pub async fn create_product(
        &self,
        ctx: &RequestContext,
        name: &str,
        price: i64,
    ) -> Result<i64, InternalError> {
        ctx.require_manager("register product")?;
        validate_product_name(name)?;
        validate_price(price)?;

        let pid = self.product_store.insert_product(name, price).await?;

        tracing::info!(request_id = %ctx.request_id, pid, price, "Product registered");
        Ok(pid)
    }

    pub async fn get_product(&self, pid: i64) -> Result<product::Model, InternalError> {
        self.product_store.get_product(pid).await
    }

    pub async fn update_product(
        &self,
        ctx: &RequestContext,
        pid: i64,
        name: &str,
        price: i64,
    ) -> Result<(), InternalError> {
        ctx.require_manager("update product")?;
        validate_product_name(name)?;
        validate_price(price)?;

        self.product_store.update_product(pid, name, price).await?;

        tracing::info!(request_id = %ctx.request_id, pid, price, "Product updated");
        Ok(())
    }

    pub async fn delete_product(&self, ctx: &RequestContext, pid: i64) -> Result<(), InternalError> {
        ctx.require_manager("delete product")?;

        self.product_store.delete_product(pid).await?;

        tracing::info!(request_id = %ctx.request_id, pid, "Product deleted");
        Ok(())
    }
}
