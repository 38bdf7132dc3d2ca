use std::future::Future;
use std::sync::Arc;
use crate::app_data::AppData;
use crate::coordinators::order_lines::{LineDiff, ensure_valid_selection};
use crate::errors::InternalError;
use crate::errors::internal::OrderError;
use crate::stores::OrderGateway;
use crate::types::db::order;
use crate::types::internal::order::OrderDetail;

/// Order workflows composed from single-statement gateway calls
///
/// There is no transaction spanning a workflow. When a step fails, the steps
/// already applied are undone one call at a time (best effort). A failed undo
/// is logged and never stops the remaining undo steps.
///
/// Mutating workflows run on their own task, so a dropped request cannot cut
/// a compensation sequence short.
pub struct OrderCoordinator {
    gateway: Arc<dyn OrderGateway>,
}

impl OrderCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self::with_gateway(Arc::clone(&app_data.order_gateway))
    }

    pub fn with_gateway(gateway: Arc<dyn OrderGateway>) -> Self {
        Self { gateway }
    }

    /// Create an order with one line per product, returning its oid
    ///
    /// # Errors
    /// * `OrderError::EmptyProducts` / `DuplicateProduct` - before any store call
    /// * `OrderError::ProductNotFound` - first unknown pid, nothing written
    /// * `OrderError::OrderCreateFailed` - a line insert failed; header and
    ///   inserted lines have been removed
    pub async fn create_order(&self, uid: i64, pids: Vec<i64>) -> Result<i64, InternalError> {
        let gateway = Arc::clone(&self.gateway);
        run_to_completion("create_order", async move {
            create_order_steps(gateway.as_ref(), uid, &pids).await
        })
        .await
    }

    /// Make the order's lines equal to `pids` and bump its date
    ///
    /// # Errors
    /// * `OrderError::OrderNotFound` / `NotOwner`
    /// * `OrderError::EmptyProducts` / `DuplicateProduct` / `ProductNotFound` -
    ///   nothing written
    /// * `OrderError::NoExistingLines`
    /// * `OrderError::DeleteFailed` - removals undone, nothing inserted
    /// * `OrderError::InsertFailed` - insertions undone, removals stay applied
    pub async fn replace_order_lines(
        &self,
        oid: i64,
        uid: i64,
        pids: Vec<i64>,
    ) -> Result<(), InternalError> {
        let gateway = Arc::clone(&self.gateway);
        run_to_completion("replace_order_lines", async move {
            replace_order_lines_steps(gateway.as_ref(), oid, uid, &pids).await
        })
        .await
    }

    /// Delete all lines of the order, then the order itself
    ///
    /// # Errors
    /// * `OrderError::OrderNotFound` / `NotOwner` / `NoExistingLines`
    /// * `OrderError::LineDeleteFailed` - removed lines restored, header intact
    /// * `OrderError::OrderDeleteFailed` - lines are gone, header remains
    pub async fn delete_order(&self, oid: i64, uid: i64) -> Result<(), InternalError> {
        let gateway = Arc::clone(&self.gateway);
        run_to_completion("delete_order", async move {
            delete_order_steps(gateway.as_ref(), oid, uid).await
        })
        .await
    }

    pub async fn get_order(&self, oid: i64, uid: i64) -> Result<OrderDetail, InternalError> {
        let order = load_owned_order(self.gateway.as_ref(), oid, uid).await?;

        let products = self.gateway.select_order_products(oid).await?;
        if products.is_empty() {
            return Err(OrderError::NoExistingLines { oid }.into());
        }

        Ok(OrderDetail {
            oid: order.oid,
            uid: order.uid,
            products,
        })
    }

    /// Every order, newest first
    pub async fn list_orders(&self) -> Result<Vec<order::Model>, InternalError> {
        self.gateway.select_orders().await
    }

    pub async fn list_user_orders(&self, uid: i64) -> Result<Vec<order::Model>, InternalError> {
        self.gateway.select_user_orders(uid).await
    }
}

async fn run_to_completion<T, F>(operation: &'static str, workflow: F) -> Result<T, InternalError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, InternalError>> + Send + 'static,
{
    tokio::spawn(workflow)
        .await
        .map_err(|e| InternalError::task(operation, e.to_string()))?
}

async fn create_order_steps(
    gateway: &dyn OrderGateway,
    uid: i64,
    pids: &[i64],
) -> Result<i64, InternalError> {
    ensure_valid_selection(pids)?;
    ensure_products_exist(gateway, pids).await?;

    let oid = gateway.insert_order(uid).await?;

    let mut inserted = Vec::with_capacity(pids.len());
    for &pid in pids {
        match gateway.insert_order_product(oid, pid).await {
            Ok(()) => inserted.push(pid),
            Err(e) => {
                tracing::warn!(oid, pid, error = %e, "Order line insert failed");
                break;
            }
        }
    }

    if inserted.len() != pids.len() {
        // Header first, then lines
        if let Err(e) = gateway.delete_order(oid).await {
            tracing::error!(oid, error = %e, "Compensation failed: order header not removed");
        }
        remove_lines(gateway, oid, &inserted).await;

        return Err(OrderError::OrderCreateFailed {
            oid,
            inserted: inserted.len(),
            requested: pids.len(),
        }
        .into());
    }

    tracing::info!(oid, uid, products = pids.len(), "Order created");
    Ok(oid)
}

async fn replace_order_lines_steps(
    gateway: &dyn OrderGateway,
    oid: i64,
    uid: i64,
    pids: &[i64],
) -> Result<(), InternalError> {
    load_owned_order(gateway, oid, uid).await?;
    ensure_valid_selection(pids)?;
    ensure_products_exist(gateway, pids).await?;

    let existing = gateway.select_order_products(oid).await?;
    if existing.is_empty() {
        return Err(OrderError::NoExistingLines { oid }.into());
    }

    let diff = LineDiff::between(&existing, pids);

    let mut deleted = Vec::with_capacity(diff.to_delete.len());
    for &pid in &diff.to_delete {
        if let Err(e) = gateway.delete_order_product(oid, pid).await {
            tracing::warn!(oid, pid, error = %e, "Order line delete failed");
            restore_lines(gateway, oid, &deleted).await;
            return Err(OrderError::DeleteFailed { oid }.into());
        }
        deleted.push(pid);
    }

    let mut inserted = Vec::with_capacity(diff.to_insert.len());
    for &pid in &diff.to_insert {
        if let Err(e) = gateway.insert_order_product(oid, pid).await {
            tracing::warn!(oid, pid, error = %e, "Order line insert failed");
            // Removals above stay applied
            remove_lines(gateway, oid, &inserted).await;
            return Err(OrderError::InsertFailed { oid }.into());
        }
        inserted.push(pid);
    }

    gateway.touch_order(oid).await?;

    if diff.is_empty() {
        tracing::info!(oid, "Order lines unchanged, date bumped");
    } else {
        tracing::info!(
            oid,
            removed = deleted.len(),
            added = inserted.len(),
            "Order lines replaced"
        );
    }
    Ok(())
}

async fn delete_order_steps(
    gateway: &dyn OrderGateway,
    oid: i64,
    uid: i64,
) -> Result<(), InternalError> {
    load_owned_order(gateway, oid, uid).await?;

    let existing = gateway.select_order_products(oid).await?;
    if existing.is_empty() {
        return Err(OrderError::NoExistingLines { oid }.into());
    }

    let mut deleted = Vec::with_capacity(existing.len());
    for &pid in &existing {
        if let Err(e) = gateway.delete_order_product(oid, pid).await {
            tracing::warn!(oid, pid, error = %e, "Order line delete failed");
            restore_lines(gateway, oid, &deleted).await;
            return Err(OrderError::LineDeleteFailed { oid }.into());
        }
        deleted.push(pid);
    }

    if let Err(e) = gateway.delete_order(oid).await {
        tracing::error!(oid, error = %e, "Order header delete failed after its lines were removed");
        return Err(OrderError::OrderDeleteFailed { oid }.into());
    }

    tracing::info!(oid, uid, "Order deleted");
    Ok(())
}

async fn load_owned_order(
    gateway: &dyn OrderGateway,
    oid: i64,
    uid: i64,
) -> Result<order::Model, InternalError> {
    let order = gateway
        .select_order(oid)
        .await?
        .ok_or(OrderError::OrderNotFound { oid })?;

    if order.uid != uid {
        return Err(OrderError::NotOwner { oid, uid }.into());
    }
    Ok(order)
}

async fn ensure_products_exist(gateway: &dyn OrderGateway, pids: &[i64]) -> Result<(), InternalError> {
    for &pid in pids {
        if gateway.select_product(pid).await?.is_none() {
            return Err(OrderError::ProductNotFound { pid }.into());
        }
    }
    Ok(())
}

/// Compensation: best-effort removal of lines written earlier in a workflow
async fn remove_lines(gateway: &dyn OrderGateway, oid: i64, pids: &[i64]) {
    for &pid in pids {
        if let Err(e) = gateway.delete_order_product(oid, pid).await {
            tracing::error!(oid, pid, error = %e, "Compensation failed: order line not removed");
        }
    }
}

/// Compensation: best-effort re-insertion of lines removed earlier in a workflow
async fn restore_lines(gateway: &dyn OrderGateway, oid: i64, pids: &[i64]) {
    for &pid in pids {
        if let Err(e) = gateway.insert_order_product(oid, pid).await {
            tracing::error!(oid, pid, error = %e, "Compensation failed: order line not restored");
        }
    }
}
