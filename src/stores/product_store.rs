use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, TransactionTrait,
    sea_query::Expr,
};
use crate::errors::InternalError;
use crate::errors::internal::CatalogError;
use crate::types::db::product;

/// ProductStore persists the product catalog
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert_product(&self, name: &str, price: i64) -> Result<i64, InternalError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let new_product = product::ActiveModel {
            name: Set(name.to_string()),
            price: Set(price),
            ..Default::default()
        };
        let pid = product::Entity::insert(new_product)
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("insert_product", e))?
            .last_insert_id;

        txn.commit().await.map_err(InternalError::transaction_commit)?;

        Ok(pid)
    }

    /// # Errors
    /// * `CatalogError::ProductNotFound` - no product with this pid
    pub async fn get_product(&self, pid: i64) -> Result<product::Model, InternalError> {
        product::Entity::find_by_id(pid)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_product", e))?
            .ok_or_else(|| CatalogError::ProductNotFound { pid }.into())
    }

    pub async fn update_product(&self, pid: i64, name: &str, price: i64) -> Result<(), InternalError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let result = product::Entity::update_many()
            .col_expr(product::Column::Name, Expr::value(name))
            .col_expr(product::Column::Price, Expr::value(price))
            .filter(product::Column::Pid.eq(pid))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("update_product", e))?;

        if result.rows_affected == 0 {
            return Err(CatalogError::ProductNotFound { pid }.into());
        }

        txn.commit().await.map_err(InternalError::transaction_commit)
    }

    /// Existing order lines that reference the product are left untouched
    pub async fn delete_product(&self, pid: i64) -> Result<(), InternalError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let result = product::Entity::delete_by_id(pid)
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_product", e))?;

        if result.rows_affected == 0 {
            return Err(CatalogError::ProductNotFound { pid }.into());
        }

        txn.commit().await.map_err(InternalError::transaction_commit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_db;

    async fn setup() -> ProductStore {
        ProductStore::new(setup_test_db().await)
    }

    fn assert_not_found(result: Result<impl std::fmt::Debug, InternalError>, expected_pid: i64) {
        match result {
            Err(InternalError::Catalog(CatalogError::ProductNotFound { pid })) => {
                assert_eq!(pid, expected_pid)
            }
            other => panic!("Expected ProductNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_product() {
        let store = setup().await;

        let pid = store.insert_product("Desk Lamp", 500).await.unwrap();
        let product = store.get_product(pid).await.unwrap();

        assert_eq!(product.name, "Desk Lamp");
        assert_eq!(product.price, 500);
    }

    #[tokio::test]
    async fn test_update_product() {
        let store = setup().await;
        let pid = store.insert_product("Desk Lamp", 500).await.unwrap();

        store.update_product(pid, "Floor Lamp", 900).await.unwrap();

        let product = store.get_product(pid).await.unwrap();
        assert_eq!(product.name, "Floor Lamp");
        assert_eq!(product.price, 900);
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let store = setup().await;

        assert_not_found(store.get_product(12).await, 12);
        assert_not_found(store.update_product(12, "Nothing", 1).await, 12);
        assert_not_found(store.delete_product(12).await, 12);
    }

    #[tokio::test]
    async fn test_delete_product() {
        let store = setup().await;
        let pid = store.insert_product("Desk Lamp", 500).await.unwrap();

        store.delete_product(pid).await.unwrap();

        assert_not_found(store.get_product(pid).await, pid);
    }
}
