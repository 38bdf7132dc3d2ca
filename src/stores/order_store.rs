use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
    sea_query::Expr,
};
use crate::errors::InternalError;
use crate::stores::OrderGateway;
use crate::types::db::{order, order_product, product};

/// sea-orm backed `OrderGateway`
pub struct OrderStore {
    db: DatabaseConnection,
}

impl OrderStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[async_trait]
impl OrderGateway for OrderStore {
    async fn select_product(&self, pid: i64) -> Result<Option<product::Model>, InternalError> {
        product::Entity::find_by_id(pid)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("select_product", e))
    }

    async fn insert_order(&self, uid: i64) -> Result<i64, InternalError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let header = order::ActiveModel {
            uid: Set(uid),
            date: Set(now_millis()),
            ..Default::default()
        };
        let oid = order::Entity::insert(header)
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("insert_order", e))?
            .last_insert_id;

        txn.commit().await.map_err(InternalError::transaction_commit)?;

        Ok(oid)
    }

    async fn select_order(&self, oid: i64) -> Result<Option<order::Model>, InternalError> {
        order::Entity::find_by_id(oid)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("select_order", e))
    }

    async fn touch_order(&self, oid: i64) -> Result<(), InternalError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        order::Entity::update_many()
            .col_expr(order::Column::Date, Expr::value(now_millis()))
            .filter(order::Column::Oid.eq(oid))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("touch_order", e))?;

        txn.commit().await.map_err(InternalError::transaction_commit)
    }

    async fn delete_order(&self, oid: i64) -> Result<(), InternalError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        order::Entity::delete_by_id(oid)
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_order", e))?;

        txn.commit().await.map_err(InternalError::transaction_commit)
    }

    async fn insert_order_product(&self, oid: i64, pid: i64) -> Result<(), InternalError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let line = order_product::ActiveModel {
            oid: Set(oid),
            pid: Set(pid),
        };
        order_product::Entity::insert(line)
            .exec_without_returning(&txn)
            .await
            .map_err(|e| InternalError::database("insert_order_product", e))?;

        txn.commit().await.map_err(InternalError::transaction_commit)
    }

    async fn select_order_products(&self, oid: i64) -> Result<Vec<i64>, InternalError> {
        let lines = order_product::Entity::find()
            .filter(order_product::Column::Oid.eq(oid))
            .order_by_asc(order_product::Column::Pid)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("select_order_products", e))?;

        Ok(lines.into_iter().map(|line| line.pid).collect())
    }

    async fn delete_order_product(&self, oid: i64, pid: i64) -> Result<(), InternalError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        order_product::Entity::delete_many()
            .filter(order_product::Column::Oid.eq(oid))
            .filter(order_product::Column::Pid.eq(pid))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_order_product", e))?;

        txn.commit().await.map_err(InternalError::transaction_commit)
    }

    async fn select_user_orders(&self, uid: i64) -> Result<Vec<order::Model>, InternalError> {
        order::Entity::find()
            .filter(order::Column::Uid.eq(uid))
            .order_by_asc(order::Column::Oid)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("select_user_orders", e))
    }

    async fn select_orders(&self) -> Result<Vec<order::Model>, InternalError> {
        order::Entity::find()
            .order_by_desc(order::Column::Date)
            .order_by_desc(order::Column::Oid)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("select_orders", e))
    }
}
