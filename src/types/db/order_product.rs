use sea_orm::entity::prelude::*;

/// One (order, product) line. Rows are owned by their order and only written
/// by the order coordinator.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "order_products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub oid: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub pid: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
