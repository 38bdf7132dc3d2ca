use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Oid)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::Uid).integer().not_null())
                    .col(ColumnDef::new(Orders::Date).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Listing a user's orders and the global newest-first listing
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_orders_uid")
                    .table(Orders::Table)
                    .col(Orders::Uid)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_orders_date")
                    .table(Orders::Table)
                    .col(Orders::Date)
                    .to_owned(),
            )
            .await?;

        // No foreign key to orders: the order header may be removed before its
        // lines while a failed order is being compensated.
        manager
            .create_table(
                Table::create()
                    .table(OrderProducts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OrderProducts::Oid).integer().not_null())
                    .col(ColumnDef::new(OrderProducts::Pid).integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_order_products")
                            .col(OrderProducts::Oid)
                            .col(OrderProducts::Pid),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderProducts::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Oid,
    Uid,
    Date,
}

#[derive(DeriveIden)]
enum OrderProducts {
    Table,
    Oid,
    Pid,
}
