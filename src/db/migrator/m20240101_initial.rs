use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ResponseCache::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ResponseCache::Signature)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ResponseCache::Status).integer().not_null())
                    .col(ColumnDef::new(ResponseCache::Body).text().not_null())
                    .col(
                        ColumnDef::new(ResponseCache::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ResponseCache::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ResponseCache {
    Table,
    Signature,
    Status,
    Body,
    CreatedAt,
}
