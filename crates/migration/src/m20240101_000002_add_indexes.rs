use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Recent and search listings both sort by updated_at
        manager
            .create_index(
                Index::create()
                    .name("idx_entries_updated_at")
                    .table(Entries::Table)
                    .col(Entries::UpdatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_entries_updated_at").table(Entries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Entries { Table, UpdatedAt }
