//! Initial schema migration.
//!
//! - `access_codes`: counted-usage codes gating the API
//! - `plans`: one JSON plan document per access code

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum AccessCodes {
    Table,
    Code,
    RemainingUses,
    CreatedAt,
}

#[derive(Iden)]
enum Plans {
    Table,
    AccessCode,
    Document,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccessCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccessCodes::Code)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AccessCodes::RemainingUses)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccessCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Plans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Plans::AccessCode)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Plans::Document).text().not_null())
                    .col(
                        ColumnDef::new(Plans::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-plans-access_code")
                            .from(Plans::Table, Plans::AccessCode)
                            .to(AccessCodes::Table, AccessCodes::Code)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Plans::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AccessCodes::Table).to_owned())
            .await?;
        Ok(())
    }
}
