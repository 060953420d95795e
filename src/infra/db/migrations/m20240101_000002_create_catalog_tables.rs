//! Migration: Create muscles and exercises tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Muscles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Muscles::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Muscles::Name)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Exercises::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Exercises::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Exercises::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Exercises::MuscleId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_exercises_muscle_id")
                            .from(Exercises::Table, Exercises::MuscleId)
                            .to(Muscles::Table, Muscles::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Exercises::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Muscles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Muscles {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
pub(super) enum Exercises {
    Table,
    Id,
    Name,
    MuscleId,
}
