//! Migration: Create workouts and completed_exercises tables.
//!
//! Both foreign keys toward the owning rows cascade on delete so that the
//! database backs up the transactional cascade done by the services.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;
use super::m20240101_000002_create_catalog_tables::Exercises;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Workouts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Workouts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Workouts::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Workouts::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Workouts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_workouts_user_id")
                            .from(Workouts::Table, Workouts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_workouts_user_id")
                    .table(Workouts::Table)
                    .col(Workouts::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CompletedExercises::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompletedExercises::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CompletedExercises::ExerciseId).uuid().not_null())
                    .col(ColumnDef::new(CompletedExercises::WorkoutId).uuid().not_null())
                    .col(
                        ColumnDef::new(CompletedExercises::ExerciseType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CompletedExercises::Sets).integer().not_null())
                    .col(ColumnDef::new(CompletedExercises::Reps).integer().not_null())
                    .col(ColumnDef::new(CompletedExercises::Load).double().null())
                    .col(
                        ColumnDef::new(CompletedExercises::Unilateral)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CompletedExercises::Mum)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CompletedExercises::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_completed_exercises_workout_id")
                            .from(CompletedExercises::Table, CompletedExercises::WorkoutId)
                            .to(Workouts::Table, Workouts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_completed_exercises_exercise_id")
                            .from(CompletedExercises::Table, CompletedExercises::ExerciseId)
                            .to(Exercises::Table, Exercises::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_completed_exercises_workout_id")
                    .table(CompletedExercises::Table)
                    .col(CompletedExercises::WorkoutId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CompletedExercises::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Workouts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Workouts {
    Table,
    Id,
    UserId,
    Date,
    CreatedAt,
}

#[derive(Iden)]
enum CompletedExercises {
    Table,
    Id,
    ExerciseId,
    WorkoutId,
    ExerciseType,
    Sets,
    Reps,
    Load,
    Unilateral,
    Mum,
    CreatedAt,
}
