//! Completed exercise database entity.

use sea_orm::entity::prelude::*;

use crate::domain::{CompletedExercise, ExerciseType};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "completed_exercises")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub exercise_id: Uuid,
    pub workout_id: Uuid,
    pub exercise_type: String,
    pub sets: i32,
    pub reps: i32,
    pub load: Option<f64>,
    pub unilateral: bool,
    pub mum: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Rows only ever hold types written by this service; anything else is
/// corrupt data.
impl TryFrom<Model> for CompletedExercise {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let exercise_type: ExerciseType = model.exercise_type.parse().map_err(|_| {
            AppError::internal(format!(
                "completed exercise {} has unknown type {:?}",
                model.id, model.exercise_type
            ))
        })?;

        Ok(CompletedExercise {
            id: model.id,
            exercise_id: model.exercise_id,
            workout_id: model.workout_id,
            exercise_type,
            sets: model.sets,
            reps: model.reps,
            load: model.load,
            unilateral: model.unilateral,
            mum: model.mum,
        })
    }
}
