//! Workout database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Workout;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "workouts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: DateTimeUtc,
    /// Insertion time, used for stable listing order
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Workout {
    fn from(model: Model) -> Self {
        Workout {
            id: model.id,
            date: model.date,
            user_id: model.user_id,
        }
    }
}
