//! Catalog exercise database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Exercise;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "exercises")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub muscle_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Exercise {
    fn from(model: Model) -> Self {
        Exercise {
            id: model.id,
            name: model.name,
            muscle_id: model.muscle_id,
        }
    }
}
