//! Muscle database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Muscle;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "muscles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Muscle {
    fn from(model: Model) -> Self {
        Muscle {
            id: model.id,
            name: model.name,
        }
    }
}
