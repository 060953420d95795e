//! Exercise catalog: muscles and the exercises that train them.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Muscle group (reference data)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Muscle {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[schema(example = "chest")]
    pub name: String,
}

/// Catalog exercise (reference data)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Exercise {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[schema(example = "bench press")]
    pub name: String,
    pub muscle_id: Uuid,
}

/// Exercise listing entry with its muscle resolved
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExerciseListing {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub muscle_id: Uuid,
    /// Name of the trained muscle, absent if the muscle record is gone
    pub muscle: Option<String>,
}
