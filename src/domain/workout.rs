//! Workouts and the completed exercises logged against them.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::catalog::Exercise;
use super::id::parse_id;
use crate::config::MIN_SETS_OR_REPS;
use crate::errors::{AppError, AppResult};

/// A training session owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Workout {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub date: DateTime<Utc>,
    /// Owner reference; fixed at creation
    pub user_id: Uuid,
}

impl Workout {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Equipment category of a completed exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ExerciseType {
    #[serde(rename = "bodyweight")]
    Bodyweight,
    #[serde(rename = "free weight")]
    FreeWeight,
    #[serde(rename = "cable")]
    Cable,
    #[serde(rename = "machine")]
    Machine,
    #[serde(rename = "band")]
    Band,
    #[serde(rename = "other")]
    Other,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 6] = [
        ExerciseType::Bodyweight,
        ExerciseType::FreeWeight,
        ExerciseType::Cable,
        ExerciseType::Machine,
        ExerciseType::Band,
        ExerciseType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Bodyweight => "bodyweight",
            ExerciseType::FreeWeight => "free weight",
            ExerciseType::Cable => "cable",
            ExerciseType::Machine => "machine",
            ExerciseType::Band => "band",
            ExerciseType::Other => "other",
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::ALL.iter().map(|t| t.as_str()).collect();
                AppError::invalid_input(format!(
                    "exercise_type must be one of: {}",
                    allowed.join(", ")
                ))
            })
    }
}

/// A performed exercise attached to a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompletedExercise {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub exercise_id: Uuid,
    pub workout_id: Uuid,
    pub exercise_type: ExerciseType,
    pub sets: i32,
    pub reps: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load: Option<f64>,
    pub unilateral: bool,
    pub mum: bool,
}

/// Validated data for inserting a completed exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCompletedExercise {
    pub exercise_id: Uuid,
    pub workout_id: Uuid,
    pub exercise_type: ExerciseType,
    pub sets: i32,
    pub reps: i32,
    pub load: Option<f64>,
    pub unilateral: bool,
    pub mum: bool,
}

/// Request body for logging a completed exercise.
///
/// Every field is optional at the wire level so that missing values are
/// reported as `InvalidInput` with a field-specific message.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CompletedExerciseInput {
    /// Catalog exercise performed
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub exercise_id: Option<String>,
    #[schema(example = "cable")]
    pub exercise_type: Option<String>,
    #[schema(example = 3, minimum = 1)]
    pub sets: Option<i64>,
    #[schema(example = 12, minimum = 1)]
    pub reps: Option<i64>,
    #[schema(example = 225)]
    pub load: Option<f64>,
    pub unilateral: Option<bool>,
    pub mum: Option<bool>,
}

impl CompletedExerciseInput {
    /// Parse the referenced exercise id. Missing or malformed ids are bad
    /// input rather than a missing resource.
    pub fn exercise_id(&self) -> AppResult<Uuid> {
        let raw = self
            .exercise_id
            .as_deref()
            .ok_or_else(|| AppError::invalid_input("exercise_id is required"))?;
        parse_id(raw).ok_or_else(|| AppError::invalid_input("exercise_id is not a valid id"))
    }

    /// Check required fields and apply defaults.
    pub fn into_new(self, workout_id: Uuid, exercise_id: Uuid) -> AppResult<NewCompletedExercise> {
        let exercise_type: ExerciseType = self
            .exercise_type
            .as_deref()
            .ok_or_else(|| AppError::invalid_input("exercise_type is required"))?
            .parse()?;
        let sets = positive_count("sets", self.sets)?;
        let reps = positive_count("reps", self.reps)?;

        if let Some(load) = self.load {
            if !load.is_finite() {
                return Err(AppError::invalid_input("load must be a number"));
            }
        }

        Ok(NewCompletedExercise {
            exercise_id,
            workout_id,
            exercise_type,
            sets,
            reps,
            load: self.load,
            unilateral: self.unilateral.unwrap_or(false),
            mum: self.mum.unwrap_or(false),
        })
    }
}

fn positive_count(field: &str, value: Option<i64>) -> AppResult<i32> {
    let value = value.ok_or_else(|| AppError::invalid_input(format!("{} is required", field)))?;
    if value < MIN_SETS_OR_REPS {
        return Err(AppError::invalid_input(format!(
            "{} must be at least {}",
            field, MIN_SETS_OR_REPS
        )));
    }
    i32::try_from(value).map_err(|_| AppError::invalid_input(format!("{} is too large", field)))
}

/// Request body for creating or updating a workout.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct WorkoutInput {
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    #[schema(example = "2019-11-01T00:00:00.000Z")]
    pub date: Option<String>,
}

/// Parse a client-supplied workout date.
///
/// Accepts RFC 3339, a zone-less `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC)
/// and a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_workout_date(raw: &str) -> AppResult<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(AppError::invalid_input("date must be a valid date"))
}

/// Default workout date: the current instant at millisecond precision.
pub fn workout_date_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Catalog data denormalised into a completed exercise at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExerciseSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub muscle_id: Uuid,
}

impl From<&Exercise> for ExerciseSummary {
    fn from(exercise: &Exercise) -> Self {
        Self {
            id: exercise.id,
            name: exercise.name.clone(),
            muscle_id: exercise.muscle_id,
        }
    }
}

/// Completed exercise with its catalog exercise expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompletedExerciseDetail {
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// `null` when the catalog exercise no longer exists
    pub exercise_id: Option<ExerciseSummary>,
    pub workout_id: Uuid,
    pub exercise_type: ExerciseType,
    pub sets: i32,
    pub reps: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load: Option<f64>,
    pub unilateral: bool,
    pub mum: bool,
}

/// Workout together with everything logged against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WorkoutDetail {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub user_id: Uuid,
    pub exercises: Vec<CompletedExerciseDetail>,
}

impl WorkoutDetail {
    /// Join a workout with its entries and the catalog rows they reference.
    pub fn assemble(
        workout: Workout,
        entries: Vec<CompletedExercise>,
        catalog: &HashMap<Uuid, Exercise>,
    ) -> Self {
        let exercises = entries
            .into_iter()
            .map(|entry| CompletedExerciseDetail {
                id: entry.id,
                exercise_id: catalog.get(&entry.exercise_id).map(ExerciseSummary::from),
                workout_id: entry.workout_id,
                exercise_type: entry.exercise_type,
                sets: entry.sets,
                reps: entry.reps,
                load: entry.load,
                unilateral: entry.unilateral,
                mum: entry.mum,
            })
            .collect();

        Self {
            id: workout.id,
            date: workout.date,
            user_id: workout.user_id,
            exercises,
        }
    }
}
