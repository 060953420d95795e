//! Domain layer - Core business entities and logic
//!
//! Entities and value objects independent of the HTTP and storage layers.

pub mod catalog;
pub mod id;
pub mod password;
pub mod user;
pub mod workout;

pub use catalog::{Exercise, ExerciseListing, Muscle};
pub use id::parse_id;
pub use password::PasswordDigest;
pub use user::{User, UserResponse};
pub use workout::{
    parse_workout_date, workout_date_now, CompletedExercise, CompletedExerciseDetail,
    CompletedExerciseInput, ExerciseSummary, ExerciseType, NewCompletedExercise, Workout,
    WorkoutDetail, WorkoutInput,
};
