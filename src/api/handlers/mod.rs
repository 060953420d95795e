//! HTTP request handlers.

pub mod auth_handler;
pub mod catalog_handler;
pub mod user_handler;
pub mod workout_handler;

pub use auth_handler::login_routes;
pub use catalog_handler::{exercise_routes, muscle_routes};
pub use user_handler::user_routes;
pub use workout_handler::workout_routes;
