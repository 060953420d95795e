//! Workout API - REST backend for logging workouts
//!
//! Users register and log in, create workouts, and attach the exercises
//! they completed (sets, reps, load) from a shared muscle/exercise catalog.
//! Each workout is visible only to the user who created it.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core entities, validation and the read-time join
//! - **services**: Use cases, including workout access control
//! - **infra**: Database, migrations, repositories and Unit of Work
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Make an existing account an administrator
//! cargo run -- promote admin@example.com
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{User, Workout, WorkoutDetail};
pub use errors::{AppError, AppResult};
