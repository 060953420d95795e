//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `promote` - Administrator bootstrap

pub mod args;

pub use args::{Cli, Commands};
