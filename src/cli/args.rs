//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Workout tracking API server
#[derive(Parser, Debug)]
#[command(name = "workout-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Grant (or revoke) administrator rights
    Promote(PromoteArgs),
}

/// Arguments for the serve command. Unset values come from the config.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the promote command
#[derive(Parser, Debug)]
pub struct PromoteArgs {
    /// Email of the account to change
    pub email: String,

    /// Remove the admin flag instead of setting it
    #[arg(long)]
    pub revoke: bool,
}
