//! Promote command - Sets the admin flag on an existing account.
//!
//! There is no HTTP route that grants administrator rights, so the first
//! administrator has to be created here.

use std::sync::Arc;

use crate::cli::args::PromoteArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Persistence};
use crate::services::{UserManager, UserService};

/// Execute the promote command
pub async fn execute(args: PromoteArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let users = UserManager::new(Arc::new(Persistence::new(db.get_connection())));

    let admin = !args.revoke;
    let user = users.set_admin(&args.email, admin).await.map_err(|e| match e {
        AppError::NotFound => AppError::invalid_input(format!("No user with email {}", args.email)),
        other => other,
    })?;

    tracing::info!(user_id = %user.id, admin, "Admin flag updated");
    println!("{} <{}>: admin = {}", user.name, user.email, user.admin);
    Ok(())
}
