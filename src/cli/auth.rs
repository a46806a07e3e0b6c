//! Authentication CLI command handlers

use crate::cli::commands::AuthCommand;
use crate::core::credentials::{
    Auth, GITHUB_PASSWORD_ENV, GITHUB_TOKEN_ENV, GITHUB_USERNAME_ENV,
};
use crate::error::Result;

/// Handle authentication commands
pub fn handle_auth(command: AuthCommand, auth: Option<&Auth>) -> Result<()> {
    match command {
        AuthCommand::Status => handle_status(auth),
    }
}

/// Report the credential requests will carry
fn handle_status(auth: Option<&Auth>) -> Result<()> {
    match auth {
        Some(auth) => {
            println!("✓ Authenticated with {}", auth.describe());
        }
        None => {
            println!("✗ Not authenticated; requests are anonymous.");
            println!();
            println!("  Set {} or pass --token, or set", GITHUB_TOKEN_ENV);
            println!("  {} and {} for basic auth.", GITHUB_USERNAME_ENV, GITHUB_PASSWORD_ENV);
        }
    }
    Ok(())
}
