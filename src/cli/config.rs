//! Configuration CLI command handlers

use crate::cli::commands::ConfigCommand;
use crate::core::config::{Config, ConfigKey};
use crate::error::{GitHubError, Result};

/// Handle configuration commands
pub fn handle_config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => handle_show(),
        ConfigCommand::Path => handle_path(),
        ConfigCommand::Set { key, value } => handle_set(&key, &value),
    }
}

/// Print every key with its effective value
fn handle_show() -> Result<()> {
    let config = Config::load()?.with_env_overrides()?;
    for key in ConfigKey::all() {
        println!("{:<15} {}", key.name(), config.get(*key));
    }
    Ok(())
}

fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Handle setting a configuration value
fn handle_set(key: &str, value: &str) -> Result<()> {
    let key = ConfigKey::from_str(key).ok_or_else(|| {
        GitHubError::InvalidInput(format!(
            "Unknown key '{}'. Available keys: {}",
            key,
            ConfigKey::all()
                .iter()
                .map(|k| k.name())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })?;

    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    println!("{} set to: {}", key, config.get(key));
    Ok(())
}
