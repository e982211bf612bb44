//! `waypoint config`: show and set configuration values.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read, validated or saved.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show_config(app, &app.config_store),
        ConfigCommand::Set { key, value } => set_config(app, &app.config_store, &key, &value),
    }
}

fn show_config(app: &AppContext, store: &impl ConfigStore) -> Result<ExitCode> {
    let config = config_service::load_config(store)?;
    let path = store.path()?;
    app.renderer().render_config(&config, &path)?;
    Ok(ExitCode::SUCCESS)
}

fn set_config(
    app: &AppContext,
    store: &impl ConfigStore,
    key: &str,
    value: &str,
) -> Result<ExitCode> {
    config_service::set_value(store, key, value)?;
    tracing::info!(key, value, "configuration updated");
    app.renderer().render_config_set(key, value)?;
    Ok(ExitCode::SUCCESS)
}
