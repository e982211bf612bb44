//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::{ConfigError, ResolvePlan, WaypointConfig};

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<WaypointConfig> {
    store.load()
}

/// Validate and persist a single `key = value` setting.
///
/// Nothing is written when validation fails.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<WaypointConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    Ok(config)
}

/// Load configuration, apply per-invocation overrides, and validate the
/// result into a [`ResolvePlan`].
pub fn load_plan(
    store: &impl ConfigStore,
    overrides: impl FnOnce(&mut WaypointConfig) -> Result<(), ConfigError>,
) -> Result<(WaypointConfig, ResolvePlan)> {
    let mut config = store.load()?;
    overrides(&mut config)?;
    let plan = config.plan()?;
    Ok((config, plan))
}
