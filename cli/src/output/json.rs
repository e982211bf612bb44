//! JSON output helpers.
//!
//! `format_error` produces the error object used by every `--json` code path
//! when a command fails; `JsonRenderer` prints successful results.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use waypoint_common::{HostAndPort, MachineHandle, Protocol};

use crate::domain::{AddressCandidateSet, ForwardRule, WaypointConfig};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Machine handle as printed by `--json`. Secrets are reduced to flags.
#[derive(Debug, Serialize)]
pub struct HandleView<'a> {
    pub node_id: &'a str,
    pub protocol: Protocol,
    pub address: &'a str,
    pub port: u16,
    pub hostname: &'a str,
    pub subnet_address: &'a str,
    pub host_and_port: &'a str,
    pub user: &'a str,
    pub has_password: bool,
    pub has_private_key: bool,
    pub resolved_at: DateTime<Utc>,
}

impl<'a> HandleView<'a> {
    #[must_use]
    pub fn new(handle: &'a MachineHandle, resolved_at: DateTime<Utc>) -> Self {
        Self {
            node_id: &handle.node_id,
            protocol: handle.protocol,
            address: &handle.address,
            port: handle.port,
            hostname: &handle.hostname,
            subnet_address: &handle.subnet_address,
            host_and_port: &handle.host_and_port,
            user: &handle.credentials.user,
            has_password: handle.credentials.password.is_some(),
            has_private_key: handle.credentials.private_key.is_some(),
            resolved_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct CandidatesView<'a> {
    node_id: &'a str,
    candidates: &'a [String],
    endpoints: Vec<HostAndPort>,
    hostname: &'a str,
    subnet_address: &'a str,
}

#[derive(Debug, Serialize)]
struct ConfigView<'a> {
    path: String,
    settings: serde_json::Map<String, serde_json::Value>,
    forwarding_rules: &'a [ForwardRule],
}

/// Renders domain types as pretty-printed JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Render the CLI version.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        print_json(&serde_json::json!({ "version": version }))
    }

    /// Render a resolved machine handle without credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_handle(&self, handle: &MachineHandle) -> Result<()> {
        print_json(&HandleView::new(handle, Utc::now()))
    }

    /// Render a node's candidate set.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_candidates(
        &self,
        node_id: &str,
        candidates: &AddressCandidateSet,
        port: u16,
    ) -> Result<()> {
        print_json(&CandidatesView {
            node_id,
            candidates: candidates.addresses(),
            endpoints: candidates.endpoints(port),
            hostname: candidates.hostname(),
            subnet_address: candidates.subnet_address(),
        })
    }

    /// Render the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &WaypointConfig, path: &Path) -> Result<()> {
        let settings = config
            .settings()
            .into_iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v)))
            .collect();
        print_json(&ConfigView {
            path: path.display().to_string(),
            settings,
            forwarding_rules: &config.forwarding.rules,
        })
    }
}

impl JsonRenderer {
    /// Confirm a saved setting.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config_set(&self, key: &str, value: &str) -> Result<()> {
        print_json(&serde_json::json!({ "key": key, "value": value }))
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{out}");
    Ok(())
}
