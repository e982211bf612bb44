//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::time::Duration;

use thiserror::Error;

// ── Resolution errors ─────────────────────────────────────────────────────────

/// Reasons a provisioning attempt could not produce a machine handle.
///
/// Every variant is fatal for the attempt. Retrying means re-running the
/// whole resolution with a fresh node descriptor.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Node '{node_id}' reported no public or private addresses.")]
    NoAddressesAvailable { node_id: String },

    #[error(
        "Node '{node_id}' was not reachable within {:?} on any of: {}",
        .waited,
        .candidates.join(", ")
    )]
    ReachabilityTimeout {
        node_id: String,
        waited: Duration,
        candidates: Vec<String>,
    },

    #[error("Could not open port forwarding for node '{node_id}' to {target}: {reason}")]
    PortForwardSetupFailure {
        node_id: String,
        target: String,
        reason: String,
    },

    #[error("Node '{node_id}' is {status}, not running.")]
    NodeNotRunning { node_id: String, status: String },

    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

impl ResolveError {
    /// Stable machine-readable code for JSON output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoAddressesAvailable { .. } => "no_addresses",
            Self::ReachabilityTimeout { .. } => "reachability_timeout",
            Self::PortForwardSetupFailure { .. } => "port_forward_failed",
            Self::NodeNotRunning { .. } => "node_not_running",
            Self::Configuration(_) => "configuration",
        }
    }

    /// Process exit code used by the CLI for this failure.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Configuration(_) | Self::NodeNotRunning { .. } => 2,
            Self::NoAddressesAvailable { .. } => 3,
            Self::ReachabilityTimeout { .. } => 4,
            Self::PortForwardSetupFailure { .. } => 5,
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },

    #[error("Invalid duration for {key}: '{value}' (expected e.g. false, 500ms, 30s, 5m, 1h)")]
    InvalidDuration { key: String, value: String },

    #[error("{key} must be greater than zero")]
    ZeroInterval { key: String },

    #[error("Port forwarding is enabled but no port forwarder was supplied")]
    MissingForwarder,
}
