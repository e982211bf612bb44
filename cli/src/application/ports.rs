//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `waypoint_common`, never
//! from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::PathBuf;

use anyhow::Result;
use waypoint_common::{HostAndPort, NodeDescriptor};

use crate::domain::WaypointConfig;

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts configuration persistence (load/save).
pub trait ConfigStore {
    /// Load configuration, returning defaults when none is stored.
    fn load(&self) -> Result<WaypointConfig>;
    /// Persist configuration.
    fn save(&self, config: &WaypointConfig) -> Result<()>;
    /// Location of the backing file.
    fn path(&self) -> Result<PathBuf>;
}

// ── Node Source Port ──────────────────────────────────────────────────────────

/// Supplies the provider's node descriptor.
#[allow(async_fn_in_trait)]
pub trait NodeSource {
    /// Fetch the descriptor of the node being resolved.
    async fn descriptor(&self) -> Result<NodeDescriptor>;
}

// ── Network Probe Port ────────────────────────────────────────────────────────

/// Abstracts network connectivity checks so application services can be tested
/// without real network access.
#[allow(async_fn_in_trait)]
pub trait NetworkProbe {
    /// Check TCP connectivity to the given endpoint.
    async fn check_tcp_connectivity(&self, target: &HostAndPort) -> Result<bool>;
}

// ── Port Forwarding Port ──────────────────────────────────────────────────────

/// External service that exposes a node endpoint through a NAT/forwarding
/// layer.
///
/// One forwarder may serve many concurrent resolutions; implementations
/// must tolerate concurrent calls and do their own synchronization.
#[allow(async_fn_in_trait)]
pub trait PortForwarder {
    /// Open (or reuse) a mapping for `target` on node `node_id` and return
    /// the externally routable endpoint.
    async fn open_mapping(&self, node_id: &str, target: &HostAndPort) -> Result<HostAndPort>;
}
