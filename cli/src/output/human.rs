//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;
use waypoint_common::MachineHandle;

use crate::domain::{AddressCandidateSet, WaypointConfig};
use crate::infra::config::CONFIG_ENV;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        println!("waypoint {version}");
    }

    /// Render a resolved machine handle.
    ///
    /// The connect endpoint is printed even in quiet mode so scripts can
    /// capture it.
    pub fn render_handle(&self, handle: &MachineHandle) {
        if self.ctx.quiet {
            println!("{}", handle.host_and_port);
            return;
        }
        println!();
        self.ctx.header(&format!("Machine {}", handle.node_id));
        println!();
        self.ctx.kv(
            "connect:",
            &handle.host_and_port.style(self.ctx.styles.endpoint).to_string(),
        );
        self.ctx.kv("protocol:", &handle.protocol.to_string());
        self.ctx.kv("hostname:", &handle.hostname);
        self.ctx.kv("subnet address:", &handle.subnet_address);
        self.ctx.kv("user:", &handle.credentials.user);
        println!();
    }

    /// Render the candidate order and display addresses of a node.
    pub fn render_candidates(&self, node_id: &str, candidates: &AddressCandidateSet, port: u16) {
        if self.ctx.quiet {
            for endpoint in candidates.endpoints(port) {
                println!("{endpoint}");
            }
            return;
        }
        println!();
        self.ctx.header(&format!("Candidates for {node_id}"));
        println!();
        for (i, endpoint) in candidates.endpoints(port).iter().enumerate() {
            println!(
                "  {:>3}. {}",
                i + 1,
                endpoint.style(self.ctx.styles.endpoint)
            );
        }
        println!();
        self.ctx.kv("hostname:", candidates.hostname());
        self.ctx.kv("subnet address:", candidates.subnet_address());
        println!();
    }

    /// Render the current configuration.
    pub fn render_config(&self, config: &WaypointConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        for (key, value) in config.settings() {
            println!("  {:<24} {value}", format!("{key}:"));
        }
        if !config.forwarding.rules.is_empty() {
            println!();
            println!("  {}", "Forwarding rules:".style(self.ctx.styles.bold));
            for rule in &config.forwarding.rules {
                let scope = rule.node_id.as_deref().unwrap_or("*");
                println!("    {:<16} {} -> {}", scope, rule.target, rule.external);
            }
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        println!(
            "    {:<18} {}",
            format!("{CONFIG_ENV}:"),
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| "(not set)".to_string())
        );
        println!(
            "    {:<18} {}",
            "NO_COLOR:",
            std::env::var("NO_COLOR").unwrap_or_else(|_| "(not set)".to_string())
        );
        println!();
    }

    /// Confirm a saved setting.
    pub fn render_config_set(&self, key: &str, value: &str) {
        self.ctx.success(&format!("Set {key} = {value}"));
    }
}
