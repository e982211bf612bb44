//! `waypoint resolve`: turn a node descriptor into a connectable machine handle.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use waypoint_common::{HostAndPort, HostnamePolicy, Protocol};

use crate::app::AppContext;
use crate::application::ports::{NetworkProbe, NodeSource};
use crate::application::services::config_service;
use crate::application::services::resolve::resolve_machine;
use crate::domain::{ConfigError, ResolvePlan, WaypointConfig};
use crate::infra::forwarder::{MappingRegistry, RuleTableForwarder};
use crate::infra::network::TokioNetworkProbe;
use crate::infra::node_source::FileNodeSource;
use crate::output::TerminalReporter;

/// Arguments for the resolve command.
#[derive(Args, Debug, Default)]
pub struct ResolveArgs {
    /// Node descriptor file (JSON or YAML), or `-` to read JSON from stdin
    pub descriptor: PathBuf,

    /// Wait for the login port: `false`, or a timeout such as `90s` or `5m`
    #[arg(long, value_name = "false|DURATION")]
    pub wait: Option<String>,

    /// Probe every candidate (`true`) or only the preferred address (`false`)
    #[arg(long, value_name = "BOOL")]
    pub first_reachable: Option<bool>,

    /// Delay between polling rounds
    #[arg(long, value_name = "DURATION")]
    pub interval: Option<String>,

    /// Timeout for a single TCP probe
    #[arg(long, value_name = "DURATION")]
    pub probe_timeout: Option<String>,

    /// Connect through the configured port forwarder
    #[arg(long)]
    pub port_forwarding: bool,

    /// Login protocol
    #[arg(long, value_enum)]
    pub protocol: Option<Protocol>,

    /// Hostname reported when port forwarding is active
    #[arg(long, value_enum)]
    pub hostname_policy: Option<HostnamePolicy>,
}

impl ResolveArgs {
    /// Layer command-line overrides on top of the file configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if an override value is malformed.
    pub fn apply_to(&self, config: &mut WaypointConfig) -> Result<(), ConfigError> {
        if let Some(wait) = &self.wait {
            config.set("wait.login", wait)?;
        }
        if let Some(interval) = &self.interval {
            config.set("wait.interval", interval)?;
        }
        if let Some(timeout) = &self.probe_timeout {
            config.set("wait.probe_timeout", timeout)?;
        }
        if let Some(first_reachable) = self.first_reachable {
            config.wait.first_reachable = first_reachable;
        }
        if self.port_forwarding {
            config.forwarding.enabled = true;
        }
        if let Some(protocol) = self.protocol {
            config.protocol = protocol;
        }
        if let Some(policy) = self.hostname_policy {
            config.hostname_policy = Some(policy);
        }
        Ok(())
    }
}

/// Run the resolve command.
///
/// # Errors
///
/// Returns the typed resolution error (wrapped in `anyhow`) on failure.
pub async fn run(app: &AppContext, args: &ResolveArgs) -> Result<ExitCode> {
    let (config, plan) = config_service::load_plan(&app.config_store, |cfg| args.apply_to(cfg))?;
    tracing::debug!(?plan, "resolution plan");

    let node = FileNodeSource::new(&args.descriptor).descriptor().await?;

    let registry = MappingRegistry::default();
    let forwarder = (!config.forwarding.rules.is_empty())
        .then(|| RuleTableForwarder::new(config.forwarding.rules.clone(), &registry));

    let handle = tokio::select! {
        result = resolve_with_tcp_probe(app, &node, &plan, forwarder.as_ref()) => result?,
        _ = tokio::signal::ctrl_c() => anyhow::bail!("interrupted while resolving {}", node.id),
    };

    app.renderer().render_handle(&handle)?;
    Ok(ExitCode::SUCCESS)
}

async fn resolve_with_tcp_probe(
    app: &AppContext,
    node: &waypoint_common::NodeDescriptor,
    plan: &ResolvePlan,
    forwarder: Option<&RuleTableForwarder<'_>>,
) -> Result<waypoint_common::MachineHandle> {
    let probe = TokioNetworkProbe::new(plan.probe_timeout);
    let reporter = TerminalReporter::new(&app.output);
    let probe = &probe;
    let handle = resolve_machine(node, plan, forwarder, &reporter, |target: HostAndPort| async move {
        probe.check_tcp_connectivity(&target).await.unwrap_or(false)
    })
    .await?;
    Ok(handle)
}
