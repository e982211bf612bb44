//! Application service: resolve a provisioned node into a machine handle.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected ports and the reachability predicate.

use std::future::Future;

use waypoint_common::{HostAndPort, MachineHandle, NodeDescriptor, NodeStatus};

use crate::application::ports::{PortForwarder, ProgressReporter};
use crate::application::services::forward::open_forwarded_endpoint;
use crate::application::services::poller::poll_first_reachable;
use crate::domain::{
    AddressCandidateSet, AddressSelection, ConfigError, ResolveError, ResolvePlan,
    assemble_handle, login_port,
};

/// Resolve `node` into a connectable [`MachineHandle`].
///
/// 1. Reject plans that enable forwarding without a forwarder, and nodes
///    that are not running.
/// 2. Build the candidate set.
/// 3. With forwarding, map the preferred candidate's login port and use the
///    external endpoint as the only candidate.
/// 4. Poll for the first reachable endpoint (or take the first one when
///    waiting is disabled).
/// 5. Assemble the handle.
///
/// `predicate` decides whether an endpoint accepts connections; see
/// [`poll_first_reachable`].
///
/// # Errors
///
/// Returns the [`ResolveError`] describing why no handle could be produced.
pub async fn resolve_machine<F, Fut>(
    node: &NodeDescriptor,
    plan: &ResolvePlan,
    forwarder: Option<&impl PortForwarder>,
    reporter: &impl ProgressReporter,
    predicate: F,
) -> Result<MachineHandle, ResolveError>
where
    F: Fn(HostAndPort) -> Fut,
    Fut: Future<Output = bool>,
{
    let forwarder = match (plan.port_forwarding, forwarder) {
        (true, None) => return Err(ConfigError::MissingForwarder.into()),
        (true, Some(f)) => Some(f),
        (false, _) => None,
    };
    if node.status != NodeStatus::Running {
        return Err(ResolveError::NodeNotRunning {
            node_id: node.id.clone(),
            status: node.status.to_string(),
        });
    }

    let candidates = AddressCandidateSet::from_descriptor(node)?;
    let port = login_port(node, plan.protocol);
    tracing::debug!(
        node_id = %node.id,
        candidates = ?candidates.addresses(),
        hostname = candidates.hostname(),
        subnet = candidates.subnet_address(),
        port,
        "built candidate set"
    );

    let (endpoints, forwarded) = if let Some(forwarder) = forwarder {
        let target = HostAndPort::new(candidates.first(), port);
        reporter.step(&format!("opening port forwarding to {target}..."));
        let external = open_forwarded_endpoint(forwarder, &node.id, &target).await?;
        (vec![external], true)
    } else {
        (candidates.endpoints(port), false)
    };

    if plan.poll.wait_enabled() {
        reporter.step(&format!(
            "waiting for {} to accept {} connections...",
            node.id, plan.protocol
        ));
    }
    let connect = match poll_first_reachable(&node.id, &endpoints, &plan.poll, predicate).await {
        Ok(connect) => connect,
        Err(e) => {
            reporter.warn(&format!("{} is not reachable", node.id));
            return Err(e);
        }
    };

    let selection = AddressSelection::new(&candidates, connect, forwarded, plan.hostname_policy);
    let handle = assemble_handle(node, plan.protocol, selection);
    reporter.success(&format!("{} reachable at {}", node.id, handle.host_and_port));
    Ok(handle)
}
