//! Port forwarding adapter: swap a node endpoint for its externally
//! routable mapping.

use waypoint_common::HostAndPort;

use crate::application::ports::PortForwarder;
use crate::domain::ResolveError;

/// Placeholder forwarder type for callers that never forward.
///
/// Lets `None::<&NoForwarder>` name the forwarder type when there is none.
pub struct NoForwarder;

impl PortForwarder for NoForwarder {
    async fn open_mapping(&self, _: &str, target: &HostAndPort) -> anyhow::Result<HostAndPort> {
        anyhow::bail!("no port forwarder configured for {target}")
    }
}

/// Ask `forwarder` for the external endpoint of `target` on `node_id`.
///
/// # Errors
///
/// Returns [`ResolveError::PortForwardSetupFailure`] if the forwarder cannot
/// produce a mapping.
pub async fn open_forwarded_endpoint(
    forwarder: &impl PortForwarder,
    node_id: &str,
    target: &HostAndPort,
) -> Result<HostAndPort, ResolveError> {
    match forwarder.open_mapping(node_id, target).await {
        Ok(external) => {
            tracing::info!(node_id, %target, %external, "opened port forwarding");
            Ok(external)
        }
        Err(e) => Err(ResolveError::PortForwardSetupFailure {
            node_id: node_id.to_string(),
            target: target.to_string(),
            reason: format!("{e:#}"),
        }),
    }
}
