//! Address selection and machine handle assembly.
//!
//! Pure functions only. No network I/O happens here.

use waypoint_common::{HostAndPort, HostnamePolicy, MachineHandle, NodeDescriptor, Protocol};

use crate::domain::candidates::AddressCandidateSet;

/// Outcome of address selection for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSelection {
    /// Endpoint the command-execution layer connects to.
    pub connect: HostAndPort,
    pub hostname: String,
    pub subnet_address: String,
}

impl AddressSelection {
    /// Combine the chosen endpoint with the node's display/subnet addresses.
    ///
    /// `hostname` comes from the candidate set unless `connect` is a
    /// forwarded endpoint and `policy` asks for the forwarded address.
    #[must_use]
    pub fn new(
        candidates: &AddressCandidateSet,
        connect: HostAndPort,
        forwarded: bool,
        policy: HostnamePolicy,
    ) -> Self {
        let hostname = if forwarded && policy == HostnamePolicy::ForwardedAddress {
            connect.host.clone()
        } else {
            candidates.hostname().to_string()
        };
        Self {
            connect,
            hostname,
            subnet_address: candidates.subnet_address().to_string(),
        }
    }
}

/// Assemble the final handle. Credentials are copied verbatim.
#[must_use]
pub fn assemble_handle(
    node: &NodeDescriptor,
    protocol: Protocol,
    selection: AddressSelection,
) -> MachineHandle {
    let host_and_port = selection.connect.to_string();
    let AddressSelection {
        connect,
        hostname,
        subnet_address,
    } = selection;
    MachineHandle {
        node_id: node.id.clone(),
        protocol,
        address: connect.host,
        port: connect.port,
        hostname,
        subnet_address,
        host_and_port,
        credentials: node.credentials.clone(),
    }
}

/// Login port for `node`, falling back to the protocol default when the
/// provider reported none.
#[must_use]
pub fn login_port(node: &NodeDescriptor, protocol: Protocol) -> u16 {
    if node.login_port == 0 {
        protocol.default_port()
    } else {
        node.login_port
    }
}
