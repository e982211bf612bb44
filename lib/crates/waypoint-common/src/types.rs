use std::fmt;

use serde::{Deserialize, Serialize};

use crate::endpoint::HostAndPort;

/// Provider-reported lifecycle state of a node
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    #[default]
    Running,
    Pending,
    Suspended,
    Terminated,
    Error,
    #[serde(other)]
    Unrecognized,
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Running => "running",
            Self::Pending => "pending",
            Self::Suspended => "suspended",
            Self::Terminated => "terminated",
            Self::Error => "error",
            Self::Unrecognized => "unrecognized",
        };
        f.write_str(s)
    }
}

/// Login credentials returned by the provider for a node.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LoginCredentials {
    #[serde(alias = "loginUser")]
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "privateKey")]
    pub private_key: Option<String>,
}

// Secrets never appear in logs.
impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Provider snapshot of a provisioned node.
///
/// Address order is the order the provider returned them in and is
/// significant for candidate selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeDescriptor {
    pub id: String,
    #[serde(default)]
    pub status: NodeStatus,
    #[serde(default, alias = "publicAddresses")]
    pub public_addresses: Vec<String>,
    #[serde(default, alias = "privateAddresses")]
    pub private_addresses: Vec<String>,
    /// Port the login protocol listens on; `0` means "protocol default".
    #[serde(default, alias = "loginPort")]
    pub login_port: u16,
    #[serde(default)]
    pub credentials: LoginCredentials,
}

/// Remote access protocol used to talk to the node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Remote shell (SSH)
    #[default]
    Ssh,
    /// Remote management (WinRM)
    Winrm,
}

impl Protocol {
    #[must_use]
    pub fn default_port(self) -> u16 {
        match self {
            Self::Ssh => 22,
            Self::Winrm => 5985,
        }
    }

    /// Hostname policy applied when none is configured.
    ///
    /// WinRM machines report the forwarded endpoint as their hostname while
    /// SSH machines keep the node's own address.
    #[must_use]
    pub fn default_hostname_policy(self) -> HostnamePolicy {
        match self {
            Self::Ssh => HostnamePolicy::NodeAddress,
            Self::Winrm => HostnamePolicy::ForwardedAddress,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ssh => "ssh",
            Self::Winrm => "winrm",
        })
    }
}

/// Which address a machine reports as its hostname when port forwarding is
/// active. Without forwarding both policies report the node address.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum HostnamePolicy {
    /// First public address, else first private address
    NodeAddress,
    /// The forwarded external host
    ForwardedAddress,
}

impl fmt::Display for HostnamePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NodeAddress => "node-address",
            Self::ForwardedAddress => "forwarded-address",
        })
    }
}

/// Resolved, connectable description of a machine.
///
/// A plain value: it owns no sockets, sessions or mappings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MachineHandle {
    pub node_id: String,
    pub protocol: Protocol,
    /// Address the command-execution layer connects to.
    pub address: String,
    pub port: u16,
    /// Address shown to operators; independent of reachability.
    pub hostname: String,
    /// Address same-cloud peers use to reach the node.
    pub subnet_address: String,
    pub host_and_port: String,
    pub credentials: LoginCredentials,
}

impl MachineHandle {
    #[must_use]
    pub fn endpoint(&self) -> HostAndPort {
        HostAndPort::new(self.address.clone(), self.port)
    }
}
