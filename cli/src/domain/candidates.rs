//! Candidate addresses for a node, plus the display and subnet addresses.
//!
//! Pure: takes a [`NodeDescriptor`] in, returns data out.

use waypoint_common::{HostAndPort, NodeDescriptor};

use crate::domain::error::ResolveError;

/// Ordered, deduplicated addresses eligible for the reachability test.
///
/// Order is every public address in provider order followed by every
/// private address in provider order; later duplicates are dropped. Blank
/// entries are ignored.
///
/// `hostname` and `subnet_address` are fixed here and never change with the
/// outcome of polling: the hostname is always the first public address and
/// the subnet address is always the first private address, each falling back
/// to the other list when its own is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressCandidateSet {
    addresses: Vec<String>,
    hostname: String,
    subnet_address: String,
}

impl AddressCandidateSet {
    /// Build the candidate set for `node`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoAddressesAvailable`] if the node has neither
    /// public nor private addresses.
    pub fn from_descriptor(node: &NodeDescriptor) -> Result<Self, ResolveError> {
        let public = usable(&node.public_addresses);
        let private = usable(&node.private_addresses);

        let mut addresses: Vec<String> = Vec::with_capacity(public.len() + private.len());
        for addr in public.iter().chain(private.iter()) {
            if !addresses.iter().any(|a| a == addr) {
                addresses.push((*addr).to_string());
            }
        }

        let no_addresses = || ResolveError::NoAddressesAvailable {
            node_id: node.id.clone(),
        };
        let hostname = public
            .first()
            .or_else(|| private.first())
            .ok_or_else(no_addresses)?
            .to_string();
        let subnet_address = private
            .first()
            .or_else(|| public.first())
            .ok_or_else(no_addresses)?
            .to_string();

        Ok(Self {
            addresses,
            hostname,
            subnet_address,
        })
    }

    /// Candidates in polling order. Never empty.
    #[must_use]
    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    /// The preferred candidate: first public, else first private.
    #[must_use]
    pub fn first(&self) -> &str {
        // from_descriptor guarantees at least one address
        self.addresses.first().map_or("", String::as_str)
    }

    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    #[must_use]
    pub fn subnet_address(&self) -> &str {
        &self.subnet_address
    }

    /// Pair every candidate with `port`, preserving order.
    #[must_use]
    pub fn endpoints(&self, port: u16) -> Vec<HostAndPort> {
        self.addresses
            .iter()
            .map(|a| HostAndPort::new(a.clone(), port))
            .collect()
    }
}

fn usable(addrs: &[String]) -> Vec<&str> {
    addrs
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .collect()
}
