//! `host:port` endpoint type shared by the reachability predicate, the port
//! forwarder and the final machine handle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when parsing a `host:port` string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointParseError {
    #[error("endpoint '{0}' is missing a ':port' suffix")]
    MissingPort(String),

    #[error("endpoint '{0}' has an empty host")]
    EmptyHost(String),

    #[error("endpoint '{input}' has an invalid port '{port}'")]
    InvalidPort { input: String, port: String },

    #[error("endpoint '{0}' is an IPv6 literal and must be written as [addr]:port")]
    UnbracketedIpv6(String),
}

/// A host (address or name) paired with a TCP port.
///
/// Serialized as the string `host:port`; IPv6 literals are bracketed
/// (`[::1]:22`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HostAndPort {
    pub host: String,
    pub port: u16,
}

impl HostAndPort {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for HostAndPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for HostAndPort {
    type Err = EndpointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (host, port) = if let Some(rest) = s.strip_prefix('[') {
            let (host, tail) = rest
                .split_once(']')
                .ok_or_else(|| EndpointParseError::MissingPort(s.to_string()))?;
            let port = tail
                .strip_prefix(':')
                .ok_or_else(|| EndpointParseError::MissingPort(s.to_string()))?;
            (host, port)
        } else {
            let (host, port) = s
                .rsplit_once(':')
                .ok_or_else(|| EndpointParseError::MissingPort(s.to_string()))?;
            if host.contains(':') {
                return Err(EndpointParseError::UnbracketedIpv6(s.to_string()));
            }
            (host, port)
        };

        if host.is_empty() {
            return Err(EndpointParseError::EmptyHost(s.to_string()));
        }
        let port = port.parse().map_err(|_| EndpointParseError::InvalidPort {
            input: s.to_string(),
            port: port.to_string(),
        })?;
        Ok(Self::new(host, port))
    }
}

impl TryFrom<String> for HostAndPort {
    type Error = EndpointParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HostAndPort> for String {
    fn from(value: HostAndPort) -> Self {
        value.to_string()
    }
}
