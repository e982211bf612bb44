//! Network infrastructure: implements `NetworkProbe` with tokio sockets.

use std::time::Duration;

use anyhow::Result;
use waypoint_common::HostAndPort;

use crate::application::ports::NetworkProbe;

/// Production implementation that attempts a real TCP connection.
pub struct TokioNetworkProbe {
    timeout: Duration,
}

impl TokioNetworkProbe {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl NetworkProbe for TokioNetworkProbe {
    async fn check_tcp_connectivity(&self, target: &HostAndPort) -> Result<bool> {
        let connect = tokio::net::TcpStream::connect((target.host.as_str(), target.port));
        match tokio::time::timeout(self.timeout, connect).await {
            Ok(Ok(_stream)) => Ok(true),
            Ok(Err(e)) => {
                tracing::trace!(%target, error = %e, "tcp probe refused");
                Ok(false)
            }
            Err(_) => {
                tracing::trace!(%target, timeout_ms = self.timeout.as_millis(), "tcp probe timed out");
                Ok(false)
            }
        }
    }
}
