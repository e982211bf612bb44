//! Shared mock infrastructure for unit tests.
//!
//! Sync ports are mocked with `mockall`; the async `PortForwarder` gets a
//! hand-written recorder.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::PathBuf;

use anyhow::Result;
use mockall::mock;
use waypoint_cli::application::ports::{ConfigStore, PortForwarder, ProgressReporter};
use waypoint_cli::domain::WaypointConfig;
use waypoint_common::HostAndPort;

mock! {
    pub Reporter {}
    impl ProgressReporter for Reporter {
        fn step(&self, message: &str);
        fn success(&self, message: &str);
        fn warn(&self, message: &str);
    }
}

mock! {
    pub Store {}
    impl ConfigStore for Store {
        fn load(&self) -> Result<WaypointConfig>;
        fn save(&self, config: &WaypointConfig) -> Result<()>;
        fn path(&self) -> Result<PathBuf>;
    }
}

/// Reporter that accepts any event.
pub fn quiet_reporter() -> MockReporter {
    let mut reporter = MockReporter::new();
    reporter.expect_step().return_const(());
    reporter.expect_success().return_const(());
    reporter.expect_warn().return_const(());
    reporter
}

// ── Forwarders ───────────────────────────────────────────────────────────────

/// Forwarder that maps every target to a fixed external endpoint and records
/// the requests it served.
pub struct RecordingForwarder {
    external: HostAndPort,
    requests: RefCell<Vec<(String, HostAndPort)>>,
}

impl RecordingForwarder {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            external: HostAndPort::new(host, port),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(String, HostAndPort)> {
        self.requests.borrow().clone()
    }
}

impl PortForwarder for RecordingForwarder {
    async fn open_mapping(&self, node_id: &str, target: &HostAndPort) -> Result<HostAndPort> {
        self.requests
            .borrow_mut()
            .push((node_id.to_string(), target.clone()));
        Ok(self.external.clone())
    }
}

/// Forwarder whose backing service always refuses.
pub struct FailingForwarder;

impl PortForwarder for FailingForwarder {
    async fn open_mapping(&self, _: &str, _: &HostAndPort) -> Result<HostAndPort> {
        anyhow::bail!("forwarding service unavailable")
    }
}
