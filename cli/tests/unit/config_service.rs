//! Unit tests for the configuration use-cases against a mocked store.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use mockall::predicate::always;
use waypoint_cli::application::services::config_service;
use waypoint_cli::domain::{ConfigError, WaypointConfig};
use waypoint_common::{HostnamePolicy, Protocol};

use crate::mocks::MockStore;

fn store_with(config: WaypointConfig) -> MockStore {
    let mut store = MockStore::new();
    store.expect_load().returning(move || Ok(config.clone()));
    store
}

#[test]
fn set_value_saves_updated_config() {
    let mut store = store_with(WaypointConfig::default());
    store
        .expect_save()
        .withf(|cfg| cfg.wait.interval == "500ms")
        .times(1)
        .returning(|_| Ok(()));

    let cfg = config_service::set_value(&store, "wait.interval", "500ms").unwrap();
    assert_eq!(cfg.wait.interval, "500ms");
}

#[test]
fn set_value_rejects_unknown_key_without_saving() {
    let mut store = store_with(WaypointConfig::default());
    store.expect_save().with(always()).never();

    let err = config_service::set_value(&store, "security.level", "strict").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::UnknownKey { .. })
    ));
}

#[test]
fn set_value_rejects_bad_protocol() {
    let mut store = store_with(WaypointConfig::default());
    store.expect_save().never();

    let err = config_service::set_value(&store, "protocol", "telnet").unwrap_err();
    assert!(err.to_string().contains("ssh, winrm"), "{err}");
}

#[test]
fn load_plan_applies_defaults() {
    let store = store_with(WaypointConfig::default());

    let (_, plan) = config_service::load_plan(&store, |_| Ok(())).unwrap();
    assert_eq!(plan.poll.wait, Some(Duration::from_secs(300)));
    assert!(plan.poll.scan_all_candidates);
    assert_eq!(plan.poll.interval, Duration::from_secs(1));
    assert_eq!(plan.probe_timeout, Duration::from_secs(3));
    assert!(!plan.port_forwarding);
    assert_eq!(plan.protocol, Protocol::Ssh);
    assert_eq!(plan.hostname_policy, HostnamePolicy::NodeAddress);
}

#[test]
fn load_plan_disables_wait() {
    let mut cfg = WaypointConfig::default();
    cfg.set("wait.login", "false").unwrap();
    let store = store_with(cfg);

    let (_, plan) = config_service::load_plan(&store, |_| Ok(())).unwrap();
    assert!(!plan.poll.wait_enabled());
}

#[test]
fn load_plan_rejects_zero_interval() {
    let mut cfg = WaypointConfig::default();
    cfg.wait.interval = "0ms".to_string();
    let store = store_with(cfg);

    let err = config_service::load_plan(&store, |_| Ok(())).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::ZeroInterval { .. })
    ));
}

#[test]
fn load_failure_propagates() {
    let mut store = MockStore::new();
    store
        .expect_load()
        .returning(|| Err(anyhow::anyhow!("cannot parse /tmp/config.yaml")));

    let err = config_service::load_config(&store).unwrap_err();
    assert!(err.to_string().contains("cannot parse"));
}

#[test]
fn load_plan_applies_overrides_before_validating() {
    let store = store_with(WaypointConfig::default());

    let (cfg, plan) =
        config_service::load_plan(&store, |cfg| cfg.set("wait.login", "45s")).unwrap();
    assert_eq!(cfg.wait.login.to_string(), "45s");
    assert_eq!(plan.poll.wait, Some(Duration::from_secs(45)));

    let err =
        config_service::load_plan(&store, |cfg| cfg.set("wait.interval", "0s")).unwrap_err();
    assert!(err.downcast_ref::<ConfigError>().is_some(), "{err}");
}
