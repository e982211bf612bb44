//! Domain types and validators for Waypoint configuration.
//!
//! Pure functions only, without I/O.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use waypoint_common::{HostAndPort, HostnamePolicy, Protocol};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "wait.login",
    "wait.first_reachable",
    "wait.interval",
    "wait.probe_timeout",
    "forwarding.enabled",
    "protocol",
    "hostname_policy",
];
pub const VALID_PROTOCOLS: &[&str] = &["ssh", "winrm"];
pub const VALID_HOSTNAME_POLICIES: &[&str] = &["node-address", "forwarded-address", "default"];
const VALID_BOOLS: &[&str] = &["true", "false"];

const DEFAULT_LOGIN_WAIT: Duration = Duration::from_secs(300);

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.waypoint/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WaypointConfig {
    /// Reachability wait settings.
    pub wait: WaitConfig,
    /// Port forwarding settings.
    pub forwarding: ForwardingConfig,
    /// Login protocol: `ssh` (default) or `winrm`.
    pub protocol: Protocol,
    /// Hostname reported under forwarding. Unset means the protocol default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname_policy: Option<HostnamePolicy>,
}

/// A wait that is either switched off (`false`) or bounded by a timeout.
///
/// Accepts `false`, `true` (default timeout), a number of seconds, or a
/// duration string such as `"5m"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WaitSetting {
    Flag(bool),
    Seconds(u64),
    Timeout(String),
}

impl WaitSetting {
    /// Resolve to `None` (disabled) or the wait's timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDuration`] if the string form is malformed.
    pub fn resolve(&self, key: &str, default: Duration) -> Result<Option<Duration>, ConfigError> {
        match self {
            Self::Flag(false) => Ok(None),
            Self::Flag(true) => Ok(Some(default)),
            Self::Seconds(secs) => Ok(Some(Duration::from_secs(*secs))),
            Self::Timeout(s) => match s.trim() {
                "false" => Ok(None),
                "true" => Ok(Some(default)),
                other => parse_duration(key, other).map(Some),
            },
        }
    }
}

impl std::fmt::Display for WaitSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Seconds(n) => write!(f, "{n}s"),
            Self::Timeout(s) => f.write_str(s),
        }
    }
}

/// Wait/poll configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitConfig {
    /// Wait for the login port: `false` or a timeout (default `5m`).
    pub login: WaitSetting,
    /// Scan every candidate for the first reachable one (default `true`).
    /// When `false` only the preferred address is polled.
    pub first_reachable: bool,
    /// Delay between polling rounds (default `1s`).
    pub interval: String,
    /// Timeout for a single TCP probe (default `3s`).
    pub probe_timeout: String,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            login: WaitSetting::Timeout("5m".to_string()),
            first_reachable: true,
            interval: "1s".to_string(),
            probe_timeout: "3s".to_string(),
        }
    }
}

/// Port forwarding configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ForwardingConfig {
    /// Route connections through the port forwarder.
    pub enabled: bool,
    /// Static mappings served by the built-in rule-table forwarder.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<ForwardRule>,
}

/// One static forwarding rule: `target` on the node is reachable at `external`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardRule {
    /// Restrict the rule to one node; unset matches any node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    pub target: HostAndPort,
    pub external: HostAndPort,
}

// ── Resolved plan ────────────────────────────────────────────────────────────

/// Typed polling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// `None` skips polling entirely; otherwise the absolute deadline.
    pub wait: Option<Duration>,
    /// Probe every candidate, or only the first.
    pub scan_all_candidates: bool,
    /// Delay between rounds.
    pub interval: Duration,
}

impl PollConfig {
    #[must_use]
    pub fn wait_enabled(&self) -> bool {
        self.wait.is_some()
    }

    /// Polling disabled: the first candidate is taken as-is.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            wait: None,
            scan_all_candidates: true,
            interval: Duration::from_secs(1),
        }
    }
}

/// Everything one resolution needs, validated before any network activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvePlan {
    pub poll: PollConfig,
    pub port_forwarding: bool,
    pub protocol: Protocol,
    pub hostname_policy: HostnamePolicy,
    pub probe_timeout: Duration,
}

impl WaypointConfig {
    /// Validate the configuration and turn it into a [`ResolvePlan`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for malformed durations or a zero interval.
    pub fn plan(&self) -> Result<ResolvePlan, ConfigError> {
        let wait = self.wait.login.resolve("wait.login", DEFAULT_LOGIN_WAIT)?;
        let interval = parse_positive_duration("wait.interval", &self.wait.interval)?;
        let probe_timeout = parse_positive_duration("wait.probe_timeout", &self.wait.probe_timeout)?;
        Ok(ResolvePlan {
            poll: PollConfig {
                wait,
                scan_all_candidates: self.wait.first_reachable,
                interval,
            },
            port_forwarding: self.forwarding.enabled,
            protocol: self.protocol,
            hostname_policy: self
                .hostname_policy
                .unwrap_or_else(|| self.protocol.default_hostname_policy()),
            probe_timeout,
        })
    }

    /// Effective settings as `(key, value)` pairs, in whitelist order.
    #[must_use]
    pub fn settings(&self) -> Vec<(&'static str, String)> {
        vec![
            ("wait.login", self.wait.login.to_string()),
            ("wait.first_reachable", self.wait.first_reachable.to_string()),
            ("wait.interval", self.wait.interval.clone()),
            ("wait.probe_timeout", self.wait.probe_timeout.clone()),
            ("forwarding.enabled", self.forwarding.enabled.to_string()),
            ("protocol", self.protocol.to_string()),
            (
                "hostname_policy",
                self.hostname_policy.map_or_else(
                    || format!("default ({})", self.protocol.default_hostname_policy()),
                    |p| p.to_string(),
                ),
            ),
        ]
    }

    /// Apply a validated `key = value` pair.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the key or value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "wait.login" => {
                self.wait.login = match value {
                    "false" => WaitSetting::Flag(false),
                    "true" => WaitSetting::Flag(true),
                    other => WaitSetting::Timeout(other.to_string()),
                };
            }
            "wait.first_reachable" => self.wait.first_reachable = value == "true",
            "wait.interval" => self.wait.interval = value.to_string(),
            "wait.probe_timeout" => self.wait.probe_timeout = value.to_string(),
            "forwarding.enabled" => self.forwarding.enabled = value == "true",
            "protocol" => {
                self.protocol = if value == "winrm" {
                    Protocol::Winrm
                } else {
                    Protocol::Ssh
                };
            }
            "hostname_policy" => {
                self.hostname_policy = match value {
                    "node-address" => Some(HostnamePolicy::NodeAddress),
                    "forwarded-address" => Some(HostnamePolicy::ForwardedAddress),
                    _ => None,
                };
            }
            _ => unknown_key(key)?,
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> Result<(), ConfigError> {
    Err(ConfigError::UnknownKey {
        key: key.to_string(),
        valid: VALID_CONFIG_KEYS.join(", "),
    })
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<(), ConfigError> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return unknown_key(key);
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let one_of = |valid: &[&str]| {
        if valid.contains(&value) {
            Ok(())
        } else {
            Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                valid: valid.join(", "),
            })
        }
    };
    match key {
        "wait.login" if VALID_BOOLS.contains(&value) => Ok(()),
        "wait.login" => parse_duration(key, value).map(|_| ()),
        "wait.first_reachable" | "forwarding.enabled" => one_of(VALID_BOOLS),
        "wait.interval" | "wait.probe_timeout" => parse_positive_duration(key, value).map(|_| ()),
        "protocol" => one_of(VALID_PROTOCOLS),
        "hostname_policy" => one_of(VALID_HOSTNAME_POLICIES),
        _ => unknown_key(key),
    }
}

/// Parse a duration string.
///
/// Supports `Nms`, `Ns`, `Nm`, `Nh`, or a bare number of seconds.
/// Examples: "500ms", "30s", "5m", "1h", "90".
///
/// # Errors
///
/// Returns [`ConfigError::InvalidDuration`] if the value cannot be parsed.
pub fn parse_duration(key: &str, value: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDuration {
        key: key.to_string(),
        value: value.to_string(),
    };
    let s = value.trim();
    let (digits, unit_ms): (&str, u64) = if let Some(ms) = s.strip_suffix("ms") {
        (ms, 1)
    } else if let Some(secs) = s.strip_suffix('s') {
        (secs, 1_000)
    } else if let Some(minutes) = s.strip_suffix('m') {
        (minutes, 60_000)
    } else if let Some(hours) = s.strip_suffix('h') {
        (hours, 3_600_000)
    } else {
        (s, 1_000)
    };
    let n: u64 = digits.trim().parse().map_err(|_| invalid())?;
    let ms = n.checked_mul(unit_ms).ok_or_else(invalid)?;
    Ok(Duration::from_millis(ms))
}

fn parse_positive_duration(key: &str, value: &str) -> Result<Duration, ConfigError> {
    let d = parse_duration(key, value)?;
    if d.is_zero() {
        return Err(ConfigError::ZeroInterval {
            key: key.to_string(),
        });
    }
    Ok(d)
}

// ── Unit tests ───────────────────────────────────────────────────────────────
