//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod candidates;
pub mod config;
pub mod error;
pub mod handle;

pub use candidates::AddressCandidateSet;
pub use config::{
    ForwardRule, PollConfig, ResolvePlan, WaitSetting, WaypointConfig, parse_duration,
    validate_config_key, validate_config_value,
};
pub use error::{ConfigError, ResolveError};
pub use handle::{AddressSelection, assemble_handle, login_port};
