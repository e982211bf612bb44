//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: TCP probing, configuration
//! files, descriptor loading, and the rule-table port forwarder.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod config;
pub mod forwarder;
pub mod network;
pub mod node_source;
