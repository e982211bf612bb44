//! Command implementations

pub mod candidates;
pub mod config;
pub mod resolve;
pub mod version;
