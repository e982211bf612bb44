pub mod endpoint;
pub mod types;

pub use endpoint::{EndpointParseError, HostAndPort};
pub use types::*;
