//! `waypoint candidates`: show the candidate order for a node without probing.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use waypoint_common::Protocol;

use crate::app::AppContext;
use crate::application::ports::NodeSource;
use crate::application::services::config_service;
use crate::domain::{AddressCandidateSet, login_port};
use crate::infra::node_source::FileNodeSource;

/// Arguments for the candidates command.
#[derive(Args, Debug)]
pub struct CandidatesArgs {
    /// Node descriptor file (JSON or YAML), or `-` to read JSON from stdin
    pub descriptor: PathBuf,

    /// Login protocol used to pick the default port
    #[arg(long, value_enum)]
    pub protocol: Option<Protocol>,
}

/// Run the candidates command.
///
/// # Errors
///
/// Returns an error if the descriptor cannot be loaded or has no addresses.
pub async fn run(app: &AppContext, args: &CandidatesArgs) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let protocol = args.protocol.unwrap_or(config.protocol);
    let node = FileNodeSource::new(&args.descriptor).descriptor().await?;
    let candidates = AddressCandidateSet::from_descriptor(&node)?;
    app.renderer()
        .render_candidates(&node.id, &candidates, login_port(&node, protocol))?;
    Ok(ExitCode::SUCCESS)
}
