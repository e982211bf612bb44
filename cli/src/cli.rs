//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Resolve provisioned cloud nodes into connectable machine handles
#[derive(Parser)]
#[command(
    name = "waypoint",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve a node descriptor into a machine handle
    Resolve(commands::resolve::ResolveArgs),

    /// Show candidate addresses for a node without probing
    Candidates(commands::candidates::CandidatesArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Default tracing directive for the chosen verbosity.
    #[must_use]
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "waypoint_cli=debug,info",
            _ => "trace",
        }
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let app = AppContext::new(&AppFlags {
            no_color: self.no_color,
            quiet: self.quiet,
            json: self.json,
        });
        match self.command {
            Command::Resolve(args) => commands::resolve::run(&app, &args).await,
            Command::Candidates(args) => commands::candidates::run(&app, &args).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
