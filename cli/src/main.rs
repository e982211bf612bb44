//! Waypoint CLI - resolve provisioned cloud nodes into machine handles

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use waypoint_cli::cli::Cli;
use waypoint_cli::domain::{ConfigError, ResolveError};
use waypoint_cli::output::json::format_error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the handle or JSON document.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_directive())),
        )
        .with_writer(std::io::stderr)
        .init();

    let json = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            let (code, exit) = classify(&e);
            if json {
                match format_error(&format!("{e:#}"), code) {
                    Ok(out) => println!("{out}"),
                    Err(_) => eprintln!("Error: {e:#}"),
                }
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::from(exit)
        }
    }
}

/// Map an error chain to its JSON code and process exit code.
fn classify(e: &anyhow::Error) -> (&'static str, u8) {
    if let Some(err) = e.downcast_ref::<ResolveError>() {
        return (err.code(), err.exit_code());
    }
    if e.downcast_ref::<ConfigError>().is_some() {
        return ("configuration", 2);
    }
    ("error", 1)
}
