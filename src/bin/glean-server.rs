//! Glean Server CLI Binary
//!
//! Hosts the event logger: resolves configuration, sets up diagnostics on
//! stderr, and writes one telemetry line per invocation.

use clap::Parser;
use glean_server::cli::Cli;
use glean_server::logging::{init_logging, logs_to_stderr};
use std::process;
use tracing::{debug, error};

fn main() {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(Some(&config.logging)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    debug!(command = ?cli.command, "glean-server starting");

    match cli.execute(&config) {
        Ok(Some(output)) => println!("{}", output),
        Ok(None) => {}
        Err(e) => {
            error!("Command failed: {:#}", e);
            // The subscriber already printed it when it writes to stderr.
            if !logs_to_stderr(&config.logging) {
                eprintln!("{:#}", e);
            }
            process::exit(1);
        }
    }
}
