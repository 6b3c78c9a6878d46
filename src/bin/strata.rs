//! Strata CLI Binary
//!
//! Command-line interface for building and querying layered configuration
//! trees.

use clap::Parser;
use std::process;
use strata::cli::{map_error, Cli, RunContext};
use strata::logging::{init_logging, LoggingConfig};
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Strata CLI starting");

    let context = match RunContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Failed to build entity tree: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    info!("Entity tree built");
    println!("{}", context.execute(&cli.command));
}

/// Build logging configuration from CLI args.
/// Precedence: CLI flags override environment override defaults; the
/// environment is consulted inside init_logging.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = LoggingConfig::default();
    // Diagnostics go to stderr so command output on stdout stays parseable.
    config.output = "stderr".to_string();

    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    config
}
