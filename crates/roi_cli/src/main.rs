//! roi CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use roi_pricing::PricingError;

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so JSON/YAML output on stdout stays clean
    let default_directives = if cli.verbose {
        "roi_cli=debug,roi_engine=debug,roi_pricing=debug,warn"
    } else if cli.quiet {
        "error"
    } else {
        "roi_cli=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args, config),
        Commands::Sweep(args) => commands::sweep::execute(args, config),
        Commands::Plans(args) => commands::plans::execute(args, config),
        Commands::Validate(args) => commands::validate::execute(args, config, cli.quiet),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(pricing) = e.chain().find_map(|cause| cause.downcast_ref::<PricingError>()) {
        return match pricing {
            PricingError::ValidationFailed(_) => ExitCodes::VALIDATION_FAILURE,
            PricingError::NotFound(_) | PricingError::UnsupportedFormat(_) => ExitCodes::INVALID_ARGS,
            _ => ExitCodes::GENERAL_ERROR,
        };
    }

    let msg = e.to_string().to_lowercase();
    if msg.contains("invalid argument") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
