//! Read Later CLI Binary

use clap::Parser;
use read_later::config::ConfigLoader;
use read_later::error::ApiError;
use read_later::logging::init_logging;
use read_later::tooling::cli::{Cli, CliContext};
use read_later::tooling::format::format_access_error;
use std::process;

fn main() {
    let cli = Cli::parse();

    let mut config = match ConfigLoader::load_optional(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };
    cli.apply_overrides(&mut config);

    if let Err(e) = init_logging(&config.logging, cli.log_file.clone()) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let context = match CliContext::new(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(ApiError::Safari(e)) => {
            eprintln!("{}", format_access_error(&e));
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
