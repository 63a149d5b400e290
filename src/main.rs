//! Command-line entry point for `meeting-record`.
//!
//! # Startup sequence
//!
//! 1. Parse arguments.
//! 2. Initialise logging on stderr (`RUST_LOG` wins over `-v`).
//! 3. Load [`AppConfig`](meeting_record::config::AppConfig) and apply env overrides.
//! 4. Dispatch the subcommand.
//!
//! Empty or unreadable input exits with status 2; any other error with 1.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use meeting_record::cli::{
    handle_classify_command, handle_config_command, handle_extract_command,
    handle_prompt_command, load_config, Cli, CliCommand, InputError,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.downcast_ref::<InputError>().is_some() => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        CliCommand::Extract(args) => handle_extract_command(args, config).await,
        CliCommand::Classify(args) => handle_classify_command(args),
        CliCommand::Prompt(args) => handle_prompt_command(args),
        CliCommand::Config(args) => handle_config_command(args, &config, cli.config.as_deref()),
    }
}
