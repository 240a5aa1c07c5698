//! Notekeeper server entry point.

use clap::Parser;
use log::error;
use notekeeper_core::init_logging;
use notekeeper_server::{run, ServerConfig, StartupError};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::parse();

    if let Err(message) = init_logging(config.log_level(), config.log_dir.as_deref()) {
        eprintln!("notekeeper: {}", StartupError::Logging(message));
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=server status=error error={err}");
            eprintln!("notekeeper: {err}");
            ExitCode::FAILURE
        }
    }
}
