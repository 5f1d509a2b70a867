//! Tessera: exact integer and fraction calculator.

use std::process::ExitCode;

use tessera_lib::{app, config, errors, version};

fn main() -> ExitCode {
    let config = config::AppConfig::parse();

    // Initialize tracing
    let floor = if config.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(floor.into()))
        .init();
    tracing::debug!(version = %version::full_version(), "starting");

    match app::run(&config) {
        Ok(()) => ExitCode::from(errors::exit_codes::SUCCESS),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(errors::handle_error(&err))
        }
    }
}
