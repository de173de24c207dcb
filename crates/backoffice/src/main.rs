mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use backoffice_config::Config;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = build_config(&cli.global)?;

    match cli.command {
        // Local-only commands don't touch the backend
        Command::Config(args) => commands::config_cmd::handle(args, &config, &cli.global),
        Command::Prefs(args) => commands::prefs::handle(args, &config, &cli.global).await,

        cmd => {
            let api = config.api.client()?;
            tracing::debug!(command = ?cmd, base_url = %api.base_url(), "dispatching command");
            commands::dispatch(cmd, api, &cli.global).await
        }
    }
}

/// Effective configuration: file and environment, then CLI flag overrides.
fn build_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let path = global
        .config
        .clone()
        .unwrap_or_else(backoffice_config::config_path);
    let mut config = backoffice_config::load_config_from(&path)?;

    if let Some(url) = &global.api_url {
        config.api.base_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        config.api.timeout_secs = timeout;
    }

    Ok(config)
}
