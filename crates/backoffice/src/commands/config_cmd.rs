//! Config subcommand handlers.

use std::path::PathBuf;

use dialoguer::Input;

use backoffice_config::{self as config, ApiSettings, Config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn target_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config::config_path)
}

/// Ask for backend settings, offering the current values as defaults.
fn prompt_settings(current: &ApiSettings) -> Result<ApiSettings, CliError> {
    let base_url: String = Input::new()
        .with_prompt("Backend URL")
        .default(current.base_url.clone())
        .validate_with(|input: &String| -> Result<(), String> {
            url::Url::parse(input)
                .map(|_| ())
                .map_err(|e| format!("invalid URL: {e}"))
        })
        .interact_text()
        .map_err(prompt_err)?;

    let timeout_secs: u64 = Input::new()
        .with_prompt("Request timeout (seconds)")
        .default(current.timeout_secs)
        .interact_text()
        .map_err(prompt_err)?;

    Ok(ApiSettings {
        base_url,
        timeout_secs,
    })
}

pub fn handle(args: ConfigArgs, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let out = match global.output {
                OutputFormat::Table | OutputFormat::Plain => {
                    toml::to_string_pretty(cfg).map_err(config::ConfigError::from)?
                }
                OutputFormat::Json | OutputFormat::JsonCompact => {
                    output::render_single(&global.output, cfg, |_| String::new(), |_| String::new())
                }
            };
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&target_path(global).display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init => {
            let path = target_path(global);
            if path.exists()
                && !util::confirm(
                    &format!("Overwrite {}?", path.display()),
                    "config init",
                    global.yes,
                )?
            {
                return Ok(());
            }

            let api = prompt_settings(&cfg.api)?;
            let new_cfg = Config {
                api,
                preferences: cfg.preferences,
            };
            config::save_config_to(&new_cfg, &path)?;
            output::notice(&format!("Config written to {}", path.display()), global.quiet);
            Ok(())
        }
    }
}
