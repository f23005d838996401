use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::check::check_yaml;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::fs;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if !*print_config && !*check {
            info("Nothing to do: use --print or --check.");
            return Ok(());
        }

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        // ---- CHECK CONFIG ----
        if *check {
            let path = Config::config_file();
            if !path.exists() {
                warning(format!(
                    "No configuration file at {}: defaults are in use (run `admindesk init`).",
                    path.display()
                ));
                return Ok(());
            }

            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            let report = check_yaml(&content);
            if report.is_clean() {
                success(format!("Configuration file {} is complete.", path.display()));
                return Ok(());
            }
            for key in &report.missing {
                warning(format!("Missing key '{key}' (default value applies)"));
            }
            for key in &report.unknown {
                warning(format!("Unknown key '{key}' (ignored)"));
            }
            for key in &report.bad_screens {
                warning(format!("page_sizes: '{key}' is not a screen"));
            }
        }
    }

    Ok(())
}
