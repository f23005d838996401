use crate::export::ExportFormat;
use crate::models::Screen;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for admindesk
/// Master-data administration: list, filter, validate and edit records
#[derive(Parser)]
#[command(
    name = "admindesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Master-data admin console: paginated lists, filters, validated forms and a course wizard",
    long_about = None
)]
pub struct Cli {
    /// Seed file with the initial records (JSON, or YAML for .yml/.yaml)
    #[arg(global = true, long = "seed", value_name = "FILE")]
    pub seed: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file
    Init,

    /// Inspect the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Render one page of a screen's table
    List {
        /// Screen to show
        screen: Screen,

        /// Substring filter on a column, as field=value (repeatable)
        #[arg(long = "filter", value_name = "FIELD=VALUE", value_parser = parse_pair)]
        filters: Vec<(String, String)>,

        /// Page number (1-based, clamped to the last page)
        #[arg(long, short, default_value_t = 1)]
        page: usize,
    },

    /// Validate a draft record without storing it
    Check {
        /// Screen whose form rules apply
        screen: Screen,

        /// Field values as field=value
        #[arg(value_name = "FIELD=VALUE", value_parser = parse_pair)]
        fields: Vec<(String, String)>,
    },

    /// Export the (filtered) records of a screen
    Export {
        /// Screen to export
        screen: Screen,

        /// Export format: csv, json
        #[arg(long, value_name = "FORMAT", default_value = "csv")]
        format: ExportFormat,

        /// Output file path
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Substring filter on a column, as field=value (repeatable)
        #[arg(long = "filter", value_name = "FIELD=VALUE", value_parser = parse_pair)]
        filters: Vec<(String, String)>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Interactive admin session (commands from stdin or a script)
    Shell {
        /// Run the commands of FILE, stopping at the first failure
        #[arg(long, value_name = "FILE")]
        script: Option<String>,
    },
}

/// `field=value` argument; the value may be empty or contain `=`.
pub fn parse_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected FIELD=VALUE, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_split_on_first_equals() {
        assert_eq!(
            parse_pair("code=A=1").unwrap(),
            ("code".to_string(), "A=1".to_string())
        );
        assert_eq!(parse_pair("brand=").unwrap().1, "");
        assert!(parse_pair("=x").is_err());
        assert!(parse_pair("plain").is_err());
    }

    #[test]
    fn list_accepts_repeated_filters() {
        let cli = Cli::try_parse_from([
            "admindesk",
            "list",
            "materials",
            "--filter",
            "name=steel",
            "--filter",
            "uom=kg",
            "--page",
            "2",
        ])
        .unwrap();
        match cli.command {
            Commands::List {
                screen,
                filters,
                page,
            } => {
                assert_eq!(screen, Screen::Materials);
                assert_eq!(filters.len(), 2);
                assert_eq!(page, 2);
            }
            _ => panic!("expected list"),
        }
    }
}
