use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// Writes `~/.admindesk/admindesk.conf` with the default settings.
/// In test mode nothing is written.
pub fn handle(cli: &Cli) -> AppResult<()> {
    info("Initializing admindesk…");
    let path = Config::init_all(cli.test)?;

    println!("📄 Config file : {}", path.display());
    if cli.test {
        info("Test mode: configuration file not written.");
    } else {
        success("admindesk initialization completed!");
    }
    Ok(())
}
