use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::workspace::Workspace;
use crate::errors::{AppError, AppResult};
use crate::shell::{Mode, Session};
use crate::ui::messages::info;
use crate::utils::path::expand_tilde;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};

/// Handle the `shell` command
///
/// Without `--script` commands are read from stdin; a prompt is shown only
/// when stdin is a terminal.
pub fn handle(cmd: &Commands, cfg: &Config, ws: Workspace) -> AppResult<()> {
    if let Commands::Shell { script } = cmd {
        let mut session = Session::new(ws, cfg);

        match script {
            Some(file) => {
                let path = expand_tilde(file);
                let reader = File::open(&path).map(BufReader::new).map_err(|e| {
                    AppError::InvalidCommand(format!("cannot open script {}: {e}", path.display()))
                })?;
                session.run(reader, Mode::Script)?;
            }
            None => {
                let stdin = io::stdin();
                let prompt = stdin.is_terminal();
                if prompt {
                    info("admindesk shell: type `help` for the command list, `quit` to leave.");
                }
                session.run(stdin.lock(), Mode::Interactive { prompt })?;
            }
        }
    }
    Ok(())
}
