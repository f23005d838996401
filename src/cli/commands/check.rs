use crate::cli::parser::Commands;
use crate::core::workspace::Workspace;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, success};

/// Handle the `check` command: validate a draft with the screen's form rules.
pub fn handle(cmd: &Commands, ws: &Workspace) -> AppResult<()> {
    if let Commands::Check { screen, fields } = cmd {
        let view = ws.screen(*screen);
        match view.check_draft(fields) {
            Ok(()) => success(format!("{} draft is valid", view.kind())),
            Err(AppError::Validation(errors)) => {
                for (field, msg) in errors.iter() {
                    error(format!("{field}: {msg}"));
                }
                return Err(AppError::Validation(errors));
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
