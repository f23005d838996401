use crate::cli::parser::Commands;
use crate::core::workspace::Workspace;
use crate::errors::AppResult;
use crate::export::ensure_writable;
use crate::utils::path::expand_tilde;
use std::io;

pub fn handle(cmd: &Commands, mut ws: Workspace) -> AppResult<()> {
    if let Commands::Export {
        screen,
        format,
        file,
        filters,
        force,
    } = cmd
    {
        let path = expand_tilde(file);
        ws.set_active(*screen);
        for (field, value) in filters {
            ws.current_mut().set_filter(field, value)?;
        }

        ensure_writable(&path, *force, &mut io::stdin().lock())?;
        ws.export(*format, &path)?;
    }
    Ok(())
}
