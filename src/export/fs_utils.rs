// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Verifica se un file può essere creato o sovrascritto.
///
/// - Se il file NON esiste → Ok
/// - Se esiste ed è abilitato `force` → Ok
/// - Se esiste e `force == false` → chiede conferma leggendo da `input`.
pub fn ensure_writable<B: BufRead>(path: &Path, force: bool, input: &mut B) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "export cancelled: existing file not overwritten".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn existing_file(name: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{name}_admindesk_fs_utils.txt"));
        std::fs::write(&path, "x").unwrap();
        path
    }

    #[test]
    fn missing_file_needs_no_confirmation() {
        let path = std::env::temp_dir().join("admindesk_fs_utils_absent.txt");
        std::fs::remove_file(&path).ok();
        assert!(ensure_writable(&path, false, &mut Cursor::new("")).is_ok());
    }

    #[test]
    fn existing_file_requires_yes() {
        let path = existing_file("confirm");
        assert!(ensure_writable(&path, false, &mut Cursor::new("yes\n")).is_ok());
        assert!(ensure_writable(&path, false, &mut Cursor::new("n\n")).is_err());
        assert!(ensure_writable(&path, true, &mut Cursor::new("")).is_ok());
    }
}
