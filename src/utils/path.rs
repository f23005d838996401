//! Path utilities: expand ~ and pick a serialization format from the extension.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// `true` for `.yml` / `.yaml` files (case-insensitive).
pub fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|e| {
            let e = e.to_string_lossy().to_ascii_lowercase();
            e == "yml" || e == "yaml"
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_yaml_extensions() {
        assert!(is_yaml(Path::new("seed.yaml")));
        assert!(is_yaml(Path::new("seed.YML")));
        assert!(!is_yaml(Path::new("seed.json")));
        assert!(!is_yaml(Path::new("seed")));
    }
}
