use crate::errors::{AppError, AppResult};
use crate::models::Screen;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub mod check;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Per-screen page size overrides, keyed by screen name.
    #[serde(default = "default_page_sizes")]
    pub page_sizes: BTreeMap<String, usize>,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
    #[serde(default = "default_max_cell_width")]
    pub max_cell_width: usize,
    /// Seed file used when `--seed` is not given.
    #[serde(default)]
    pub default_seed: Option<String>,
}

fn default_page_size() -> usize {
    10
}
fn default_page_sizes() -> BTreeMap<String, usize> {
    BTreeMap::from([(Screen::BudgetTypes.as_str().to_string(), 5)])
}
fn default_separator_char() -> String {
    "-".to_string()
}
fn default_max_cell_width() -> usize {
    40
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_sizes: default_page_sizes(),
            separator_char: default_separator_char(),
            max_cell_width: default_max_cell_width(),
            default_seed: None,
        }
    }
}

impl Config {
    /// Return the configuration directory (`~/.admindesk`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".admindesk")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("admindesk.conf")
    }

    /// Page size for a screen: override if present, else the global one.
    pub fn page_size_for(&self, screen: Screen) -> usize {
        self.page_sizes
            .get(screen.as_str())
            .copied()
            .unwrap_or(self.page_size)
            .max(1)
    }

    /// Parse the config file. `page_sizes` keys that name no screen are
    /// kept and ignored; `config --check` reports them.
    pub fn from_yaml(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content).map_err(|_| AppError::ConfigLoad)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        Self::from_yaml(&content)
    }

    /// Write the default configuration file (unless `is_test`) and return its path.
    pub fn init_all(is_test: bool) -> AppResult<PathBuf> {
        let path = Self::config_file();
        if is_test {
            return Ok(path);
        }

        fs::create_dir_all(Self::config_dir())?;
        let yaml = serde_yaml::to_string(&Self::default())?;
        let mut file = fs::File::create(&path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;
        Ok(path)
    }
}
