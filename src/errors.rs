//! Unified application error type.
//! All modules (models, core, shell, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use crate::core::validation::FieldErrors;
use crate::models::record::RecordId;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Forms and records
    // ---------------------------
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("No {kind} with id {id}")]
    NotFound { kind: &'static str, id: RecordId },

    #[error("Unknown field '{field}' for {kind}")]
    UnknownField { kind: &'static str, field: String },

    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidField { field: String, value: String },

    #[error("No form is open: use `add` or `edit <id>` first")]
    NoOpenForm,

    #[error("Operation not supported: {0}")]
    Unsupported(String),

    // ---------------------------
    // Column editor
    // ---------------------------
    #[error("No column with id '{0}'")]
    ColumnNotFound(String),

    #[error("Column label must not be empty")]
    EmptyColumnLabel,

    // ---------------------------
    // Wizard
    // ---------------------------
    #[error("Wizard error: {0}")]
    Wizard(String),

    #[error("No wizard is running: use `wizard start` or `wizard edit <id>`")]
    NoWizard,

    // ---------------------------
    // Shell / CLI parsing
    // ---------------------------
    #[error("Unknown screen: {0}")]
    UnknownScreen(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Seed / export errors
    // ---------------------------
    #[error("Seed file error: {0}")]
    Seed(String),

    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
