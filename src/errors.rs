//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Commit failed for '{record_type}': {source}")]
    Commit {
        record_type: String,
        #[source]
        source: Box<AppError>,
    },

    #[error("Row {id} stored in '{record_type}' but its view could not be refreshed: {source}")]
    Refresh {
        record_type: String,
        id: i64,
        #[source]
        source: Box<AppError>,
    },

    #[error("Delete failed on table '{table}': {source}")]
    Delete {
        table: String,
        #[source]
        source: Box<AppError>,
    },

    // ---------------------------
    // Input errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid value for '{input}': {reason}")]
    InvalidInput { input: String, reason: String },

    #[error("Unknown record type: {0}")]
    UnknownRecordType(String),

    #[error("Unknown page: {0}")]
    UnknownPage(String),

    #[error("Unknown input field: {0}")]
    UnknownInput(String),

    #[error("Row {id} not found in '{table}'")]
    RowNotFound { table: String, id: i64 },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    #[error("Settings error: {0}")]
    Settings(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn invalid_input(input: &str, reason: impl Into<String>) -> Self {
        AppError::InvalidInput {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(e: serde_yaml::Error) -> Self {
        AppError::Settings(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
