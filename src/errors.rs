//! Unified application error type.
//! All modules (store, sync, core, cli, export) return AppError to keep the
//! error handling consistent; the HTTP client has its own `RemoteError`
//! which converts into it.

use crate::remote::RemoteError;
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
    // Storage-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Storage quota exceeded: {needed} bytes requested, {limit} allowed")]
    StorageFull { needed: usize, limit: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid day type: {0}")]
    InvalidDayType(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("No record found for date {0}")]
    NoRecordForDate(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    // ---------------------------
    // Remote endpoint
    // ---------------------------
    #[error("Remote endpoint error: {0}")]
    Remote(#[from] RemoteError),

    #[error("No backend configured (set one with `timetrack config --set-backend <URL>`)")]
    NoBackend,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
