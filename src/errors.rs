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
    // Storage-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Storage error: {0}")]
    Persist(#[from] PersistError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Placement errors
    // ---------------------------
    #[error("Column {} is full: no free rows left", .col + 1)]
    ColumnFull { col: i64 },

    #[error("A product named '{name}' is already in picking")]
    PickingConflict { name: String },

    #[error("Invalid cell R{row}C{col}")]
    InvalidCell { row: i64, col: i64 },

    #[error("Invalid column: {0}")]
    InvalidColumn(i64),

    #[error("Product '{0}' is in picking")]
    InPicking(String),

    #[error("Product is already placed at {0}")]
    AlreadyPlaced(String),

    #[error("Product '{0}' is not placed on the grid")]
    NotPlaced(String),

    #[error("Product '{0}' is not in picking")]
    NotPicking(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("No product matches id '{0}'")]
    ProductNotFound(String),

    #[error("Id prefix '{0}' matches more than one product")]
    AmbiguousId(String),

    // ---------------------------
    // Import / export
    // ---------------------------
    #[error("Import rejected: {0}")]
    InvalidImport(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Interaction
    // ---------------------------
    #[error("Operation cancelled")]
    Cancelled,
}

/// Failure of the key-value persistence layer.
///
/// Only the Persistence Adapter produces it; the commit pipeline logs it
/// and keeps going, so it reaches the operator only on initial load.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("storage backend failure: {0}")]
    Backend(#[from] rusqlite::Error),

    #[error("serialization failure: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type AppResult<T> = Result<T, AppError>;
