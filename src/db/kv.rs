//! Durable key-value storage backing the warehouse state.

use crate::db::pool::DbPool;
use crate::errors::PersistError;
use chrono::Local;
use rusqlite::{OptionalExtension, params};

/// Current product list.
pub const PRODUCTS_KEY: &str = "warehouse_products_v6";
/// Product list written by earlier releases, adopted once on load.
pub const LEGACY_PRODUCTS_KEYS: &[&str] = &["warehouse_products_v5"];
pub const EVENTS_KEY: &str = "warehouse_events_v1";
pub const UNDO_KEY: &str = "warehouse_undo_v1";

/// Minimal string-to-string store.
///
/// Values are JSON documents; the store does not look inside them.
pub trait KeyValueStore {
    fn get(&mut self, key: &str) -> Result<Option<String>, PersistError>;
    fn put(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

impl KeyValueStore for DbPool {
    fn get(&mut self, key: &str) -> Result<Option<String>, PersistError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Local::now().to_rfc3339()],
        )?;
        Ok(())
    }
}
