use crate::core::store::WarehouseStore;
use crate::db::kv::KeyValueStore;
use crate::errors::{AppError, AppResult};
use serde_json::Value;
use std::fs;
use std::path::Path;

pub struct ImportLogic;

impl ImportLogic {
    /// Parse an import payload. Only a JSON array is accepted.
    pub fn parse(text: &str) -> AppResult<Vec<Value>> {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => Ok(items),
            Ok(_) => Err(AppError::InvalidImport("invalid file format".into())),
            Err(_) => Err(AppError::InvalidImport("invalid JSON file".into())),
        }
    }

    /// Read `path` and replace the product list with its contents.
    /// On any rejection the store is left untouched.
    pub fn import_file<S: KeyValueStore>(
        store: &mut WarehouseStore<S>,
        path: &Path,
    ) -> AppResult<usize> {
        let text = fs::read_to_string(path)?;
        let items = Self::parse(&text)?;
        Ok(store.import_products(&items))
    }
}
