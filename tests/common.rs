#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use shelfmap::core::WarehouseStore;
use shelfmap::db::initialize::init_db;
use shelfmap::db::kv::KeyValueStore;
use shelfmap::db::pool::DbPool;
use shelfmap::errors::PersistError;
use shelfmap::models::{Cell, Product};
use std::collections::{HashMap, HashSet};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn cmd() -> Command {
    cargo_bin_cmd!("shelfmap")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shelfmap.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `init` a fresh database at `db_path` in test mode.
pub fn init_test_db(db_path: &str) {
    cmd()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Add a product through the CLI and return its id.
pub fn add_product(db_path: &str, name: &str, lot: &str, expiry: &str) -> String {
    let out = cmd()
        .args([
            "--db", db_path, "add", "--name", name, "--lot", lot, "--expiry", expiry,
        ])
        .output()
        .expect("run add");
    assert!(out.status.success(), "add failed: {:?}", out);
    let stdout = String::from_utf8_lossy(&out.stdout);
    stdout
        .split("with id ")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .expect("id in add output")
        .to_string()
}

/// Store over a fresh in-memory SQLite database.
pub fn memory_store() -> WarehouseStore<DbPool> {
    let pool = DbPool::in_memory().expect("in-memory db");
    init_db(&pool.conn).expect("schema");
    WarehouseStore::open(pool)
}

/// Plain map-backed storage.
#[derive(Default)]
pub struct MemoryKv {
    pub values: HashMap<String, String>,
}

impl KeyValueStore for MemoryKv {
    fn get(&mut self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.values.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage that reads as empty and refuses every write.
pub struct FailingKv;

impl KeyValueStore for FailingKv {
    fn get(&mut self, _key: &str) -> Result<Option<String>, PersistError> {
        Ok(None)
    }

    fn put(&mut self, _key: &str, _value: &str) -> Result<(), PersistError> {
        Err(PersistError::Unavailable("quota exceeded".into()))
    }
}

/// Storage that serves preloaded values and refuses every write.
#[derive(Default)]
pub struct ReadOnlyKv {
    pub values: HashMap<String, String>,
}

impl KeyValueStore for ReadOnlyKv {
    fn get(&mut self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.values.get(key).cloned())
    }

    fn put(&mut self, _key: &str, _value: &str) -> Result<(), PersistError> {
        Err(PersistError::Unavailable("read-only storage".into()))
    }
}

/// Uniqueness, picking exclusivity and index fidelity.
pub fn assert_grid_invariants<S: KeyValueStore>(store: &WarehouseStore<S>) {
    let mut seen: HashSet<Cell> = HashSet::new();
    for p in store.products() {
        if let Some(cell) = p.cell() {
            assert!(cell.in_bounds(), "{} out of bounds at {cell}", p.id);
            assert!(seen.insert(cell), "two products share {cell}");
        }
        if p.in_picking() {
            assert!(p.cell().is_none());
            let wire = serde_json::to_value(p).expect("serialize");
            assert!(wire.get("row").is_none() && wire.get("col").is_none());
        }
    }

    for (cell, id) in store.grid().iter() {
        let p: &Product = store.get(id).expect("indexed id resolves");
        assert_eq!(p.cell(), Some(*cell));
        assert!(!p.in_picking());
    }
    assert_eq!(store.grid().count(), seen.len());
}

/// Occupied rows of `col`, ascending.
pub fn rows_in_column<S: KeyValueStore>(store: &WarehouseStore<S>, col: i64) -> Vec<i64> {
    let mut rows: Vec<i64> = store
        .products()
        .iter()
        .filter_map(|p| p.cell())
        .filter(|c| c.col == col)
        .map(|c| c.row)
        .collect();
    rows.sort();
    rows
}
