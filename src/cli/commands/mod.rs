pub mod add;
pub mod cell;
pub mod compact;
pub mod config;
pub mod del;
pub mod edit;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod map;
pub mod move_col;
pub mod pick;
pub mod place;
pub mod stats;
pub mod undo;
pub mod unplace;

use crate::config::Config;
use crate::core::WarehouseStore;
use crate::core::column_request::{ColumnChoice, ColumnRequests};
use crate::db::initialize::open_db;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{COLS, ROWS};
use crate::ui::messages::warning;
use std::io::{self, BufRead, Write};

pub type Store = WarehouseStore<DbPool>;

/// Open the configured database and load the warehouse from it.
pub fn open_store(cfg: &Config) -> AppResult<Store> {
    let pool = open_db(&cfg.database)?;
    Ok(WarehouseStore::open(pool))
}

/// Tell the operator when the last commit changed more than they asked for
/// or could not be saved.
pub(crate) fn report_commit(store: &Store) {
    let Some(report) = store.last_commit() else {
        return;
    };
    let demoted = report.sanitized.demoted();
    if demoted > 0 {
        warning(format!(
            "{demoted} product(s) had an invalid or duplicate cell and were moved off the grid."
        ));
    }
    if !report.persisted {
        warning("Changes could not be saved; they will be lost when this command exits.");
    }
}

/// Best-effort audit line on the store's own connection.
pub(crate) fn audit_store(store: &Store, operation: &str, target: &str, message: &str) {
    audit(&store.storage().conn, operation, target, message);
}

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation<R: BufRead>(prompt: &str, input: &mut R) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if input.read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

/// 1-based column from the command line to a grid index.
pub(crate) fn column_index(col: i64) -> AppResult<i64> {
    if (1..=COLS).contains(&col) {
        Ok(col - 1)
    } else {
        Err(AppError::InvalidColumn(col))
    }
}

/// 1-based row from the command line to a grid index.
pub(crate) fn row_index(row: i64) -> Option<i64> {
    (1..=ROWS).contains(&row).then(|| row - 1)
}

/// Settle a column choice: from `--col` when given, otherwise by asking on
/// `input`. Returns the 0-based column.
///
/// A CLI process has one outstanding request at a time, so the mailbox here
/// never sees a superseded request; it only settles validation and cancel.
pub(crate) fn choose_column<R: BufRead>(
    store: &Store,
    given: Option<i64>,
    input: &mut R,
) -> AppResult<i64> {
    let mut requests = ColumnRequests::new();
    let request = requests.issue();

    let answer = match given {
        Some(col) => Some(column_index(col)?),
        None => prompt_column(store, input)?,
    };

    match requests.resolve(request, answer) {
        ColumnChoice::Chosen(col) => Ok(col),
        ColumnChoice::Cancelled | ColumnChoice::Stale => Err(AppError::Cancelled),
    }
}

fn prompt_column<R: BufRead>(store: &Store, input: &mut R) -> AppResult<Option<i64>> {
    let free: Vec<String> = store
        .columns_with_space()
        .iter()
        .map(|c| (c + 1).to_string())
        .collect();
    if free.is_empty() {
        println!("No column has free rows.");
    } else {
        println!("Columns with free rows: {}", free.join(", "));
    }
    print!("Column [1-{COLS}, empty to cancel]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    input.read_line(&mut s)?;
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    Ok(s.parse::<i64>().ok().map(|c| c - 1))
}
