use crate::cli::commands::{audit_store, choose_column, open_store, report_commit};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;
use std::io;

/// Put an unplaced product into the first free row of a column.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Place { id, col } = cmd {
        let mut store = open_store(cfg)?;
        let id = store.resolve_id(id)?;

        let target = choose_column(&store, *col, &mut io::stdin().lock())?;
        let cell = store.place_in_column(&id, target)?;

        report_commit(&store);
        audit_store(&store, "place", &id, &format!("Placed at {cell}"));
        success(format!("Product {id} placed at {cell}"));
    }
    Ok(())
}
