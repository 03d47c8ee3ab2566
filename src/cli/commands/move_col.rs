use crate::cli::commands::{audit_store, choose_column, open_store, report_commit};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::io;

/// Move a product to the bottom of another column.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Move { id, col } = cmd {
        let mut store = open_store(cfg)?;
        let id = store.resolve_id(id)?;

        let target = choose_column(&store, *col, &mut io::stdin().lock())?;

        match store.move_to_column(&id, target) {
            Ok(cell) => {
                report_commit(&store);
                audit_store(&store, "move", &id, &format!("Moved to {cell}"));
                success(format!("Product {id} moved to {cell}"));
            }
            Err(e @ AppError::ColumnFull { .. }) => {
                // the rollback was committed
                report_commit(&store);
                let back = store
                    .get(&id)
                    .and_then(|p| p.cell())
                    .map_or_else(|| "unplaced".to_string(), |c| c.label());
                audit_store(&store, "move", &id, &format!("Target full, left at {back}"));
                warning(format!("Product {id} left at: {back}"));
                return Err(e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
