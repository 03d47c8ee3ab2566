use crate::cli::commands::{audit_store, open_store, report_commit};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Unplace { id } = cmd {
        let mut store = open_store(cfg)?;
        let id = store.resolve_id(id)?;

        store.unplace(&id)?;

        report_commit(&store);
        audit_store(&store, "unplace", &id, "Removed from the grid");
        success(format!("Product {id} removed from the grid."));
    }
    Ok(())
}
