use crate::cli::commands::{audit_store, open_store, report_commit};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Add an unplaced product.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { name, lot, expiry } = cmd {
        let mut store = open_store(cfg)?;

        let Some(id) = store.add_product(name, lot, expiry) else {
            warning("Nothing to add: name, lot and expiry are all empty.");
            return Ok(());
        };

        report_commit(&store);
        audit_store(&store, "add", &id, &format!("Added '{}'", name.trim()));
        success(format!("Product added with id {id}"));
    }
    Ok(())
}
