use crate::cli::commands::{audit_store, open_store, report_commit};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

/// Edit a product's fields; fields not given keep their value.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        name,
        lot,
        expiry,
    } = cmd
    {
        let mut store = open_store(cfg)?;
        let id = store.resolve_id(id)?;

        let current = store
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::ProductNotFound(id.clone()))?;

        store.edit_product(
            &id,
            name.as_deref().unwrap_or(&current.name),
            lot.as_deref().unwrap_or(&current.lot),
            expiry.as_deref().unwrap_or(&current.expiry_text),
        )?;

        report_commit(&store);
        audit_store(&store, "edit", &id, "Edited product fields");
        success(format!("Product {id} updated."));
    }
    Ok(())
}
