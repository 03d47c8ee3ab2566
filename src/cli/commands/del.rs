use crate::cli::commands::{ask_confirmation, audit_store, open_store, report_commit};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::io;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let mut store = open_store(cfg)?;
        let id = store.resolve_id(id)?;

        if !*yes && cfg.confirm_destructive {
            let name = store.get(&id).map(|p| p.display_name().to_string()).unwrap_or_default();
            let prompt = format!("Delete product '{name}' ({id})? It can be restored with `undo`.");
            if !ask_confirmation(&prompt, &mut io::stdin().lock()) {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        let removed = store.delete(&id)?;

        report_commit(&store);
        audit_store(&store, "del", &id, &format!("Deleted '{}'", removed.name));
        success(format!("Product '{}' has been deleted.", removed.display_name()));
    }
    Ok(())
}
