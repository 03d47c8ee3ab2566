use crate::cli::commands::{audit_store, open_store, report_commit};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Undo) {
        let mut store = open_store(cfg)?;

        if !store.undo() {
            info("Nothing to undo.");
            return Ok(());
        }

        report_commit(&store);
        audit_store(
            &store,
            "undo",
            "",
            &format!("Reverted last change, {} step(s) left", store.undo_len()),
        );
        success(format!(
            "Last change reverted ({} more step(s) available).",
            store.undo_len()
        ));
    }
    Ok(())
}
