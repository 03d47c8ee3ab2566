use crate::cli::commands::{ask_confirmation, audit_store, open_store, report_commit};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::path::expand_tilde;
use std::io;

/// Replace the whole product list with a JSON file's contents.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file, yes } = cmd {
        let path = expand_tilde(file);
        let mut store = open_store(cfg)?;

        if !*yes && cfg.confirm_destructive {
            let prompt = format!(
                "Replace all {} products with the contents of '{}'?",
                store.products().len(),
                path.display()
            );
            if !ask_confirmation(&prompt, &mut io::stdin().lock()) {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        let count = ImportLogic::import_file(&mut store, &path)?;

        report_commit(&store);
        audit_store(
            &store,
            "import",
            &path.display().to_string(),
            &format!("{count} products imported"),
        );
        success(format!("Imported {count} products from {}", path.display()));
    }
    Ok(())
}
