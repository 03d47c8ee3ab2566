use crate::cli::commands::{audit_store, open_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::path::expand_tilde;
use std::io;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let store = open_store(cfg)?;
        let file = file
            .as_deref()
            .map(|f| expand_tilde(f).to_string_lossy().to_string());

        let path = ExportLogic::export(
            store.products(),
            *format,
            file.as_deref(),
            *force,
            &mut io::stdin().lock(),
        )?;

        audit_store(
            &store,
            "export",
            format.as_str(),
            &format!("{} products to {}", store.products().len(), path.display()),
        );
    }
    Ok(())
}
