use crate::cli::commands::{audit_store, column_index, open_store, report_commit};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Compact { col } = cmd {
        let c = column_index(*col)?;
        let mut store = open_store(cfg)?;

        store.compact_column(c)?;

        report_commit(&store);
        audit_store(&store, "compact", &format!("C{col}"), "Column compacted");
        success(format!("Column {col} compacted."));
    }
    Ok(())
}
