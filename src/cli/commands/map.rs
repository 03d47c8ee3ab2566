use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::map::MapLogic;
use crate::errors::AppResult;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Map) {
        let store = open_store(cfg)?;
        print!(
            "{}",
            MapLogic::render(store.products(), store.grid(), cfg.show_expiry_marks, Local::now())
        );
    }
    Ok(())
}
