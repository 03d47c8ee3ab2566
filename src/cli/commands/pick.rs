use crate::cli::commands::{audit_store, open_store, report_commit};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::Placement;
use crate::ui::messages::{info, success};

/// `pick` and `done`: enter and leave picking.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Pick { id } => {
            let mut store = open_store(cfg)?;
            let id = store.resolve_id(id)?;

            if store.get(&id).is_some_and(|p| p.in_picking()) {
                info(format!("Product {id} is already in picking."));
                return Ok(());
            }

            store.enter_picking(&id)?;

            report_commit(&store);
            audit_store(&store, "pick", &id, "Entered picking");
            success(format!("Product {id} is now in picking."));
        }
        Commands::Done { id } => {
            let mut store = open_store(cfg)?;
            let id = store.resolve_id(id)?;

            let placement = store.exit_picking(&id)?;

            report_commit(&store);
            let where_to = match placement {
                Placement::Placed(cell) => format!("back at {cell}"),
                _ => "unplaced".to_string(),
            };
            audit_store(&store, "done", &id, &format!("Picking complete, {where_to}"));
            success(format!("Picking complete: product {id} is {where_to}."));
        }
        _ => {}
    }
    Ok(())
}
