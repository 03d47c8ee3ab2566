use crate::cli::commands::{audit_store, column_index, open_store, report_commit, row_index};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::Cell;
use crate::ui::messages::{success, warning};

/// Write into a specific cell.
///
/// An empty cell gets a new product; an occupied one has its product
/// edited, keeping the fields that were not given.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Cell {
        row,
        col,
        name,
        lot,
        expiry,
    } = cmd
    {
        let invalid = || AppError::InvalidCell {
            row: *row,
            col: *col,
        };
        let r = row_index(*row).ok_or_else(invalid)?;
        let c = column_index(*col).map_err(|_| invalid())?;
        let cell = Cell::new(r, c);

        let mut store = open_store(cfg)?;
        let resident = store.product_at(cell).cloned();

        let pick = |given: &Option<String>, current: Option<&String>| -> String {
            match (given, current) {
                (Some(v), _) => v.clone(),
                (None, Some(cur)) => cur.clone(),
                (None, None) => String::new(),
            }
        };
        let name = pick(name, resident.as_ref().map(|p| &p.name));
        let lot = pick(lot, resident.as_ref().map(|p| &p.lot));
        let expiry = pick(expiry, resident.as_ref().map(|p| &p.expiry_text));

        match store.place_at_cell(cell, &name, &lot, &expiry)? {
            None => warning(format!("Cell {cell} is empty and nothing was given: no change.")),
            Some(id) => {
                report_commit(&store);
                let what = if resident.is_some() { "Updated" } else { "Created" };
                audit_store(&store, "cell", &cell.label(), &format!("{what} product {id}"));
                success(format!("{what} product {id} in {cell}"));
            }
        }
    }
    Ok(())
}
