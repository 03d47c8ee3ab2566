use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::expiry::expiry_status;
use crate::core::search::filter_products;
use crate::errors::AppResult;
use crate::models::{ListFilter, Placement, Product};
use crate::utils::colors::{RESET, color_for_expiry};
use crate::utils::table::{Column, Table};
use chrono::{DateTime, Local};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { filter, search } = cmd {
        let store = open_store(cfg)?;

        let filter = filter
            .as_deref()
            .map(ListFilter::from_name)
            .unwrap_or_else(|| cfg.list_filter());
        let rows = filter_products(store.products(), filter, search.as_deref());

        if rows.is_empty() {
            println!("No products ({}).", filter.as_str());
            return Ok(());
        }

        let now = Local::now();
        let mut table = Table::new(vec![
            Column::new("ID"),
            Column::new("NAME"),
            Column::new("LOT"),
            Column::new("EXPIRY"),
            Column::new("WHERE"),
        ]);
        for p in &rows {
            table.add_row(vec![
                short_id(&p.id).to_string(),
                p.display_name().to_string(),
                or_dash(&p.lot),
                or_dash(&p.expiry_text),
                location(p),
            ]);
        }

        let rendered = table.render();
        let mut lines = rendered.lines();
        for header in lines.by_ref().take(2) {
            println!("{header}");
        }
        for (line, p) in lines.zip(&rows) {
            if cfg.show_expiry_marks {
                println!("{line}{}", expiry_suffix(p, now));
            } else {
                println!("{line}");
            }
        }
        println!("\n{} product(s), filter: {}", rows.len(), filter.as_str());
    }
    Ok(())
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn or_dash(s: &str) -> String {
    if s.trim().is_empty() {
        "-".to_string()
    } else {
        s.to_string()
    }
}

fn location(p: &Product) -> String {
    match p.placement {
        Placement::Placed(cell) => cell.label(),
        Placement::Picking { saved: Some(cell) } => format!("picking (from {cell})"),
        Placement::Picking { saved: None } => "picking".to_string(),
        Placement::Unplaced => "shelf".to_string(),
    }
}

fn expiry_suffix(p: &Product, now: DateTime<Local>) -> String {
    match expiry_status(&p.expiry_text, now) {
        Some(s) => format!(
            "{}{} {}d{}",
            color_for_expiry(s.class),
            s.class.mark(),
            s.days,
            RESET
        ),
        None => String::new(),
    }
}
