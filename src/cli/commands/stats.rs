use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats::StatsLogic;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{RESET, color_for_expiry, colorize_optional};
use crate::utils::formatting::bold;
use chrono::Local;

/// Products listed per expiry bucket.
const BUCKET_LIMIT: usize = 12;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Stats) {
        let store = open_store(cfg)?;
        let stats = StatsLogic::compute(store.products(), store.events(), Local::now());
        let t = &stats.totals;

        header("Warehouse statistics");
        println!("{}     {}", bold("Total:"), t.total);
        println!("{}    {}", bold("Placed:"), t.placed);
        println!("{}  {}", bold("Unplaced:"), t.unplaced);
        println!("{}   {}", bold("Picking:"), t.picking);
        let dwell = stats
            .avg_dwell_days
            .map_or_else(|| "-".to_string(), |d| format!("{d} days"));
        println!("{} {}", bold("Avg dwell:"), colorize_optional(&dwell));

        for (title, ranking) in [
            ("Most added", &stats.top_added),
            ("Most removed", &stats.top_removed),
        ] {
            println!("\n{}", bold(title));
            if ranking.is_empty() {
                println!("  {}", colorize_optional("-"));
            }
            for (i, (name, n)) in ranking.iter().enumerate() {
                println!("  {:>2}. {name} ({n})", i + 1);
            }
        }

        if !stats.expiry_buckets.is_empty() {
            println!("\n{}", bold("Expiry"));
        }
        for (class, products) in &stats.expiry_buckets {
            println!(
                "  {}{} {} ({}){}",
                color_for_expiry(*class),
                class.mark(),
                class.label(),
                products.len(),
                RESET
            );
            for p in products.iter().take(BUCKET_LIMIT) {
                println!("      {} · {} · {}", p.display_name(), p.lot, p.expiry_text);
            }
            if products.len() > BUCKET_LIMIT {
                println!("      … {} more", products.len() - BUCKET_LIMIT);
            }
        }
    }
    Ok(())
}
