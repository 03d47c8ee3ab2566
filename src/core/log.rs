use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::formatting::{pad_right, truncate};
use ansi_term::Colour;
use unicode_width::UnicodeWidthStr;

/// Widest operation/target column before truncation.
const OP_WIDTH_MAX: usize = 60;

/// Colour for an audit operation name
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" | "cell" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "place" | "move" | "unplace" | "compact" => Colour::Cyan,
        "pick" | "done" => Colour::Blue,
        "undo" | "import" => Colour::RGB(255, 153, 51),
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let rows: Vec<(i64, String, String, String, String)> = entries
            .into_iter()
            .map(|e| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(e.date);
                let op_target = if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                };
                (e.id, date, e.operation, truncate(&op_target, OP_WIDTH_MAX), e.message)
            })
            .collect();

        let id_w = rows.iter().map(|r| r.0.to_string().len()).max().unwrap_or(1);
        let date_w = rows.iter().map(|r| r.1.len()).max().unwrap_or(10);
        let op_w = rows
            .iter()
            .map(|r| UnicodeWidthStr::width(r.3.as_str()))
            .max()
            .unwrap_or(10);

        println!("📜 Internal log:\n");

        for (id, date, operation, op_target, message) in rows {
            // only the operation word is coloured
            let padded = pad_right(&op_target, op_w);
            let colored = match padded.strip_prefix(operation.as_str()) {
                Some(rest) => format!(
                    "{}{}",
                    color_for_operation(&operation).paint(operation.as_str()),
                    rest
                ),
                None => padded.clone(),
            };

            println!(
                "{:>id_w$}: {:<date_w$} | {} => {}",
                id,
                date,
                colored,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
