//! ASCII rendering of the floor grid.

use crate::core::expiry::expiry_status;
use crate::core::grid::GridIndex;
use crate::models::{COLS, Cell, Product, ROWS};
use crate::utils::formatting::{pad_right, truncate};
use chrono::{DateTime, Local};

/// Inner width of one grid cell, in terminal columns.
pub const CELL_WIDTH: usize = 12;

pub struct MapLogic;

impl MapLogic {
    /// Grid with 1-based axis labels; each cell shows name on the first
    /// line and lot (plus expiry mark) on the second.
    pub fn render(
        products: &[Product],
        grid: &GridIndex,
        show_marks: bool,
        now: DateTime<Local>,
    ) -> String {
        let mut out = format!("Occupied: {}\n\n", grid.count());

        out.push_str("    ");
        for c in 0..COLS {
            out.push(' ');
            out.push_str(&pad_right(&format!("{:^w$}", c + 1, w = CELL_WIDTH), CELL_WIDTH + 1));
        }
        out.push('\n');

        let border = format!(
            "    +{}\n",
            format!("{}+", "-".repeat(CELL_WIDTH + 1)).repeat(COLS as usize)
        );
        out.push_str(&border);

        for r in 0..ROWS {
            let residents: Vec<Option<&Product>> = (0..COLS)
                .map(|c| grid.lookup(products, Cell::new(r, c)))
                .collect();

            let mut names = format!("{:>3} |", r + 1);
            let mut lots = "    |".to_string();
            for p in &residents {
                let (name, lot) = match p {
                    Some(p) => (p.display_name().to_string(), Self::lot_line(p, show_marks, now)),
                    None => (String::new(), String::new()),
                };
                names.push(' ');
                names.push_str(&pad_right(&truncate(&name, CELL_WIDTH), CELL_WIDTH));
                names.push('|');
                lots.push(' ');
                lots.push_str(&pad_right(&truncate(&lot, CELL_WIDTH), CELL_WIDTH));
                lots.push('|');
            }
            out.push_str(&names);
            out.push('\n');
            out.push_str(&lots);
            out.push('\n');
            out.push_str(&border);
        }

        out
    }

    fn lot_line(p: &Product, show_marks: bool, now: DateTime<Local>) -> String {
        let mark = if show_marks {
            expiry_status(&p.expiry_text, now).map(|s| s.class.mark())
        } else {
            None
        };
        match mark {
            Some(m) => format!("{m} {}", p.lot),
            None => p.lot.clone(),
        }
    }
}
