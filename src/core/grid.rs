//! Grid Index: derived map from cell to product id.

use crate::models::{Cell, Product};
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct GridIndex {
    cells: HashMap<Cell, String>,
}

impl GridIndex {
    /// Recompute from scratch. Picking and out-of-range products are
    /// ignored; if two products claim a cell the first one in list order wins.
    pub fn rebuild(products: &[Product]) -> Self {
        let mut cells = HashMap::new();
        for p in products {
            if let Some(cell) = p.cell().filter(Cell::in_bounds) {
                cells.entry(cell).or_insert_with(|| p.id.clone());
            }
        }
        Self { cells }
    }

    pub fn id_at(&self, cell: Cell) -> Option<&str> {
        self.cells.get(&cell).map(String::as_str)
    }

    /// Product recorded at `cell`. A recorded id that no longer resolves
    /// reads as an empty cell.
    pub fn lookup<'a>(&self, products: &'a [Product], cell: Cell) -> Option<&'a Product> {
        let id = self.id_at(cell)?;
        products.iter().find(|p| p.id == id)
    }

    /// Number of distinct occupied cells.
    pub fn count(&self) -> usize {
        self.cells.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Cell, &String)> {
        self.cells.iter()
    }
}
