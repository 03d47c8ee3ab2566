//! Placement Engine: every operation that changes where a product is.
//!
//! Each mutating operation snapshots for undo, mutates, then commits.
//! Precondition failures (unknown id, bad column, picking conflict, full
//! column on a plain place) are reported before anything is touched.

use crate::core::commit::CommitOptions;
use crate::core::normalize::normalize_records;
use crate::core::store::WarehouseStore;
use crate::db::kv::KeyValueStore;
use crate::errors::{AppError, AppResult};
use crate::models::cell::is_valid_column;
use crate::models::{COLS, Cell, EventKind, Placement, Product, ROWS};
use serde_json::Value;

/// Close row gaps in `col`: its non-picking products get rows `0..k` in
/// their current row order. Anything beyond the grid height is unplaced.
pub fn compact_column_in_place(products: &mut [Product], col: i64) {
    let mut items: Vec<(i64, usize)> = products
        .iter()
        .enumerate()
        .filter_map(|(i, p)| match p.placement {
            Placement::Placed(c) if c.col == col => Some((c.row, i)),
            _ => None,
        })
        .collect();
    items.sort_by_key(|&(row, _)| row);

    for (slot, (_, i)) in items.into_iter().enumerate() {
        let slot = slot as i64;
        products[i].placement = if slot < ROWS {
            Placement::Placed(Cell::new(slot, col))
        } else {
            Placement::Unplaced
        };
    }
}

/// First row in `col`, top-down, that no non-picking product occupies.
pub fn first_free_row(products: &[Product], col: i64) -> Option<i64> {
    (0..ROWS).find(|&r| {
        let cell = Cell::new(r, col);
        !products.iter().any(|p| p.cell() == Some(cell))
    })
}

fn check_column(col: i64) -> AppResult<()> {
    if is_valid_column(col) {
        Ok(())
    } else {
        Err(AppError::InvalidColumn(col))
    }
}

impl<S: KeyValueStore> WarehouseStore<S> {
    /// Add an unplaced product at the front of the list.
    ///
    /// Returns `None`, without touching anything, when name, lot and expiry
    /// are all blank.
    pub fn add_product(&mut self, name: &str, lot: &str, expiry_text: &str) -> Option<String> {
        let (name, lot, expiry_text) = (name.trim(), lot.trim(), expiry_text.trim());
        if name.is_empty() && lot.is_empty() && expiry_text.is_empty() {
            return None;
        }

        self.snapshot();
        let product = Product::new(name, lot, expiry_text);
        let id = product.id.clone();
        self.log_event(EventKind::Add, &product);
        self.products.insert(0, product);
        self.commit(CommitOptions::with_events());
        Some(id)
    }

    /// Replace name, lot and expiry of a product not in picking.
    pub fn edit_product(
        &mut self,
        id: &str,
        name: &str,
        lot: &str,
        expiry_text: &str,
    ) -> AppResult<()> {
        let idx = self.index_of(id)?;
        if self.products[idx].in_picking() {
            return Err(AppError::InPicking(self.products[idx].display_name().to_string()));
        }

        self.snapshot();
        let p = &mut self.products[idx];
        p.name = name.trim().to_string();
        p.lot = lot.trim().to_string();
        p.expiry_text = expiry_text.trim().to_string();
        let edited = p.clone();
        self.log_event(EventKind::Edit, &edited);
        self.commit(CommitOptions::with_events());
        Ok(())
    }

    /// Write into a specific cell: create a product there if the cell is
    /// empty, otherwise edit the resident product in place.
    ///
    /// Returns the id of the product in the cell, or `None` when the cell was
    /// empty and all fields were blank (nothing happens in that case).
    pub fn place_at_cell(
        &mut self,
        cell: Cell,
        name: &str,
        lot: &str,
        expiry_text: &str,
    ) -> AppResult<Option<String>> {
        if !cell.in_bounds() {
            return Err(AppError::InvalidCell {
                row: cell.row.saturating_add(1),
                col: cell.col.saturating_add(1),
            });
        }
        let (name, lot, expiry_text) = (name.trim(), lot.trim(), expiry_text.trim());

        let resident = self.product_at(cell).map(|p| p.id.clone());
        match resident {
            None => {
                if name.is_empty() && lot.is_empty() && expiry_text.is_empty() {
                    return Ok(None);
                }
                self.snapshot();
                let product = Product::new_at(cell, name, lot, expiry_text);
                let id = product.id.clone();
                self.log_event(EventKind::Add, &product);
                self.products.insert(0, product);
                self.commit(CommitOptions::with_events());
                Ok(Some(id))
            }
            Some(id) => {
                let idx = self.index_of(&id)?;
                self.snapshot();
                let p = &mut self.products[idx];
                p.name = name.to_string();
                p.lot = lot.to_string();
                p.expiry_text = expiry_text.to_string();
                let edited = p.clone();
                self.log_event(EventKind::Edit, &edited);
                self.commit(CommitOptions::with_events());
                Ok(Some(id))
            }
        }
    }

    /// Put an unplaced product into the first free row of `col`.
    pub fn place_in_column(&mut self, id: &str, col: i64) -> AppResult<Cell> {
        check_column(col)?;
        let idx = self.index_of(id)?;
        let p = &self.products[idx];
        match p.placement {
            Placement::Picking { .. } => {
                return Err(AppError::InPicking(p.display_name().to_string()));
            }
            Placement::Placed(c) => return Err(AppError::AlreadyPlaced(c.label())),
            Placement::Unplaced => {}
        }

        let row = first_free_row(&self.products, col).ok_or(AppError::ColumnFull { col })?;

        self.snapshot();
        let cell = Cell::new(row, col);
        self.products[idx].placement = Placement::Placed(cell);
        self.commit(CommitOptions::default());
        Ok(cell)
    }

    /// Take a product off the grid and close the gap it leaves.
    pub fn unplace(&mut self, id: &str) -> AppResult<()> {
        let idx = self.index_of(id)?;
        let Some(origin) = self.products[idx].cell() else {
            return Err(AppError::NotPlaced(self.products[idx].display_name().to_string()));
        };

        self.snapshot();
        self.products[idx].placement = Placement::Unplaced;
        compact_column_in_place(&mut self.products, origin.col);
        self.commit(CommitOptions::default());
        Ok(())
    }

    /// Move a product to the bottom of `col`.
    ///
    /// When the target column is full the product is put back at the first
    /// free row of its origin column (or left unplaced if that is full too),
    /// the result is committed, and [`AppError::ColumnFull`] is returned.
    pub fn move_to_column(&mut self, id: &str, col: i64) -> AppResult<Cell> {
        check_column(col)?;
        let idx = self.index_of(id)?;
        if self.products[idx].in_picking() {
            return Err(AppError::InPicking(self.products[idx].display_name().to_string()));
        }

        self.snapshot();
        let origin = self.products[idx].cell();

        if let Some(o) = origin {
            self.products[idx].placement = Placement::Unplaced;
            compact_column_in_place(&mut self.products, o.col);
        }
        compact_column_in_place(&mut self.products, col);

        let Some(row) = first_free_row(&self.products, col) else {
            if let Some(o) = origin {
                compact_column_in_place(&mut self.products, o.col);
                if let Some(back) = first_free_row(&self.products, o.col) {
                    self.products[idx].placement = Placement::Placed(Cell::new(back, o.col));
                }
            }
            self.commit(CommitOptions::default());
            return Err(AppError::ColumnFull { col });
        };

        let cell = Cell::new(row, col);
        self.products[idx].placement = Placement::Placed(cell);
        self.commit(CommitOptions::default());
        Ok(cell)
    }

    /// Pull a product out for picking, remembering the cell it leaves.
    ///
    /// Rejected when a different product with the same trimmed name is
    /// already in picking. A product already in picking is left as is.
    pub fn enter_picking(&mut self, id: &str) -> AppResult<()> {
        let idx = self.index_of(id)?;
        let p = &self.products[idx];
        if p.in_picking() {
            return Ok(());
        }

        let name = p.key_name();
        if self
            .products
            .iter()
            .any(|q| q.id != p.id && q.in_picking() && q.key_name() == name)
        {
            return Err(AppError::PickingConflict {
                name: name.to_string(),
            });
        }

        self.snapshot();
        let origin = self.products[idx].cell();
        self.products[idx].placement = Placement::Picking { saved: origin };
        if let Some(o) = origin {
            compact_column_in_place(&mut self.products, o.col);
        }
        self.commit(CommitOptions::default());
        Ok(())
    }

    /// Picking complete: return the product to its saved cell, if any.
    ///
    /// The saved cell is not checked; if someone took it meanwhile, the
    /// sanitizer settles the collision during the commit. Returns where the
    /// product ended up.
    pub fn exit_picking(&mut self, id: &str) -> AppResult<Placement> {
        let idx = self.index_of(id)?;
        let Placement::Picking { saved } = self.products[idx].placement else {
            return Err(AppError::NotPicking(self.products[idx].display_name().to_string()));
        };

        self.snapshot();
        self.products[idx].placement = saved.map_or(Placement::Unplaced, Placement::Placed);
        self.commit(CommitOptions::default());
        Ok(self.products[idx].placement)
    }

    /// Compact a column as a standalone operation.
    pub fn compact_column(&mut self, col: i64) -> AppResult<()> {
        check_column(col)?;
        self.snapshot();
        compact_column_in_place(&mut self.products, col);
        self.commit(CommitOptions::default());
        Ok(())
    }

    /// Remove a product for good, compacting the column it occupied.
    pub fn delete(&mut self, id: &str) -> AppResult<Product> {
        let idx = self.index_of(id)?;

        self.snapshot();
        let removed = self.products.remove(idx);
        self.log_event(EventKind::Remove, &removed);
        if let Some(c) = removed.cell() {
            compact_column_in_place(&mut self.products, c.col);
        }
        self.commit(CommitOptions::with_events());
        Ok(removed)
    }

    /// Replace the whole product list with normalized `records`.
    /// Returns the number of products kept.
    pub fn import_products(&mut self, records: &[Value]) -> usize {
        self.snapshot();
        self.products = normalize_records(records);
        self.commit(CommitOptions::default());
        self.products.len()
    }

    /// Products occupying `col`, top to bottom.
    pub fn column(&self, col: i64) -> Vec<&Product> {
        (0..ROWS)
            .filter_map(|r| self.product_at(Cell::new(r, col)))
            .collect()
    }

    /// Columns that still have at least one free row.
    pub fn columns_with_space(&self) -> Vec<i64> {
        (0..COLS)
            .filter(|&c| first_free_row(&self.products, c).is_some())
            .collect()
    }
}
