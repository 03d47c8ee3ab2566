//! Sanitizer: repairs placements before they enter the grid index.

use crate::models::{Cell, Placement, Product};
use std::collections::HashSet;

/// Outcome of one sanitizer pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Ids demoted because their cell was outside the grid.
    pub out_of_bounds: Vec<String>,
    /// Ids demoted because an earlier product already held their cell.
    pub collisions: Vec<String>,
}

impl SanitizeReport {
    pub fn demoted(&self) -> usize {
        self.out_of_bounds.len() + self.collisions.len()
    }
}

/// Demote out-of-range and colliding placements to unplaced.
///
/// Products are visited in list order, which is most-recent-first, so on a
/// collision the earlier product keeps the cell. Nothing is ever deleted.
pub fn sanitize_grid_placements(products: &mut [Product]) -> SanitizeReport {
    let mut occupied: HashSet<Cell> = HashSet::new();
    let mut report = SanitizeReport::default();

    for p in products.iter_mut() {
        let Placement::Placed(cell) = p.placement else {
            continue;
        };

        if !cell.in_bounds() {
            tracing::debug!(id = %p.id, row = cell.row, col = cell.col, "demoting out-of-range placement");
            p.placement = Placement::Unplaced;
            report.out_of_bounds.push(p.id.clone());
            continue;
        }

        if !occupied.insert(cell) {
            tracing::debug!(id = %p.id, cell = %cell, "demoting colliding placement");
            p.placement = Placement::Unplaced;
            report.collisions.push(p.id.clone());
        }
    }

    report
}
