use super::cell::Cell;

/// Where a product currently is.
///
/// A product in picking never owns a grid cell; it only remembers the cell it
/// left so that it can go back there when picking is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// On the shelf: tracked, but not on the floor grid.
    #[default]
    Unplaced,
    /// Occupying a grid cell.
    Placed(Cell),
    /// Pulled out for order fulfilment.
    Picking { saved: Option<Cell> },
}

impl Placement {
    /// The occupied cell, if any. Picking products never report one.
    pub fn cell(&self) -> Option<Cell> {
        match self {
            Placement::Placed(cell) => Some(*cell),
            _ => None,
        }
    }

    pub fn is_picking(&self) -> bool {
        matches!(self, Placement::Picking { .. })
    }
}
