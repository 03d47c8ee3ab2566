use super::product::Product;

/// Which slice of the product list to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFilter {
    #[default]
    All,
    /// Unplaced and not in picking.
    Shelf,
    /// Occupying a grid cell.
    Floor,
    Picking,
}

impl ListFilter {
    /// Parse a filter name; anything unknown means `All`.
    pub fn from_name(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "shelf" | "scaffale" => ListFilter::Shelf,
            "floor" | "terra" => ListFilter::Floor,
            "picking" | "prelievo" => ListFilter::Picking,
            _ => ListFilter::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ListFilter::All => "all",
            ListFilter::Shelf => "shelf",
            ListFilter::Floor => "floor",
            ListFilter::Picking => "picking",
        }
    }

    pub fn matches(&self, p: &Product) -> bool {
        match self {
            ListFilter::All => true,
            ListFilter::Shelf => !p.in_picking() && p.cell().is_none(),
            ListFilter::Floor => p.cell().is_some(),
            ListFilter::Picking => p.in_picking(),
        }
    }
}
