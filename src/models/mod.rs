pub mod cell;
pub mod event;
pub mod list_filter;
pub mod placement;
pub mod product;

pub use cell::{COLS, Cell, ROWS};
pub use event::{Event, EventKind};
pub use list_filter::ListFilter;
pub use placement::Placement;
pub use product::{Product, ProductRecord};
