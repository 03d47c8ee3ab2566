pub mod column_request;
pub mod commit;
pub mod expiry;
pub mod grid;
pub mod import;
pub mod log;
pub mod map;
pub mod normalize;
pub mod placement;
pub mod sanitize;
pub mod search;
pub mod stats;
pub mod store;
pub mod undo;

pub use commit::{CommitOptions, CommitReport};
pub use store::WarehouseStore;
