//! Pipeline stages
//!
//! Two sequential stages over the filesystem:
//!
//! - `loader` — raw dataset to predictor/target tables
//! - `splitter` — stratified train/test partition of those tables
//!
//! Both write their artifacts through `persist`, which verifies every write
//! landed on disk.

pub mod loader;
pub mod persist;
pub mod splitter;

pub use loader::{prepare_base_tables, BaseTables};
pub use persist::persist;
pub use splitter::{split, SplitTables};
