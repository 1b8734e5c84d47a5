//! Input snapshot data structures and loading

mod data;
pub mod loader;

pub use data::{add_years, InputSnapshot};
pub use loader::{load_snapshot_json, load_snapshots, load_snapshots_from_reader};
