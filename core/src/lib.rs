pub mod persist;
pub mod record;

pub use persist::{find_by_id, load_all, load_all_or_empty, LoadError, SnapshotPaths};
pub use record::{ListItemView, MovieId, MovieRecord};
