pub mod grid;
pub mod id;
pub mod model;
pub mod storage;
pub mod store;

pub use grid::{GridCell, color_usage, dense_cells, painted_count};
pub use id::{ColorId, ProjectId};
pub use model::*;
pub use storage::{
    JsonFileStorage, MemoryStorage, STORAGE_NAMESPACE, StorageBackend, StorageError,
};
pub use store::{ColorPatch, ProjectStore, StoreState};
