//! Persistence module for window layouts
//!
//! Provides snapshot export/import over an abstract key-value string store.

mod snapshot;
mod store;

pub use snapshot::Snapshot;
pub use store::{KeyValueStore, MemoryStore};
