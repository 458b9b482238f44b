//! Storage layer (local key/value blobs).

pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
