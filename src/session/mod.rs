// ABOUTME: Session module — local storage on disk and the login session kept in it.
// ABOUTME: Provides the key/value store plus typed session accessors.

pub mod persistence;
pub mod store;

pub use persistence::{Session, SessionStore};
pub use store::{FileStore, KeyValueStore, MemoryStore, StorageError};
