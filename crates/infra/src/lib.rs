//! Infrastructure layer: configuration, SQLite document store, print snapshots.

pub mod config;
pub mod snapshot;
pub mod store;

pub use config::AppConfig;
pub use snapshot::{SnapshotError, SnapshotWriter};
pub use store::{DocumentStore, StoreError, StoreResult, Stored, StoredDocument, UnitOfWork};
