use std::sync::Arc;

use tera::Tera;
use thiserror::Error;

use tradedocs_export::DefaultRowLayout;
use tradedocs_infra::{AppConfig, DocumentStore, SnapshotWriter, StoreError};

use super::templates;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to open document store: {0}")]
    Store(#[from] StoreError),

    #[error("failed to load page templates: {0}")]
    Templates(#[from] tera::Error),
}

/// Everything a handler needs, shared through an `Extension`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: DocumentStore,
    pub snapshots: SnapshotWriter,
    pub templates: Arc<Tera>,
    pub layout: DefaultRowLayout,
}

impl AppState {
    pub fn new(store: DocumentStore, snapshots: SnapshotWriter) -> Result<Self, StartupError> {
        Ok(Self {
            store,
            snapshots,
            templates: Arc::new(templates::load()?),
            layout: DefaultRowLayout::default(),
        })
    }

    /// Open the configured database (creating tables as needed) and load templates.
    pub async fn connect(config: &AppConfig) -> Result<Self, StartupError> {
        let store = DocumentStore::connect(&config.database_url, config.db_max_connections).await?;
        Self::new(store, SnapshotWriter::new(&config.snapshot_dir))
    }
}
