//! SQLite-backed document store.
//!
//! Each document type lives in its own table. The typed document is stored as a
//! JSON text column next to a few indexed columns (`reference`, `status`,
//! timestamps). Writes go through an explicit [`UnitOfWork`].
//!
//! ## Error Mapping
//!
//! | SQLx error | StoreError |
//! |---|---|
//! | `RowNotFound` | `NotFound` |
//! | anything else | `Database` (with the failing operation) |
//!
//! Stored JSON that no longer decodes into its document type is `Serialization`.

mod schema;
mod sqlite;

use core::fmt::{Debug, Display};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use tradedocs_core::{ExportInvoiceId, PackingListId, ProformaInvoiceId};
use tradedocs_export::ExportInvoice;
use tradedocs_packing::PackingList;
use tradedocs_proforma::ProformaInvoice;

pub use schema::ensure_schema;
pub use sqlite::{DocumentStore, UnitOfWork};

/// Status every record is created with.
pub const DEFAULT_STATUS: &str = "Completed";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("database error in {operation}: {source}")]
    Database {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("stored document is malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub(crate) fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        source => StoreError::Database { operation, source },
    }
}

/// A document type the store knows how to persist.
pub trait StoredDocument: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    /// Table holding this document type.
    const TABLE: &'static str;

    type Id: From<i64> + Into<i64> + Copy + PartialEq + Debug + Display + Send + Sync;

    /// Human reference number (list or invoice number), if any.
    fn reference(&self) -> Option<&str>;
}

impl StoredDocument for PackingList {
    const TABLE: &'static str = "packing_lists";
    type Id = PackingListId;

    fn reference(&self) -> Option<&str> {
        PackingList::reference(self)
    }
}

impl StoredDocument for ProformaInvoice {
    const TABLE: &'static str = "proforma_invoices";
    type Id = ProformaInvoiceId;

    fn reference(&self) -> Option<&str> {
        ProformaInvoice::reference(self)
    }
}

impl StoredDocument for ExportInvoice {
    const TABLE: &'static str = "export_invoices";
    type Id = ExportInvoiceId;

    fn reference(&self) -> Option<&str> {
        ExportInvoice::reference(self)
    }
}

/// A persisted document with its record metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Stored<D: StoredDocument> {
    pub id: D::Id,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub document: D,
}
