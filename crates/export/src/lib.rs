//! Export invoice ("ZC exporter") domain module.
//!
//! A flat shipping/customs record plus its line items, and the row layout used
//! to print it on a fixed-height invoice form.

pub mod invoice;
pub mod layout;

pub use invoice::{ExportInvoice, ExportInvoiceChanges, ExportInvoiceDraft};
pub use layout::{DefaultRowLayout, InvoiceRow, InvoiceRowLayout, PreparedInvoice};
