//! Proforma invoice domain module.
//!
//! Amounts are entered in INR and stored converted to the invoice currency
//! through a fixed divisor table. Pure domain logic: no IO, no HTTP, no storage.

pub mod conversion;
pub mod currency;
pub mod document;
pub mod print;

pub use conversion::{ConvertedAmounts, LineItem, ReferenceAmounts, convert_line_items};
pub use currency::{Currency, DEFAULT_CURRENCY};
pub use document::{ProformaInvoice, ProformaInvoiceChanges, ProformaInvoiceDraft};
pub use print::ProformaPrintView;
