//! `tradedocs-core`: shared building blocks for the trade document domains.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod numeric;
pub mod text;
pub mod words;

pub use error::{DomainError, DomainResult};
pub use id::{ExportInvoiceId, PackingListId, ProformaInvoiceId};
pub use numeric::{format2, lenient_f64, optional_f64, round2, sanitized_f64, value_text};
pub use text::{non_blank, optional_text};
pub use words::amount_in_words;
