//! Strongly-typed record identifiers.
//!
//! Records are keyed by the store's integer row id, so every identifier wraps an
//! `i64`. Separate types keep a packaging-list id from being passed where an
//! invoice id is expected.

use serde::{Deserialize, Serialize};

/// Identifier of a packaging list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackingListId(i64);

/// Identifier of a proforma invoice.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProformaInvoiceId(i64);

/// Identifier of an export (ZC exporter) invoice.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExportInvoiceId(i64);

macro_rules! impl_record_newtype {
    ($t:ty) => {
        impl $t {
            pub fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub fn get(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_record_newtype!(PackingListId);
impl_record_newtype!(ProformaInvoiceId);
impl_record_newtype!(ExportInvoiceId);
