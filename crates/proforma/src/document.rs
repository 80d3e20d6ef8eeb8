use serde::{Deserialize, Serialize};
use serde_json::Value;

use tradedocs_core::{DomainResult, non_blank, optional_text};

use crate::conversion::{ConvertedAmounts, LineItem, ReferenceAmounts, convert_line_items};
use crate::currency::Currency;

/// Proforma invoice as persisted. Amounts are already in `currency`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProformaInvoice {
    pub invoice_date: Option<String>,
    pub invoice_no: Option<String>,
    pub po_wo_number: Option<String>,
    pub our_ref_no: Option<String>,
    pub your_reference_no: Option<String>,
    pub supplier_address: Option<String>,
    pub bill_to_address: Option<String>,
    pub currency: Currency,
    pub amounts: ConvertedAmounts,
    pub country_of_origin: Option<String>,
    pub port_of_embarkation: Option<String>,
    pub port_of_discharge: Option<String>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

/// Create input. Amount fields may be numbers or formatted text.
///
/// The form labels our own reference "yourRefNo" and the customer's
/// "yourReferenceNo"; both spellings are kept on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProformaInvoiceDraft {
    #[serde(default, deserialize_with = "optional_text")]
    pub invoice_date: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub invoice_no: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub po_wo_number: Option<String>,
    #[serde(default, rename = "yourRefNo", deserialize_with = "optional_text")]
    pub our_ref_no: Option<String>,
    #[serde(default, rename = "yourReferenceNo", deserialize_with = "optional_text")]
    pub your_reference_no: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub supplier_address: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub bill_to_address: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub currency: Option<String>,
    #[serde(default)]
    pub total_amount: Option<Value>,
    #[serde(default)]
    pub advance_amount: Option<Value>,
    #[serde(default)]
    pub received_amount: Option<Value>,
    #[serde(default, deserialize_with = "optional_text")]
    pub country_of_origin: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub port_of_embarkation: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub port_of_discharge: Option<String>,
    #[serde(default)]
    pub line_items: Option<Value>,
}

/// Partial update; same wire shape as [`ProformaInvoiceDraft`].
pub type ProformaInvoiceChanges = ProformaInvoiceDraft;

impl ProformaInvoiceDraft {
    fn reference_amounts(&self) -> ReferenceAmounts {
        ReferenceAmounts::from_values(
            self.total_amount.as_ref(),
            self.advance_amount.as_ref(),
            self.received_amount.as_ref(),
        )
    }

    fn touches_amounts(&self) -> bool {
        self.total_amount.is_some() || self.advance_amount.is_some() || self.received_amount.is_some()
    }

    pub fn into_document(self) -> DomainResult<ProformaInvoice> {
        let currency = Currency::resolve([self.currency.as_deref()]);
        let amounts = self.reference_amounts().convert(&currency);
        let line_items = self
            .line_items
            .as_ref()
            .map(|raw| convert_line_items(raw, &currency))
            .unwrap_or_default();

        Ok(ProformaInvoice {
            invoice_date: self.invoice_date,
            invoice_no: self.invoice_no,
            po_wo_number: self.po_wo_number,
            our_ref_no: self.our_ref_no,
            your_reference_no: self.your_reference_no,
            supplier_address: self.supplier_address,
            bill_to_address: self.bill_to_address,
            currency,
            amounts,
            country_of_origin: self.country_of_origin,
            port_of_embarkation: self.port_of_embarkation,
            port_of_discharge: self.port_of_discharge,
            line_items,
        })
    }
}

impl ProformaInvoice {
    pub fn reference(&self) -> Option<&str> {
        non_blank(self.invoice_no.as_deref())
    }

    /// Apply a partial update.
    ///
    /// The currency resolves to the given code, then the stored one. Amounts are
    /// re-derived from the body when any amount field is present (absent ones
    /// count as zero); line items are re-converted when `lineItems` is present.
    /// Otherwise the stored converted values are kept untouched.
    pub fn apply(&mut self, changes: ProformaInvoiceChanges) -> DomainResult<()> {
        self.currency = Currency::resolve([changes.currency.as_deref(), Some(self.currency.code())]);
        if changes.touches_amounts() {
            self.amounts = changes.reference_amounts().convert(&self.currency);
        }
        if let Some(raw) = &changes.line_items {
            self.line_items = convert_line_items(raw, &self.currency);
        }

        replace(&mut self.invoice_date, changes.invoice_date);
        replace(&mut self.invoice_no, changes.invoice_no);
        replace(&mut self.po_wo_number, changes.po_wo_number);
        replace(&mut self.our_ref_no, changes.our_ref_no);
        replace(&mut self.your_reference_no, changes.your_reference_no);
        replace(&mut self.supplier_address, changes.supplier_address);
        replace(&mut self.bill_to_address, changes.bill_to_address);
        replace(&mut self.country_of_origin, changes.country_of_origin);
        replace(&mut self.port_of_embarkation, changes.port_of_embarkation);
        replace(&mut self.port_of_discharge, changes.port_of_discharge);
        Ok(())
    }
}

fn replace(slot: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(body: Value) -> ProformaInvoiceDraft {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn create_defaults_to_inr_without_conversion() {
        let invoice = draft(json!({"totalAmount": "1500", "advanceAmount": 500}))
            .into_document()
            .unwrap();
        assert_eq!(invoice.currency.code(), "INR");
        assert_eq!(invoice.amounts.total, 1500.0);
        assert_eq!(invoice.amounts.receivable, 1000.0);
        assert_eq!(invoice.amounts.balance, 1000.0);
        assert!(invoice.line_items.is_empty());
    }

    #[test]
    fn reference_fields_keep_their_wire_names() {
        let invoice = draft(json!({"yourRefNo": "OUR-1", "yourReferenceNo": "THEIRS-2", "invoiceNo": 77}))
            .into_document()
            .unwrap();
        assert_eq!(invoice.our_ref_no.as_deref(), Some("OUR-1"));
        assert_eq!(invoice.your_reference_no.as_deref(), Some("THEIRS-2"));
        assert_eq!(invoice.reference(), Some("77"));
    }

    #[test]
    fn create_converts_lines_and_amounts() {
        let invoice = draft(json!({
            "currency": " usd ",
            "totalAmount": 900,
            "lineItems": [{"lineNo": 1, "quantity": "1", "unitRate": "900", "total": "900"}]
        }))
        .into_document()
        .unwrap();
        assert_eq!(invoice.currency.code(), "USD");
        assert_eq!(invoice.amounts.total, 10.0);
        assert_eq!(invoice.line_items[0].unit_rate, "10.00");
    }

    #[test]
    fn update_falls_back_to_stored_currency() {
        let mut invoice = draft(json!({"currency": "KWD", "totalAmount": 2860}))
            .into_document()
            .unwrap();
        invoice
            .apply(draft(json!({"totalAmount": 572, "receivedAmount": 286})))
            .unwrap();
        assert_eq!(invoice.currency.code(), "KWD");
        assert_eq!(invoice.amounts.total, 2.0);
        assert_eq!(invoice.amounts.received, 1.0);
        assert_eq!(invoice.amounts.balance, 1.0);
    }

    #[test]
    fn header_only_update_keeps_amounts_and_lines() {
        let mut invoice = draft(json!({
            "currency": "USD",
            "totalAmount": 1800,
            "billToAddress": "Old",
            "lineItems": [{"quantity": 2, "unitRate": 900}]
        }))
        .into_document()
        .unwrap();
        let before = invoice.clone();
        invoice
            .apply(draft(json!({"billToAddress": "New", "portOfDischarge": null})))
            .unwrap();
        assert_eq!(invoice.bill_to_address.as_deref(), Some("New"));
        assert_eq!(invoice.amounts, before.amounts);
        assert_eq!(invoice.line_items, before.line_items);
        assert_eq!(invoice.port_of_discharge, None);
    }

    #[test]
    fn stored_form_round_trips() {
        let invoice = draft(json!({"currency": "USD", "totalAmount": 900, "invoiceDate": "2024-01-02"}))
            .into_document()
            .unwrap();
        let value = serde_json::to_value(&invoice).unwrap();
        assert_eq!(value["currency"], "USD");
        assert_eq!(value["amounts"]["total"], 10.0);
        let back: ProformaInvoice = serde_json::from_value(value).unwrap();
        assert_eq!(back, invoice);
    }
}
