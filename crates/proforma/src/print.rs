use chrono::{DateTime, Utc};
use serde::Serialize;

use tradedocs_core::{amount_in_words, format2};

use crate::conversion::LineItem;
use crate::document::ProformaInvoice;

/// Template context for a printed proforma invoice.
///
/// Stored amounts are already in the invoice currency and are only formatted
/// here, never converted again.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProformaPrintView {
    pub bill_to_address: String,
    pub date: String,
    pub invoice_no: String,
    pub po_wo_number: String,
    pub your_reference_no: String,
    pub our_reference_no: String,
    pub currency: String,
    pub items: Vec<LineItem>,
    pub total_amount: String,
    pub advance_amount: String,
    pub received_details: String,
    pub received_amount: String,
    pub balance_amount: String,
    /// Only for INR invoices.
    pub balance_in_words: Option<String>,
    pub country_of_origin: String,
    pub port_of_embarkation: String,
    pub port_of_discharge: String,
    pub date_created: String,
}

impl ProformaPrintView {
    pub fn new(invoice: &ProformaInvoice, created_at: DateTime<Utc>) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let amounts = &invoice.amounts;
        let balance_amount = format2(amounts.balance);

        Self {
            bill_to_address: text(&invoice.bill_to_address),
            date: text(&invoice.invoice_date),
            invoice_no: text(&invoice.invoice_no),
            po_wo_number: text(&invoice.po_wo_number),
            your_reference_no: text(&invoice.your_reference_no),
            our_reference_no: text(&invoice.our_ref_no),
            currency: invoice.currency.to_string(),
            items: invoice.line_items.clone(),
            total_amount: format2(amounts.total),
            advance_amount: format2(amounts.advance),
            received_details: format2(amounts.receivable),
            received_amount: format2(amounts.received),
            balance_in_words: invoice
                .currency
                .is_inr()
                .then(|| amount_in_words(&balance_amount)),
            balance_amount,
            country_of_origin: text(&invoice.country_of_origin),
            port_of_embarkation: text(&invoice.port_of_embarkation),
            port_of_discharge: text(&invoice.port_of_discharge),
            date_created: created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ProformaInvoiceDraft;
    use chrono::TimeZone;
    use serde_json::json;

    fn invoice(body: serde_json::Value) -> ProformaInvoice {
        serde_json::from_value::<ProformaInvoiceDraft>(body)
            .unwrap()
            .into_document()
            .unwrap()
    }

    #[test]
    fn formats_without_converting_again() {
        let inv = invoice(json!({"currency": "USD", "totalAmount": 9000, "advanceAmount": 900}));
        let created = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let view = ProformaPrintView::new(&inv, created);
        assert_eq!(view.total_amount, "100.00");
        assert_eq!(view.advance_amount, "10.00");
        assert_eq!(view.received_details, "90.00");
        assert_eq!(view.balance_amount, "90.00");
        assert_eq!(view.balance_in_words, None);
        assert_eq!(view.date_created, "2024-05-06");
    }

    #[test]
    fn inr_balance_is_spelled_out() {
        let inv = invoice(json!({"totalAmount": "1234567.50"}));
        let view = ProformaPrintView::new(&inv, Utc::now());
        assert_eq!(view.currency, "INR");
        assert_eq!(
            view.balance_in_words.as_deref(),
            Some("Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven and Fifty Paise Rupees")
        );
    }
}
