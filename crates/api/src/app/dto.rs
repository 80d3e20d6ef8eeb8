//! JSON shapes of the list and detail endpoints.
//!
//! Keys are the camelCase names the form pages read and submit. List rows
//! replace missing text with `""`; details keep `null`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};

use tradedocs_core::ExportInvoiceId;
use tradedocs_export::ExportInvoice;
use tradedocs_infra::Stored;
use tradedocs_packing::PackingList;
use tradedocs_proforma::ProformaInvoice;

fn day(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

// -------------------------
// Packaging lists
// -------------------------

pub fn packing_list_summary(stored: &Stored<PackingList>) -> Value {
    let doc = &stored.document;
    json!({
        "id": stored.id,
        "packingListNo": text(&doc.packing_list_no),
        "poNumber": text(&doc.po_number),
        "consigneeAddress": text(&doc.consignee_address),
        "status": stored.status,
        "createdAt": day(stored.created_at),
        "updatedAt": timestamp(stored.updated_at),
    })
}

pub fn packing_list_detail(stored: &Stored<PackingList>) -> Value {
    let doc = &stored.document;
    json!({
        "id": stored.id,
        "packingListNo": doc.packing_list_no,
        "date": doc.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
        "consigneeAddress": doc.consignee_address,
        "deliveryAddress": doc.delivery_address,
        "exporterAddress": doc.exporter_address,
        "poNumber": doc.po_number,
        "loadingPort": doc.loading_port,
        "dischargePort": doc.discharge_port,
        "hsCode": doc.hs_code,
        "taxNumber": doc.tax_number,
        "currency": doc.currency,
        "moduleAType": doc.module_a_type,
        "moduleA": doc.module_a,
        "moduleBType": doc.module_b_type,
        "moduleB": doc.module_b,
        "relational": doc.relational,
        "items": doc.items,
        "totalNetWeight": doc.total_net_weight,
        "totalGrossWeight": doc.total_gross_weight,
        "status": stored.status,
        "createdAt": day(stored.created_at),
        "updatedAt": timestamp(stored.updated_at),
    })
}

// -------------------------
// Proforma invoices
// -------------------------

pub fn proforma_invoice_summary(stored: &Stored<ProformaInvoice>) -> Value {
    let doc = &stored.document;
    json!({
        "id": stored.id,
        "invoiceNo": text(&doc.invoice_no),
        "poWoNumber": text(&doc.po_wo_number),
        "billToAddress": text(&doc.bill_to_address),
        "totalAmount": doc.amounts.total,
        "currency": doc.currency.code(),
        "status": stored.status,
        "createdAt": day(stored.created_at),
        "updatedAt": timestamp(stored.updated_at),
    })
}

pub fn proforma_invoice_detail(stored: &Stored<ProformaInvoice>) -> Value {
    let doc = &stored.document;
    json!({
        "id": stored.id,
        "invoiceDate": doc.invoice_date,
        "invoiceNo": doc.invoice_no,
        "poWoNumber": doc.po_wo_number,
        // The form labels our own reference "yourRefNo".
        "yourRefNo": doc.our_ref_no,
        "yourReferenceNo": doc.your_reference_no,
        "supplierAddress": doc.supplier_address,
        "billToAddress": doc.bill_to_address,
        "totalAmount": doc.amounts.total,
        "currency": doc.currency.code(),
        "advanceAmount": doc.amounts.advance,
        "receivableAmount": doc.amounts.receivable,
        "receivedAmount": doc.amounts.received,
        "balanceAmount": doc.amounts.balance,
        "countryOfOrigin": doc.country_of_origin,
        "portOfEmbarkation": doc.port_of_embarkation,
        "portOfDischarge": doc.port_of_discharge,
        "lineItems": doc.line_items,
        "status": stored.status,
        "createdAt": day(stored.created_at),
        "updatedAt": timestamp(stored.updated_at),
    })
}

// -------------------------
// Export (ZC exporter) invoices
// -------------------------

pub fn export_invoice_summary(stored: &Stored<ExportInvoice>) -> Value {
    let doc = &stored.document;
    json!({
        "id": stored.id,
        "invoiceNumber": text(&doc.invoice_number),
        "invoiceDate": text(&doc.invoice_date),
        "exporterReference": text(&doc.exporter_reference),
        "consigneeAddress": text(&doc.consignee_address),
        "totalInvoiceValue": text(&doc.total_invoice_value),
        "status": stored.status,
        "createdAt": day(stored.created_at),
        "updatedAt": timestamp(stored.updated_at),
    })
}

/// Every stored column plus the record metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportInvoiceDetail<'a> {
    pub id: ExportInvoiceId,
    #[serde(flatten)]
    pub document: &'a ExportInvoice,
    pub status: &'a str,
    pub created_at: String,
    pub updated_at: String,
}

pub fn export_invoice_detail(stored: &Stored<ExportInvoice>) -> ExportInvoiceDetail<'_> {
    ExportInvoiceDetail {
        id: stored.id,
        document: &stored.document,
        status: &stored.status,
        created_at: day(stored.created_at),
        updated_at: timestamp(stored.updated_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tradedocs_core::{PackingListId, ProformaInvoiceId};
    use tradedocs_packing::PackingListDraft;
    use tradedocs_proforma::ProformaInvoiceDraft;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 9, 14, 5, 7).single().unwrap()
    }

    #[test]
    fn summaries_blank_missing_text_and_format_dates() {
        let stored = Stored {
            id: PackingListId::new(3),
            status: "Completed".to_string(),
            created_at: at(),
            updated_at: at(),
            document: PackingListDraft::default().into_document().unwrap(),
        };
        let row = packing_list_summary(&stored);
        assert_eq!(row["id"], 3);
        assert_eq!(row["packingListNo"], "");
        assert_eq!(row["createdAt"], "2025-03-09");
        assert_eq!(row["updatedAt"], "2025-03-09 14:05:07");
    }

    #[test]
    fn proforma_detail_uses_form_field_names() {
        let document = serde_json::from_value::<ProformaInvoiceDraft>(json!({
            "invoiceNo": "PI-9",
            "yourRefNo": "OURS",
            "yourReferenceNo": "THEIRS",
            "currency": "USD",
            "totalAmount": "900"
        }))
        .unwrap()
        .into_document()
        .unwrap();
        let stored = Stored {
            id: ProformaInvoiceId::new(1),
            status: "Completed".to_string(),
            created_at: at(),
            updated_at: at(),
            document,
        };

        let detail = proforma_invoice_detail(&stored);
        assert_eq!(detail["yourRefNo"], "OURS");
        assert_eq!(detail["yourReferenceNo"], "THEIRS");
        assert_eq!(detail["currency"], "USD");
        assert_eq!(detail["totalAmount"], 10.0);
    }

    #[test]
    fn export_detail_flattens_the_document() {
        let stored = Stored {
            id: ExportInvoiceId::new(4),
            status: "Completed".to_string(),
            created_at: at(),
            updated_at: at(),
            document: ExportInvoice {
                invoice_number: Some("ZC-4".into()),
                number_of_boxes: Some(2),
                ..Default::default()
            },
        };
        let detail = serde_json::to_value(export_invoice_detail(&stored)).unwrap();
        assert_eq!(detail["id"], 4);
        assert_eq!(detail["invoiceNumber"], "ZC-4");
        assert_eq!(detail["numberOfBoxes"], 2);
        assert_eq!(detail["contactEmail"], Value::Null);
        assert_eq!(detail["createdAt"], "2025-03-09");
    }
}
