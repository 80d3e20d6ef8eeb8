//! Static description of the add/edit/view pages of each document type.
//!
//! The templates are generic; these tables decide which inputs and list
//! columns a page shows and which API endpoints its script talks to.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Input {
    Text,
    Date,
    Number,
    Textarea,
    /// Free-form JSON, parsed before submitting.
    Json,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    pub input: Input,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FormSpec {
    pub title: &'static str,
    /// Page prefix, e.g. `/packaging_list`.
    pub page: &'static str,
    /// API prefix, e.g. `/api/packaging-list`.
    pub api: &'static str,
    pub fields: &'static [Field],
    pub columns: &'static [Column],
}

const fn field(key: &'static str, label: &'static str, input: Input) -> Field {
    Field { key, label, input }
}

const fn column(key: &'static str, label: &'static str) -> Column {
    Column { key, label }
}

/// Entries of the home page, in display order.
pub const ALL: [&FormSpec; 3] = [&PACKING_LIST, &PROFORMA_INVOICE, &EXPORT_INVOICE];

pub const PACKING_LIST: FormSpec = FormSpec {
    title: "Packaging List",
    page: "/packaging_list",
    api: "/api/packaging-list",
    fields: &[
        field("packingListNo", "Packing list no.", Input::Text),
        field("date", "Date", Input::Date),
        field("poNumber", "PO number", Input::Text),
        field("consigneeAddress", "Consignee address", Input::Textarea),
        field("deliveryAddress", "Delivery address", Input::Textarea),
        field("exporterAddress", "Exporter address", Input::Textarea),
        field("loadingPort", "Port of loading", Input::Text),
        field("dischargePort", "Port of discharge", Input::Text),
        field("hsCode", "HS code", Input::Text),
        field("taxNumber", "Tax number", Input::Text),
        field("currency", "Currency", Input::Text),
        field("moduleAType", "Box details type (A1, A2, A3)", Input::Text),
        field("moduleA", "Box details", Input::Json),
        field("moduleBType", "Item mapping type (B1, B2, B3)", Input::Text),
        field("moduleB", "Item mapping", Input::Json),
    ],
    columns: &[
        column("packingListNo", "Packing list no."),
        column("poNumber", "PO number"),
        column("consigneeAddress", "Consignee"),
        column("status", "Status"),
        column("createdAt", "Created"),
        column("updatedAt", "Updated"),
    ],
};

pub const PROFORMA_INVOICE: FormSpec = FormSpec {
    title: "Proforma Invoice",
    page: "/proforma_invoice",
    api: "/api/proforma-invoice",
    fields: &[
        field("invoiceNo", "Invoice no.", Input::Text),
        field("invoiceDate", "Invoice date", Input::Date),
        field("poWoNumber", "PO/WO number", Input::Text),
        field("yourRefNo", "Our reference no.", Input::Text),
        field("yourReferenceNo", "Your reference no.", Input::Text),
        field("supplierAddress", "Supplier address", Input::Textarea),
        field("billToAddress", "Bill to", Input::Textarea),
        field("currency", "Currency (INR, USD, DINAR)", Input::Text),
        field("totalAmount", "Total amount (INR)", Input::Number),
        field("advanceAmount", "Advance amount (INR)", Input::Number),
        field("receivedAmount", "Received amount (INR)", Input::Number),
        field("countryOfOrigin", "Country of origin", Input::Text),
        field("portOfEmbarkation", "Port of embarkation", Input::Text),
        field("portOfDischarge", "Port of discharge", Input::Text),
        field("lineItems", "Line items (rates in INR)", Input::Json),
    ],
    columns: &[
        column("invoiceNo", "Invoice no."),
        column("poWoNumber", "PO/WO number"),
        column("billToAddress", "Bill to"),
        column("totalAmount", "Total"),
        column("currency", "Currency"),
        column("status", "Status"),
        column("createdAt", "Created"),
        column("updatedAt", "Updated"),
    ],
};

pub const EXPORT_INVOICE: FormSpec = FormSpec {
    title: "ZC Exporter",
    page: "/zc_exporter",
    api: "/api/zc-exporter",
    fields: &[
        field("invoiceNumber", "Invoice number", Input::Text),
        field("invoiceDate", "Invoice date", Input::Date),
        field("buyerOrderNumber", "Buyer order no.", Input::Text),
        field("buyerOrderDate", "Buyer order date", Input::Date),
        field("exporterReference", "Exporter reference", Input::Text),
        field("iecNumber", "IEC number", Input::Text),
        field("taxRegistrationNumber", "Tax registration no.", Input::Text),
        field("lutArnNumber", "LUT/ARN no.", Input::Text),
        field("deliveryPaymentTerms", "Terms of delivery and payment", Input::Textarea),
        field("portOfLoading", "Port of loading", Input::Text),
        field("portOfDischarge", "Port of discharge", Input::Text),
        field("preCarriageBy", "Pre-carriage by", Input::Text),
        field("placeOfReceipt", "Place of receipt", Input::Text),
        field("portOfDestination", "Port of destination", Input::Text),
        field("destination", "Destination", Input::Text),
        field("finalDestination", "Final destination", Input::Text),
        field("currency", "Currency", Input::Text),
        field("vesselFlight", "Vessel/flight no.", Input::Text),
        field("countryOfOrigin", "Country of origin", Input::Text),
        field("adCode", "AD code", Input::Text),
        field("otherReference", "Other reference", Input::Text),
        field("hsCode", "HS code", Input::Text),
        field("contactPersonName", "Contact person", Input::Text),
        field("contactEmail", "Contact email", Input::Text),
        field("consigneeAddress", "Consignee address", Input::Textarea),
        field("deliveryAddress", "Delivery address", Input::Textarea),
        field("totalExportValue", "Total export value", Input::Text),
        field("totalGstValue", "Total GST value", Input::Text),
        field("totalInvoiceValue", "Total invoice value", Input::Text),
        field("amountInWords", "Amount in words", Input::Text),
        field("numberOfBoxes", "Number of boxes", Input::Number),
        field("items", "Items", Input::Json),
    ],
    columns: &[
        column("invoiceNumber", "Invoice no."),
        column("invoiceDate", "Invoice date"),
        column("exporterReference", "Exporter ref."),
        column("consigneeAddress", "Consignee"),
        column("totalInvoiceValue", "Total"),
        column("status", "Status"),
        column("createdAt", "Created"),
        column("updatedAt", "Updated"),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn field_keys_are_unique_per_form() {
        for form in ALL {
            let keys: HashSet<_> = form.fields.iter().map(|f| f.key).collect();
            assert_eq!(keys.len(), form.fields.len(), "{}", form.title);
        }
    }

    #[test]
    fn export_form_covers_every_stored_column() {
        // 30 header fields, the box count, and the items.
        assert_eq!(EXPORT_INVOICE.fields.len(), 32);
    }
}
