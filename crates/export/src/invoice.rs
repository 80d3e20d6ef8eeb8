use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use tradedocs_core::{DomainResult, non_blank, optional_text};

/// Declares the export invoice record, its create/update input, and the
/// plumbing shared by every free-text header field.
macro_rules! export_invoice {
    ($($field:ident),+ $(,)?) => {
        /// Export invoice as persisted.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct ExportInvoice {
            $(pub $field: Option<String>,)+
            pub number_of_boxes: Option<i64>,
            #[serde(default)]
            pub items: Vec<Value>,
        }

        /// Create input; also used as a partial update where `None` keeps
        /// the stored value.
        #[derive(Debug, Clone, Default, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct ExportInvoiceDraft {
            $(
                #[serde(default, deserialize_with = "optional_text")]
                pub $field: Option<String>,
            )+
            #[serde(default, deserialize_with = "optional_count")]
            pub number_of_boxes: Option<i64>,
            #[serde(default)]
            pub items: Option<Vec<Value>>,
        }

        impl ExportInvoiceDraft {
            pub fn into_document(self) -> DomainResult<ExportInvoice> {
                Ok(ExportInvoice {
                    $($field: self.$field,)+
                    number_of_boxes: self.number_of_boxes,
                    items: self.items.unwrap_or_default(),
                })
            }
        }

        impl ExportInvoice {
            pub fn apply(&mut self, changes: ExportInvoiceChanges) -> DomainResult<()> {
                $(
                    if changes.$field.is_some() {
                        self.$field = changes.$field;
                    }
                )+
                if changes.number_of_boxes.is_some() {
                    self.number_of_boxes = changes.number_of_boxes;
                }
                if let Some(items) = changes.items {
                    self.items = items;
                }
                Ok(())
            }

            /// Every header field by its snake_case name, blank when unset.
            pub fn header_fields(&self) -> Vec<(&'static str, String)> {
                vec![$((stringify!($field), self.$field.clone().unwrap_or_default()),)+]
            }
        }
    };
}

export_invoice!(
    invoice_number,
    invoice_date,
    buyer_order_number,
    buyer_order_date,
    exporter_reference,
    iec_number,
    tax_registration_number,
    lut_arn_number,
    delivery_payment_terms,
    port_of_loading,
    port_of_discharge,
    pre_carriage_by,
    place_of_receipt,
    port_of_destination,
    destination,
    currency,
    vessel_flight,
    country_of_origin,
    ad_code,
    other_reference,
    hs_code,
    final_destination,
    contact_person_name,
    contact_email,
    consignee_address,
    delivery_address,
    amount_in_words,
    total_export_value,
    total_gst_value,
    total_invoice_value,
);

pub type ExportInvoiceChanges = ExportInvoiceDraft;

impl ExportInvoice {
    pub fn reference(&self) -> Option<&str> {
        non_blank(self.invoice_number.as_deref())
    }
}

/// A box count given as a JSON integer or as digits in text.
fn optional_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| D::Error::custom("numberOfBoxes must be a whole number")),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| D::Error::custom("numberOfBoxes must be a whole number")),
        Some(_) => Err(D::Error::custom("numberOfBoxes must be a whole number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(body: Value) -> ExportInvoiceDraft {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn create_reads_camel_case_fields() {
        let invoice = draft(json!({
            "invoiceNumber": "ZC-1",
            "iecNumber": "IEC9",
            "lutArnNumber": "AD0101",
            "totalInvoiceValue": 1500.5,
            "numberOfBoxes": "4",
            "items": [{"description": "Pump"}]
        }))
        .into_document()
        .unwrap();
        assert_eq!(invoice.reference(), Some("ZC-1"));
        assert_eq!(invoice.iec_number.as_deref(), Some("IEC9"));
        assert_eq!(invoice.lut_arn_number.as_deref(), Some("AD0101"));
        assert_eq!(invoice.total_invoice_value.as_deref(), Some("1500.5"));
        assert_eq!(invoice.number_of_boxes, Some(4));
        assert_eq!(invoice.items.len(), 1);
    }

    #[test]
    fn box_count_must_be_whole() {
        assert!(serde_json::from_value::<ExportInvoiceDraft>(json!({"numberOfBoxes": "four"})).is_err());
        assert!(serde_json::from_value::<ExportInvoiceDraft>(json!({"numberOfBoxes": 2.5})).is_err());
        assert_eq!(draft(json!({"numberOfBoxes": ""})).number_of_boxes, None);
    }

    #[test]
    fn update_keeps_absent_fields() {
        let mut invoice = draft(json!({"invoiceNumber": "ZC-1", "currency": "USD", "items": [1]}))
            .into_document()
            .unwrap();
        invoice
            .apply(draft(json!({"currency": "EUR", "invoiceNumber": null})))
            .unwrap();
        assert_eq!(invoice.invoice_number.as_deref(), Some("ZC-1"));
        assert_eq!(invoice.currency.as_deref(), Some("EUR"));
        assert_eq!(invoice.items, vec![json!(1)]);
    }

    #[test]
    fn header_fields_cover_every_column() {
        let invoice = ExportInvoice {
            port_of_loading: Some("Chennai".into()),
            ..Default::default()
        };
        let fields = invoice.header_fields();
        assert_eq!(fields.len(), 30);
        assert!(fields.contains(&("port_of_loading", "Chennai".to_string())));
        assert!(fields.contains(&("contact_email", String::new())));
    }
}
