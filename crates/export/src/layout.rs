//! Row layout of the printed export invoice.
//!
//! The printed form has an item table of fixed minimum height. Long descriptions
//! wrap over several physical lines, and the table is padded with empty filler
//! rows up to that height.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use tradedocs_core::{amount_in_words, value_text};

use crate::invoice::ExportInvoice;

pub const DEFAULT_WRAP_WIDTH: usize = 40;
pub const DEFAULT_MIN_TABLE_ROWS: usize = 18;

/// One item line of the printed table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InvoiceRow {
    pub serial_no: String,
    pub description: String,
    pub hs_code: String,
    pub quantity: String,
    pub unit: String,
    pub rate: String,
    pub amount: String,
    /// Physical lines the wrapped description occupies.
    pub line_count: usize,
}

/// Print-ready export invoice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedInvoice {
    /// Every header field by snake_case name, `amount_in_words` always filled.
    #[serde(flatten)]
    pub header: BTreeMap<String, String>,
    pub number_of_boxes: String,
    pub items: Vec<InvoiceRow>,
    pub used_rows: usize,
    pub filler_rows: usize,
    pub total_rows: usize,
}

pub trait InvoiceRowLayout {
    /// Characters per physical description line.
    fn wrap_width(&self) -> usize;

    /// Rows the item table is padded to.
    fn min_table_rows(&self) -> usize;

    /// Physical lines `description` wraps to; never less than one.
    fn line_count(&self, description: &str) -> usize {
        let width = self.wrap_width().max(1);
        description
            .lines()
            .map(|line| wrapped_lines(line, width))
            .sum::<usize>()
            .max(1)
    }

    fn prepare(&self, invoice: &ExportInvoice) -> PreparedInvoice {
        let items: Vec<InvoiceRow> = invoice
            .items
            .iter()
            .filter_map(Value::as_object)
            .enumerate()
            .map(|(idx, item)| {
                let description = first(item, &["description", "descriptionOfGoods"]);
                InvoiceRow {
                    serial_no: non_empty_or(first(item, &["srNo", "slNo", "sno", "serialNo"]), || {
                        (idx + 1).to_string()
                    }),
                    line_count: self.line_count(&description),
                    description,
                    hs_code: first(item, &["hsCode", "hsn"]),
                    quantity: first(item, &["quantity", "qty"]),
                    unit: first(item, &["unit", "uom"]),
                    rate: first(item, &["rate", "unitRate"]),
                    amount: first(item, &["amount", "total"]),
                }
            })
            .collect();

        let used_rows: usize = items.iter().map(|r| r.line_count).sum();
        let filler_rows = self.min_table_rows().saturating_sub(used_rows);

        let mut header: BTreeMap<String, String> = invoice
            .header_fields()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let total = header.get("total_invoice_value").cloned().unwrap_or_default();
        header
            .entry("amount_in_words".to_string())
            .and_modify(|words| {
                if words.trim().is_empty() {
                    *words = amount_in_words(&total);
                }
            })
            .or_insert_with(|| amount_in_words(&total));

        PreparedInvoice {
            header,
            number_of_boxes: invoice.number_of_boxes.map(|n| n.to_string()).unwrap_or_default(),
            items,
            used_rows,
            filler_rows,
            total_rows: used_rows + filler_rows,
        }
    }
}

/// Fixed-width layout used by the standard invoice form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultRowLayout {
    pub wrap_width: usize,
    pub min_table_rows: usize,
}

impl Default for DefaultRowLayout {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
            min_table_rows: DEFAULT_MIN_TABLE_ROWS,
        }
    }
}

impl InvoiceRowLayout for DefaultRowLayout {
    fn wrap_width(&self) -> usize {
        self.wrap_width
    }

    fn min_table_rows(&self) -> usize {
        self.min_table_rows
    }
}

/// Greedy word wrap; words longer than `width` are split across lines.
fn wrapped_lines(line: &str, width: usize) -> usize {
    let mut lines = 0;
    let mut current = 0;
    for word in line.split_whitespace() {
        let len = word.chars().count();
        if len > width {
            if current > 0 {
                lines += 1;
            }
            lines += len / width;
            current = len % width;
            continue;
        }
        let needed = if current == 0 { len } else { current + 1 + len };
        if needed > width {
            lines += 1;
            current = len;
        } else {
            current = needed;
        }
    }
    if current > 0 || lines == 0 {
        lines += 1;
    }
    lines
}

fn first(item: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| item.get(*k))
        .map(|v| value_text(v).trim().to_string())
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

fn non_empty_or(value: String, fallback: impl FnOnce() -> String) -> String {
    if value.is_empty() { fallback() } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::ExportInvoiceDraft;
    use proptest::prelude::*;
    use serde_json::json;

    fn invoice(body: Value) -> ExportInvoice {
        serde_json::from_value::<ExportInvoiceDraft>(body)
            .unwrap()
            .into_document()
            .unwrap()
    }

    #[test]
    fn empty_invoice_is_all_filler() {
        let prepared = DefaultRowLayout::default().prepare(&ExportInvoice::default());
        assert!(prepared.items.is_empty());
        assert_eq!(prepared.used_rows, 0);
        assert_eq!(prepared.filler_rows, DEFAULT_MIN_TABLE_ROWS);
        assert_eq!(prepared.total_rows, DEFAULT_MIN_TABLE_ROWS);
        assert_eq!(prepared.header["amount_in_words"], "Zero");
        assert_eq!(prepared.header["invoice_number"], "");
    }

    #[test]
    fn long_descriptions_take_more_rows() {
        let layout = DefaultRowLayout { wrap_width: 10, min_table_rows: 5 };
        assert_eq!(layout.line_count(""), 1);
        assert_eq!(layout.line_count("short"), 1);
        assert_eq!(layout.line_count("exactly 10"), 1);
        assert_eq!(layout.line_count("one two three four"), 2);
        assert_eq!(layout.line_count("first\nsecond"), 2);
        assert_eq!(layout.line_count("abcdefghijklmnopqrstuvwxy"), 3);
    }

    #[test]
    fn overflowing_tables_get_no_filler() {
        let layout = DefaultRowLayout { wrap_width: 10, min_table_rows: 2 };
        let prepared = layout.prepare(&invoice(json!({
            "items": [
                {"description": "one two three four", "qty": 2, "rate": "5", "amount": "10"},
                {"srNo": "A", "description": "bolt"},
                "skipped"
            ]
        })));
        assert_eq!(prepared.items.len(), 2);
        assert_eq!(prepared.items[0].serial_no, "1");
        assert_eq!(prepared.items[0].quantity, "2");
        assert_eq!(prepared.items[1].serial_no, "A");
        assert_eq!(prepared.used_rows, 3);
        assert_eq!(prepared.filler_rows, 0);
        assert_eq!(prepared.total_rows, 3);
    }

    #[test]
    fn amount_in_words_prefers_the_stored_text() {
        let stored = DefaultRowLayout::default().prepare(&invoice(json!({
            "amountInWords": "USD One Hundred Only",
            "totalInvoiceValue": "100"
        })));
        assert_eq!(stored.header["amount_in_words"], "USD One Hundred Only");

        let derived = DefaultRowLayout::default().prepare(&invoice(json!({
            "amountInWords": " ",
            "totalInvoiceValue": "1500",
            "numberOfBoxes": 3
        })));
        assert_eq!(derived.header["amount_in_words"], "One Thousand Five Hundred Rupees");
        assert_eq!(derived.number_of_boxes, "3");
    }

    #[test]
    fn serializes_flat_template_context() {
        let prepared = DefaultRowLayout::default().prepare(&invoice(json!({"portOfLoading": "Chennai"})));
        let value = serde_json::to_value(&prepared).unwrap();
        assert_eq!(value["port_of_loading"], "Chennai");
        assert_eq!(value["filler_rows"], 18);
    }

    proptest! {
        #[test]
        fn every_word_fits_the_reported_lines(words in proptest::collection::vec("[a-z]{1,15}", 0..30)) {
            let layout = DefaultRowLayout { wrap_width: 12, min_table_rows: 0 };
            let text = words.join(" ");
            let chars: usize = words.iter().map(|w| w.len()).sum();
            let lines = layout.line_count(&text);
            prop_assert!(lines >= 1);
            prop_assert!(lines * 12 >= chars);
        }
    }
}
