//! The stored packaging list and the inputs that create or change it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use tradedocs_core::{DomainError, DomainResult, lenient_f64, non_blank, optional_text};

use crate::module_a::{ModuleA, ModuleAKind};
use crate::module_b::{ModuleB, ModuleBKind};
use crate::pivot::{RelationalData, build_relational};
use crate::print::{PackingPrintView, PrintHeader, rows_from_hierarchies, rows_from_legacy};

pub const DEFAULT_CURRENCY: &str = "USD";

/// Packaging list as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingList {
    pub packing_list_no: Option<String>,
    pub date: Option<NaiveDate>,
    pub consignee_address: Option<String>,
    pub delivery_address: Option<String>,
    pub exporter_address: Option<String>,
    pub po_number: Option<String>,
    pub loading_port: Option<String>,
    pub discharge_port: Option<String>,
    pub hs_code: Option<String>,
    pub tax_number: Option<String>,
    pub currency: String,
    pub module_a_type: Option<String>,
    /// Raw Module A input, kept verbatim for editing.
    #[serde(default)]
    pub module_a: Value,
    pub module_b_type: Option<String>,
    #[serde(default)]
    pub module_b: Value,
    /// Derived pivot; `None` for lists that only carry legacy `items`.
    #[serde(default)]
    pub relational: Option<RelationalData>,
    /// Legacy flat rows, only ever set by an update.
    #[serde(default)]
    pub items: Vec<Value>,
    pub total_net_weight: f64,
    pub total_gross_weight: f64,
}

/// Create input, as posted by the form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingListDraft {
    #[serde(default, deserialize_with = "optional_text")]
    pub packing_list_no: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub consignee_address: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub delivery_address: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub exporter_address: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub po_number: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub loading_port: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub discharge_port: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub hs_code: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub tax_number: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub module_a_type: Option<String>,
    #[serde(default)]
    pub module_a: Value,
    #[serde(default, deserialize_with = "optional_text")]
    pub module_b_type: Option<String>,
    #[serde(default)]
    pub module_b: Value,
}

/// Partial update. `None` (absent or `null`) keeps the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingListChanges {
    #[serde(default, deserialize_with = "optional_text")]
    pub packing_list_no: Option<String>,
    /// Only a non-blank date replaces the stored one.
    #[serde(default, deserialize_with = "optional_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub consignee_address: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub delivery_address: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub exporter_address: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub po_number: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub loading_port: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub discharge_port: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub hs_code: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub tax_number: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub module_a_type: Option<String>,
    #[serde(default)]
    pub module_a: Option<Value>,
    #[serde(default, deserialize_with = "optional_text")]
    pub module_b_type: Option<String>,
    #[serde(default)]
    pub module_b: Option<Value>,
    #[serde(default)]
    pub items: Option<Vec<Value>>,
}

impl PackingListDraft {
    /// Validate the header and derive the relational pivot.
    pub fn into_document(self) -> DomainResult<PackingList> {
        let currency = non_blank(self.currency.as_deref())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_string();

        let mut list = PackingList {
            packing_list_no: self.packing_list_no,
            date: parse_date(self.date.as_deref())?,
            consignee_address: self.consignee_address,
            delivery_address: self.delivery_address,
            exporter_address: self.exporter_address,
            po_number: self.po_number,
            loading_port: self.loading_port,
            discharge_port: self.discharge_port,
            hs_code: self.hs_code,
            tax_number: self.tax_number,
            currency,
            module_a_type: self.module_a_type,
            module_a: self.module_a,
            module_b_type: self.module_b_type,
            module_b: self.module_b,
            relational: None,
            items: Vec::new(),
            total_net_weight: 0.0,
            total_gross_weight: 0.0,
        };
        list.recompute_relational()?;
        Ok(list)
    }
}

impl PackingList {
    /// The list number, if one was entered.
    pub fn reference(&self) -> Option<&str> {
        non_blank(self.packing_list_no.as_deref())
    }

    /// File name of the pivot snapshot written on create.
    ///
    /// Characters outside `[A-Za-z0-9._-]` are replaced so the list number
    /// cannot escape the snapshot directory.
    pub fn snapshot_file_name(&self) -> String {
        let no: String = self
            .reference()
            .unwrap_or("temp")
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("packing_list_{no}.json")
    }

    pub fn apply(&mut self, changes: PackingListChanges) -> DomainResult<()> {
        replace(&mut self.packing_list_no, changes.packing_list_no);
        if let Some(date) = parse_date(changes.date.as_deref())? {
            self.date = Some(date);
        }
        replace(&mut self.consignee_address, changes.consignee_address);
        replace(&mut self.delivery_address, changes.delivery_address);
        replace(&mut self.exporter_address, changes.exporter_address);
        replace(&mut self.po_number, changes.po_number);
        replace(&mut self.loading_port, changes.loading_port);
        replace(&mut self.discharge_port, changes.discharge_port);
        replace(&mut self.hs_code, changes.hs_code);
        replace(&mut self.tax_number, changes.tax_number);
        if let Some(currency) = non_blank(changes.currency.as_deref()) {
            self.currency = currency.to_string();
            if let Some(relational) = self.relational.as_mut() {
                relational.summary.currency = self.currency.clone();
            }
        }

        let modules_changed = changes.module_a_type.is_some()
            || changes.module_a.is_some()
            || changes.module_b_type.is_some()
            || changes.module_b.is_some();
        replace(&mut self.module_a_type, changes.module_a_type);
        replace(&mut self.module_b_type, changes.module_b_type);
        if let Some(a) = changes.module_a {
            self.module_a = a;
        }
        if let Some(b) = changes.module_b {
            self.module_b = b;
        }
        if modules_changed {
            self.recompute_relational()?;
        }

        if let Some(items) = changes.items {
            self.items = items;
            self.recompute_item_totals();
        }
        Ok(())
    }

    fn recompute_relational(&mut self) -> DomainResult<()> {
        let module_a = ModuleA::from_payload(
            tag(self.module_a_type.as_deref(), ModuleAKind::parse),
            &self.module_a,
        );
        let module_b = ModuleB::from_payload(
            tag(self.module_b_type.as_deref(), ModuleBKind::parse),
            &self.module_b,
        );
        let relational = build_relational(&module_a, &module_b, &self.currency)?;
        self.total_net_weight = relational.summary.total_net;
        self.total_gross_weight = relational.summary.total_gross;
        self.relational = Some(relational);
        Ok(())
    }

    fn recompute_item_totals(&mut self) {
        let (net, gross) = self
            .items
            .iter()
            .filter_map(Value::as_object)
            .fold((0.0, 0.0), |(net, gross), item| {
                (
                    net + first_weight(item, &["netWt", "netWeight", "net_weight"]),
                    gross + first_weight(item, &["grossWt", "grossWeight", "gross_weight"]),
                )
            });
        self.total_net_weight = net;
        self.total_gross_weight = gross;
    }

    /// Printable view: rows from the pivot, or from legacy `items` without one.
    pub fn print_view(&self) -> PackingPrintView {
        let rows = match &self.relational {
            Some(relational) => rows_from_hierarchies(&relational.item_hierarchies),
            None => rows_from_legacy(&self.items),
        };
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let header = PrintHeader {
            consignee_address: text(&self.consignee_address),
            tax_number: text(&self.tax_number),
            delivery_address: text(&self.delivery_address),
            date: self
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            po_no: text(&self.po_number),
            packing_list_no: text(&self.packing_list_no),
            loading_port: text(&self.loading_port),
            discharge_port: text(&self.discharge_port),
            hs_code: text(&self.hs_code),
        };
        PackingPrintView::new(header, rows)
    }
}

fn replace(slot: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *slot = value;
    }
}

fn parse_date(raw: Option<&str>) -> DomainResult<Option<NaiveDate>> {
    match non_blank(raw) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| DomainError::validation(format!("invalid date '{s}', expected YYYY-MM-DD"))),
    }
}

/// Parse a module type tag, logging tags that name no known shape.
fn tag<K>(raw: Option<&str>, parse: fn(&str) -> Option<K>) -> Option<K> {
    let raw = non_blank(raw)?;
    let kind = parse(raw);
    if kind.is_none() {
        tracing::warn!(tag = raw, "unknown module type tag; treating module as empty");
    }
    kind
}

fn first_weight(item: &serde_json::Map<String, Value>, keys: &[&str]) -> f64 {
    keys.iter()
        .filter_map(|k| item.get(*k))
        .map(lenient_f64)
        .find(|v| *v != 0.0)
        .unwrap_or(0.0)
}
