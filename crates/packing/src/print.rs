//! Printable packaging list: flattened rows grouped by item with row-span merging.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

use tradedocs_core::{format2, lenient_f64, value_text};

use crate::fields::field;
use crate::pivot::ItemHierarchy;
use crate::tokens::NaturalKey;

/// One table line of the printed packaging list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintRow {
    pub item_nos: String,
    #[serde(flatten)]
    pub cells: PrintCells,
}

/// Everything a row shows besides its item number.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintCells {
    pub box_nos: String,
    pub description: String,
    pub qty: String,
    pub l: String,
    pub w: String,
    pub h: String,
    pub net_wt: String,
    pub gross_wt: String,
}

/// Consecutive rows of one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedItem {
    #[serde(rename = "itemNos")]
    pub item_nos: String,
    pub rows: Vec<PrintCells>,
    pub rowspan: usize,
    /// Shown once for the whole group when `description_merged`, blank otherwise.
    pub description: String,
    pub description_merged: bool,
    pub description_rowspan: usize,
}

/// Header fields copied onto the printout.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PrintHeader {
    pub consignee_address: String,
    pub tax_number: String,
    pub delivery_address: String,
    pub date: String,
    pub po_no: String,
    pub packing_list_no: String,
    pub loading_port: String,
    pub discharge_port: String,
    pub hs_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackingPrintView {
    #[serde(flatten)]
    pub header: PrintHeader,
    pub total_boxes: usize,
    pub items: Vec<GroupedItem>,
    pub total_net_weight: String,
    pub total_gross_weight: String,
}

impl PackingPrintView {
    pub fn new(header: PrintHeader, rows: Vec<PrintRow>) -> Self {
        let (net, gross) = rows.iter().fold((0.0, 0.0), |(net, gross), r| {
            (
                net + lenient_f64(&Value::String(r.cells.net_wt.clone())),
                gross + lenient_f64(&Value::String(r.cells.gross_wt.clone())),
            )
        });
        Self {
            header,
            total_boxes: count_boxes(&rows),
            items: group_rows(rows),
            total_net_weight: format2(net),
            total_gross_weight: format2(gross),
        }
    }
}

/// One row per associated box of every hierarchy.
pub fn rows_from_hierarchies(hierarchies: &[ItemHierarchy]) -> Vec<PrintRow> {
    hierarchies
        .iter()
        .flat_map(|h| {
            let item_nos = h.item_number.trim().to_string();
            h.associated_boxes.iter().map(move |b| PrintRow {
                item_nos: item_nos.clone(),
                cells: PrintCells {
                    box_nos: b.box_no.trim().to_string(),
                    description: b.description.trim().to_string(),
                    qty: number_text(b.qty),
                    l: b.dimensions.l.map(number_text).unwrap_or_default(),
                    w: b.dimensions.w.map(number_text).unwrap_or_default(),
                    h: b.dimensions.h.map(number_text).unwrap_or_default(),
                    net_wt: number_text(b.weights.net),
                    gross_wt: number_text(b.weights.gross),
                },
            })
        })
        .collect()
}

/// Rows from the older flat `items` list. Non-object entries are skipped.
pub fn rows_from_legacy(items: &[Value]) -> Vec<PrintRow> {
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|item| PrintRow {
            item_nos: text(item, "itemNos"),
            cells: PrintCells {
                box_nos: text(item, "boxNos"),
                description: text(item, "description"),
                qty: value_text(field(item, "qty")),
                l: value_text(field(item, "l")),
                w: value_text(field(item, "w")),
                h: value_text(field(item, "h")),
                net_wt: weight(item, &["netWt", "netWeight", "net_weight"]),
                gross_wt: weight(item, &["grossWt", "grossWeight", "gross_weight"]),
            },
        })
        .collect()
}

/// Number of distinct box references; a cell may hold several, comma separated.
pub fn count_boxes(rows: &[PrintRow]) -> usize {
    rows.iter()
        .flat_map(|r| r.cells.box_nos.split(','))
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Sort by (item, box, description) and merge consecutive rows of the same item.
pub fn group_rows(mut rows: Vec<PrintRow>) -> Vec<GroupedItem> {
    rows.sort_by_cached_key(|r| {
        (
            NaturalKey::new(&r.item_nos),
            NaturalKey::new(&r.cells.box_nos),
            r.cells.description.trim().to_string(),
        )
    });

    let mut groups: Vec<GroupedItem> = Vec::new();
    for row in rows {
        match groups.last_mut() {
            Some(group) if group.item_nos == row.item_nos => {
                group.rows.push(row.cells);
                group.rowspan = group.rows.len();
            }
            _ => groups.push(GroupedItem {
                item_nos: row.item_nos,
                rows: vec![row.cells],
                rowspan: 1,
                description: String::new(),
                description_merged: false,
                description_rowspan: 1,
            }),
        }
    }

    for group in &mut groups {
        let first = group.rows[0].description.trim();
        group.description_merged = group.rows.iter().all(|r| r.description.trim() == first);
        if group.description_merged {
            group.description = first.to_string();
            group.description_rowspan = group.rowspan;
        }
    }
    groups
}

fn text(obj: &Map<String, Value>, key: &str) -> String {
    value_text(field(obj, key)).trim().to_string()
}

/// First non-blank weight spelling among `keys`.
fn weight(obj: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .map(|k| value_text(field(obj, k)))
        .find(|v| !v.trim().is_empty() && v != "0" && v != "false")
        .unwrap_or_default()
}

/// `2.0` prints as `2`, `2.5` as `2.5`.
fn number_text(v: f64) -> String {
    v.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pivot::{AssociatedBox, Relationship, Weights};
    use crate::module_a::Dimensions;
    use serde_json::json;

    fn row(item: &str, boxes: &str, description: &str) -> PrintRow {
        PrintRow {
            item_nos: item.into(),
            cells: PrintCells {
                box_nos: boxes.into(),
                description: description.into(),
                ..PrintCells::default()
            },
        }
    }

    #[test]
    fn identical_descriptions_merge_into_one_cell() {
        let groups = group_rows(vec![row("7", "2", "Widget"), row("7", "1", "Widget")]);
        assert_eq!(groups.len(), 1);
        let g = &groups[0];
        assert_eq!(g.rowspan, 2);
        assert!(g.description_merged);
        assert_eq!(g.description, "Widget");
        assert_eq!(g.description_rowspan, 2);
        assert_eq!(g.rows[0].box_nos, "1");
    }

    #[test]
    fn differing_descriptions_stay_per_row() {
        let groups = group_rows(vec![row("7", "1", "Widget"), row("7", "2", "Gadget")]);
        let g = &groups[0];
        assert_eq!(g.rowspan, 2);
        assert!(!g.description_merged);
        assert_eq!(g.description, "");
        assert_eq!(g.description_rowspan, 1);
        assert_eq!(g.rows[0].description, "Widget");
        assert_eq!(g.rows[1].description, "Gadget");
    }

    #[test]
    fn sorts_items_numerically_before_text() {
        let groups = group_rows(vec![
            row("B", "1", "x"),
            row("10", "1", "x"),
            row("2", "1", "x"),
            row("10", "3", "y"),
        ]);
        let order: Vec<&str> = groups.iter().map(|g| g.item_nos.as_str()).collect();
        assert_eq!(order, vec!["2", "10", "B"]);
        assert_eq!(groups[1].rowspan, 2);
    }

    #[test]
    fn counts_distinct_box_sub_tokens() {
        let rows = vec![row("1", "1, 2", ""), row("2", "2,3,", ""), row("3", "", "")];
        assert_eq!(count_boxes(&rows), 3);
    }

    #[test]
    fn view_from_hierarchies_sums_rows() {
        let boxes = |net: f64| AssociatedBox {
            box_no: "1".into(),
            description: "Pump".into(),
            qty: 2.0,
            dimensions: Dimensions { l: Some(10.0), w: None, h: None },
            weights: Weights { net, gross: net + 1.0 },
        };
        let hierarchies = vec![
            ItemHierarchy {
                item_number: "1".into(),
                relationship: Relationship::ManyToOne,
                associated_boxes: vec![boxes(2.5)],
            },
            ItemHierarchy {
                item_number: "2".into(),
                relationship: Relationship::ManyToOne,
                associated_boxes: vec![boxes(1.25)],
            },
        ];
        let view = PackingPrintView::new(PrintHeader::default(), rows_from_hierarchies(&hierarchies));
        assert_eq!(view.total_boxes, 1);
        assert_eq!(view.total_net_weight, "3.75");
        assert_eq!(view.total_gross_weight, "5.75");
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items[0].rows[0].qty, "2");
        assert_eq!(view.items[0].rows[0].l, "10");
        assert_eq!(view.items[0].rows[0].w, "");
    }

    #[test]
    fn legacy_rows_accept_alternate_weight_keys() {
        let items = vec![
            json!({"itemNos": "1", "boxNos": "1,2", "description": "Gear", "netWeight": "4", "grossWt": 5}),
            json!({"itemNos": 2, "boxNos": "3", "net_weight": 1.5, "gross_weight": "oops"}),
            json!("skip me"),
        ];
        let view = PackingPrintView::new(PrintHeader::default(), rows_from_legacy(&items));
        assert_eq!(view.total_boxes, 3);
        assert_eq!(view.total_net_weight, "5.50");
        assert_eq!(view.total_gross_weight, "5.00");
        assert_eq!(view.items[1].item_nos, "2");
    }

    #[test]
    fn serializes_template_keys() {
        let view = PackingPrintView::new(PrintHeader::default(), vec![row("1", "1", "Gear")]);
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["items"][0]["itemNos"], "1");
        assert_eq!(value["items"][0]["rows"][0]["boxNos"], "1");
        assert_eq!(value["items"][0]["description_merged"], true);
        assert_eq!(value["total_net_weight"], "0.00");
        assert_eq!(value["packing_list_no"], "");
    }
}
