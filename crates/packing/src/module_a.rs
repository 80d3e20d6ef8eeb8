//! "Module A": the box/material description input of a packaging list.
//!
//! Three shapes arrive from the form, selected by the `moduleAType` tag:
//!
//! - `A1`: a list of box rows. Each entry is either already flat
//!   (`{boxNumbers, description, qty, l, w, h, netWt, grossWt}`) or a nested
//!   section (`{material: {description}, boxes: [{boxNumber, ...}]}`).
//! - `A2`: one set of boxes holding several materials
//!   (`{boxNumber, materials: [{description, qty, l, w, h, netWt, grossWt}]}`).
//! - `A3`: a single box row reused for every box number it lists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use tradedocs_core::{DomainResult, lenient_f64, optional_f64, value_text};

use crate::fields::{field, first_text};
use crate::tokens::parse_tokens;

/// Description used when a box has no description at all.
pub const MISSING_DESCRIPTION: &str = "N/A";

/// Type tag of a Module A payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleAKind {
    A1,
    A2,
    A3,
}

impl ModuleAKind {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "A1" => Some(Self::A1),
            "A2" => Some(Self::A2),
            "A3" => Some(Self::A3),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::A3 => "A3",
        }
    }
}

/// Box dimensions. Each side is optional because forms often leave them blank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub l: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
}

impl Dimensions {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            l: optional_f64(field(obj, "l")),
            w: optional_f64(field(obj, "w")),
            h: optional_f64(field(obj, "h")),
        }
    }

    /// Side-wise maximum; a missing side never wins over a present one.
    fn max(self, other: Self) -> Self {
        Self {
            l: max_side(self.l, other.l),
            w: max_side(self.w, other.w),
            h: max_side(self.h, other.h),
        }
    }
}

fn max_side(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Canonical box row every A1/A3 shape normalizes to.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxRow {
    /// Raw reference list, e.g. `"1-3,7"`.
    pub box_numbers: String,
    pub description: Option<String>,
    pub qty: f64,
    pub dimensions: Dimensions,
    pub net_weight: f64,
    pub gross_weight: f64,
}

/// One material line of an A2 payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub description: String,
    pub qty: f64,
    pub dimensions: Dimensions,
    pub net_weight: f64,
    pub gross_weight: f64,
}

/// Normalized Module A input.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleA {
    /// A1: independent box rows.
    Rows(Vec<BoxRow>),
    /// A2: the same boxes hold every listed material.
    Materials {
        box_numbers: String,
        materials: Vec<Material>,
    },
    /// A3: one row shared by all listed boxes.
    SingleBox(BoxRow),
    /// No usable input (missing or unknown tag, wrong payload shape).
    Empty,
}

/// What the pivot knows about one physical box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxDetail {
    pub description: String,
    pub qty: f64,
    pub dimensions: Dimensions,
    pub net_weight: f64,
    pub gross_weight: f64,
}

impl Default for BoxDetail {
    fn default() -> Self {
        Self {
            description: MISSING_DESCRIPTION.to_string(),
            qty: 0.0,
            dimensions: Dimensions::default(),
            net_weight: 0.0,
            gross_weight: 0.0,
        }
    }
}

impl From<&BoxRow> for BoxDetail {
    fn from(row: &BoxRow) -> Self {
        Self {
            description: row
                .description
                .clone()
                .unwrap_or_else(|| MISSING_DESCRIPTION.to_string()),
            qty: row.qty,
            dimensions: row.dimensions,
            net_weight: row.net_weight,
            gross_weight: row.gross_weight,
        }
    }
}

/// Aggregate net/gross weight of a packaging list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightTotals {
    pub net: f64,
    pub gross: f64,
}

impl ModuleA {
    /// Normalize a raw payload according to its tag.
    ///
    /// Never fails: entries of the wrong shape are skipped, and a payload that does
    /// not match its tag at all becomes [`ModuleA::Empty`].
    pub fn from_payload(kind: Option<ModuleAKind>, payload: &Value) -> Self {
        match (kind, payload) {
            (Some(ModuleAKind::A1), Value::Array(entries)) => Self::Rows(normalize_rows(entries)),
            (Some(ModuleAKind::A2), Value::Object(obj)) => Self::Materials {
                box_numbers: first_text(obj, &["boxNumber", "boxNumbers"]),
                materials: match field(obj, "materials") {
                    Value::Array(items) => items
                        .iter()
                        .filter_map(Value::as_object)
                        .map(material_from_object)
                        .collect(),
                    _ => Vec::new(),
                },
            },
            (Some(ModuleAKind::A3), Value::Object(obj)) => Self::SingleBox(BoxRow {
                box_numbers: first_text(obj, &["boxNumber", "boxNumbers"]),
                description: match field(obj, "description") {
                    Value::Null => None,
                    other => Some(value_text(other)),
                },
                qty: lenient_f64(field(obj, "qty")),
                dimensions: Dimensions::from_object(obj),
                net_weight: lenient_f64(field(obj, "netWt")),
                gross_weight: lenient_f64(field(obj, "grossWt")),
            }),
            (Some(kind), _) => {
                tracing::warn!(kind = kind.as_str(), "module A payload does not match its type tag");
                Self::Empty
            }
            (None, _) => Self::Empty,
        }
    }

    /// Aggregate weights straight from the Module A input.
    ///
    /// A1 sums its rows, A2 sums its materials, A3 takes the single box. This is
    /// independent of which boxes Module B actually references.
    pub fn totals(&self) -> WeightTotals {
        match self {
            Self::Rows(rows) => rows.iter().fold(WeightTotals::default(), |acc, r| WeightTotals {
                net: acc.net + r.net_weight,
                gross: acc.gross + r.gross_weight,
            }),
            Self::Materials { materials, .. } => {
                materials.iter().fold(WeightTotals::default(), |acc, m| WeightTotals {
                    net: acc.net + m.net_weight,
                    gross: acc.gross + m.gross_weight,
                })
            }
            Self::SingleBox(row) => WeightTotals {
                net: row.net_weight,
                gross: row.gross_weight,
            },
            Self::Empty => WeightTotals::default(),
        }
    }

    /// Map every referenced box number to its details.
    ///
    /// For A1, a box listed by several rows takes the details of the last one.
    pub fn box_lookup(&self) -> DomainResult<BTreeMap<String, BoxDetail>> {
        let mut lookup = BTreeMap::new();
        match self {
            Self::Rows(rows) => {
                for row in rows {
                    let detail = BoxDetail::from(row);
                    for box_no in parse_tokens(&row.box_numbers)? {
                        lookup.insert(box_no, detail.clone());
                    }
                }
            }
            Self::Materials {
                box_numbers,
                materials,
            } => {
                let summary = summarize_materials(materials);
                for box_no in parse_tokens(box_numbers)? {
                    lookup.insert(box_no, summary.clone());
                }
            }
            Self::SingleBox(row) => {
                let detail = BoxDetail::from(row);
                for box_no in parse_tokens(&row.box_numbers)? {
                    lookup.insert(box_no, detail.clone());
                }
            }
            Self::Empty => {}
        }
        Ok(lookup)
    }
}

fn normalize_rows(entries: &[Value]) -> Vec<BoxRow> {
    let mut out = Vec::new();
    for entry in entries.iter().filter_map(Value::as_object) {
        match (field(entry, "material"), field(entry, "boxes")) {
            (Value::Object(material), Value::Array(boxes)) => {
                let description = value_text(field(material, "description"));
                for b in boxes.iter().filter_map(Value::as_object) {
                    out.push(row_from_object(
                        b,
                        first_text(b, &["boxNumber", "boxNumbers"]),
                        description.clone(),
                    ));
                }
            }
            _ => out.push(row_from_object(
                entry,
                first_text(entry, &["boxNumbers", "boxNumber"]),
                value_text(field(entry, "description")),
            )),
        }
    }
    out
}

fn row_from_object(obj: &Map<String, Value>, box_numbers: String, description: String) -> BoxRow {
    BoxRow {
        box_numbers,
        description: Some(description),
        qty: lenient_f64(field(obj, "qty")),
        dimensions: Dimensions::from_object(obj),
        net_weight: lenient_f64(field(obj, "netWt")),
        gross_weight: lenient_f64(field(obj, "grossWt")),
    }
}

fn material_from_object(obj: &Map<String, Value>) -> Material {
    Material {
        description: value_text(field(obj, "description")).trim().to_string(),
        qty: lenient_f64(field(obj, "qty")),
        dimensions: Dimensions::from_object(obj),
        net_weight: lenient_f64(field(obj, "netWt")),
        gross_weight: lenient_f64(field(obj, "grossWt")),
    }
}

/// Collapse A2 materials into the single detail every listed box shares.
fn summarize_materials(materials: &[Material]) -> BoxDetail {
    let descriptions: Vec<&str> = materials
        .iter()
        .map(|m| m.description.as_str())
        .filter(|d| !d.is_empty())
        .collect();

    let mut detail = BoxDetail {
        description: if descriptions.is_empty() {
            MISSING_DESCRIPTION.to_string()
        } else {
            descriptions.join(" | ")
        },
        ..BoxDetail::default()
    };
    for m in materials {
        detail.qty += m.qty;
        detail.net_weight += m.net_weight;
        detail.gross_weight += m.gross_weight;
        detail.dimensions = detail.dimensions.max(m.dimensions);
    }
    detail
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_and_nested_a1_rows_share_one_shape() {
        let payload = json!([
            {"boxNumbers": "1-2", "description": "Bolts", "qty": "10", "l": 40, "netWt": 5, "grossWt": "6"},
            {"material": {"description": "Nuts"}, "boxes": [
                {"boxNumber": "3", "qty": 4, "netWt": "1.5", "grossWt": 2},
                "not-a-box"
            ]},
            42
        ]);
        let module = ModuleA::from_payload(Some(ModuleAKind::A1), &payload);
        let ModuleA::Rows(rows) = &module else {
            panic!("expected rows, got {module:?}");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].box_numbers, "1-2");
        assert_eq!(rows[0].dimensions.l, Some(40.0));
        assert_eq!(rows[1].box_numbers, "3");
        assert_eq!(rows[1].description.as_deref(), Some("Nuts"));

        let totals = module.totals();
        assert_eq!(totals.net, 6.5);
        assert_eq!(totals.gross, 8.0);

        let lookup = module.box_lookup().unwrap();
        assert_eq!(lookup.len(), 3);
        assert_eq!(lookup["2"].description, "Bolts");
        assert_eq!(lookup["3"].qty, 4.0);
    }

    #[test]
    fn a2_materials_collapse_into_one_summary() {
        let payload = json!({
            "boxNumber": "5,6",
            "materials": [
                {"description": "Copper", "qty": 2, "l": 10, "w": "30", "netWt": 3, "grossWt": 4},
                {"description": " ", "qty": "1", "l": "25", "h": 8, "netWt": "2", "grossWt": "bad"},
                {"description": "Tin", "qty": 1, "w": 12, "netWt": 1, "grossWt": 1}
            ]
        });
        let module = ModuleA::from_payload(Some(ModuleAKind::A2), &payload);

        let totals = module.totals();
        assert_eq!(totals.net, 6.0);
        assert_eq!(totals.gross, 5.0);

        let lookup = module.box_lookup().unwrap();
        let detail = &lookup["6"];
        assert_eq!(detail.description, "Copper | Tin");
        assert_eq!(detail.qty, 4.0);
        assert_eq!(
            detail.dimensions,
            Dimensions { l: Some(25.0), w: Some(30.0), h: Some(8.0) }
        );
        assert_eq!(lookup["5"], lookup["6"]);
    }

    #[test]
    fn a2_without_descriptions_reads_not_available() {
        let payload = json!({"boxNumber": "1", "materials": [{"qty": 1}]});
        let lookup = ModuleA::from_payload(Some(ModuleAKind::A2), &payload)
            .box_lookup()
            .unwrap();
        assert_eq!(lookup["1"].description, MISSING_DESCRIPTION);
        assert_eq!(lookup["1"].dimensions, Dimensions::default());
    }

    #[test]
    fn a3_single_box_is_reused_for_every_number() {
        let payload = json!({"boxNumber": "1-3", "description": "Pump", "qty": 1, "netWt": 10, "grossWt": 12});
        let module = ModuleA::from_payload(Some(ModuleAKind::A3), &payload);
        let lookup = module.box_lookup().unwrap();
        assert_eq!(lookup.keys().collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert!(lookup.values().all(|d| d.description == "Pump" && d.net_weight == 10.0));
        assert_eq!(module.totals(), WeightTotals { net: 10.0, gross: 12.0 });
    }

    #[test]
    fn a3_without_description_reads_not_available() {
        let payload = json!({"boxNumber": "9"});
        let lookup = ModuleA::from_payload(Some(ModuleAKind::A3), &payload)
            .box_lookup()
            .unwrap();
        assert_eq!(lookup["9"].description, MISSING_DESCRIPTION);
    }

    #[test]
    fn mismatched_or_missing_tags_are_empty() {
        assert_eq!(ModuleA::from_payload(Some(ModuleAKind::A1), &json!({})), ModuleA::Empty);
        assert_eq!(ModuleA::from_payload(Some(ModuleAKind::A3), &json!([])), ModuleA::Empty);
        assert_eq!(ModuleA::from_payload(None, &json!([{"boxNumbers": "1"}])), ModuleA::Empty);
        assert_eq!(ModuleA::Empty.totals(), WeightTotals::default());
    }

    #[test]
    fn tags_parse_case_insensitively() {
        assert_eq!(ModuleAKind::parse(" a2 "), Some(ModuleAKind::A2));
        assert_eq!(ModuleAKind::parse("A4"), None);
    }
}
