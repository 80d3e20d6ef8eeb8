//! "Module B": which items went into which boxes.
//!
//! Three shapes, selected by the `moduleBType` tag:
//!
//! - `B1`: box → items, `[{boxNumber, itemNumbers}]`
//! - `B2`: item → boxes, `[{itemNumber, boxNumbers}]`
//! - `B3`: a single pair, `{itemNumber, boxNumber}`
//!
//! Either side of a row may be a reference list with ranges; every
//! combination of the two sides is an association.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use tradedocs_core::DomainResult;

use crate::fields::first_text;
use crate::tokens::parse_tokens;

/// Item number → the set of box numbers it was packed in.
pub type Associations = BTreeMap<String, BTreeSet<String>>;

/// Type tag of a Module B payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleBKind {
    B1,
    B2,
    B3,
}

impl ModuleBKind {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "B1" => Some(Self::B1),
            "B2" => Some(Self::B2),
            "B3" => Some(Self::B3),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::B3 => "B3",
        }
    }
}

/// One association row: raw item references against raw box references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationRow {
    pub item_numbers: String,
    pub box_numbers: String,
}

/// Normalized Module B input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleB {
    BoxToItems(Vec<AssociationRow>),
    ItemToBoxes(Vec<AssociationRow>),
    Single(AssociationRow),
    Empty,
}

impl ModuleB {
    /// Normalize a raw payload according to its tag. Never fails.
    pub fn from_payload(kind: Option<ModuleBKind>, payload: &Value) -> Self {
        match (kind, payload) {
            (Some(ModuleBKind::B1), Value::Array(rows)) => Self::BoxToItems(
                rows.iter()
                    .filter_map(Value::as_object)
                    .map(|r| AssociationRow {
                        box_numbers: first_text(r, &["boxNumber", "boxNumbers"]),
                        item_numbers: first_text(r, &["itemNumbers", "itemNumber"]),
                    })
                    .collect(),
            ),
            (Some(ModuleBKind::B2), Value::Array(rows)) => Self::ItemToBoxes(
                rows.iter()
                    .filter_map(Value::as_object)
                    .map(|r| AssociationRow {
                        item_numbers: first_text(r, &["itemNumber", "itemNumbers"]),
                        box_numbers: first_text(r, &["boxNumbers", "boxNumber"]),
                    })
                    .collect(),
            ),
            (Some(ModuleBKind::B3), Value::Object(obj)) => Self::Single(AssociationRow {
                item_numbers: first_text(obj, &["itemNumber", "itemNumbers"]),
                box_numbers: first_text(obj, &["boxNumber", "boxNumbers"]),
            }),
            (Some(kind), _) => {
                tracing::warn!(kind = kind.as_str(), "module B payload does not match its type tag");
                Self::Empty
            }
            (None, _) => Self::Empty,
        }
    }

    pub fn rows(&self) -> &[AssociationRow] {
        match self {
            Self::BoxToItems(rows) | Self::ItemToBoxes(rows) => rows,
            Self::Single(row) => core::slice::from_ref(row),
            Self::Empty => &[],
        }
    }

    /// Expand every row into item → boxes associations.
    pub fn associations(&self) -> DomainResult<Associations> {
        let mut out = Associations::new();
        for row in self.rows() {
            let boxes = parse_tokens(&row.box_numbers)?;
            if boxes.is_empty() {
                continue;
            }
            for item_no in parse_tokens(&row.item_numbers)? {
                out.entry(item_no)
                    .or_default()
                    .extend(boxes.iter().cloned());
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn b1_box_to_items_inverts_into_item_map() {
        let payload = json!([
            {"boxNumber": "1", "itemNumbers": "10,11"},
            {"boxNumber": "2-3", "itemNumbers": "11"},
            "garbage"
        ]);
        let assoc = ModuleB::from_payload(Some(ModuleBKind::B1), &payload)
            .associations()
            .unwrap();
        assert_eq!(assoc["10"], set(&["1"]));
        assert_eq!(assoc["11"], set(&["1", "2", "3"]));
    }

    #[test]
    fn b2_item_to_boxes_merges_repeated_items() {
        let payload = json!([
            {"itemNumber": "7", "boxNumbers": "1,2"},
            {"itemNumber": "7", "boxNumbers": "2,4"},
            {"itemNumber": 8, "boxNumbers": 5}
        ]);
        let assoc = ModuleB::from_payload(Some(ModuleBKind::B2), &payload)
            .associations()
            .unwrap();
        assert_eq!(assoc["7"], set(&["1", "2", "4"]));
        assert_eq!(assoc["8"], set(&["5"]));
    }

    #[test]
    fn b3_single_pair_expands_both_sides() {
        let payload = json!({"itemNumber": "10", "boxNumber": "1-3"});
        let assoc = ModuleB::from_payload(Some(ModuleBKind::B3), &payload)
            .associations()
            .unwrap();
        assert_eq!(assoc.len(), 1);
        assert_eq!(assoc["10"], set(&["1", "2", "3"]));
    }

    #[test]
    fn item_without_boxes_is_not_associated() {
        let payload = json!({"itemNumber": "10", "boxNumber": ""});
        let assoc = ModuleB::from_payload(Some(ModuleBKind::B3), &payload)
            .associations()
            .unwrap();
        assert!(assoc.is_empty());
    }

    #[test]
    fn wrong_shapes_are_empty() {
        assert_eq!(ModuleB::from_payload(Some(ModuleBKind::B3), &json!([])), ModuleB::Empty);
        assert_eq!(ModuleB::from_payload(None, &json!({})), ModuleB::Empty);
        assert!(ModuleB::Empty.associations().unwrap().is_empty());
    }
}
