//! Item ↔ box relational pivot.
//!
//! Joins the Module A box lookup with the Module B associations into one
//! hierarchy per item, ordered naturally by item and box number.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use tradedocs_core::DomainResult;

use crate::module_a::{BoxDetail, Dimensions, ModuleA, WeightTotals};
use crate::module_b::{Associations, ModuleB};
use crate::tokens::natural_cmp;

/// How an item relates to the boxes it was packed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relationship {
    #[serde(rename = "One-to-One")]
    OneToOne,
    #[serde(rename = "One-to-Many")]
    OneToMany,
    /// At least one of the item's boxes also holds another item.
    #[serde(rename = "Many-to-One")]
    ManyToOne,
}

impl Relationship {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneToOne => "One-to-One",
            Self::OneToMany => "One-to-Many",
            Self::ManyToOne => "Many-to-One",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    #[serde(default)]
    pub net: f64,
    #[serde(default)]
    pub gross: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociatedBox {
    pub box_no: String,
    pub description: String,
    #[serde(default)]
    pub qty: f64,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub weights: Weights,
}

impl AssociatedBox {
    fn new(box_no: String, detail: &BoxDetail) -> Self {
        Self {
            box_no,
            description: detail.description.clone(),
            qty: detail.qty,
            dimensions: detail.dimensions,
            weights: Weights {
                net: detail.net_weight,
                gross: detail.gross_weight,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemHierarchy {
    pub item_number: String,
    pub relationship: Relationship,
    #[serde(default)]
    pub associated_boxes: Vec<AssociatedBox>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationalSummary {
    pub total_net: f64,
    pub total_gross: f64,
    pub currency: String,
}

/// The stored form of a packaging list's derived data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationalData {
    #[serde(rename = "itemHierarchies", default)]
    pub item_hierarchies: Vec<ItemHierarchy>,
    pub summary: RelationalSummary,
}

/// Build one hierarchy per associated item.
///
/// Boxes missing from `lookup` still appear, with [`BoxDetail::default`].
pub fn pivot(
    lookup: &BTreeMap<String, BoxDetail>,
    associations: &Associations,
) -> Vec<ItemHierarchy> {
    let mut box_to_items: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for (item_no, boxes) in associations {
        for box_no in boxes {
            box_to_items
                .entry(box_no.as_str())
                .or_default()
                .insert(item_no.as_str());
        }
    }

    let missing = BoxDetail::default();
    let mut items: Vec<&String> = associations.keys().collect();
    items.sort_by(|a, b| natural_cmp(a, b));

    items
        .into_iter()
        .map(|item_no| {
            let mut boxes: Vec<&String> = associations[item_no].iter().collect();
            boxes.sort_by(|a, b| natural_cmp(a, b));

            let shared = boxes
                .iter()
                .any(|b| box_to_items.get(b.as_str()).is_some_and(|items| items.len() > 1));
            let relationship = if shared {
                Relationship::ManyToOne
            } else if boxes.len() > 1 {
                Relationship::OneToMany
            } else {
                Relationship::OneToOne
            };

            ItemHierarchy {
                item_number: item_no.clone(),
                relationship,
                associated_boxes: boxes
                    .into_iter()
                    .map(|b| AssociatedBox::new(b.clone(), lookup.get(b).unwrap_or(&missing)))
                    .collect(),
            }
        })
        .collect()
}

/// Normalize both modules, pivot them, and attach the Module A weight totals.
pub fn build_relational(
    module_a: &ModuleA,
    module_b: &ModuleB,
    currency: &str,
) -> DomainResult<RelationalData> {
    let lookup = module_a.box_lookup()?;
    let associations = module_b.associations()?;
    let WeightTotals { net, gross } = module_a.totals();

    Ok(RelationalData {
        item_hierarchies: pivot(&lookup, &associations),
        summary: RelationalSummary {
            total_net: net,
            total_gross: gross,
            currency: currency.to_string(),
        },
    })
}
