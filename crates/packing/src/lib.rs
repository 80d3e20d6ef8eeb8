//! Packaging-list domain module.
//!
//! Turns the loosely-structured box description ("Module A") and item-to-box
//! association ("Module B") inputs into the relational pivot that is stored and
//! printed. Pure domain logic: no IO, no HTTP, no storage.

pub mod document;
mod fields;
pub mod module_a;
pub mod module_b;
pub mod pivot;
pub mod print;
pub mod tokens;

pub use document::{DEFAULT_CURRENCY, PackingList, PackingListChanges, PackingListDraft};
pub use module_a::{
    BoxDetail, BoxRow, Dimensions, MISSING_DESCRIPTION, Material, ModuleA, ModuleAKind, WeightTotals,
};
pub use module_b::{AssociationRow, Associations, ModuleB, ModuleBKind};
pub use pivot::{
    AssociatedBox, ItemHierarchy, RelationalData, RelationalSummary, Relationship, Weights,
    build_relational, pivot,
};
pub use print::{
    GroupedItem, PackingPrintView, PrintCells, PrintHeader, PrintRow, count_boxes, group_rows,
    rows_from_hierarchies, rows_from_legacy,
};
pub use tokens::{NaturalKey, natural_cmp, parse_tokens};
