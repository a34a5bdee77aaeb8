#![forbid(unsafe_code)]
//! Catalog model SSOT.
//!
//! The canonical document is one JSON object: a list of categories and a
//! flat list of items. Item order in the flat list is the display order
//! within each category (the per-category filtered view); absolute
//! position across categories carries no meaning.

mod catalog;
mod slug;

pub use catalog::{Catalog, Category, CategoryId, Item, ItemId};
pub use slug::{parse_tags, slugify};

pub const CRATE_NAME: &str = "carta-model";
