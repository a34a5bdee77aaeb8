// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One menu section, e.g. "Çorbalar".
///
/// `slug` is derived from `name` on creation but independently editable;
/// `order` is an advisory display rank. Documents written by the legacy
/// admin client omit `order` for new categories, so it defaults to 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub order: u32,
}

/// One dish. `image` is a relative reference to a stored artifact, never
/// embedded bytes. `price` is whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: CategoryId,
    pub available: bool,
}

/// The whole catalog document. There is exactly one canonical instance,
/// owned by the store; everything else is a detached working copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub items: Vec<Item>,
}

impl Catalog {
    /// Positional per-category view over the flat item list.
    pub fn items_in<'a>(&'a self, category: &'a CategoryId) -> impl Iterator<Item = &'a Item> {
        self.items.iter().filter(move |item| &item.category == category)
    }

    /// Same view restricted to items currently marked available, which is
    /// what customers see.
    pub fn visible_items_in<'a>(
        &'a self,
        category: &'a CategoryId,
    ) -> impl Iterator<Item = &'a Item> {
        self.items_in(category).filter(|item| item.available)
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    #[must_use]
    pub fn contains_item(&self, id: &ItemId) -> bool {
        self.item(id).is_some()
    }

    #[must_use]
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| &category.id == id)
    }

    #[must_use]
    pub fn max_category_order(&self) -> u32 {
        self.categories.iter().map(|c| c.order).max().unwrap_or(0)
    }
}
