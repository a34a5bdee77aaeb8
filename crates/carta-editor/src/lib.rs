#![forbid(unsafe_code)]
//! In-memory mutation surface over a working copy of the catalog.
//!
//! Nothing here touches durable storage. The working copy is a detached
//! clone of the canonical document; it becomes canonical only when the
//! save coordinator commits it, and is simply dropped otherwise.
//!
//! Field edits addressed at an id that is not present are silent
//! successful no-ops: the legacy admin client mapped over the item list,
//! and an absent id matched nothing.

pub mod reorder;

use carta_model::{parse_tags, slugify, Catalog, Category, CategoryId, Item, ItemId};
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub const CRATE_NAME: &str = "carta-editor";

/// Image reference a new item starts with before an upload replaces it.
pub const PLACEHOLDER_IMAGE: &str = "/menu-images/placeholder.jpg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    Empty(&'static str),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(field) => write!(f, "{field} must not be empty"),
        }
    }
}

impl std::error::Error for FormError {}

/// Form state behind the "add item" dialog. `tags` is the raw
/// comma-separated string the user typed.
#[derive(Debug, Clone)]
pub struct NewItemForm {
    pub category: CategoryId,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub image: String,
    pub tags: String,
}

impl NewItemForm {
    /// Empty form pre-targeted at a category, the way the dialog opens.
    #[must_use]
    pub fn for_category(category: CategoryId) -> Self {
        Self {
            category,
            name: String::new(),
            description: String::new(),
            price: 0,
            image: PLACEHOLDER_IMAGE.to_string(),
            tags: String::new(),
        }
    }
}

/// Form state behind the "add category" dialog. Empty `id` and `slug`
/// are derived from `name` on submit.
#[derive(Debug, Clone, Default)]
pub struct NewCategoryForm {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// Owns one working copy and is its only mutation surface. Every
/// operation either succeeds or leaves the copy unchanged.
pub struct Editor {
    catalog: Catalog,
}

impl Editor {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    pub fn set_name(&mut self, id: &ItemId, name: &str) {
        if let Some(item) = self.item_mut(id) {
            item.name = name.to_string();
        }
    }

    pub fn set_description(&mut self, id: &ItemId, description: &str) {
        if let Some(item) = self.item_mut(id) {
            item.description = description.to_string();
        }
    }

    pub fn set_price(&mut self, id: &ItemId, price: u64) {
        if let Some(item) = self.item_mut(id) {
            item.price = price;
        }
    }

    pub fn set_image(&mut self, id: &ItemId, image: &str) {
        if let Some(item) = self.item_mut(id) {
            item.image = image.to_string();
        }
    }

    /// A toggle, deliberately not idempotent.
    pub fn toggle_availability(&mut self, id: &ItemId) {
        if let Some(item) = self.item_mut(id) {
            item.available = !item.available;
        }
    }

    /// Removal is unconditional; user confirmation is the caller's
    /// concern.
    pub fn delete_item(&mut self, id: &ItemId) {
        self.catalog.items.retain(|item| &item.id != id);
    }

    /// Appends a new item. `name` and `description` are required; the
    /// item always starts available, with tags parsed from the form's
    /// comma-separated string.
    pub fn add_item(&mut self, form: &NewItemForm) -> Result<ItemId, FormError> {
        if form.name.trim().is_empty() {
            return Err(FormError::Empty("name"));
        }
        if form.description.trim().is_empty() {
            return Err(FormError::Empty("description"));
        }
        let id = self.next_item_id();
        let image = if form.image.is_empty() {
            PLACEHOLDER_IMAGE.to_string()
        } else {
            form.image.clone()
        };
        self.catalog.items.push(Item {
            id: id.clone(),
            name: form.name.clone(),
            description: form.description.clone(),
            price: form.price,
            image,
            tags: parse_tags(&form.tags),
            category: form.category.clone(),
            available: true,
        });
        Ok(id)
    }

    /// Appends a new category. An explicit `id` wins; otherwise it is
    /// derived from `name` via [`slugify`]. `slug` defaults to the id.
    /// Collisions with existing category ids are not checked.
    pub fn add_category(&mut self, form: &NewCategoryForm) -> Result<CategoryId, FormError> {
        if form.name.trim().is_empty() {
            return Err(FormError::Empty("name"));
        }
        let raw_id = if form.id.is_empty() {
            slugify(&form.name)
        } else {
            form.id.clone()
        };
        if raw_id.is_empty() {
            return Err(FormError::Empty("id"));
        }
        let slug = if form.slug.is_empty() {
            raw_id.clone()
        } else {
            form.slug.clone()
        };
        let id = CategoryId::new(raw_id);
        let order = self.catalog.max_category_order() + 1;
        self.catalog.categories.push(Category {
            id: id.clone(),
            name: form.name.clone(),
            slug,
            order,
        });
        Ok(id)
    }

    /// Drag-and-drop move within one category's view; see
    /// [`reorder::move_item`]. Returns whether anything changed.
    pub fn move_item(&mut self, category: &CategoryId, dragged: &ItemId, over: &ItemId) -> bool {
        reorder::move_item(&mut self.catalog, category, dragged, over)
    }

    fn item_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.catalog.items.iter_mut().find(|item| &item.id == id)
    }

    fn next_item_id(&self) -> ItemId {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        unique_item_id(&self.catalog, millis)
    }
}

/// Fresh item id from a millisecond timestamp, suffixed with a counter
/// when the bare timestamp id is already taken. The legacy client used
/// the bare timestamp alone and could collide within one millisecond.
#[must_use]
pub fn unique_item_id(catalog: &Catalog, unix_millis: u128) -> ItemId {
    let base = format!("item-{unix_millis}");
    let mut candidate = ItemId::new(base.clone());
    let mut n = 2u32;
    while catalog.contains_item(&candidate) {
        candidate = ItemId::new(format!("{base}-{n}"));
        n += 1;
    }
    candidate
}
