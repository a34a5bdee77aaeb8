// SPDX-License-Identifier: Apache-2.0

//! Single-element moves within one category's positional view.

use carta_model::{Catalog, CategoryId, ItemId};

/// Moves `dragged` to occupy `over`'s position within `category`'s
/// filtered view, leaving every other category's item sequence exactly
/// as it was. This is a remove-and-reinsert move, not a swap.
///
/// The operation is a no-op (returning `false`) when `dragged == over`
/// or when either id does not resolve inside the category's view. On a
/// move, the flat list is rebuilt as all other items followed by the
/// reordered category items; only the per-category views are
/// contractual, not that concatenation order.
pub fn move_item(
    catalog: &mut Catalog,
    category: &CategoryId,
    dragged: &ItemId,
    over: &ItemId,
) -> bool {
    if dragged == over {
        return false;
    }

    let view: Vec<usize> = catalog
        .items
        .iter()
        .enumerate()
        .filter(|(_, item)| &item.category == category)
        .map(|(idx, _)| idx)
        .collect();
    let from = view.iter().position(|&idx| &catalog.items[idx].id == dragged);
    let to = view.iter().position(|&idx| &catalog.items[idx].id == over);
    let (Some(from), Some(to)) = (from, to) else {
        return false;
    };
    if from == to {
        return false;
    }

    let mut category_items = Vec::with_capacity(view.len());
    let mut others = Vec::with_capacity(catalog.items.len() - view.len());
    for item in catalog.items.drain(..) {
        if &item.category == category {
            category_items.push(item);
        } else {
            others.push(item);
        }
    }
    let moved = category_items.remove(from);
    category_items.insert(to, moved);
    others.extend(category_items);
    catalog.items = others;
    true
}
