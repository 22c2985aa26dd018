#![forbid(unsafe_code)]

use super::ids::ItemId;
use super::model::{Item, Tag};
use std::collections::BTreeMap;

/// One row of the items ⟕ items_tags ⟕ tags join. `item.tags` is ignored;
/// `tag` is `None` for an item without associations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemTagRow {
    pub item: Item,
    pub tag: Option<Tag>,
}

/// Folds flat join rows into item aggregates.
///
/// Items come out in the order they are first seen in `rows`; each item's tags
/// keep the order their rows arrived in. Rows for the same item do not need to
/// be contiguous. The index map only locates an item's slot in the output
/// vector; ordering never depends on it.
pub fn fold_item_rows<I>(rows: I) -> Vec<Item>
where
    I: IntoIterator<Item = ItemTagRow>,
{
    let mut items: Vec<Item> = Vec::new();
    let mut slots: BTreeMap<ItemId, usize> = BTreeMap::new();

    for ItemTagRow { item, tag } in rows {
        let slot = match slots.get(&item.id) {
            Some(slot) => *slot,
            None => {
                let slot = items.len();
                slots.insert(item.id.clone(), slot);
                items.push(Item {
                    tags: Vec::new(),
                    ..item
                });
                slot
            }
        };

        if let Some(tag) = tag {
            let tags = &mut items[slot].tags;
            if !tags.iter().any(|existing| existing.id == tag.id) {
                tags.push(tag);
            }
        }
    }

    items
}
