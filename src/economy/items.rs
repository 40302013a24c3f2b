//! Item catalogue and the player's owned-item counts.
use std::{collections::BTreeMap, fmt};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Unique identifier for a catalogue item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ItemId(u32);

impl ItemId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

/// Item categories; only food applies gauge effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Food,
    Interior,
}

impl ItemCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Interior => "interior",
        }
    }
}

/// A purchasable good: display name, price in 냥, and optional gauge effects.
#[derive(Debug, Clone)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: &'static str,
    pub category: ItemCategory,
    pub price: i64,
    pub hunger_effect: Option<i64>,
    pub love_effect: Option<i64>,
}

const fn food(id: u32, name: &'static str, price: i64, hunger: i64, love: i64) -> ItemDef {
    ItemDef {
        id: ItemId::new(id),
        name,
        category: ItemCategory::Food,
        price,
        hunger_effect: Some(hunger),
        love_effect: Some(love),
    }
}

const fn interior(id: u32, name: &'static str, price: i64) -> ItemDef {
    ItemDef {
        id: ItemId::new(id),
        name,
        category: ItemCategory::Interior,
        price,
        hunger_effect: None,
        love_effect: None,
    }
}

const CATALOG: [ItemDef; 5] = [
    food(1, "값 싼 츄르", 50, 10, 0),
    food(2, "인기 츄르", 80, 20, 5),
    food(3, "프리미엄 츄르", 120, 30, 10),
    interior(101, "고양이 해먹", 300),
    interior(102, "장식 화분", 200),
];

/// Static shop catalogue.
#[derive(Resource, Debug, Clone)]
pub struct ItemCatalog {
    items: Vec<ItemDef>,
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self {
            items: CATALOG.to_vec(),
        }
    }
}

impl ItemCatalog {
    pub fn get(&self, id: ItemId) -> Option<&ItemDef> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[ItemDef] {
        &self.items
    }
}

/// Counts of items the player owns, keyed by item id.
///
/// A count never goes negative; consuming the last unit removes the entry
/// entirely, so `count == 0` is never observable.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnedItems {
    counts: BTreeMap<ItemId, u32>,
}

impl OwnedItems {
    pub fn from_counts(counts: impl IntoIterator<Item = (ItemId, u32)>) -> Self {
        Self {
            counts: counts
                .into_iter()
                .filter(|(_, count)| *count > 0)
                .collect(),
        }
    }

    pub fn count(&self, id: ItemId) -> u32 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    pub fn add(&mut self, id: ItemId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let entry = self.counts.entry(id).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    /// Consumes one unit. Returns false (and mutates nothing) when the item
    /// is not owned.
    pub fn consume_one(&mut self, id: ItemId) -> bool {
        match self.counts.get_mut(&id) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.counts.remove(&id);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, u32)> + '_ {
        self.counts.iter().map(|(id, count)| (*id, *count))
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
