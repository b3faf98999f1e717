//! Loot generator boundary.
//!
//! Rarity-weighted item generation lives outside the core. The core only
//! computes the effective floor and rarity bounds from an outcome's item spec
//! and hands the result to the dungeon inventory.

use crate::state::{Consumable, Item, ItemSlot, Rarity};

/// Item and consumable generation supplied by the host application.
pub trait LootOracle {
    /// Generates a gear item for `effective_floor` (floor plus any boost).
    fn generate_item(
        &self,
        effective_floor: u32,
        slot_hint: Option<ItemSlot>,
        min_rarity: Option<Rarity>,
    ) -> Item;

    /// Builds a consumable from its recipe identifiers.
    ///
    /// Also used to repair consumables whose effect list was lost.
    fn generate_consumable(
        &self,
        base_id: &str,
        size_id: &str,
        potency_id: &str,
        rarity: Rarity,
        effective_floor: u32,
    ) -> Consumable;
}
