//! Persistent game state: heroes, items, containers and run counters.
//!
//! Everything here is plain data. No type in this module carries behavior that
//! cannot survive a serde round trip; unique effects and ability definitions are
//! referenced by id and resolved against registries at call time.

mod abilities;
mod common;
mod equipment;
mod hero;
mod inventory;
mod item;
mod party;
mod status;
mod target;

pub use abilities::AbilityState;
pub use common::{AbilityId, HeroId, ItemId, SetId, UniqueEffectId};
pub use equipment::{EquipSlot, Equipment};
pub use hero::Hero;
pub use inventory::Inventory;
pub use item::{
    Consumable, ConsumableEffect, ConsumableEffectKind, ConsumableRecipe, Item, ItemSlot, Loot,
    Rarity,
};
pub use party::{Party, RunResources};
pub use status::{TimedEffect, TimedEffectKind, TimedEffectSpec};
pub use target::TargetRule;
