//! Items, consumables and the containers' common element type.
//!
//! Items are immutable value objects once generated. Ownership moves between
//! containers; nothing in the core clones an instance into a second container.

use strum::{Display, EnumIter};

use super::{ItemId, SetId, TargetRule, UniqueEffectId};
use crate::stats::{StatBonus, StatKind};

/// Rarity tier, ordered from worst to best.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rarity {
    Junk,
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
    Artifact,
    Divine,
}

/// Slot type an item can occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemSlot {
    Weapon,
    Helmet,
    Armor,
    Gloves,
    Boots,
    Shield,
    Accessory,
}

/// An equippable item instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub rarity: Rarity,
    pub slot: ItemSlot,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: StatBonus,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub set_id: Option<SetId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_unique: bool,
    /// Unique effect bound to this instance, resolved by id at dispatch time.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unique_effect: Option<UniqueEffectId>,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, slot: ItemSlot, rarity: Rarity) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            rarity,
            slot,
            stats: StatBonus::default(),
            value: 0,
            set_id: None,
            is_unique: false,
            unique_effect: None,
        }
    }

    #[must_use]
    pub fn with_stats(mut self, stats: StatBonus) -> Self {
        self.stats = stats;
        self
    }

    #[must_use]
    pub fn with_set(mut self, set_id: SetId) -> Self {
        self.set_id = Some(set_id);
        self
    }

    #[must_use]
    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    #[must_use]
    pub fn with_unique_effect(mut self, effect: UniqueEffectId) -> Self {
        self.unique_effect = Some(effect);
        self
    }

    /// Leading word of the item name, used as its material tag ("Iron Helm" → "Iron").
    pub fn material(&self) -> Option<&str> {
        self.name.split_whitespace().next()
    }
}

/// What a consumable effect does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConsumableEffectKind {
    Heal,
    HealOverTime,
    Revive,
    Buff,
    Cleanse,
    Damage,
    Special,
}

/// One effect declared by a consumable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumableEffect {
    pub kind: ConsumableEffectKind,
    /// Defaults to the user.
    #[cfg_attr(feature = "serde", serde(default = "default_target"))]
    pub target: TargetRule,
    pub value: i32,
    /// Duration in depths for timed kinds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<u32>,
    /// Stat affected by buffs.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stat: Option<StatKind>,
}

impl ConsumableEffect {
    /// Effect on the user with no duration or stat.
    pub fn on_self(kind: ConsumableEffectKind, value: i32) -> Self {
        Self {
            kind,
            target: TargetRule::SelfTarget,
            value,
            duration: None,
            stat: None,
        }
    }
}

/// Generation parameters a consumable can be rebuilt from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumableRecipe {
    pub base_id: String,
    pub size_id: String,
    pub potency_id: String,
}

/// A usable item instance (potions, scrolls, bombs).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Consumable {
    pub id: ItemId,
    pub name: String,
    pub rarity: Rarity,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<ConsumableEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stackable: bool,
    #[cfg_attr(feature = "serde", serde(default = "default_stack"))]
    pub stack_count: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub recipe: Option<ConsumableRecipe>,
}

#[cfg(feature = "serde")]
fn default_target() -> TargetRule {
    TargetRule::SelfTarget
}

#[cfg(feature = "serde")]
fn default_stack() -> u32 {
    1
}

impl Consumable {
    pub fn new(id: ItemId, name: impl Into<String>, effects: Vec<ConsumableEffect>) -> Self {
        Self {
            id,
            name: name.into(),
            rarity: Rarity::Common,
            effects,
            stackable: false,
            stack_count: 1,
            value: 0,
            recipe: None,
        }
    }

    #[must_use]
    pub fn stacked(mut self, count: u32) -> Self {
        self.stackable = true;
        self.stack_count = count;
        self
    }

    #[must_use]
    pub fn with_recipe(mut self, recipe: ConsumableRecipe) -> Self {
        self.recipe = Some(recipe);
        self
    }
}

/// Any item instance held by a container.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Loot {
    Item(Item),
    Consumable(Consumable),
}

impl Loot {
    pub fn id(&self) -> ItemId {
        match self {
            Loot::Item(item) => item.id,
            Loot::Consumable(consumable) => consumable.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Loot::Item(item) => &item.name,
            Loot::Consumable(consumable) => &consumable.name,
        }
    }

    pub(crate) fn rekey(&mut self, id: ItemId) {
        match self {
            Loot::Item(item) => item.id = id,
            Loot::Consumable(consumable) => consumable.id = id,
        }
    }
}
