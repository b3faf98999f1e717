//! Event, choice and outcome data.
//!
//! Events are authored content and arrive as opaque data. The resolution mode
//! of a choice is a closed enum, so a choice is always exactly one of fixed,
//! weighted or success/failure.

use strum::Display;

use crate::state::{ConsumableRecipe, ItemSlot, Rarity, TargetRule, TimedEffectSpec};
use crate::stats::StatKind;

/// Category of a dungeon event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EventKind {
    Combat,
    Treasure,
    #[default]
    Choice,
    Rest,
    Merchant,
    Trap,
    Boss,
}

impl EventKind {
    /// Returns true for events that open a fight.
    pub const fn is_combat(self) -> bool {
        matches!(self, Self::Combat | Self::Boss)
    }
}

/// A narrative event with branching choices.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DungeonEvent {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub kind: EventKind,
    /// Shallowest depth at which the event may appear.
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_depth: u32,
    pub choices: Vec<Choice>,
}

impl DungeonEvent {
    /// Returns true if the event is unlocked at `depth`.
    pub fn is_available_at(&self, depth: u32) -> bool {
        depth >= self.min_depth
    }
}

/// One selectable option of an event.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Choice {
    pub text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requirements: Requirements,
    pub resolution: Resolution,
}

impl Choice {
    pub fn new(text: impl Into<String>, resolution: Resolution) -> Self {
        Self {
            text: text.into(),
            requirements: Requirements::default(),
            resolution,
        }
    }

    #[must_use]
    pub fn with_requirements(mut self, requirements: Requirements) -> Self {
        self.requirements = requirements;
        self
    }
}

/// Gates on a choice. Every present field must hold.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Requirements {
    /// Some alive hero must have this class.
    pub class: Option<String>,
    pub stat: Option<StatRequirement>,
    /// Minimum run gold.
    pub gold: Option<u64>,
    /// Item name that must be in the dungeon inventory.
    pub item: Option<String>,
}

impl Requirements {
    pub fn is_empty(&self) -> bool {
        self.class.is_none() && self.stat.is_none() && self.gold.is_none() && self.item.is_none()
    }
}

/// Stat threshold, scaled by depth before comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatRequirement {
    pub stat: StatKind,
    pub value: i32,
}

/// How a choice turns into an outcome.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Resolution {
    /// Always this outcome.
    Fixed(Outcome),
    /// One outcome drawn proportionally to weight.
    Weighted(Vec<WeightedOutcome>),
    /// Success or failure drawn against a stat-adjusted probability.
    Chance {
        /// Falls back to the configured default when absent.
        #[cfg_attr(feature = "serde", serde(default))]
        success_chance: Option<f64>,
        #[cfg_attr(feature = "serde", serde(default))]
        stat_modifier: Option<StatKind>,
        success: Outcome,
        failure: Outcome,
    },
}

/// A weighted branch.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedOutcome {
    pub weight: u32,
    pub outcome: Outcome,
}

/// Narrative text plus the effects applied in order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome {
    pub text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<OutcomeEffect>,
}

impl Outcome {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_effect(mut self, target: TargetRule, kind: OutcomeEffectKind) -> Self {
        self.effects.push(OutcomeEffect { target, kind });
        self
    }
}

/// One effect of an outcome.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutcomeEffect {
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: TargetRule,
    pub kind: OutcomeEffectKind,
}

impl OutcomeEffect {
    pub fn new(target: TargetRule, kind: OutcomeEffectKind) -> Self {
        Self { target, kind }
    }
}

/// What an outcome effect does.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OutcomeEffectKind {
    Damage {
        amount: u32,
        /// Bypasses the defense curve.
        #[cfg_attr(feature = "serde", serde(default))]
        true_damage: bool,
    },
    Heal {
        #[cfg_attr(feature = "serde", serde(default))]
        amount: u32,
        /// Restores to effective max HP, ignoring `amount`.
        #[cfg_attr(feature = "serde", serde(default))]
        full: bool,
    },
    Revive {
        hp: u32,
    },
    Experience {
        amount: u64,
    },
    /// Negative amounts are losses; run gold never drops below 0.
    Gold {
        amount: i64,
    },
    Item(ItemGrant),
    Status(TimedEffectSpec),
}

/// Item reward: one spec, or a weighted pick among several.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemGrant {
    Single(ItemSpec),
    Choices(Vec<WeightedItem>),
}

/// A weighted item spec.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedItem {
    pub weight: u32,
    pub spec: ItemSpec,
}

/// Parameters handed to the loot oracle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemSpec {
    Gear {
        #[cfg_attr(feature = "serde", serde(default))]
        slot: Option<ItemSlot>,
        #[cfg_attr(feature = "serde", serde(default))]
        min_rarity: Option<Rarity>,
        /// Added to the current floor.
        #[cfg_attr(feature = "serde", serde(default))]
        floor_boost: u32,
    },
    Consumable {
        recipe: ConsumableRecipe,
        #[cfg_attr(feature = "serde", serde(default))]
        rarity: Rarity,
        #[cfg_attr(feature = "serde", serde(default))]
        floor_boost: u32,
    },
}
