use std::collections::HashMap;

use strum::Display;

use crate::state::{AbilityId, TargetRule};
use crate::stats::StatKind;

/// What an ability does when used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AbilityEffectKind {
    Heal,
    Damage,
    Buff,
    Debuff,
    Special,
}

/// Adds `ratio × effective stat` to the base value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scaling {
    pub stat: StatKind,
    pub ratio: f64,
}

/// The single effect of an ability.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityEffect {
    pub kind: AbilityEffectKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: TargetRule,
    pub value: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scaling: Option<Scaling>,
    /// Depths a buff or debuff lasts.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<u32>,
    /// Stat changed by a buff or debuff.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stat: Option<StatKind>,
}

/// Which progression counter a cooldown is measured in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CooldownKind {
    Floor,
    #[default]
    Depth,
}

/// Immutable ability template, shared by every hero that knows it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub id: AbilityId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub effect: AbilityEffect,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown_kind: CooldownKind,
    /// Uses per run; unlimited when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub charges: Option<u32>,
}

/// Ability templates keyed by id.
#[derive(Clone, Debug, Default)]
pub struct AbilityRegistry {
    definitions: HashMap<AbilityId, AbilityDefinition>,
}

impl AbilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(definitions: impl IntoIterator<Item = AbilityDefinition>) -> Self {
        Self {
            definitions: definitions.into_iter().map(|d| (d.id.clone(), d)).collect(),
        }
    }

    #[must_use]
    pub fn with(mut self, definition: AbilityDefinition) -> Self {
        self.definitions.insert(definition.id.clone(), definition);
        self
    }

    pub fn get(&self, id: &AbilityId) -> Option<&AbilityDefinition> {
        self.definitions.get(id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
