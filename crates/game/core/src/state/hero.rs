use super::{AbilityId, AbilityState, Equipment, HeroId, TimedEffect};
use crate::stats::Stats;

/// A hero in the party roster.
///
/// `base` is the stored layer (class template plus level-up gains) and holds
/// current HP. Effective values are computed on demand by
/// [`crate::stats::StatAggregator`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hero {
    pub id: HeroId,
    pub name: String,
    /// Class name, resolved against [`crate::env::ClassRegistry`].
    pub class: String,
    pub level: u32,
    pub experience: u64,
    pub base: Stats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Equipment,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<AbilityState>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<TimedEffect>,
    pub alive: bool,
}

impl Hero {
    /// Creates a level 1 hero at full health.
    pub fn new(id: HeroId, name: impl Into<String>, class: impl Into<String>, base: Stats) -> Self {
        let mut base = base;
        base.hp = base.max_hp;
        Self {
            id,
            name: name.into(),
            class: class.into(),
            level: 1,
            experience: 0,
            base,
            equipment: Equipment::empty(),
            abilities: Vec::new(),
            effects: Vec::new(),
            alive: true,
        }
    }

    /// Grants abilities (builder pattern).
    #[must_use]
    pub fn with_abilities(mut self, ids: impl IntoIterator<Item = AbilityId>) -> Self {
        self.abilities.extend(ids.into_iter().map(AbilityState::new));
        self
    }

    #[must_use]
    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = equipment;
        self
    }

    /// Current hit points.
    pub fn hp(&self) -> i32 {
        self.base.hp
    }

    /// Ability instance state by id.
    pub fn ability(&self, id: &AbilityId) -> Option<&AbilityState> {
        self.abilities.iter().find(|a| &a.id == id)
    }

    /// Mutable ability instance state by id.
    pub fn ability_mut(&mut self, id: &AbilityId) -> Option<&mut AbilityState> {
        self.abilities.iter_mut().find(|a| &a.id == id)
    }
}
