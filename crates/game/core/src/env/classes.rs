use std::collections::HashMap;

use crate::state::{AbilityId, Hero, HeroId};
use crate::stats::{StatBonus, Stats};

/// Static description of a hero class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDefinition {
    pub name: String,
    /// Level 1 stats; `max_hp` doubles as starting HP.
    pub base_stats: StatBonus,
    /// Added to base stats on every level-up.
    #[cfg_attr(feature = "serde", serde(default))]
    pub per_level: StatBonus,
    /// Abilities granted to new heroes of this class.
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<AbilityId>,
}

impl ClassDefinition {
    /// Creates a fresh level 1 hero of this class.
    pub fn create_hero(&self, id: HeroId, name: impl Into<String>) -> Hero {
        Hero::new(id, name, self.name.clone(), Stats::from_template(&self.base_stats))
            .with_abilities(self.abilities.iter().cloned())
    }
}

/// Class definitions keyed by class name.
#[derive(Clone, Debug, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, ClassDefinition>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(definitions: impl IntoIterator<Item = ClassDefinition>) -> Self {
        Self {
            classes: definitions.into_iter().map(|d| (d.name.clone(), d)).collect(),
        }
    }

    #[must_use]
    pub fn with_class(mut self, definition: ClassDefinition) -> Self {
        self.classes.insert(definition.name.clone(), definition);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ClassDefinition> {
        self.classes.get(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
