use arrayvec::ArrayVec;

use super::{Hero, HeroId, Inventory};
use crate::config::GameConfig;

/// The party roster.
///
/// Roster order is stable and defines hero iteration order for effect
/// targeting ties and unique-effect dispatch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Party {
    heroes: ArrayVec<Hero, { GameConfig::MAX_PARTY_SIZE }>,
}

impl Party {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a party from heroes, rejecting rosters beyond capacity.
    pub fn from_heroes(heroes: impl IntoIterator<Item = Hero>) -> Result<Self, Hero> {
        let mut party = Self::new();
        for hero in heroes {
            party.push(hero)?;
        }
        Ok(party)
    }

    /// Appends a hero. Returns the hero back if the roster is full.
    pub fn push(&mut self, hero: Hero) -> Result<(), Hero> {
        self.heroes.try_push(hero).map_err(|err| err.element())
    }

    pub fn heroes(&self) -> &[Hero] {
        &self.heroes
    }

    pub fn heroes_mut(&mut self) -> &mut [Hero] {
        &mut self.heroes
    }

    pub fn hero(&self, id: HeroId) -> Option<&Hero> {
        self.heroes.iter().find(|h| h.id == id)
    }

    pub fn hero_mut(&mut self, id: HeroId) -> Option<&mut Hero> {
        self.heroes.iter_mut().find(|h| h.id == id)
    }

    /// Alive heroes in roster order.
    pub fn alive(&self) -> impl Iterator<Item = &Hero> {
        self.heroes.iter().filter(|h| h.alive)
    }

    /// Returns true if every hero has fallen.
    pub fn is_wiped(&self) -> bool {
        !self.heroes.iter().any(|h| h.alive)
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }
}

/// Run-level counters and the transient dungeon inventory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunResources {
    pub gold: u64,
    pub floor: u32,
    pub depth: u32,
    /// Total XP granted during the run.
    pub xp_gained: u64,
    /// Total gold granted during the run (losses not subtracted).
    pub gold_gained: u64,
    /// Loot picked up during the run, moved to the bank on return.
    pub inventory: Inventory,
}

impl RunResources {
    /// Fresh run starting at floor 1, depth 1.
    pub fn new(gold: u64) -> Self {
        Self {
            gold,
            floor: 1,
            depth: 1,
            ..Self::default()
        }
    }
}
