//! Read-only collaborators injected into resolution.
//!
//! Registries expose static definitions (classes, abilities, set bonuses and
//! unique effects), the loot oracle generates new instances, and the RNG oracle
//! supplies randomness. The [`Env`] aggregate bundles the immutable parts so
//! entry points can access everything they need without ambient globals.
mod classes;
mod loot;
mod rng;

pub use classes::{ClassDefinition, ClassRegistry};
pub use loot::LootOracle;
pub use rng::{EntropyRng, PcgRng, RngOracle, SequenceRng};

use crate::ability::AbilityRegistry;
use crate::combat::DefenseCurve;
use crate::config::GameConfig;
use crate::stats::{SetBonusTable, StatAggregator};
use crate::unique::UniqueEffectRegistry;

/// Immutable content tables shared by every session.
///
/// All members are `Send + Sync`, so one value can back many concurrent
/// sessions behind an `Arc`.
#[derive(Clone, Debug, Default)]
pub struct Registries {
    pub sets: SetBonusTable,
    pub classes: ClassRegistry,
    pub abilities: AbilityRegistry,
    pub uniques: UniqueEffectRegistry,
}

impl Registries {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sets(mut self, sets: SetBonusTable) -> Self {
        self.sets = sets;
        self
    }

    #[must_use]
    pub fn with_classes(mut self, classes: ClassRegistry) -> Self {
        self.classes = classes;
        self
    }

    #[must_use]
    pub fn with_abilities(mut self, abilities: AbilityRegistry) -> Self {
        self.abilities = abilities;
        self
    }

    #[must_use]
    pub fn with_uniques(mut self, uniques: UniqueEffectRegistry) -> Self {
        self.uniques = uniques;
        self
    }
}

/// Aggregates configuration, registries and the loot oracle for one call.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    pub config: &'a GameConfig,
    pub registries: &'a Registries,
    pub loot: &'a dyn LootOracle,
}

impl<'a> Env<'a> {
    pub fn new(config: &'a GameConfig, registries: &'a Registries, loot: &'a dyn LootOracle) -> Self {
        Self {
            config,
            registries,
            loot,
        }
    }

    /// Stat aggregator over the injected set table, counting the timed
    /// effects active at `depth`.
    pub fn aggregator(&self, depth: u32) -> StatAggregator<'a> {
        StatAggregator::new(&self.registries.sets).at_depth(depth)
    }

    /// Defense curve over the configured parameters.
    pub fn curve(&self) -> DefenseCurve<'a> {
        DefenseCurve::new(&self.config.defense)
    }
}
