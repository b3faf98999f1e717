//! Using consumables.
//!
//! A consumable with an empty effect list is treated as corrupted save data.
//! If it carries a recipe, its effects are rebuilt through the loot oracle and
//! written back to the stored instance before use.

use super::InventoryError;
use crate::combat::{apply_heal, apply_revive};
use crate::env::{Env, RngOracle};
use crate::event::{EffectSummary, TargetPool, resolve_targets};
use crate::state::{
    Consumable, ConsumableEffect, ConsumableEffectKind, EquipSlot, HeroId, Loot, Party,
    RunResources, TimedEffectKind, TimedEffectSpec,
};
use crate::timed::TimedEffectLedger;

/// Depths a timed consumable effect lasts when it declares no duration.
pub const DEFAULT_EFFECT_DURATION: u32 = 3;

/// Where the consumable is taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsumableSource {
    /// One of the user's consumable slots.
    Slot(EquipSlot),
    /// The dungeon inventory.
    Inventory(crate::state::ItemId),
}

/// Result of using a consumable.
#[derive(Clone, Debug, PartialEq)]
pub struct ConsumableUse {
    pub success: bool,
    pub message: String,
    pub summaries: Vec<EffectSummary>,
    /// True if the effect list had to be rebuilt from the recipe.
    pub repaired: bool,
    pub error: Option<InventoryError>,
}

impl ConsumableUse {
    fn failed(error: InventoryError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            summaries: Vec::new(),
            repaired: false,
            error: Some(error),
        }
    }
}

/// Uses one charge of a consumable on behalf of `user`.
pub fn use_consumable(
    party: &mut Party,
    resources: &mut RunResources,
    user: HeroId,
    source: ConsumableSource,
    env: &Env<'_>,
    rng: &mut dyn RngOracle,
) -> ConsumableUse {
    match try_use(party, resources, user, source, env, rng) {
        Ok(used) => used,
        Err(error) => ConsumableUse::failed(error),
    }
}

fn try_use(
    party: &mut Party,
    resources: &mut RunResources,
    user: HeroId,
    source: ConsumableSource,
    env: &Env<'_>,
    rng: &mut dyn RngOracle,
) -> Result<ConsumableUse, InventoryError> {
    let hero = party.hero(user).ok_or(InventoryError::HeroNotFound(user))?;
    if !hero.alive {
        return Err(InventoryError::HeroDown(user));
    }
    let user_name = hero.name.clone();
    let floor = resources.floor;

    let stored: &mut Consumable = match source {
        ConsumableSource::Slot(slot) => party
            .hero_mut(user)
            .and_then(|h| h.equipment.consumable_mut(slot))
            .ok_or(InventoryError::EmptySlot { hero: user, slot })?,
        ConsumableSource::Inventory(id) => match resources.inventory.get_mut(id) {
            Some(Loot::Consumable(consumable)) => consumable,
            Some(Loot::Item(_)) => return Err(InventoryError::NotConsumable(id)),
            None => return Err(InventoryError::ItemNotFound(id)),
        },
    };

    let repaired = repair(stored, env, floor)?;
    let name = stored.name.clone();
    let effects = stored.effects.clone();
    stored.stack_count = stored.stack_count.saturating_sub(1);
    if stored.stack_count == 0 {
        match source {
            ConsumableSource::Slot(slot) => {
                if let Some(hero) = party.hero_mut(user) {
                    hero.equipment.take_consumable(slot);
                }
            }
            ConsumableSource::Inventory(id) => {
                resources.inventory.take(id);
            }
        }
    }

    let mut summaries = Vec::new();
    for effect in &effects {
        apply_effect(effect, &name, user, party, resources.depth, env, rng, &mut summaries);
    }

    Ok(ConsumableUse {
        success: true,
        message: format!("{user_name} uses {name}"),
        summaries,
        repaired,
        error: None,
    })
}

fn repair(consumable: &mut Consumable, env: &Env<'_>, floor: u32) -> Result<bool, InventoryError> {
    if !consumable.effects.is_empty() {
        return Ok(false);
    }
    let Some(recipe) = &consumable.recipe else {
        tracing::warn!(id = %consumable.id, "consumable has no effects and no recipe");
        return Err(InventoryError::CorruptConsumable(consumable.id));
    };
    let rebuilt = env.loot.generate_consumable(
        &recipe.base_id,
        &recipe.size_id,
        &recipe.potency_id,
        consumable.rarity,
        floor,
    );
    if rebuilt.effects.is_empty() {
        tracing::warn!(id = %consumable.id, "recipe rebuilt no effects");
        return Err(InventoryError::CorruptConsumable(consumable.id));
    }
    tracing::warn!(id = %consumable.id, name = %consumable.name, "rebuilt consumable effects from recipe");
    consumable.effects = rebuilt.effects;
    Ok(true)
}

#[allow(clippy::too_many_arguments)]
fn apply_effect(
    effect: &ConsumableEffect,
    name: &str,
    user: HeroId,
    party: &mut Party,
    depth: u32,
    env: &Env<'_>,
    rng: &mut dyn RngOracle,
    out: &mut Vec<EffectSummary>,
) {
    let aggregator = env.aggregator(depth);
    let ledger = TimedEffectLedger::new(aggregator);
    let amount = effect.value.max(0).unsigned_abs();
    let duration = effect.duration.unwrap_or(DEFAULT_EFFECT_DURATION);
    let pool = if effect.kind == ConsumableEffectKind::Revive {
        TargetPool::Fallen
    } else {
        TargetPool::Alive
    };

    match effect.kind {
        ConsumableEffectKind::Damage => {
            out.push(EffectSummary::DamageDealt { source: user, amount });
            return;
        }
        ConsumableEffectKind::Special => {
            out.push(EffectSummary::Note(format!("{name} takes effect")));
            return;
        }
        _ => {}
    }

    for id in resolve_targets(effect.target, party, Some(user), pool, &aggregator, rng) {
        let Some(hero) = party.hero_mut(id) else { continue };
        match effect.kind {
            ConsumableEffectKind::Heal => {
                let effective = aggregator.effective_stats(hero);
                if let Some(change) = apply_heal(hero, &effective, amount, false) {
                    out.push(EffectSummary::Healed {
                        hero: id,
                        amount: change.amount,
                        hp: change.hp,
                    });
                }
            }
            ConsumableEffectKind::HealOverTime => {
                let spec = TimedEffectSpec::regeneration(name, amount, duration).named(name);
                let applied = ledger.apply(hero, &spec, depth);
                out.push(EffectSummary::StatusApplied {
                    hero: id,
                    effect: applied.name,
                });
            }
            ConsumableEffectKind::Revive => {
                let effective = aggregator.effective_stats(hero);
                if let Some(change) = apply_revive(hero, &effective, amount) {
                    out.push(EffectSummary::Revived { hero: id, hp: change.hp });
                }
            }
            ConsumableEffectKind::Buff => {
                let Some(stat) = effect.stat else {
                    tracing::warn!(consumable = name, "buff effect without a stat");
                    continue;
                };
                let spec = TimedEffectSpec::stat(name, TimedEffectKind::Buff, stat, effect.value, duration)
                    .named(name);
                let applied = ledger.apply(hero, &spec, depth);
                out.push(EffectSummary::StatusApplied {
                    hero: id,
                    effect: applied.name,
                });
            }
            ConsumableEffectKind::Cleanse => {
                let before = hero.effects.len();
                hero.effects.retain(|e| e.kind != TimedEffectKind::Debuff);
                out.push(EffectSummary::Cleansed {
                    hero: id,
                    removed: before - hero.effects.len(),
                });
            }
            ConsumableEffectKind::Damage | ConsumableEffectKind::Special => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{LootOracle, Registries, SequenceRng};
    use crate::state::{ConsumableRecipe, Hero, Item, ItemId, ItemSlot, Rarity, TargetRule};
    use crate::stats::{StatBonus, StatKind, Stats};

    struct Apothecary;

    impl LootOracle for Apothecary {
        fn generate_item(&self, _: u32, _: Option<ItemSlot>, _: Option<Rarity>) -> Item {
            Item::new(ItemId(0), "Unused", ItemSlot::Weapon, Rarity::Common)
        }

        fn generate_consumable(&self, base: &str, _: &str, _: &str, _: Rarity, _: u32) -> Consumable {
            let effects = if base == "tonic" {
                vec![ConsumableEffect::on_self(ConsumableEffectKind::Heal, 25)]
            } else {
                Vec::new()
            };
            Consumable::new(ItemId(0), base, effects)
        }
    }

    fn party() -> Party {
        let mut hero = Hero::new(
            HeroId(1),
            "Aldric",
            "Warrior",
            Stats::from_template(&StatBonus::single(StatKind::MaxHp, 100)),
        );
        hero.base.hp = 40;
        Party::from_heroes([hero]).unwrap()
    }

    fn use_it(party: &mut Party, resources: &mut RunResources, source: ConsumableSource) -> ConsumableUse {
        let config = GameConfig::default();
        let registries = Registries::new();
        let env = Env::new(&config, &registries, &Apothecary);
        use_consumable(party, resources, HeroId(1), source, &env, &mut SequenceRng::default())
    }

    #[test]
    fn stack_is_consumed_then_removed() {
        let mut party = party();
        let mut resources = RunResources::new(0);
        let potion = Consumable::new(
            ItemId(4),
            "Healing Draught",
            vec![ConsumableEffect::on_self(ConsumableEffectKind::Heal, 30)],
        )
        .stacked(2);
        resources.inventory.push(Loot::Consumable(potion));

        let first = use_it(&mut party, &mut resources, ConsumableSource::Inventory(ItemId(4)));
        assert!(first.success);
        assert_eq!(party.heroes()[0].hp(), 70);
        assert!(resources.inventory.contains(ItemId(4)));

        use_it(&mut party, &mut resources, ConsumableSource::Inventory(ItemId(4)));
        assert_eq!(party.heroes()[0].hp(), 100);
        assert!(!resources.inventory.contains(ItemId(4)));
    }

    #[test]
    fn missing_effects_are_rebuilt_from_recipe() {
        let mut party = party();
        let mut resources = RunResources::new(0);
        let broken = Consumable::new(ItemId(9), "Tonic", Vec::new()).with_recipe(ConsumableRecipe {
            base_id: "tonic".into(),
            size_id: "small".into(),
            potency_id: "weak".into(),
        });
        party.heroes_mut()[0]
            .equipment
            .put_consumable(EquipSlot::Consumable1, broken)
            .unwrap();

        let used = use_it(&mut party, &mut resources, ConsumableSource::Slot(EquipSlot::Consumable1));
        assert!(used.success && used.repaired);
        assert_eq!(party.heroes()[0].hp(), 65);
        assert!(party.heroes()[0].equipment.consumable(EquipSlot::Consumable1).is_none());
    }

    #[test]
    fn unrepairable_consumable_reports_failure() {
        let mut party = party();
        let mut resources = RunResources::new(0);
        resources
            .inventory
            .push(Loot::Consumable(Consumable::new(ItemId(3), "Murky Vial", Vec::new())));

        let used = use_it(&mut party, &mut resources, ConsumableSource::Inventory(ItemId(3)));
        assert!(!used.success);
        assert_eq!(used.error, Some(InventoryError::CorruptConsumable(ItemId(3))));
        assert!(resources.inventory.contains(ItemId(3)));
    }

    #[test]
    fn cleanse_removes_only_debuffs() {
        let mut party = party();
        let mut resources = RunResources::new(0);
        {
            let hero = &mut party.heroes_mut()[0];
            let table = crate::stats::SetBonusTable::new();
            let ledger = TimedEffectLedger::new(crate::stats::StatAggregator::new(&table));
            ledger.apply(hero, &TimedEffectSpec::stat("curse", TimedEffectKind::Debuff, StatKind::Luck, -5, 4), 1);
            ledger.apply(hero, &TimedEffectSpec::stat("focus", TimedEffectKind::Buff, StatKind::Wisdom, 5, 4), 1);
        }
        let salts = Consumable::new(
            ItemId(2),
            "Smelling Salts",
            vec![ConsumableEffect {
                kind: ConsumableEffectKind::Cleanse,
                target: TargetRule::All,
                value: 0,
                duration: None,
                stat: None,
            }],
        );
        resources.inventory.push(Loot::Consumable(salts));

        let used = use_it(&mut party, &mut resources, ConsumableSource::Inventory(ItemId(2)));
        assert_eq!(used.summaries, vec![EffectSummary::Cleansed { hero: HeroId(1), removed: 1 }]);
        assert_eq!(party.heroes()[0].effects[0].id, "focus");
    }
}
