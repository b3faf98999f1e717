//! Effect application.
//!
//! Effects of one outcome apply strictly in list order, each against the
//! party as left by the previous one. A damage effect that kills a hero
//! removes them from every later alive-pool target resolution.

use super::progression::grant_experience;
use super::selector::weighted_pick;
use super::targeting::{TargetPool, resolve_targets};
use super::{EffectSummary, ItemGrant, ItemSpec, OutcomeEffect, OutcomeEffectKind};
use crate::combat::{apply_damage, apply_heal, apply_revive, mitigated_damage};
use crate::env::{Env, RngOracle};
use crate::inventory::grant_loot;
use crate::state::{HeroId, Inventory, Loot, Party, RunResources};
use crate::timed::TimedEffectLedger;

/// Who acts and where, for one application pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApplyContext<'a> {
    /// Hero resolving the choice or using the ability, if any.
    pub actor: Option<HeroId>,
    /// Bank contents, consulted so granted loot never reuses a banked id.
    pub bank: Option<&'a Inventory>,
}

impl<'a> ApplyContext<'a> {
    pub fn new(actor: Option<HeroId>) -> Self {
        Self { actor, bank: None }
    }

    #[must_use]
    pub fn with_bank(mut self, bank: &'a Inventory) -> Self {
        self.bank = Some(bank);
        self
    }
}

/// Applies outcome effects to the party and run resources.
#[derive(Clone, Copy)]
pub struct EffectApplier<'a> {
    env: Env<'a>,
}

impl<'a> EffectApplier<'a> {
    pub fn new(env: Env<'a>) -> Self {
        Self { env }
    }

    /// Applies `effects` in order and reports every change.
    pub fn apply(
        &self,
        effects: &[OutcomeEffect],
        party: &mut Party,
        resources: &mut RunResources,
        ctx: &ApplyContext<'_>,
        rng: &mut dyn RngOracle,
    ) -> Vec<EffectSummary> {
        let mut summaries = Vec::new();
        for effect in effects {
            self.apply_one(effect, party, resources, ctx, rng, &mut summaries);
        }
        summaries
    }


    fn apply_one(
        &self,
        effect: &OutcomeEffect,
        party: &mut Party,
        resources: &mut RunResources,
        ctx: &ApplyContext<'_>,
        rng: &mut dyn RngOracle,
        out: &mut Vec<EffectSummary>,
    ) {
        let aggregator = self.env.aggregator(resources.depth);

        match &effect.kind {
            OutcomeEffectKind::Damage {
                amount,
                true_damage,
            } => {
                let curve = self.env.curve();
                for id in resolve_targets(effect.target, party, ctx.actor, TargetPool::Alive, &aggregator, rng) {
                    let Some(hero) = party.hero_mut(id) else { continue };
                    let defense = aggregator.effective_stats(hero).defense;
                    let damage = mitigated_damage(*amount, defense, *true_damage, &curve);
                    let change = apply_damage(hero, damage);
                    out.push(EffectSummary::Damaged {
                        hero: id,
                        amount: change.amount,
                        hp: change.hp,
                        died: change.died,
                    });
                }
            }
            OutcomeEffectKind::Heal { amount, full } => {
                for id in resolve_targets(effect.target, party, ctx.actor, TargetPool::Alive, &aggregator, rng) {
                    let Some(hero) = party.hero_mut(id) else { continue };
                    let effective = aggregator.effective_stats(hero);
                    if let Some(change) = apply_heal(hero, &effective, *amount, *full) {
                        out.push(EffectSummary::Healed {
                            hero: id,
                            amount: change.amount,
                            hp: change.hp,
                        });
                    }
                }
            }
            OutcomeEffectKind::Revive { hp } => {
                for id in resolve_targets(effect.target, party, ctx.actor, TargetPool::Fallen, &aggregator, rng) {
                    let Some(hero) = party.hero_mut(id) else { continue };
                    let effective = aggregator.effective_stats(hero);
                    if let Some(change) = apply_revive(hero, &effective, *hp) {
                        out.push(EffectSummary::Revived {
                            hero: id,
                            hp: change.hp,
                        });
                    }
                }
            }
            OutcomeEffectKind::Experience { amount } => {
                resources.xp_gained = resources.xp_gained.saturating_add(*amount);
                let progression = &self.env.config.progression;
                for id in resolve_targets(effect.target, party, ctx.actor, TargetPool::Alive, &aggregator, rng) {
                    let Some(hero) = party.hero_mut(id) else { continue };
                    out.push(EffectSummary::Experience {
                        hero: id,
                        amount: *amount,
                    });
                    for level in grant_experience(hero, *amount, progression, &self.env.registries.classes) {
                        out.push(EffectSummary::LevelUp { hero: id, level });
                    }
                }
            }
            OutcomeEffectKind::Gold { amount } => {
                resources.gold = resources.gold.saturating_add_signed(*amount);
                if *amount > 0 {
                    resources.gold_gained = resources.gold_gained.saturating_add(amount.unsigned_abs());
                }
                out.push(EffectSummary::Gold {
                    delta: *amount,
                    total: resources.gold,
                });
            }
            OutcomeEffectKind::Item(grant) => {
                let Some(spec) = pick_item_spec(grant, rng) else {
                    tracing::warn!("item effect without any item spec");
                    return;
                };
                let loot = self.generate(spec, resources.floor);
                let name = loot.name().to_owned();
                let id = grant_loot(loot, &mut resources.inventory, party, ctx.bank);
                out.push(EffectSummary::Loot { id, name });
            }
            OutcomeEffectKind::Status(spec) => {
                let ledger = TimedEffectLedger::new(aggregator);
                for id in resolve_targets(effect.target, party, ctx.actor, TargetPool::Alive, &aggregator, rng) {
                    let Some(hero) = party.hero_mut(id) else { continue };
                    let applied = ledger.apply(hero, spec, resources.depth);
                    out.push(EffectSummary::StatusApplied {
                        hero: id,
                        effect: applied.name,
                    });
                }
            }
        }
    }

    fn generate(&self, spec: &ItemSpec, floor: u32) -> Loot {
        match spec {
            ItemSpec::Gear {
                slot,
                min_rarity,
                floor_boost,
            } => Loot::Item(self.env.loot.generate_item(
                floor.saturating_add(*floor_boost),
                *slot,
                *min_rarity,
            )),
            ItemSpec::Consumable {
                recipe,
                rarity,
                floor_boost,
            } => Loot::Consumable(self.env.loot.generate_consumable(
                &recipe.base_id,
                &recipe.size_id,
                &recipe.potency_id,
                *rarity,
                floor.saturating_add(*floor_boost),
            )),
        }
    }
}

fn pick_item_spec<'g>(grant: &'g ItemGrant, rng: &mut dyn RngOracle) -> Option<&'g ItemSpec> {
    match grant {
        ItemGrant::Single(spec) => Some(spec),
        ItemGrant::Choices(choices) => weighted_pick(choices, |c| c.weight, rng).map(|(_, c)| &c.spec),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{ClassDefinition, ClassRegistry, LootOracle, Registries, SequenceRng};
    use crate::event::{Outcome, WeightedItem};
    use crate::state::{Consumable, ConsumableRecipe, Hero, Item, ItemId, ItemSlot, Rarity, TargetRule};
    use crate::stats::{StatBonus, StatKind, Stats};

    struct FixedLoot;

    impl LootOracle for FixedLoot {
        fn generate_item(&self, floor: u32, slot: Option<ItemSlot>, min: Option<Rarity>) -> Item {
            Item::new(
                ItemId(1),
                format!("Floor {floor} Blade"),
                slot.unwrap_or(ItemSlot::Weapon),
                min.unwrap_or(Rarity::Common),
            )
        }

        fn generate_consumable(&self, base: &str, _: &str, _: &str, rarity: Rarity, _: u32) -> Consumable {
            let mut consumable = Consumable::new(ItemId(1), base, Vec::new());
            consumable.rarity = rarity;
            consumable
        }
    }

    fn registries() -> Registries {
        Registries::new().with_classes(ClassRegistry::new().with_class(ClassDefinition {
            name: "Warrior".into(),
            base_stats: StatBonus::new().with(StatKind::MaxHp, 100),
            per_level: StatBonus::single(StatKind::MaxHp, 10),
            abilities: Vec::new(),
        }))
    }

    fn party() -> Party {
        let hero = |id: u32, defense: i32| {
            Hero::new(
                HeroId(id),
                format!("Hero {id}"),
                "Warrior",
                Stats::from_template(
                    &StatBonus::new()
                        .with(StatKind::MaxHp, 100)
                        .with(StatKind::Defense, defense)
                        .with(StatKind::Attack, 10 + id as i32),
                ),
            )
        };
        Party::from_heroes([hero(1, 40), hero(2, 0)]).unwrap()
    }

    fn run(effects: Vec<OutcomeEffect>, party: &mut Party, resources: &mut RunResources) -> Vec<EffectSummary> {
        let config = GameConfig::default();
        let registries = registries();
        let env = Env::new(&config, &registries, &FixedLoot);
        let outcome = Outcome {
            text: String::new(),
            effects,
        };
        EffectApplier::new(env).apply(
            &outcome.effects,
            party,
            resources,
            &ApplyContext::new(Some(HeroId(1))),
            &mut SequenceRng::new([0.9]),
        )
    }

    #[test]
    fn damage_respects_defense_and_true_damage() {
        let mut party = party();
        let mut resources = RunResources::new(0);
        run(
            vec![
                OutcomeEffect::new(TargetRule::Hero(HeroId(1)), OutcomeEffectKind::Damage { amount: 100, true_damage: false }),
                OutcomeEffect::new(TargetRule::Hero(HeroId(2)), OutcomeEffectKind::Damage { amount: 30, true_damage: true }),
            ],
            &mut party,
            &mut resources,
        );
        // block(40) ≈ 0.17%, so the 100 hit still rounds to 100
        assert_eq!(party.hero(HeroId(1)).unwrap().hp(), 0);
        assert!(!party.hero(HeroId(1)).unwrap().alive);
        assert_eq!(party.hero(HeroId(2)).unwrap().hp(), 70);
    }

    #[test]
    fn heal_skips_the_dead_until_revived() {
        let mut party = party();
        party.hero_mut(HeroId(2)).unwrap().base.hp = 0;
        party.hero_mut(HeroId(2)).unwrap().alive = false;
        party.hero_mut(HeroId(1)).unwrap().base.hp = 90;
        let mut resources = RunResources::new(0);

        let summaries = run(
            vec![
                OutcomeEffect::new(TargetRule::All, OutcomeEffectKind::Heal { amount: 25, full: false }),
                OutcomeEffect::new(TargetRule::All, OutcomeEffectKind::Revive { hp: 30 }),
            ],
            &mut party,
            &mut resources,
        );

        assert_eq!(party.hero(HeroId(1)).unwrap().hp(), 100);
        assert_eq!(party.hero(HeroId(2)).unwrap().hp(), 30);
        assert_eq!(
            summaries,
            vec![
                EffectSummary::Healed { hero: HeroId(1), amount: 10, hp: 100 },
                EffectSummary::Revived { hero: HeroId(2), hp: 30 },
            ]
        );
    }

    #[test]
    fn experience_and_gold_accumulate() {
        let mut party = party();
        let mut resources = RunResources::new(20);
        let summaries = run(
            vec![
                OutcomeEffect::new(TargetRule::SelfTarget, OutcomeEffectKind::Experience { amount: 120 }),
                OutcomeEffect::new(TargetRule::All, OutcomeEffectKind::Gold { amount: 15 }),
                OutcomeEffect::new(TargetRule::All, OutcomeEffectKind::Gold { amount: -50 }),
            ],
            &mut party,
            &mut resources,
        );

        let hero = party.hero(HeroId(1)).unwrap();
        assert_eq!((hero.level, hero.experience, hero.base.max_hp), (2, 20, 110));
        assert_eq!(resources.xp_gained, 120);
        assert_eq!(resources.gold, 0);
        assert_eq!(resources.gold_gained, 15);
        assert!(summaries.contains(&EffectSummary::LevelUp { hero: HeroId(1), level: 2 }));
    }

    #[test]
    fn weighted_item_choice_and_floor_boost_reach_the_oracle() {
        let mut party = party();
        let mut resources = RunResources::new(0);
        resources.floor = 3;
        resources.inventory.push(Loot::Item(Item::new(ItemId(1), "Old Dagger", ItemSlot::Weapon, Rarity::Junk)));

        let grant = ItemGrant::Choices(vec![
            WeightedItem {
                weight: 1,
                spec: ItemSpec::Consumable {
                    recipe: ConsumableRecipe {
                        base_id: "tonic".into(),
                        size_id: "small".into(),
                        potency_id: "weak".into(),
                    },
                    rarity: Rarity::Common,
                    floor_boost: 0,
                },
            },
            WeightedItem {
                weight: 3,
                spec: ItemSpec::Gear {
                    slot: Some(ItemSlot::Armor),
                    min_rarity: Some(Rarity::Rare),
                    floor_boost: 2,
                },
            },
        ]);
        run(
            vec![OutcomeEffect::new(TargetRule::All, OutcomeEffectKind::Item(grant))],
            &mut party,
            &mut resources,
        );

        let names: Vec<_> = resources.inventory.iter().map(|l| l.name().to_owned()).collect();
        assert_eq!(names, vec!["Old Dagger", "Floor 5 Blade"]);
        let ids: Vec<_> = resources.inventory.ids().collect();
        assert_ne!(ids[0], ids[1], "colliding id was re-keyed");
    }
}
