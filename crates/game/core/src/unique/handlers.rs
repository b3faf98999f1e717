//! Built-in unique-effect handlers.
//!
//! Each handler is parameterized by plain data so content can tune it without
//! code. [`HandlerSpec`] is the serializable form; [`HandlerSpec::build`] turns
//! it into the shared behavior object stored in the registry.

use std::sync::Arc;

use super::registry::{
    HandlerOutput, Invocation, Trigger, UniqueEffectDefinition, UniqueEffectHandler,
    UniqueEffectRegistry,
};
use crate::combat::apply_revive;
use crate::event::{OutcomeEffect, OutcomeEffectKind};
use crate::state::{Party, SetId, TargetRule, TimedEffectKind, TimedEffectSpec, UniqueEffectId};
use crate::stats::StatKind;
use crate::timed::TimedEffectLedger;

/// Burns every other living hero, never below 1 HP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadiationAura {
    pub damage: u32,
}

impl UniqueEffectHandler for RadiationAura {
    fn handle(&self, party: &mut Party, invocation: &Invocation<'_>) -> HandlerOutput {
        let mut messages = Vec::new();
        for hero in party.heroes_mut() {
            if hero.id == invocation.source || !hero.alive {
                continue;
            }
            let before = hero.base.hp;
            let damage = i32::try_from(self.damage).unwrap_or(i32::MAX);
            hero.base.hp = before.saturating_sub(damage).max(before.min(1));
            let lost = before - hero.base.hp;
            if lost > 0 {
                messages.push(format!("{} is scorched by radiation (-{lost} HP)", hero.name));
            }
        }
        HandlerOutput {
            messages,
            additional_effects: Vec::new(),
        }
    }
}

/// Brings the first fallen hero back with a share of their max HP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhoenixRevival {
    pub hp_percent: u32,
}

impl UniqueEffectHandler for PhoenixRevival {
    fn handle(&self, party: &mut Party, invocation: &Invocation<'_>) -> HandlerOutput {
        let Some(hero) = party.heroes_mut().iter_mut().find(|h| !h.alive) else {
            return HandlerOutput::default();
        };
        let effective = invocation.aggregator.effective_stats(hero);
        let hp = i64::from(effective.max_hp) * i64::from(self.hp_percent) / 100;
        let hp = u32::try_from(hp).unwrap_or(u32::MAX);
        match apply_revive(hero, &effective, hp) {
            Some(change) => HandlerOutput::message(format!("{} rises from the ashes with {} HP", hero.name, change.hp)),
            None => HandlerOutput::default(),
        }
    }
}

/// Heals the whole party through the regular effect pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RestoringPulse {
    pub amount: u32,
}

impl UniqueEffectHandler for RestoringPulse {
    fn handle(&self, _party: &mut Party, _invocation: &Invocation<'_>) -> HandlerOutput {
        HandlerOutput {
            messages: vec![String::from("A restoring pulse washes over the party")],
            additional_effects: vec![OutcomeEffect::new(
                TargetRule::All,
                OutcomeEffectKind::Heal {
                    amount: self.amount,
                    full: false,
                },
            )],
        }
    }
}

/// Finds extra gold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreasureSense {
    pub gold: i64,
}

impl UniqueEffectHandler for TreasureSense {
    fn handle(&self, _party: &mut Party, _invocation: &Invocation<'_>) -> HandlerOutput {
        HandlerOutput {
            messages: vec![format!("Treasure sense uncovers {} gold", self.gold)],
            additional_effects: vec![OutcomeEffect::new(
                TargetRule::All,
                OutcomeEffectKind::Gold { amount: self.gold },
            )],
        }
    }
}

/// Temporary attack buff on the wearer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BattleFury {
    pub attack: i32,
    pub duration: u32,
}

impl UniqueEffectHandler for BattleFury {
    fn handle(&self, party: &mut Party, invocation: &Invocation<'_>) -> HandlerOutput {
        let Some(hero) = party.hero_mut(invocation.source) else {
            return HandlerOutput::default();
        };
        let spec = TimedEffectSpec::stat("battle_fury", TimedEffectKind::Buff, StatKind::Attack, self.attack, self.duration)
            .named("Battle Fury");
        TimedEffectLedger::new(invocation.aggregator).apply(hero, &spec, invocation.context.depth);
        HandlerOutput::message(format!("{} is seized by battle fury (+{} attack)", hero.name, self.attack))
    }
}

/// Data form of the built-in handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HandlerSpec {
    RadiationAura { damage: u32 },
    PhoenixRevival { hp_percent: u32 },
    RestoringPulse { amount: u32 },
    TreasureSense { gold: i64 },
    BattleFury { attack: i32, duration: u32 },
}

impl HandlerSpec {
    pub fn build(self) -> Arc<dyn UniqueEffectHandler> {
        match self {
            Self::RadiationAura { damage } => Arc::new(RadiationAura { damage }),
            Self::PhoenixRevival { hp_percent } => Arc::new(PhoenixRevival { hp_percent }),
            Self::RestoringPulse { amount } => Arc::new(RestoringPulse { amount }),
            Self::TreasureSense { gold } => Arc::new(TreasureSense { gold }),
            Self::BattleFury { attack, duration } => Arc::new(BattleFury { attack, duration }),
        }
    }
}

/// Authored unique effect: id, triggers, handler parameters and bindings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniqueEffectSpec {
    pub id: UniqueEffectId,
    pub name: String,
    pub triggers: Vec<Trigger>,
    pub handler: HandlerSpec,
    #[cfg_attr(feature = "serde", serde(default))]
    pub item_names: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sets: Vec<SetId>,
}

impl UniqueEffectRegistry {
    /// Builds a registry with every spec registered and bound.
    pub fn from_specs(specs: impl IntoIterator<Item = UniqueEffectSpec>) -> Self {
        specs.into_iter().fold(Self::new(), |registry, spec| {
            let registry = spec
                .item_names
                .into_iter()
                .fold(registry, |r, name| r.bind_item_name(name, spec.id.clone()));
            let registry = spec
                .sets
                .into_iter()
                .fold(registry, |r, set| r.bind_set(set, spec.id.clone()));
            registry.register(UniqueEffectDefinition::new(
                spec.id,
                spec.name,
                spec.triggers,
                spec.handler.build(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Hero, HeroId};
    use crate::stats::{SetBonusTable, StatAggregator, Stats};
    use crate::unique::TriggerContext;

    fn party() -> Party {
        let stats = Stats {
            max_hp: 50,
            hp: 50,
            ..Stats::default()
        };
        Party::from_heroes([
            Hero::new(HeroId(1), "Aldric", "Warrior", stats.clone()),
            Hero::new(HeroId(2), "Mira", "Cleric", stats.clone()),
            Hero::new(HeroId(3), "Sable", "Rogue", stats),
        ])
        .unwrap()
    }

    fn invoke(handler: &dyn UniqueEffectHandler, party: &mut Party) -> HandlerOutput {
        let sets = SetBonusTable::default();
        let context = TriggerContext::new(1, 4);
        let invocation = Invocation {
            trigger: Trigger::DepthAdvance,
            source: HeroId(1),
            item: crate::state::ItemId(9),
            context: &context,
            aggregator: StatAggregator::new(&sets),
        };
        handler.handle(party, &invocation)
    }

    #[test]
    fn radiation_never_kills() {
        let mut party = party();
        party.hero_mut(HeroId(2)).unwrap().base.hp = 3;

        invoke(&RadiationAura { damage: 10 }, &mut party);

        assert_eq!(party.hero(HeroId(1)).unwrap().hp(), 50);
        assert_eq!(party.hero(HeroId(2)).unwrap().hp(), 1);
        assert_eq!(party.hero(HeroId(3)).unwrap().hp(), 40);
        assert!(party.alive().count() == 3);
    }

    #[test]
    fn phoenix_revives_first_fallen() {
        let mut party = party();
        for id in [HeroId(2), HeroId(3)] {
            let hero = party.hero_mut(id).unwrap();
            hero.alive = false;
            hero.base.hp = 0;
        }

        let output = invoke(&PhoenixRevival { hp_percent: 30 }, &mut party);

        assert_eq!(output.messages.len(), 1);
        assert!(party.hero(HeroId(2)).unwrap().alive);
        assert_eq!(party.hero(HeroId(2)).unwrap().hp(), 15);
        assert!(!party.hero(HeroId(3)).unwrap().alive);
    }

    #[test]
    fn battle_fury_buffs_wearer_from_current_depth() {
        let mut party = party();
        invoke(&BattleFury { attack: 6, duration: 2 }, &mut party);

        let effects = &party.hero(HeroId(1)).unwrap().effects;
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].applied_at_depth, 4);
        assert_eq!(effects[0].expires_at_depth, 6);
        assert_eq!(effects[0].stat_modifier(), Some((StatKind::Attack, 6)));
    }

    #[test]
    fn zero_duration_fury_adds_no_attack() {
        let mut party = party();
        invoke(&BattleFury { attack: 50, duration: 0 }, &mut party);

        let sets = SetBonusTable::default();
        let hero = party.hero(HeroId(1)).unwrap();
        assert_eq!(hero.effects.len(), 1);
        assert_eq!(StatAggregator::new(&sets).at_depth(4).effective_stats(hero).attack, 0);
    }

    #[test]
    fn treasure_sense_defers_gold_to_pipeline() {
        let mut party = party();
        let output = invoke(&TreasureSense { gold: 25 }, &mut party);
        assert_eq!(
            output.additional_effects,
            vec![OutcomeEffect::new(TargetRule::All, OutcomeEffectKind::Gold { amount: 25 })]
        );
    }
}
