//! Timed effect ledger.
//!
//! Effects are keyed to depth. Applying stamps `expires_at_depth`; each depth
//! transition ticks the ledger exactly once:
//!
//! 1. Regeneration effects covering the transition heal their owner.
//! 2. Non-permanent effects with `expires_at_depth <= new_depth` are removed.
//! 3. Current HP is clamped to the (possibly lower) effective max HP.
//!
//! An effect applied at depth `a` with duration `d` is active for the
//! transitions into depths `a + 1 ..= a + d`.

use crate::combat::apply_heal;
use crate::event::EffectSummary;
use crate::state::{Hero, Party, TimedEffect, TimedEffectSpec};
use crate::stats::StatAggregator;

/// Applies and expires timed effects.
#[derive(Clone, Copy, Debug)]
pub struct TimedEffectLedger<'a> {
    aggregator: StatAggregator<'a>,
}

impl<'a> TimedEffectLedger<'a> {
    pub fn new(aggregator: StatAggregator<'a>) -> Self {
        Self { aggregator }
    }

    /// Attaches a new effect built from `spec` at `depth`.
    pub fn apply(&self, hero: &mut Hero, spec: &TimedEffectSpec, depth: u32) -> TimedEffect {
        let expires_at_depth = if spec.permanent {
            TimedEffect::PERMANENT_EXPIRY
        } else {
            depth.saturating_add(spec.duration)
        };
        let effect = TimedEffect {
            id: spec.id.clone(),
            name: if spec.name.is_empty() {
                spec.id.clone()
            } else {
                spec.name.clone()
            },
            kind: spec.kind,
            stat: spec.stat,
            modifier: spec.modifier,
            regen_per_depth: spec.regen_per_depth,
            duration: spec.duration,
            applied_at_depth: depth,
            expires_at_depth,
            permanent: spec.permanent,
        };
        hero.effects.push(effect.clone());
        effect
    }

    /// Advances every hero's effects to `new_depth`.
    pub fn tick(&self, party: &mut Party, new_depth: u32) -> Vec<EffectSummary> {
        let mut summaries = Vec::new();
        for hero in party.heroes_mut() {
            self.tick_hero(hero, new_depth, &mut summaries);
        }
        summaries
    }

    fn tick_hero(&self, hero: &mut Hero, new_depth: u32, summaries: &mut Vec<EffectSummary>) {
        let regen: u32 = hero
            .effects
            .iter()
            .filter(|e| e.regen_per_depth > 0 && covers_transition(e, new_depth))
            .map(|e| e.regen_per_depth)
            .sum();
        if regen > 0 {
            let effective = self.aggregator.at_depth(new_depth).effective_stats(hero);
            if let Some(change) = apply_heal(hero, &effective, regen, false) {
                if change.amount > 0 {
                    summaries.push(EffectSummary::Healed {
                        hero: hero.id,
                        amount: change.amount,
                        hp: change.hp,
                    });
                }
            }
        }

        let id = hero.id;
        hero.effects.retain(|effect| {
            let keep = effect.permanent || effect.expires_at_depth > new_depth;
            if !keep {
                summaries.push(EffectSummary::StatusExpired {
                    hero: id,
                    effect: effect.name.clone(),
                });
            }
            keep
        });

        let max_hp = self.aggregator.at_depth(new_depth).effective_stats(hero).max_hp;
        if hero.base.hp > max_hp {
            hero.base.hp = max_hp;
        }
    }
}

fn covers_transition(effect: &TimedEffect, new_depth: u32) -> bool {
    effect.applied_at_depth < new_depth && (effect.permanent || effect.expires_at_depth >= new_depth)
}
