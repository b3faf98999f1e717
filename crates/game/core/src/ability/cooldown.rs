//! Cooldown and charge gating.
//!
//! # Gating
//!
//! ```text
//! counter   = floor or depth, per cooldown_kind
//! remaining = 0                                   never used
//!           = 0                                   last_used > counter (stale)
//!           = cooldown − (counter − last_used)    otherwise, floored at 0
//! usable    = remaining == 0 and charges_used < charges (if limited)
//! ```
//!
//! # Use
//!
//! 1. Validate hero, ability and gating.
//! 2. Refresh every instance state on the hero against the registry.
//! 3. Stamp the used ability's counters and charges.
//! 4. Apply the effect.
//!
//! Step 2 runs strictly before step 3 so a refresh can never overwrite the
//! cooldown that was just set.

use super::{AbilityDefinition, AbilityEffectKind, AbilityError, AbilityRegistry, CooldownKind};
use crate::combat::apply_heal;
use crate::env::{Env, RngOracle};
use crate::error::GameError;
use crate::event::{EffectSummary, TargetPool, resolve_targets};
use crate::state::{AbilityId, AbilityState, Hero, HeroId, Party, TimedEffectKind, TimedEffectSpec};
use crate::timed::TimedEffectLedger;

/// Depths a buff or debuff lasts when the definition declares no duration.
pub const DEFAULT_BUFF_DURATION: u32 = 3;

/// Cooldown units left before the ability can be used again.
pub fn remaining_cooldown(def: &AbilityDefinition, state: &AbilityState, floor: u32, depth: u32) -> u32 {
    let (last_used, current) = match def.cooldown_kind {
        CooldownKind::Floor => (state.last_used_floor, floor),
        CooldownKind::Depth => (state.last_used_depth, depth),
    };
    match last_used {
        None => 0,
        Some(last) if last > current => 0,
        Some(last) => def.cooldown.saturating_sub(current - last),
    }
}

/// Returns true if the ability is off cooldown and has a charge left.
pub fn can_use(def: &AbilityDefinition, state: &AbilityState, floor: u32, depth: u32) -> bool {
    check_usable(def, state, floor, depth).is_ok()
}

/// Like [`can_use`], reporting why the ability is unavailable.
pub fn check_usable(
    def: &AbilityDefinition,
    state: &AbilityState,
    floor: u32,
    depth: u32,
) -> Result<(), AbilityError> {
    let remaining = remaining_cooldown(def, state, floor, depth);
    if remaining > 0 {
        return Err(AbilityError::OnCooldown {
            ability: def.id.clone(),
            remaining,
        });
    }
    if let Some(charges) = def.charges {
        if state.charges_used >= charges {
            return Err(AbilityError::NoCharges {
                ability: def.id.clone(),
                charges,
            });
        }
    }
    Ok(())
}

/// Reconciles a hero's instance states with the current definitions.
///
/// Unknown ids are kept (and stay unusable); charge usage is clamped to the
/// definition's charge count.
pub fn refresh_abilities(hero: &mut Hero, registry: &AbilityRegistry) {
    for state in &mut hero.abilities {
        match registry.get(&state.id) {
            Some(def) => {
                if let Some(charges) = def.charges {
                    state.charges_used = state.charges_used.min(charges);
                }
            }
            None => {
                tracing::warn!(hero = %hero.id, ability = %state.id, "ability has no definition");
            }
        }
    }
}

/// Result of an ability use.
#[derive(Clone, Debug, PartialEq)]
pub struct AbilityUse {
    pub success: bool,
    pub message: String,
    pub summaries: Vec<EffectSummary>,
    pub error: Option<AbilityError>,
}

impl AbilityUse {
    /// True when the ability is only temporarily unavailable.
    pub fn is_retryable(&self) -> bool {
        self.error
            .as_ref()
            .is_some_and(|error| error.severity().is_recoverable())
    }

    fn failed(error: AbilityError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            summaries: Vec::new(),
            error: Some(error),
        }
    }
}

/// Uses `ability` on behalf of `hero`.
///
/// Never panics; every rejection comes back as `success: false`.
pub fn use_ability(
    party: &mut Party,
    hero: HeroId,
    ability: &AbilityId,
    floor: u32,
    depth: u32,
    env: &Env<'_>,
    rng: &mut dyn RngOracle,
) -> AbilityUse {
    match try_use(party, hero, ability, floor, depth, env, rng) {
        Ok(used) => used,
        Err(error) => {
            tracing::debug!(
                %hero,
                %ability,
                code = error.error_code(),
                severity = error.severity().as_str(),
                %error,
                "ability rejected"
            );
            AbilityUse::failed(error)
        }
    }
}

fn try_use(
    party: &mut Party,
    hero_id: HeroId,
    ability: &AbilityId,
    floor: u32,
    depth: u32,
    env: &Env<'_>,
    rng: &mut dyn RngOracle,
) -> Result<AbilityUse, AbilityError> {
    let registry = &env.registries.abilities;
    let aggregator = env.aggregator(depth);

    let hero = party.hero_mut(hero_id).ok_or(AbilityError::HeroNotFound(hero_id))?;
    if !hero.alive {
        return Err(AbilityError::HeroDown(hero_id));
    }
    let state = hero.ability(ability).ok_or_else(|| AbilityError::NotKnown {
        hero: hero_id,
        ability: ability.clone(),
    })?;
    let def = registry
        .get(ability)
        .ok_or_else(|| AbilityError::MissingDefinition(ability.clone()))?;
    check_usable(def, state, floor, depth)?;

    refresh_abilities(hero, registry);
    if let Some(state) = hero.ability_mut(ability) {
        state.last_used_floor = Some(floor);
        state.last_used_depth = Some(depth);
        if def.charges.is_some() {
            state.charges_used += 1;
        }
    }

    let caster = aggregator.effective_stats(hero);
    let scaled = def.effect.scaling.map_or(0.0, |s| f64::from(caster.get(s.stat)) * s.ratio);
    let value = def.effect.value.saturating_add(scaled.round() as i32);
    let caster_name = hero.name.clone();

    let mut summaries = Vec::new();
    let effect = &def.effect;
    match effect.kind {
        AbilityEffectKind::Heal => {
            for id in resolve_targets(effect.target, party, Some(hero_id), TargetPool::Alive, &aggregator, rng) {
                let Some(target) = party.hero_mut(id) else { continue };
                let effective = aggregator.effective_stats(target);
                if let Some(change) = apply_heal(target, &effective, value.max(0).unsigned_abs(), false) {
                    summaries.push(EffectSummary::Healed {
                        hero: id,
                        amount: change.amount,
                        hp: change.hp,
                    });
                }
            }
        }
        AbilityEffectKind::Damage => summaries.push(EffectSummary::DamageDealt {
            source: hero_id,
            amount: value.max(0).unsigned_abs(),
        }),
        AbilityEffectKind::Buff | AbilityEffectKind::Debuff => match effect.stat {
            Some(stat) => {
                let (kind, modifier) = if effect.kind == AbilityEffectKind::Buff {
                    (TimedEffectKind::Buff, value)
                } else {
                    (TimedEffectKind::Debuff, -value.abs())
                };
                let spec = TimedEffectSpec::stat(
                    def.id.as_str(),
                    kind,
                    stat,
                    modifier,
                    effect.duration.unwrap_or(DEFAULT_BUFF_DURATION),
                )
                .named(def.name.clone());
                let ledger = TimedEffectLedger::new(aggregator);
                for id in resolve_targets(effect.target, party, Some(hero_id), TargetPool::Alive, &aggregator, rng) {
                    let Some(target) = party.hero_mut(id) else { continue };
                    let applied = ledger.apply(target, &spec, depth);
                    summaries.push(EffectSummary::StatusApplied {
                        hero: id,
                        effect: applied.name,
                    });
                }
            }
            None => tracing::warn!(ability = %def.id, "buff/debuff ability without a stat"),
        },
        AbilityEffectKind::Special => summaries.push(EffectSummary::Note(def.description.clone())),
    }

    tracing::debug!(hero = %hero_id, ability = %def.id, floor, depth, "ability used");
    Ok(AbilityUse {
        success: true,
        message: format!("{caster_name} uses {}", def.name),
        summaries,
        error: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{AbilityEffect, Scaling};
    use crate::state::TargetRule;
    use crate::stats::StatKind;

    fn def(cooldown: u32, kind: CooldownKind, charges: Option<u32>) -> AbilityDefinition {
        AbilityDefinition {
            id: AbilityId::from("mend"),
            name: "Mend".into(),
            description: String::new(),
            effect: AbilityEffect {
                kind: AbilityEffectKind::Heal,
                target: TargetRule::SelfTarget,
                value: 10,
                scaling: Some(Scaling {
                    stat: StatKind::Wisdom,
                    ratio: 0.5,
                }),
                duration: None,
                stat: None,
            },
            cooldown,
            cooldown_kind: kind,
            charges,
        }
    }

    #[test]
    fn depth_cooldown_gates_for_full_interval() {
        let def = def(3, CooldownKind::Depth, None);
        let mut state = AbilityState::new(def.id.clone());
        state.last_used_depth = Some(10);

        let remaining: Vec<u32> = (10..=13).map(|d| remaining_cooldown(&def, &state, 1, d)).collect();
        assert_eq!(remaining, vec![3, 2, 1, 0]);
        assert!(!can_use(&def, &state, 1, 11));
        assert!(!can_use(&def, &state, 1, 12));
        assert!(can_use(&def, &state, 1, 13));
    }

    #[test]
    fn floor_cooldown_ignores_depth() {
        let def = def(1, CooldownKind::Floor, None);
        let mut state = AbilityState::new(def.id.clone());
        state.last_used_floor = Some(2);
        state.last_used_depth = Some(40);

        assert!(!can_use(&def, &state, 2, 99));
        assert!(can_use(&def, &state, 3, 1));
    }

    #[test]
    fn stale_counters_are_ignored() {
        let def = def(5, CooldownKind::Depth, None);
        let mut state = AbilityState::new(def.id.clone());
        state.last_used_depth = Some(30);

        assert_eq!(remaining_cooldown(&def, &state, 1, 2), 0);
        assert!(can_use(&def, &state, 1, 2));
    }

    #[test]
    fn rejections_are_classified_for_retry() {
        let def = def(3, CooldownKind::Depth, None);
        let mut state = AbilityState::new(def.id.clone());
        state.last_used_depth = Some(4);

        let cooldown = AbilityUse::failed(check_usable(&def, &state, 1, 5).unwrap_err());
        assert!(cooldown.is_retryable());
        assert_eq!(cooldown.error.as_ref().unwrap().error_code(), "ABILITY_ON_COOLDOWN");

        let missing = AbilityUse::failed(AbilityError::MissingDefinition(def.id.clone()));
        assert!(!missing.is_retryable());
        assert_eq!(missing.error.unwrap().severity(), crate::error::ErrorSeverity::Corruption);
    }

    #[test]
    fn charges_run_out() {
        let def = def(0, CooldownKind::Depth, Some(2));
        let mut state = AbilityState::new(def.id.clone());
        state.charges_used = 2;
        assert_eq!(
            check_usable(&def, &state, 1, 1),
            Err(AbilityError::NoCharges {
                ability: def.id.clone(),
                charges: 2
            })
        );
    }
}
