//! Damage, healing and revival applied to a hero's HP.
//!
//! All HP writes in the core go through these helpers so the clamping and
//! death invariants hold everywhere:
//! - HP never drops below 0 and never exceeds effective max HP
//! - reaching 0 HP marks the hero dead
//! - heals do nothing to dead heroes; only revives bring them back

use super::DefenseCurve;
use crate::state::Hero;
use crate::stats::Stats;

/// Damage after defense mitigation.
///
/// # Formula
///
/// ```text
/// mitigated = round(amount × (1 − block_fraction(defense)))
/// ```
///
/// True damage bypasses the curve entirely.
pub fn mitigated_damage(amount: u32, defense: i32, true_damage: bool, curve: &DefenseCurve<'_>) -> u32 {
    if true_damage {
        return amount;
    }
    let block = curve.block_fraction(f64::from(defense));
    (f64::from(amount) * (1.0 - block)).round().max(0.0) as u32
}

/// Result of an HP change on one hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HpChange {
    /// Absolute HP actually gained or lost.
    pub amount: u32,
    /// HP after the change.
    pub hp: i32,
    /// True if this change killed the hero.
    pub died: bool,
}

/// Subtracts already-mitigated damage, clamping at 0.
pub fn apply_damage(hero: &mut Hero, damage: u32) -> HpChange {
    let before = hero.base.hp.max(0);
    let after = before.saturating_sub(i32::try_from(damage).unwrap_or(i32::MAX)).max(0);
    hero.base.hp = after;
    let died = hero.alive && after == 0;
    if died {
        hero.alive = false;
    }
    HpChange {
        amount: (before - after).unsigned_abs(),
        hp: after,
        died,
    }
}

/// Heals by `amount` (or to full), capped at effective max HP.
///
/// Returns `None` for dead heroes.
pub fn apply_heal(hero: &mut Hero, effective: &Stats, amount: u32, full: bool) -> Option<HpChange> {
    if !hero.alive {
        return None;
    }
    let max_hp = effective.max_hp.max(1);
    let before = hero.base.hp.min(max_hp);
    let missing = (max_hp - before).max(0);
    let gained = if full {
        missing
    } else {
        missing.min(i32::try_from(amount).unwrap_or(i32::MAX))
    };
    hero.base.hp = before + gained;
    Some(HpChange {
        amount: gained.unsigned_abs(),
        hp: hero.base.hp,
        died: false,
    })
}

/// Brings a dead hero back with `hp` (at least 1, at most effective max HP).
///
/// Returns `None` if the hero is alive.
pub fn apply_revive(hero: &mut Hero, effective: &Stats, hp: u32) -> Option<HpChange> {
    if hero.alive {
        return None;
    }
    let max_hp = effective.max_hp.max(1);
    let restored = i32::try_from(hp).unwrap_or(i32::MAX).clamp(1, max_hp);
    hero.alive = true;
    hero.base.hp = restored;
    Some(HpChange {
        amount: restored.unsigned_abs(),
        hp: restored,
        died: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DefenseCurveConfig;
    use crate::state::HeroId;
    use crate::stats::{StatBonus, StatKind};

    fn hero(hp: i32) -> Hero {
        let mut hero = Hero::new(
            HeroId(1),
            "Mira",
            "Cleric",
            Stats::from_template(&StatBonus::single(StatKind::MaxHp, 50)),
        );
        hero.base.hp = hp;
        hero
    }

    #[test]
    fn true_damage_ignores_defense() {
        let cfg = DefenseCurveConfig::default();
        let curve = DefenseCurve::new(&cfg);
        assert_eq!(mitigated_damage(100, 20_000, true, &curve), 100);
        assert!(mitigated_damage(100, 20_000, false, &curve) < 100);
    }

    #[test]
    fn damage_clamps_and_kills() {
        let mut hero = hero(30);
        let change = apply_damage(&mut hero, 45);
        assert_eq!(change, HpChange { amount: 30, hp: 0, died: true });
        assert!(!hero.alive);
    }

    #[test]
    fn dead_heroes_ignore_heals_until_revived() {
        let mut hero = hero(10);
        apply_damage(&mut hero, 10);
        let effective = hero.base.clone();

        assert!(apply_heal(&mut hero, &effective, 20, false).is_none());
        assert_eq!(hero.hp(), 0);

        let revived = apply_revive(&mut hero, &effective, 500).unwrap();
        assert_eq!(revived.hp, 50);
        assert!(hero.alive);
        assert!(apply_revive(&mut hero, &effective, 10).is_none());
    }

    #[test]
    fn heal_caps_at_effective_max() {
        let mut hero = hero(45);
        let mut effective = hero.base.clone();
        effective.max_hp = 60;

        let change = apply_heal(&mut hero, &effective, 100, false).unwrap();
        assert_eq!(change.amount, 15);
        assert_eq!(hero.hp(), 60);
    }
}
