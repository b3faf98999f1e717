//! Choice gating and success probability.
//!
//! # Formulas
//!
//! ```text
//! stat threshold = value × (1 + (depth − 1) × stat_requirement_scaling_per_floor)
//! success        = clamp(base + best_alive(stat_modifier) × stat_bonus_per_point,
//!                        min_success, max_success)
//! ```
//!
//! "Best" always means the maximum effective value among alive heroes; a
//! single strong member carries the party.

use super::{Choice, ChoiceError, Resolution};
use crate::config::EventBalance;
use crate::state::{Inventory, Party};
use crate::stats::{StatAggregator, StatKind};

/// Highest effective `stat` among alive heroes, or `None` if nobody is alive.
pub fn max_alive_stat(party: &Party, stat: StatKind, aggregator: &StatAggregator<'_>) -> Option<i32> {
    party
        .alive()
        .map(|hero| aggregator.effective_stats(hero).get(stat))
        .max()
}

/// Depth-scaled stat threshold.
pub fn scaled_threshold(value: i32, depth: u32, balance: &EventBalance) -> f64 {
    let floors_below = f64::from(depth.max(1) - 1);
    f64::from(value) * (1.0 + floors_below * balance.stat_requirement_scaling_per_floor)
}

/// Checks every requirement present on `choice`, reporting the first failure.
pub fn check_requirements(
    choice: &Choice,
    party: &Party,
    depth: u32,
    gold: u64,
    inventory: &Inventory,
    balance: &EventBalance,
    aggregator: &StatAggregator<'_>,
) -> Result<(), ChoiceError> {
    let req = &choice.requirements;

    if let Some(class) = &req.class {
        if !party.alive().any(|hero| &hero.class == class) {
            return Err(ChoiceError::MissingClass {
                class: class.clone(),
            });
        }
    }

    if let Some(stat_req) = &req.stat {
        let required = scaled_threshold(stat_req.value, depth, balance);
        let best = max_alive_stat(party, stat_req.stat, aggregator).unwrap_or(0);
        if f64::from(best) < required {
            return Err(ChoiceError::StatTooLow {
                stat: stat_req.stat,
                required,
                best,
            });
        }
    }

    if let Some(required) = req.gold {
        if gold < required {
            return Err(ChoiceError::NotEnoughGold {
                required,
                available: gold,
            });
        }
    }

    if let Some(item) = &req.item {
        if !inventory.contains_name(item) {
            return Err(ChoiceError::MissingItem { item: item.clone() });
        }
    }

    Ok(())
}

/// Returns true if every requirement on `choice` holds.
pub fn can_select(
    choice: &Choice,
    party: &Party,
    depth: u32,
    gold: u64,
    inventory: &Inventory,
    balance: &EventBalance,
    aggregator: &StatAggregator<'_>,
) -> bool {
    check_requirements(choice, party, depth, gold, inventory, balance, aggregator).is_ok()
}

/// Success probability of a success/failure choice; `None` for other modes.
pub fn success_probability(
    choice: &Choice,
    party: &Party,
    balance: &EventBalance,
    aggregator: &StatAggregator<'_>,
) -> Option<f64> {
    let Resolution::Chance {
        success_chance,
        stat_modifier,
        ..
    } = &choice.resolution
    else {
        return None;
    };

    let base = success_chance.unwrap_or(balance.default_success_chance);
    let bonus = stat_modifier
        .and_then(|stat| max_alive_stat(party, stat, aggregator))
        .map_or(0.0, |best| f64::from(best) * balance.stat_bonus_per_point);

    Some((base + bonus).clamp(balance.min_success, balance.max_success))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Outcome, Requirements, StatRequirement};
    use crate::state::{Consumable, Hero, HeroId, ItemId, Loot};
    use crate::stats::{SetBonusTable, StatBonus, Stats};

    fn party(luck: &[i32]) -> Party {
        Party::from_heroes(luck.iter().enumerate().map(|(i, luck)| {
            Hero::new(
                HeroId(i as u32 + 1),
                format!("Hero {i}"),
                if i == 0 { "Rogue" } else { "Warrior" },
                Stats::from_template(
                    &StatBonus::new()
                        .with(StatKind::Luck, *luck)
                        .with(StatKind::MaxHp, 40),
                ),
            )
        }))
        .unwrap()
    }

    fn chance(base: Option<f64>, stat: Option<StatKind>) -> Choice {
        Choice::new(
            "Pick the lock",
            Resolution::Chance {
                success_chance: base,
                stat_modifier: stat,
                success: Outcome::new("Click."),
                failure: Outcome::new("Snap."),
            },
        )
    }

    #[test]
    fn luck_raises_success_probability() {
        let table = SetBonusTable::new();
        let aggregator = StatAggregator::new(&table);
        let party = party(&[10, 50]);
        let p = success_probability(
            &chance(Some(0.5), Some(StatKind::Luck)),
            &party,
            &EventBalance::default(),
            &aggregator,
        )
        .unwrap();
        assert!((p - 0.6).abs() < 1e-12);
    }

    #[test]
    fn probability_clamps_to_max_success() {
        let table = SetBonusTable::new();
        let aggregator = StatAggregator::new(&table);
        let party = party(&[500]);
        let p = success_probability(
            &chance(Some(0.0), Some(StatKind::Luck)),
            &party,
            &EventBalance::default(),
            &aggregator,
        );
        assert_eq!(p, Some(0.95));
    }

    #[test]
    fn probability_clamps_to_min_success_and_uses_default() {
        let table = SetBonusTable::new();
        let aggregator = StatAggregator::new(&table);
        let party = party(&[0]);
        let balance = EventBalance::default();

        assert_eq!(success_probability(&chance(Some(0.0), None), &party, &balance, &aggregator), Some(0.05));
        assert_eq!(success_probability(&chance(None, None), &party, &balance, &aggregator), Some(0.5));
        let fixed = Choice::new("Walk away", Resolution::Fixed(Outcome::new("You leave.")));
        assert_eq!(success_probability(&fixed, &party, &balance, &aggregator), None);
    }

    #[test]
    fn stat_requirement_scales_with_depth_and_uses_best_alive() {
        let table = SetBonusTable::new();
        let aggregator = StatAggregator::new(&table);
        let balance = EventBalance::default();
        let mut party = party(&[10, 31]);
        let choice = Choice::new("Squeeze through", Resolution::Fixed(Outcome::new("Made it.")))
            .with_requirements(Requirements {
                stat: Some(StatRequirement {
                    stat: StatKind::Luck,
                    value: 25,
                }),
                ..Requirements::default()
            });
        let inventory = Inventory::new();

        // depth 5: 25 × 1.2 = 30
        assert!(can_select(&choice, &party, 5, 0, &inventory, &balance, &aggregator));
        // depth 6: 25 × 1.25 = 31.25
        assert!(!can_select(&choice, &party, 6, 0, &inventory, &balance, &aggregator));

        party.hero_mut(HeroId(2)).unwrap().alive = false;
        assert!(!can_select(&choice, &party, 1, 0, &inventory, &balance, &aggregator));
    }

    #[test]
    fn all_requirements_are_anded() {
        let table = SetBonusTable::new();
        let aggregator = StatAggregator::new(&table);
        let balance = EventBalance::default();
        let party = party(&[5, 5]);
        let choice = Choice::new("Bribe the guard", Resolution::Fixed(Outcome::new("He looks away.")))
            .with_requirements(Requirements {
                class: Some("Rogue".into()),
                gold: Some(50),
                item: Some("Silver Key".into()),
                ..Requirements::default()
            });
        let mut inventory = Inventory::new();

        let err = check_requirements(&choice, &party, 1, 80, &inventory, &balance, &aggregator).unwrap_err();
        assert_eq!(err, ChoiceError::MissingItem { item: "Silver Key".into() });

        inventory.push(Loot::Consumable(Consumable::new(ItemId(9), "Silver Key", Vec::new())));
        assert!(can_select(&choice, &party, 1, 80, &inventory, &balance, &aggregator));
        assert!(!can_select(&choice, &party, 1, 20, &inventory, &balance, &aggregator));
    }
}
