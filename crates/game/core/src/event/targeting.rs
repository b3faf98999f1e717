//! Target resolution against the current party snapshot.
//!
//! | rule          | picks                                               |
//! |---------------|-----------------------------------------------------|
//! | self          | the actor (first living hero when there is none)    |
//! | hero(id)      | that hero, alive or not                             |
//! | ally          | one random pool member other than the actor         |
//! | all / allies  | every pool member                                   |
//! | random        | one uniformly random pool member                    |
//! | strongest     | pool member with the highest effective attack       |
//! | weakest       | pool member with the lowest effective attack        |
//!
//! The pool is the alive heroes, or the fallen ones for revives. Ties on
//! attack resolve to the earlier hero in roster order.

use crate::env::RngOracle;
use crate::state::{Hero, HeroId, Party, TargetRule};
use crate::stats::StatAggregator;

/// Which heroes a rule selects from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetPool {
    Alive,
    Fallen,
}

impl TargetPool {
    fn contains(self, hero: &Hero) -> bool {
        match self {
            Self::Alive => hero.alive,
            Self::Fallen => !hero.alive,
        }
    }
}

/// Resolves `rule` to hero ids in roster order.
///
/// Random rules draw exactly one sample, and only when the pool is non-empty.
pub fn resolve_targets(
    rule: TargetRule,
    party: &Party,
    actor: Option<HeroId>,
    pool: TargetPool,
    aggregator: &StatAggregator<'_>,
    rng: &mut dyn RngOracle,
) -> Vec<HeroId> {
    let members: Vec<&Hero> = party.heroes().iter().filter(|h| pool.contains(h)).collect();

    match rule {
        TargetRule::SelfTarget => actor
            .filter(|id| party.hero(*id).is_some())
            .or_else(|| party.alive().next().map(|h| h.id))
            .into_iter()
            .collect(),
        TargetRule::Hero(id) => party.hero(id).map(|h| h.id).into_iter().collect(),
        TargetRule::Ally => {
            let others: Vec<HeroId> = members
                .iter()
                .map(|h| h.id)
                .filter(|id| Some(*id) != actor)
                .collect();
            pick_one(&others, rng)
        }
        TargetRule::AllAllies | TargetRule::All => members.iter().map(|h| h.id).collect(),
        TargetRule::Random => {
            let ids: Vec<HeroId> = members.iter().map(|h| h.id).collect();
            pick_one(&ids, rng)
        }
        TargetRule::Strongest => extreme_by_attack(&members, aggregator, |a, b| a > b),
        TargetRule::Weakest => extreme_by_attack(&members, aggregator, |a, b| a < b),
    }
}

fn pick_one(ids: &[HeroId], rng: &mut dyn RngOracle) -> Vec<HeroId> {
    if ids.is_empty() {
        return Vec::new();
    }
    vec![ids[rng.index(ids.len())]]
}

/// First hero whose attack beats every earlier one under `better`.
fn extreme_by_attack(
    members: &[&Hero],
    aggregator: &StatAggregator<'_>,
    better: impl Fn(i32, i32) -> bool,
) -> Vec<HeroId> {
    let mut best: Option<(HeroId, i32)> = None;
    for hero in members {
        let attack = aggregator.effective_stats(hero).attack;
        match best {
            Some((_, current)) if !better(attack, current) => {}
            _ => best = Some((hero.id, attack)),
        }
    }
    best.map(|(id, _)| id).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SequenceRng;
    use crate::stats::{SetBonusTable, StatBonus, StatKind, Stats};

    fn party() -> Party {
        let hero = |id, attack| {
            Hero::new(
                HeroId(id),
                format!("Hero {id}"),
                "Warrior",
                Stats::from_template(
                    &StatBonus::new()
                        .with(StatKind::Attack, attack)
                        .with(StatKind::MaxHp, 50),
                ),
            )
        };
        Party::from_heroes([hero(1, 12), hero(2, 20), hero(3, 20), hero(4, 5)]).unwrap()
    }

    fn resolve(rule: TargetRule, party: &Party, actor: Option<HeroId>, rng: &mut SequenceRng) -> Vec<HeroId> {
        let table = SetBonusTable::new();
        resolve_targets(rule, party, actor, TargetPool::Alive, &StatAggregator::new(&table), rng)
    }

    #[test]
    fn strongest_and_weakest_break_ties_by_roster_order() {
        let party = party();
        let mut rng = SequenceRng::default();
        assert_eq!(resolve(TargetRule::Strongest, &party, None, &mut rng), vec![HeroId(2)]);
        assert_eq!(resolve(TargetRule::Weakest, &party, None, &mut rng), vec![HeroId(4)]);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn ally_never_picks_the_actor() {
        let party = party();
        for sample in [0.0, 0.4, 0.99] {
            let mut rng = SequenceRng::new([sample]);
            let picked = resolve(TargetRule::Ally, &party, Some(HeroId(2)), &mut rng);
            assert_eq!(picked.len(), 1);
            assert_ne!(picked[0], HeroId(2));
        }
    }

    #[test]
    fn dead_heroes_are_excluded_from_group_rules() {
        let mut party = party();
        party.hero_mut(HeroId(3)).unwrap().alive = false;
        let mut rng = SequenceRng::default();

        let all = resolve(TargetRule::All, &party, None, &mut rng);
        assert_eq!(all, vec![HeroId(1), HeroId(2), HeroId(4)]);

        let table = SetBonusTable::new();
        let fallen = resolve_targets(
            TargetRule::All,
            &party,
            None,
            TargetPool::Fallen,
            &StatAggregator::new(&table),
            &mut rng,
        );
        assert_eq!(fallen, vec![HeroId(3)]);
    }

    #[test]
    fn self_falls_back_to_leader() {
        let party = party();
        let mut rng = SequenceRng::default();
        assert_eq!(resolve(TargetRule::SelfTarget, &party, Some(HeroId(3)), &mut rng), vec![HeroId(3)]);
        assert_eq!(resolve(TargetRule::SelfTarget, &party, None, &mut rng), vec![HeroId(1)]);
    }
}
