//! Outcome selection.
//!
//! # Weighted draw
//!
//! ```text
//! r ← uniform [0, total_weight)
//! return first entry whose cumulative weight > r
//! ```
//!
//! Success/failure choices draw one uniform `u` and succeed when
//! `u < success_probability`. Fixed choices draw nothing.

use super::requirements::success_probability;
use super::{Choice, ChoiceError, Outcome, Resolution};
use crate::config::EventBalance;
use crate::env::RngOracle;
use crate::state::Party;
use crate::stats::StatAggregator;

/// Which branch produced the outcome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Branch {
    Fixed,
    Weighted { index: usize },
    Success { roll: f64, chance: f64 },
    Failure { roll: f64, chance: f64 },
}

impl Branch {
    /// Short label used in logs and reports.
    pub fn label(&self) -> String {
        match self {
            Self::Fixed => "fixed".to_owned(),
            Self::Weighted { index } => format!("weighted[{index}]"),
            Self::Success { .. } => "success".to_owned(),
            Self::Failure { .. } => "failure".to_owned(),
        }
    }
}

/// An outcome picked from a choice.
#[derive(Clone, Copy, Debug)]
pub struct Resolved<'a> {
    pub outcome: &'a Outcome,
    pub branch: Branch,
}

/// Draws one entry proportionally to `weight`.
///
/// Returns `None` only for an empty slice. When every weight is zero the
/// first entry is returned without drawing.
pub fn weighted_pick<'a, T>(
    entries: &'a [T],
    weight: impl Fn(&T) -> u32,
    rng: &mut dyn RngOracle,
) -> Option<(usize, &'a T)> {
    let first = entries.first()?;
    let total: u64 = entries.iter().map(|e| u64::from(weight(e))).sum();
    if total == 0 {
        return Some((0, first));
    }

    let r = rng.next_f64() * total as f64;
    let mut cumulative = 0.0;
    for (index, entry) in entries.iter().enumerate() {
        cumulative += f64::from(weight(entry));
        if cumulative > r {
            return Some((index, entry));
        }
    }
    // r is strictly below total; reached only through float rounding
    entries.iter().enumerate().rev().find(|(_, e)| weight(e) > 0)
}

/// Resolves `choice` to a concrete outcome.
pub fn resolve<'a>(
    choice: &'a Choice,
    party: &Party,
    balance: &EventBalance,
    aggregator: &StatAggregator<'_>,
    rng: &mut dyn RngOracle,
) -> Result<Resolved<'a>, ChoiceError> {
    let resolved = match &choice.resolution {
        Resolution::Weighted(entries) => {
            let (index, entry) = weighted_pick(entries, |e| e.weight, rng).ok_or_else(|| {
                ChoiceError::NoOutcomes {
                    choice: choice.text.clone(),
                }
            })?;
            Resolved {
                outcome: &entry.outcome,
                branch: Branch::Weighted { index },
            }
        }
        Resolution::Chance {
            success, failure, ..
        } => {
            let chance = success_probability(choice, party, balance, aggregator)
                .unwrap_or(balance.default_success_chance);
            let roll = rng.next_f64();
            if roll < chance {
                Resolved {
                    outcome: success,
                    branch: Branch::Success { roll, chance },
                }
            } else {
                Resolved {
                    outcome: failure,
                    branch: Branch::Failure { roll, chance },
                }
            }
        }
        Resolution::Fixed(outcome) => Resolved {
            outcome,
            branch: Branch::Fixed,
        },
    };

    tracing::debug!(
        choice = %choice.text,
        branch = %resolved.branch.label(),
        "resolved choice"
    );
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, SequenceRng};
    use crate::event::WeightedOutcome;
    use crate::state::{Hero, HeroId};
    use crate::stats::{SetBonusTable, StatBonus, StatKind, Stats};

    fn weighted(weights: &[u32]) -> Choice {
        Choice::new(
            "Open the chest",
            Resolution::Weighted(
                weights
                    .iter()
                    .enumerate()
                    .map(|(i, w)| WeightedOutcome {
                        weight: *w,
                        outcome: Outcome::new(format!("branch {i}")),
                    })
                    .collect(),
            ),
        )
    }

    fn party() -> Party {
        Party::from_heroes([Hero::new(
            HeroId(1),
            "Tamsin",
            "Rogue",
            Stats::from_template(&StatBonus::new().with(StatKind::MaxHp, 30)),
        )])
        .unwrap()
    }

    #[test]
    fn weighted_walks_cumulative_weights() {
        let choice = weighted(&[1, 2, 1]);
        let table = SetBonusTable::new();
        let aggregator = StatAggregator::new(&table);
        let balance = EventBalance::default();

        // total 4: [0,1) → 0, [1,3) → 1, [3,4) → 2
        for (sample, expected) in [(0.0, 0), (0.24, 0), (0.25, 1), (0.74, 1), (0.75, 2), (0.99, 2)] {
            let mut rng = SequenceRng::new([sample]);
            let resolved = resolve(&choice, &party(), &balance, &aggregator, &mut rng).unwrap();
            assert_eq!(resolved.branch, Branch::Weighted { index: expected }, "sample {sample}");
        }
    }

    #[test]
    fn zero_weight_entries_are_never_drawn() {
        let entries = [0u32, 3, 0, 1];
        let mut rng = PcgRng::new(11);
        for _ in 0..1_000 {
            let (index, _) = weighted_pick(&entries, |w| *w, &mut rng).unwrap();
            assert!(index == 1 || index == 3);
        }
    }

    #[test]
    fn weighted_frequencies_converge_to_weight_share() {
        const DRAWS: usize = 100_000;
        let entries = [1u32, 3, 6];
        let mut rng = PcgRng::new(7);
        let mut counts = [0usize; 3];
        for _ in 0..DRAWS {
            let (index, _) = weighted_pick(&entries, |w| *w, &mut rng).unwrap();
            counts[index] += 1;
        }

        for (count, expected) in counts.iter().zip([0.1, 0.3, 0.6]) {
            let observed = *count as f64 / DRAWS as f64;
            // binomial standard error is below 0.0016 for every share here
            assert!(
                (observed - expected).abs() < 0.01,
                "observed {observed}, expected {expected}"
            );
        }
    }

    #[test]
    fn empty_weighted_list_is_an_error() {
        let choice = weighted(&[]);
        let table = SetBonusTable::new();
        let err = resolve(
            &choice,
            &party(),
            &EventBalance::default(),
            &StatAggregator::new(&table),
            &mut SequenceRng::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ChoiceError::NoOutcomes { .. }));
    }

    #[test]
    fn fixed_choice_draws_nothing() {
        let choice = Choice::new("Rest", Resolution::Fixed(Outcome::new("You rest.")));
        let table = SetBonusTable::new();
        let mut rng = SequenceRng::new([0.3]);
        let resolved = resolve(
            &choice,
            &party(),
            &EventBalance::default(),
            &StatAggregator::new(&table),
            &mut rng,
        )
        .unwrap();
        assert_eq!(resolved.outcome.text, "You rest.");
        assert_eq!(rng.draws(), 0);
    }
}
