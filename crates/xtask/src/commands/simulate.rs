//! Monte-Carlo simulation of a single event choice
//!
//! Resolves the same choice many times against fresh copies of one party and
//! reports how often each branch fired and what it cost the party. Runs share
//! one seeded generator, so a seed always reproduces the same report.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, ensure};
use clap::Parser;
use console::style;
use serde::Serialize;

use descent_content::ContentFactory;
use descent_core::event::success_probability;
use descent_core::state::{ConsumableEffect, ConsumableEffectKind, ItemSlot};
use descent_core::{
    Consumable, EffectSummary, Env, GameConfig, GameSession, HeroId, Item, ItemId, LootOracle,
    Party, PcgRng, Rarity, RunResources, RunState,
};

use crate::utils::{content_dir, percent};

/// Simulate an event choice
#[derive(Parser)]
pub struct Simulate {
    /// Event id from events.ron
    #[arg(value_name = "EVENT")]
    event: String,

    /// Index of the choice to resolve
    #[arg(short, long, default_value_t = 0)]
    choice: usize,

    /// Number of resolutions
    #[arg(short, long, default_value_t = 10_000)]
    runs: u32,

    /// Seed for the generator
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Depth the party stands at (defaults to the event's unlock depth)
    #[arg(long)]
    depth: Option<u32>,

    /// Floor the party stands on
    #[arg(long, default_value_t = 1)]
    floor: u32,

    /// Hero classes, in roster order
    #[arg(short, long, value_delimiter = ',', default_values_t = vec![String::from("Warrior"), String::from("Cleric"), String::from("Rogue")])]
    party: Vec<String>,

    /// Run gold before the choice
    #[arg(long, default_value_t = 100)]
    gold: u64,

    /// Content directory (defaults to DESCENT_DATA_DIR, then the bundled data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Emit JSON instead of a report
    #[arg(long)]
    json: bool,
}

/// Hands out plain gear and potions with fresh ids.
struct SimLoot {
    next_id: Cell<u64>,
}

impl SimLoot {
    fn new() -> Self {
        Self {
            next_id: Cell::new(1_000_000),
        }
    }

    fn fresh_id(&self) -> ItemId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        ItemId(id)
    }
}

impl LootOracle for SimLoot {
    fn generate_item(&self, effective_floor: u32, slot_hint: Option<ItemSlot>, min_rarity: Option<Rarity>) -> Item {
        let slot = slot_hint.unwrap_or(ItemSlot::Weapon);
        Item::new(
            self.fresh_id(),
            format!("Floor {effective_floor} {slot}"),
            slot,
            min_rarity.unwrap_or_default(),
        )
    }

    fn generate_consumable(
        &self,
        base_id: &str,
        _size_id: &str,
        _potency_id: &str,
        rarity: Rarity,
        effective_floor: u32,
    ) -> Consumable {
        let heal = ConsumableEffect::on_self(ConsumableEffectKind::Heal, 10 + 2 * effective_floor as i32);
        let mut consumable = Consumable::new(self.fresh_id(), base_id, vec![heal]);
        consumable.rarity = rarity;
        consumable
    }
}

#[derive(Default, Serialize)]
struct Tally {
    runs: u32,
    rejected: u32,
    branches: BTreeMap<String, u32>,
    outcomes: BTreeMap<String, u32>,
    damage_taken: u64,
    deaths: u64,
    wipes: u32,
    gold_delta: i64,
    level_ups: u64,
    loot: u64,
}

impl Tally {
    fn mean(&self, total: f64) -> f64 {
        if self.runs == 0 { 0.0 } else { total / f64::from(self.runs) }
    }
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        ensure!(self.runs > 0, "--runs must be positive");
        ensure!(!self.party.is_empty(), "--party needs at least one class");

        let dir = content_dir(self.data_dir.clone())?;
        let content = ContentFactory::new(&dir)
            .load()
            .with_context(|| format!("Failed to load content from {}", dir.display()))?;
        tracing::debug!(
            dir = %dir.display(),
            events = content.events.len(),
            classes = content.registries.classes.len(),
            "content loaded"
        );

        let event = content
            .event(&self.event)
            .ok_or_else(|| anyhow!("No event '{}' in {}", self.event, dir.display()))?;
        let choice = event
            .choices
            .get(self.choice)
            .ok_or_else(|| anyhow!("Event '{}' has {} choices", event.id, event.choices.len()))?;

        let heroes = self
            .party
            .iter()
            .enumerate()
            .map(|(index, class)| {
                let definition = content
                    .registries
                    .classes
                    .get(class)
                    .ok_or_else(|| anyhow!("Unknown class '{class}'"))?;
                let number = index as u32 + 1;
                Ok(definition.create_hero(HeroId(number), format!("{class} {number}")))
            })
            .collect::<Result<Vec<_>>>()?;
        let party = Party::from_heroes(heroes).map_err(|hero| {
            anyhow!(
                "A party holds at most {} heroes; {} does not fit",
                GameConfig::MAX_PARTY_SIZE,
                hero.name
            )
        })?;

        let mut resources = RunResources::new(self.gold);
        resources.floor = self.floor;
        resources.depth = self.depth.unwrap_or(event.min_depth.max(1));
        let initial = RunState::new(party, resources);

        let aggregator = descent_core::StatAggregator::new(&content.registries.sets).at_depth(initial.resources.depth);
        let chance = success_probability(choice, &initial.party, &content.config.events, &aggregator);

        tracing::info!(
            event = %event.id,
            choice = self.choice,
            runs = self.runs,
            seed = self.seed,
            depth = initial.resources.depth,
            chance,
            "simulating"
        );

        let loot = SimLoot::new();
        let env = Env::new(&content.config, &content.registries, &loot);
        let mut rng = PcgRng::new(self.seed);
        let mut tally = Tally::default();

        for _ in 0..self.runs {
            let mut state = initial.clone();
            let report = GameSession::new(&mut state, env).select_choice(event, self.choice, None, &mut rng);
            tally.runs += 1;

            let Some(branch) = report.branch else {
                tally.rejected += 1;
                *tally.outcomes.entry(report.message).or_default() += 1;
                continue;
            };
            *tally.branches.entry(branch.label()).or_default() += 1;
            *tally.outcomes.entry(report.message).or_default() += 1;

            for summary in &report.summaries {
                match summary {
                    EffectSummary::Damaged { amount, died, .. } => {
                        tally.damage_taken += u64::from(*amount);
                        tally.deaths += u64::from(*died);
                    }
                    EffectSummary::Gold { delta, .. } => tally.gold_delta += delta,
                    EffectSummary::LevelUp { .. } => tally.level_ups += 1,
                    EffectSummary::Loot { .. } => tally.loot += 1,
                    _ => {}
                }
            }
            tally.wipes += u32::from(state.party.is_wiped());
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&tally)?);
            return Ok(());
        }

        println!(
            "{} {} / choice {}: {}",
            style("Simulated").bold(),
            style(&event.name).cyan(),
            self.choice,
            choice.text
        );
        println!(
            "  {} runs · seed {} · floor {} · depth {}",
            tally.runs, self.seed, initial.resources.floor, initial.resources.depth
        );
        if let Some(chance) = chance {
            println!("  success chance {}", percent(chance).trim());
        }
        if tally.rejected > 0 {
            println!("  {} {} runs rejected", style("!").red(), tally.rejected);
        }

        println!("\n{}", style("Branches").bold());
        for (label, count) in &tally.branches {
            println!("  {:<14} {:>8}  {}", label, count, percent(f64::from(*count) / f64::from(tally.runs)));
        }
        println!("\n{}", style("Outcomes").bold());
        for (text, count) in &tally.outcomes {
            println!("  {:>8}  {}", count, text);
        }

        println!("\n{}", style("Per run").bold());
        println!("  damage taken  {:>10.2}", tally.mean(tally.damage_taken as f64));
        println!("  deaths        {:>10.3}", tally.mean(tally.deaths as f64));
        println!("  gold          {:>+10.2}", tally.mean(tally.gold_delta as f64));
        println!("  level-ups     {:>10.3}", tally.mean(tally.level_ups as f64));
        println!("  loot          {:>10.3}", tally.mean(tally.loot as f64));
        println!("  wipe rate     {:>10}", percent(f64::from(tally.wipes) / f64::from(tally.runs)));
        Ok(())
    }
}
