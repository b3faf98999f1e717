//! Event resolution and character progression rules for a dungeon crawler.
//!
//! `descent-core` turns a player's choice into state changes: it checks choice
//! requirements, draws an outcome, applies damage, healing, experience, gold,
//! loot and statuses to the party, and fires item-bound unique effects at run
//! milestones. Everything is synchronous and deterministic under an injected
//! [`env::RngOracle`]; configuration and content tables arrive through
//! [`env::Env`], never through globals.
//!
//! Hosts drive a run through [`engine::GameSession`]; the stage modules are
//! public for previews and balance tooling.
pub mod ability;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod inventory;
pub mod state;
pub mod stats;
pub mod timed;
pub mod unique;

pub use ability::{AbilityDefinition, AbilityError, AbilityRegistry, AbilityUse};
pub use combat::{CurveKind, DefenseCurve, DefenseCurveConfig};
pub use config::{EventBalance, GameConfig, ProgressionConfig};
pub use engine::{ChoiceReport, GameSession, ProgressReport, RunState};
pub use env::{
    ClassDefinition, ClassRegistry, EntropyRng, Env, LootOracle, PcgRng, Registries, RngOracle,
    SequenceRng,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use event::{Choice, ChoiceError, DungeonEvent, EffectSummary, EventKind, Outcome};
pub use inventory::{ConsumableSource, ConsumableUse, InventoryError};
pub use state::{
    Consumable, EquipSlot, Equipment, Hero, HeroId, Inventory, Item, ItemId, Loot, Party, Rarity,
    RunResources,
};
pub use stats::{SetBonusTable, StatAggregator, StatBonus, StatKind, Stats};
pub use timed::TimedEffectLedger;
pub use unique::{Trigger, UniqueEffectRegistry, UniqueEffectSpec};
