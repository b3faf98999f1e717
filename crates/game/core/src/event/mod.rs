//! Event resolution pipeline.
//!
//! One player action runs the stages in a fixed order:
//!
//! ```text
//! [ Requirements ]  can_select / check_requirements
//!      ↓
//! [ Selection ]     resolve (weighted · success/failure · fixed)
//!      ↓
//! [ Application ]   EffectApplier::apply (targets, mitigation, XP, loot)
//!      ↓
//! [ Triggers ]      unique-effect dispatch (see crate::unique)
//! ```
//!
//! The last stage is driven by [`crate::engine::GameSession`]; everything here
//! is usable on its own for previews and balance tooling.

pub mod apply;
mod error;
pub mod progression;
pub mod requirements;
pub mod selector;
mod summary;
pub mod targeting;
mod types;

pub use apply::{ApplyContext, EffectApplier};
pub use error::ChoiceError;
pub use progression::grant_experience;
pub use requirements::{can_select, check_requirements, max_alive_stat, success_probability};
pub use selector::{Branch, Resolved, resolve, weighted_pick};
pub use summary::EffectSummary;
pub use targeting::{TargetPool, resolve_targets};
pub use types::{
    Choice, DungeonEvent, EventKind, ItemGrant, ItemSpec, Outcome, OutcomeEffect,
    OutcomeEffectKind, Requirements, Resolution, StatRequirement, WeightedItem, WeightedOutcome,
};
