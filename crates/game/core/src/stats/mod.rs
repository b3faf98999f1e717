//! Stat System
//!
//! # Architecture
//!
//! ```text
//! [ Base Stats (stored on the hero) ]
//!      ↓
//! [ Equipment (per non-empty gear slot) ]
//!      ↓
//! [ Set / Material bonuses ]
//!      ↓
//! [ Timed effect modifiers ]
//!      ↓
//! [ Effective snapshot ]
//! ```
//!
//! ## Principles
//!
//! 1. **SSOT**: Base stats, level and current HP only
//! 2. **Additive Layers**: Every layer is a flat [`StatBonus`]
//! 3. **Pure**: Aggregation never mutates the hero
//! 4. **Injected Tables**: Set and material bonuses come from a [`SetBonusTable`]

pub mod aggregate;
pub mod core;
pub mod sets;

pub use aggregate::StatAggregator;
pub use self::core::{StatBonus, StatKind, Stats};
pub use sets::{MaterialBonus, SetBonusDefinition, SetBonusTable, SetTier};
