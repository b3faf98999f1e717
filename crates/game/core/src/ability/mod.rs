//! Hero abilities.
//!
//! Definitions live in the [`AbilityRegistry`]; heroes carry only an
//! [`AbilityState`](crate::state::AbilityState) per known ability with the
//! counters needed for cooldown and charge gating.

mod cooldown;
mod definition;
mod error;

pub use cooldown::{
    AbilityUse, DEFAULT_BUFF_DURATION, can_use, check_usable, refresh_abilities, remaining_cooldown,
    use_ability,
};
pub use definition::{
    AbilityDefinition, AbilityEffect, AbilityEffectKind, AbilityRegistry, CooldownKind, Scaling,
};
pub use error::AbilityError;
