//! Data-driven content definitions and loaders.
//!
//! This crate reads authored content into the immutable tables the rules
//! engine consumes:
//! - Game configuration (TOML)
//! - Dungeon events (RON)
//! - Ability definitions (RON)
//! - Hero classes (RON)
//! - Set and material bonuses (RON)
//! - Unique-effect specs (RON)
//!
//! Content is bundled into a [`descent_core::Registries`] value and never
//! appears in run state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, ClassLoader, ConfigLoader, Content, ContentFactory, EventLoader, LoadResult,
    SetBonusLoader, UniqueEffectLoader,
};
