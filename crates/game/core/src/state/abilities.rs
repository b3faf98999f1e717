//! Per-hero ability instance state.
//!
//! A hero owns one [`AbilityState`] per known ability. The immutable definition
//! (effect, cooldown, charges) is looked up by id in
//! [`crate::ability::AbilityRegistry`] on every use, so only runtime fields are
//! ever persisted.

use super::AbilityId;

/// Runtime fields of one ability owned by a hero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityState {
    pub id: AbilityId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub last_used_floor: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub last_used_depth: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub charges_used: u32,
}

impl AbilityState {
    /// Fresh, never-used state.
    pub fn new(id: AbilityId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}
