//! Set-bonus tables.
//!
//! Two grouping rules grant extra stats once enough equipped pieces match:
//! - **Named sets**: items sharing a `set_id`; the highest tier whose piece
//!   requirement is met applies.
//! - **Materials**: items whose names share a leading word ("Iron Helm",
//!   "Iron Boots", ...); the bonus applies at `min_pieces` or more.

use std::collections::HashMap;

use super::StatBonus;
use crate::state::SetId;

/// One tier of a named set.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetTier {
    pub pieces: u32,
    pub bonus: StatBonus,
}

/// A named multi-piece set.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetBonusDefinition {
    pub id: SetId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub tiers: Vec<SetTier>,
}

/// Bonus for wearing several pieces of the same material.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialBonus {
    pub material: String,
    #[cfg_attr(feature = "serde", serde(default = "default_min_pieces"))]
    pub min_pieces: u32,
    pub bonus: StatBonus,
}

#[cfg(feature = "serde")]
fn default_min_pieces() -> u32 {
    MaterialBonus::DEFAULT_MIN_PIECES
}

impl MaterialBonus {
    pub const DEFAULT_MIN_PIECES: u32 = 4;

    pub fn new(material: impl Into<String>, bonus: StatBonus) -> Self {
        Self {
            material: material.into(),
            min_pieces: Self::DEFAULT_MIN_PIECES,
            bonus,
        }
    }
}

/// Immutable lookup of set and material bonuses, built once and shared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SetBonusTable {
    sets: HashMap<SetId, SetBonusDefinition>,
    materials: HashMap<String, MaterialBonus>,
}

impl SetBonusTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from loaded definitions.
    pub fn from_parts(
        sets: impl IntoIterator<Item = SetBonusDefinition>,
        materials: impl IntoIterator<Item = MaterialBonus>,
    ) -> Self {
        let mut table = Self::new();
        for set in sets {
            table = table.with_set(set);
        }
        for material in materials {
            table = table.with_material(material);
        }
        table
    }

    #[must_use]
    pub fn with_set(mut self, mut set: SetBonusDefinition) -> Self {
        set.tiers.sort_by_key(|tier| tier.pieces);
        self.sets.insert(set.id.clone(), set);
        self
    }

    #[must_use]
    pub fn with_material(mut self, material: MaterialBonus) -> Self {
        self.materials.insert(material.material.clone(), material);
        self
    }

    pub fn set(&self, id: &SetId) -> Option<&SetBonusDefinition> {
        self.sets.get(id)
    }

    /// Bonus of the highest tier reached by `pieces` equipped items of a set.
    pub fn tier_bonus(&self, id: &SetId, pieces: u32) -> Option<&StatBonus> {
        self.sets
            .get(id)?
            .tiers
            .iter()
            .rev()
            .find(|tier| tier.pieces <= pieces)
            .map(|tier| &tier.bonus)
    }

    /// Bonus for `pieces` equipped items of one material, if the threshold is met.
    pub fn material_bonus(&self, material: &str, pieces: u32) -> Option<&StatBonus> {
        self.materials
            .get(material)
            .filter(|m| pieces >= m.min_pieces)
            .map(|m| &m.bonus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatKind;

    fn warden_set() -> SetBonusDefinition {
        SetBonusDefinition {
            id: SetId::from("warden"),
            name: "Warden's Vigil".into(),
            tiers: vec![
                SetTier {
                    pieces: 4,
                    bonus: StatBonus::single(StatKind::Defense, 40),
                },
                SetTier {
                    pieces: 2,
                    bonus: StatBonus::single(StatKind::Defense, 10),
                },
            ],
        }
    }

    #[test]
    fn highest_reached_tier_wins() {
        let table = SetBonusTable::new().with_set(warden_set());
        let id = SetId::from("warden");

        assert_eq!(table.tier_bonus(&id, 1), None);
        assert_eq!(table.tier_bonus(&id, 3).map(|b| b.defense), Some(10));
        assert_eq!(table.tier_bonus(&id, 5).map(|b| b.defense), Some(40));
    }

    #[test]
    fn material_requires_threshold() {
        let table = SetBonusTable::new()
            .with_material(MaterialBonus::new("Iron", StatBonus::single(StatKind::MaxHp, 25)));

        assert!(table.material_bonus("Iron", 3).is_none());
        assert_eq!(table.material_bonus("Iron", 4).map(|b| b.max_hp), Some(25));
        assert!(table.material_bonus("Mithril", 6).is_none());
    }
}
