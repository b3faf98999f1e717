//! Effective stat computation.
//!
//! ```text
//! effective = base
//!           + Σ equipped gear stat bonuses
//!           + set tier bonuses (by set id)
//!           + material bonuses (by leading name word)
//!           + Σ timed effect modifiers   (active at the aggregator's depth)
//! ```
//!
//! Current HP is carried through unchanged. Callers that mutate HP clamp it to
//! the effective maximum afterwards.

use std::collections::BTreeMap;

use super::{SetBonusTable, StatBonus, Stats};
use crate::state::{Equipment, Hero, SetId, TimedEffect};

/// Computes effective stat snapshots from the layered sources.
///
/// Holds only a reference to the injected set table, so it is cheap to create
/// and safe to call speculatively (tooltips, previews).
#[derive(Clone, Copy, Debug)]
pub struct StatAggregator<'a> {
    sets: &'a SetBonusTable,
    depth: Option<u32>,
}

impl<'a> StatAggregator<'a> {
    /// Aggregator that counts every timed effect a hero carries.
    pub fn new(sets: &'a SetBonusTable) -> Self {
        Self { sets, depth: None }
    }

    /// Restricts timed effects to those still active at `depth`.
    #[must_use]
    pub fn at_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn depth(&self) -> Option<u32> {
        self.depth
    }

    /// Effective stats of a hero.
    pub fn effective_stats(&self, hero: &Hero) -> Stats {
        let mut stats = hero.base.clone();
        stats.apply_bonus(&self.equipment_bonus(&hero.equipment));
        stats.apply_bonus(&self.set_bonus(&hero.equipment));
        stats.apply_bonus(&self.effect_bonus(&hero.effects));
        stats.max_hp = stats.max_hp.max(1);
        stats
    }

    /// Sum of every equipped gear item's stat record.
    pub fn equipment_bonus(&self, equipment: &Equipment) -> StatBonus {
        let mut total = StatBonus::new();
        for (_, item) in equipment.gear() {
            total.merge(&item.stats);
        }
        total
    }

    /// Set and material bonuses earned by the equipped gear.
    pub fn set_bonus(&self, equipment: &Equipment) -> StatBonus {
        let mut by_set: BTreeMap<&SetId, u32> = BTreeMap::new();
        let mut by_material: BTreeMap<&str, u32> = BTreeMap::new();

        for (_, item) in equipment.gear() {
            if let Some(set_id) = &item.set_id {
                *by_set.entry(set_id).or_default() += 1;
            }
            if let Some(material) = item.material() {
                *by_material.entry(material).or_default() += 1;
            }
        }

        let mut total = StatBonus::new();
        for (set_id, pieces) in by_set {
            if let Some(bonus) = self.sets.tier_bonus(set_id, pieces) {
                total.merge(bonus);
            }
        }
        for (material, pieces) in by_material {
            if let Some(bonus) = self.sets.material_bonus(material, pieces) {
                total.merge(bonus);
            }
        }
        total
    }

    /// Sum of the stat modifiers carried by active timed effects.
    pub fn effect_bonus(&self, effects: &[TimedEffect]) -> StatBonus {
        let mut total = StatBonus::new();
        let active = effects
            .iter()
            .filter(|effect| self.depth.is_none_or(|depth| effect.is_active_at(depth)));
        for (stat, modifier) in active.filter_map(TimedEffect::stat_modifier) {
            total.add(stat, modifier);
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EquipSlot, HeroId, Item, ItemId, ItemSlot, Rarity, TimedEffectKind};
    use crate::stats::{MaterialBonus, SetBonusDefinition, SetTier, StatKind};

    fn hero() -> Hero {
        let base = Stats::from_template(
            &StatBonus::new()
                .with(StatKind::Attack, 10)
                .with(StatKind::Defense, 5)
                .with(StatKind::MaxHp, 100),
        );
        Hero::new(HeroId(1), "Aldric", "Warrior", base)
    }

    fn iron(id: u64, name: &str, slot: ItemSlot) -> Item {
        Item::new(ItemId(id), name, slot, Rarity::Common)
            .with_stats(StatBonus::single(StatKind::Defense, 3))
    }

    #[test]
    fn layers_combine_additively() {
        let table = SetBonusTable::new();
        let mut hero = hero();
        hero.base.hp = 40;
        hero.equipment
            .put_item(
                EquipSlot::Weapon,
                Item::new(ItemId(1), "Oak Club", ItemSlot::Weapon, Rarity::Common)
                    .with_stats(StatBonus::new().with(StatKind::Attack, 7).with(StatKind::MaxHp, 20)),
            )
            .unwrap();
        hero.effects.push(TimedEffect {
            id: "rage".into(),
            name: "Rage".into(),
            kind: TimedEffectKind::Buff,
            stat: Some(StatKind::Attack),
            modifier: 5,
            regen_per_depth: 0,
            duration: 3,
            applied_at_depth: 1,
            expires_at_depth: 4,
            permanent: false,
        });

        let stats = StatAggregator::new(&table).effective_stats(&hero);

        assert_eq!(stats.attack, 22);
        assert_eq!(stats.max_hp, 120);
        assert_eq!(stats.hp, 40, "current HP is never summed");
    }

    #[test]
    fn expired_effects_stop_counting_at_their_expiry_depth() {
        let table = SetBonusTable::new();
        let mut hero = hero();
        hero.effects.push(TimedEffect {
            id: "surge".into(),
            name: "Surge".into(),
            kind: TimedEffectKind::Buff,
            stat: Some(StatKind::Attack),
            modifier: 50,
            regen_per_depth: 0,
            duration: 0,
            applied_at_depth: 5,
            expires_at_depth: 5,
            permanent: false,
        });
        hero.effects.push(TimedEffect {
            id: "ward".into(),
            name: "Ward".into(),
            kind: TimedEffectKind::Buff,
            stat: Some(StatKind::Defense),
            modifier: 4,
            regen_per_depth: 0,
            duration: 2,
            applied_at_depth: 5,
            expires_at_depth: 7,
            permanent: false,
        });

        let at_five = StatAggregator::new(&table).at_depth(5).effective_stats(&hero);
        assert_eq!(at_five.attack, 10);
        assert_eq!(at_five.defense, 9);

        let at_seven = StatAggregator::new(&table).at_depth(7).effective_stats(&hero);
        assert_eq!(at_seven.defense, 5);
    }

    #[test]
    fn material_bonus_needs_four_pieces() {
        let table = SetBonusTable::new()
            .with_material(MaterialBonus::new("Iron", StatBonus::single(StatKind::Defense, 20)));
        let mut hero = hero();
        hero.equipment.put_item(EquipSlot::Helmet, iron(1, "Iron Helm", ItemSlot::Helmet)).unwrap();
        hero.equipment.put_item(EquipSlot::Armor, iron(2, "Iron Mail", ItemSlot::Armor)).unwrap();
        hero.equipment.put_item(EquipSlot::Boots, iron(3, "Iron Boots", ItemSlot::Boots)).unwrap();

        let aggregator = StatAggregator::new(&table);
        assert_eq!(aggregator.effective_stats(&hero).defense, 5 + 9);

        hero.equipment.put_item(EquipSlot::Gloves, iron(4, "Iron Gauntlets", ItemSlot::Gloves)).unwrap();
        assert_eq!(aggregator.effective_stats(&hero).defense, 5 + 12 + 20);
    }

    #[test]
    fn named_set_tier_applies() {
        let table = SetBonusTable::new().with_set(SetBonusDefinition {
            id: SetId::from("tidecaller"),
            name: "Tidecaller".into(),
            tiers: vec![SetTier {
                pieces: 2,
                bonus: StatBonus::single(StatKind::Wisdom, 15),
            }],
        });
        let mut hero = hero();
        for (id, slot, kind) in [
            (1, EquipSlot::Helmet, ItemSlot::Helmet),
            (2, EquipSlot::Armor, ItemSlot::Armor),
        ] {
            let item = Item::new(ItemId(id), format!("Tidecaller Piece {id}"), kind, Rarity::Epic)
                .with_set(SetId::from("tidecaller"));
            hero.equipment.put_item(slot, item).unwrap();
        }

        assert_eq!(StatAggregator::new(&table).effective_stats(&hero).wisdom, 15);
    }
}
