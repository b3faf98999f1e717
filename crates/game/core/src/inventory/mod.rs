//! Moving item instances between containers.
//!
//! Containers are the bank, each hero's slots and the dungeon inventory. Every
//! operation here moves an instance out of one container and into another, so
//! an id never exists in two places after a successful call.

mod consumable;
mod error;

use std::collections::HashSet;

use strum::IntoEnumIterator;

pub use consumable::{ConsumableSource, ConsumableUse, use_consumable};
pub use error::InventoryError;

use crate::state::{EquipSlot, HeroId, Inventory, ItemId, Loot, Party};

fn equipped_ids(party: &Party) -> impl Iterator<Item = ItemId> + '_ {
    party.heroes().iter().flat_map(|hero| hero.equipment.item_ids())
}

/// Adds freshly generated loot to `dungeon`, re-keying it if its id is taken.
///
/// Returns the id the loot ends up with.
pub fn grant_loot(mut loot: Loot, dungeon: &mut Inventory, party: &Party, bank: Option<&Inventory>) -> ItemId {
    let id = loot.id();
    let taken = dungeon.contains(id)
        || bank.is_some_and(|b| b.contains(id))
        || equipped_ids(party).any(|e| e == id);

    if taken {
        let highest = dungeon
            .ids()
            .chain(bank.into_iter().flat_map(|b| b.ids()))
            .chain(equipped_ids(party))
            .max()
            .unwrap_or_default();
        let fresh = ItemId(highest.0.saturating_add(1));
        tracing::warn!(%id, %fresh, "loot id already in use; re-keying");
        loot.rekey(fresh);
    }

    let id = loot.id();
    dungeon.push(loot);
    id
}

/// Moves `item` from `source` into `slot` on a hero.
///
/// Whatever the slot held goes back to `source`. Returns its id.
pub fn equip(
    party: &mut Party,
    hero: HeroId,
    slot: EquipSlot,
    item: ItemId,
    source: &mut Inventory,
) -> Result<Option<ItemId>, InventoryError> {
    let target = party.hero_mut(hero).ok_or(InventoryError::HeroNotFound(hero))?;
    let fits = match source.get(item).ok_or(InventoryError::ItemNotFound(item))? {
        Loot::Item(gear) => slot.accepts(gear.slot),
        Loot::Consumable(_) => slot.is_consumable(),
    };
    if !fits {
        return Err(InventoryError::WrongSlot { item, slot });
    }

    let previous = match source.take(item) {
        Some(Loot::Item(gear)) => target
            .equipment
            .put_item(slot, gear)
            .map(|old| old.map(Loot::Item))
            .map_err(Loot::Item),
        Some(Loot::Consumable(consumable)) => target
            .equipment
            .put_consumable(slot, consumable)
            .map(|old| old.map(Loot::Consumable))
            .map_err(Loot::Consumable),
        None => return Err(InventoryError::ItemNotFound(item)),
    };

    match previous {
        Ok(old) => {
            let old_id = old.as_ref().map(Loot::id);
            if let Some(old) = old {
                source.push(old);
            }
            Ok(old_id)
        }
        Err(rejected) => {
            source.push(rejected);
            Err(InventoryError::WrongSlot { item, slot })
        }
    }
}

/// Moves whatever `slot` holds into `destination`.
pub fn unequip(
    party: &mut Party,
    hero: HeroId,
    slot: EquipSlot,
    destination: &mut Inventory,
) -> Result<ItemId, InventoryError> {
    let target = party.hero_mut(hero).ok_or(InventoryError::HeroNotFound(hero))?;
    let loot = if slot.is_consumable() {
        target.equipment.take_consumable(slot).map(Loot::Consumable)
    } else {
        target.equipment.take_item(slot).map(Loot::Item)
    };
    let loot = loot.ok_or(InventoryError::EmptySlot { hero, slot })?;
    let id = loot.id();
    destination.push(loot);
    Ok(id)
}

/// Reconciliation pass removing duplicate ids across every container.
///
/// Equipped copies win (roster order, then slot order), then the dungeon
/// inventory, then the bank. Returns the ids of removed duplicates.
pub fn audit_duplicates(bank: &mut Inventory, party: &mut Party, dungeon: &mut Inventory) -> Vec<ItemId> {
    let mut seen = HashSet::new();
    let mut removed = Vec::new();

    for hero in party.heroes_mut() {
        let slots: Vec<(EquipSlot, ItemId)> = EquipSlot::iter()
            .filter_map(|slot| hero.equipment.id_in(slot).map(|id| (slot, id)))
            .collect();
        for (slot, id) in slots {
            if !seen.insert(id) {
                if slot.is_consumable() {
                    hero.equipment.take_consumable(slot);
                } else {
                    hero.equipment.take_item(slot);
                }
                removed.push(id);
            }
        }
    }

    for container in [dungeon, bank] {
        let entries: Vec<Loot> = container.drain().collect();
        for loot in entries {
            if seen.insert(loot.id()) {
                container.push(loot);
            } else {
                removed.push(loot.id());
            }
        }
    }

    if !removed.is_empty() {
        tracing::warn!(count = removed.len(), "removed duplicate item instances");
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Consumable, Hero, Item, ItemSlot, Rarity};
    use crate::stats::Stats;

    fn party() -> Party {
        Party::from_heroes([
            Hero::new(HeroId(1), "Aldric", "Warrior", Stats::default()),
            Hero::new(HeroId(2), "Mira", "Cleric", Stats::default()),
        ])
        .unwrap()
    }

    fn sword(id: u64) -> Loot {
        Loot::Item(Item::new(ItemId(id), "Iron Sword", ItemSlot::Weapon, Rarity::Common))
    }

    fn all_ids(bank: &Inventory, party: &Party, dungeon: &Inventory) -> Vec<ItemId> {
        let mut ids: Vec<ItemId> = bank.ids().chain(dungeon.ids()).chain(equipped_ids(party)).collect();
        ids.sort();
        ids
    }

    #[test]
    fn equip_swaps_previous_item_back() {
        let mut party = party();
        let mut bank = Inventory::new();
        bank.push(sword(1));
        bank.push(sword(2));

        assert_eq!(equip(&mut party, HeroId(1), EquipSlot::Weapon, ItemId(1), &mut bank), Ok(None));
        assert_eq!(
            equip(&mut party, HeroId(1), EquipSlot::Weapon, ItemId(2), &mut bank),
            Ok(Some(ItemId(1)))
        );
        assert!(bank.contains(ItemId(1)));
        assert!(!bank.contains(ItemId(2)));
    }

    #[test]
    fn wrong_slot_leaves_item_in_place() {
        let mut party = party();
        let mut bank = Inventory::new();
        bank.push(sword(1));

        let err = equip(&mut party, HeroId(1), EquipSlot::Helmet, ItemId(1), &mut bank).unwrap_err();
        assert_eq!(err, InventoryError::WrongSlot { item: ItemId(1), slot: EquipSlot::Helmet });
        assert!(bank.contains(ItemId(1)));
        assert!(party.hero(HeroId(1)).unwrap().equipment.item(EquipSlot::Helmet).is_none());
    }

    #[test]
    fn consumables_go_to_consumable_slots() {
        let mut party = party();
        let mut dungeon = Inventory::new();
        dungeon.push(Loot::Consumable(Consumable::new(ItemId(5), "Minor Tonic", Vec::new())));

        assert!(equip(&mut party, HeroId(2), EquipSlot::Weapon, ItemId(5), &mut dungeon).is_err());
        equip(&mut party, HeroId(2), EquipSlot::Consumable1, ItemId(5), &mut dungeon).unwrap();
        assert_eq!(unequip(&mut party, HeroId(2), EquipSlot::Consumable1, &mut dungeon), Ok(ItemId(5)));
        assert_eq!(
            unequip(&mut party, HeroId(2), EquipSlot::Consumable1, &mut dungeon),
            Err(InventoryError::EmptySlot { hero: HeroId(2), slot: EquipSlot::Consumable1 })
        );
    }

    #[test]
    fn moves_never_duplicate_ids() {
        let mut party = party();
        let mut bank = Inventory::new();
        let mut dungeon = Inventory::new();
        bank.push(sword(1));
        grant_loot(sword(1), &mut dungeon, &party, Some(&bank));
        grant_loot(sword(1), &mut dungeon, &party, Some(&bank));

        equip(&mut party, HeroId(1), EquipSlot::Weapon, ItemId(1), &mut bank).unwrap();
        equip(&mut party, HeroId(2), EquipSlot::Weapon, ItemId(2), &mut dungeon).unwrap();
        unequip(&mut party, HeroId(1), EquipSlot::Weapon, &mut dungeon).unwrap();
        grant_loot(sword(3), &mut dungeon, &party, Some(&bank));

        let ids = all_ids(&bank, &party, &dungeon);
        let mut unique = ids.clone();
        unique.dedup();
        assert_eq!(ids, unique);
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn audit_keeps_equipped_copy() {
        let mut party = party();
        let mut bank = Inventory::new();
        let mut dungeon = Inventory::new();
        let mut staging = Inventory::new();
        staging.push(sword(7));
        equip(&mut party, HeroId(2), EquipSlot::Weapon, ItemId(7), &mut staging).unwrap();
        bank.push(sword(7));
        dungeon.push(sword(7));
        dungeon.push(sword(8));

        let removed = audit_duplicates(&mut bank, &mut party, &mut dungeon);

        assert_eq!(removed, vec![ItemId(7), ItemId(7)]);
        assert!(party.hero(HeroId(2)).unwrap().equipment.item(EquipSlot::Weapon).is_some());
        assert_eq!(dungeon.ids().collect::<Vec<_>>(), vec![ItemId(8)]);
        assert!(bank.is_empty());
    }
}
