//! Equipment slots for heroes.
//!
//! A hero has a fixed set of named slots. Slot enumeration order
//! ([`EquipSlot::iter`]) is the stable order used by stat aggregation and by
//! unique-effect dispatch.

use strum::{Display, EnumIter, IntoEnumIterator};

use super::{Consumable, Item, ItemId, ItemSlot};

/// Named equipment and consumable slots, in enumeration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EquipSlot {
    Weapon,
    Helmet,
    Armor,
    Gloves,
    Boots,
    Shield,
    Accessory1,
    Accessory2,
    Consumable1,
    Consumable2,
}

impl EquipSlot {
    /// Returns true for the slots holding consumables.
    pub const fn is_consumable(self) -> bool {
        matches!(self, Self::Consumable1 | Self::Consumable2)
    }

    /// Returns true if an item of type `slot` may be placed here.
    pub const fn accepts(self, slot: ItemSlot) -> bool {
        matches!(
            (self, slot),
            (Self::Weapon, ItemSlot::Weapon)
                | (Self::Helmet, ItemSlot::Helmet)
                | (Self::Armor, ItemSlot::Armor)
                | (Self::Gloves, ItemSlot::Gloves)
                | (Self::Boots, ItemSlot::Boots)
                | (Self::Shield, ItemSlot::Shield)
                | (Self::Accessory1 | Self::Accessory2, ItemSlot::Accessory)
        )
    }

    /// Gear slots in enumeration order.
    pub fn gear() -> impl Iterator<Item = EquipSlot> {
        Self::iter().filter(|slot| !slot.is_consumable())
    }
}

/// Equipment state for a hero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub helmet: Option<Item>,
    pub armor: Option<Item>,
    pub gloves: Option<Item>,
    pub boots: Option<Item>,
    pub shield: Option<Item>,
    pub accessory1: Option<Item>,
    pub accessory2: Option<Item>,
    pub consumable1: Option<Consumable>,
    pub consumable2: Option<Consumable>,
}

impl Equipment {
    /// Creates empty equipment.
    pub fn empty() -> Self {
        Self::default()
    }

    fn gear_slot(&self, slot: EquipSlot) -> Option<&Option<Item>> {
        match slot {
            EquipSlot::Weapon => Some(&self.weapon),
            EquipSlot::Helmet => Some(&self.helmet),
            EquipSlot::Armor => Some(&self.armor),
            EquipSlot::Gloves => Some(&self.gloves),
            EquipSlot::Boots => Some(&self.boots),
            EquipSlot::Shield => Some(&self.shield),
            EquipSlot::Accessory1 => Some(&self.accessory1),
            EquipSlot::Accessory2 => Some(&self.accessory2),
            EquipSlot::Consumable1 | EquipSlot::Consumable2 => None,
        }
    }

    fn gear_slot_mut(&mut self, slot: EquipSlot) -> Option<&mut Option<Item>> {
        match slot {
            EquipSlot::Weapon => Some(&mut self.weapon),
            EquipSlot::Helmet => Some(&mut self.helmet),
            EquipSlot::Armor => Some(&mut self.armor),
            EquipSlot::Gloves => Some(&mut self.gloves),
            EquipSlot::Boots => Some(&mut self.boots),
            EquipSlot::Shield => Some(&mut self.shield),
            EquipSlot::Accessory1 => Some(&mut self.accessory1),
            EquipSlot::Accessory2 => Some(&mut self.accessory2),
            EquipSlot::Consumable1 | EquipSlot::Consumable2 => None,
        }
    }

    fn consumable_slot_mut(&mut self, slot: EquipSlot) -> Option<&mut Option<Consumable>> {
        match slot {
            EquipSlot::Consumable1 => Some(&mut self.consumable1),
            EquipSlot::Consumable2 => Some(&mut self.consumable2),
            _ => None,
        }
    }

    /// Returns the gear item in `slot`, if any.
    pub fn item(&self, slot: EquipSlot) -> Option<&Item> {
        self.gear_slot(slot).and_then(Option::as_ref)
    }

    /// Returns the consumable in `slot`, if any.
    pub fn consumable(&self, slot: EquipSlot) -> Option<&Consumable> {
        match slot {
            EquipSlot::Consumable1 => self.consumable1.as_ref(),
            EquipSlot::Consumable2 => self.consumable2.as_ref(),
            _ => None,
        }
    }

    /// Mutable access to the consumable in `slot`, if any.
    pub fn consumable_mut(&mut self, slot: EquipSlot) -> Option<&mut Consumable> {
        self.consumable_slot_mut(slot).and_then(Option::as_mut)
    }

    /// Places `item` in a gear slot, returning whatever was there.
    ///
    /// Returns `Err(item)` untouched if `slot` does not accept the item type.
    pub fn put_item(&mut self, slot: EquipSlot, item: Item) -> Result<Option<Item>, Item> {
        if !slot.accepts(item.slot) {
            return Err(item);
        }
        match self.gear_slot_mut(slot) {
            Some(entry) => Ok(entry.replace(item)),
            None => Err(item),
        }
    }

    /// Places `consumable` in a consumable slot, returning whatever was there.
    pub fn put_consumable(
        &mut self,
        slot: EquipSlot,
        consumable: Consumable,
    ) -> Result<Option<Consumable>, Consumable> {
        match self.consumable_slot_mut(slot) {
            Some(entry) => Ok(entry.replace(consumable)),
            None => Err(consumable),
        }
    }

    /// Empties a gear slot.
    pub fn take_item(&mut self, slot: EquipSlot) -> Option<Item> {
        self.gear_slot_mut(slot).and_then(Option::take)
    }

    /// Empties a consumable slot.
    pub fn take_consumable(&mut self, slot: EquipSlot) -> Option<Consumable> {
        self.consumable_slot_mut(slot).and_then(Option::take)
    }

    /// Equipped gear in stable slot order.
    pub fn gear(&self) -> impl Iterator<Item = (EquipSlot, &Item)> + '_ {
        EquipSlot::gear().filter_map(move |slot| self.item(slot).map(|item| (slot, item)))
    }

    /// Ids of everything equipped, gear and consumables.
    pub fn item_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        let gear = self.gear().map(|(_, item)| item.id);
        let consumables = [&self.consumable1, &self.consumable2]
            .into_iter()
            .filter_map(|slot| slot.as_ref().map(|c| c.id));
        gear.chain(consumables)
    }

    /// Id of whatever occupies `slot`.
    pub fn id_in(&self, slot: EquipSlot) -> Option<ItemId> {
        self.item(slot)
            .map(|item| item.id)
            .or_else(|| self.consumable(slot).map(|c| c.id))
    }

    /// Locates the slot holding the given item id.
    pub fn slot_of(&self, id: ItemId) -> Option<EquipSlot> {
        EquipSlot::iter().find(|slot| self.id_in(*slot) == Some(id))
    }
}
