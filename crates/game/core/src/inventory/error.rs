use crate::error::{ErrorSeverity, GameError};
use crate::state::{EquipSlot, HeroId, ItemId};

/// Errors from moving or using items.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("{0} is not in the party")]
    HeroNotFound(HeroId),

    #[error("{0} has fallen")]
    HeroDown(HeroId),

    #[error("{0} is not in this container")]
    ItemNotFound(ItemId),

    #[error("{item} does not fit the {slot} slot")]
    WrongSlot { item: ItemId, slot: EquipSlot },

    #[error("{hero} has nothing in the {slot} slot")]
    EmptySlot { hero: HeroId, slot: EquipSlot },

    #[error("{0} is not a consumable")]
    NotConsumable(ItemId),

    #[error("{0} has no effects and no recipe to rebuild them from")]
    CorruptConsumable(ItemId),
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::HeroDown(_) => ErrorSeverity::Recoverable,
            Self::CorruptConsumable(_) => ErrorSeverity::Corruption,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::HeroNotFound(_) => "INVENTORY_HERO_NOT_FOUND",
            Self::HeroDown(_) => "INVENTORY_HERO_DOWN",
            Self::ItemNotFound(_) => "INVENTORY_ITEM_NOT_FOUND",
            Self::WrongSlot { .. } => "INVENTORY_WRONG_SLOT",
            Self::EmptySlot { .. } => "INVENTORY_EMPTY_SLOT",
            Self::NotConsumable(_) => "INVENTORY_NOT_CONSUMABLE",
            Self::CorruptConsumable(_) => "INVENTORY_CORRUPT_CONSUMABLE",
        }
    }
}
