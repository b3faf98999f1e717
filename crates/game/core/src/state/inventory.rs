use super::{ItemId, Loot};

/// An ordered item container (bank or dungeon inventory).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Inventory {
    entries: Vec<Loot>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. Callers are responsible for id uniqueness; see
    /// [`crate::inventory::grant_loot`] for the checked path.
    pub fn push(&mut self, loot: Loot) {
        self.entries.push(loot);
    }

    /// Removes and returns the entry with `id`.
    pub fn take(&mut self, id: ItemId) -> Option<Loot> {
        let index = self.entries.iter().position(|l| l.id() == id)?;
        Some(self.entries.remove(index))
    }

    pub fn get(&self, id: ItemId) -> Option<&Loot> {
        self.entries.iter().find(|l| l.id() == id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Loot> {
        self.entries.iter_mut().find(|l| l.id() == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Returns true if any entry carries exactly this display name.
    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|l| l.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Loot> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.entries.iter().map(Loot::id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Moves every entry out, leaving the container empty.
    pub fn drain(&mut self) -> impl Iterator<Item = Loot> + '_ {
        self.entries.drain(..)
    }
}
