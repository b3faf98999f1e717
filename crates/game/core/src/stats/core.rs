//! Core Stats - the attribute record shared by heroes, items and effects.
//!
//! `Stats` is the Single Source of Truth stored on a hero (base layer, including
//! current HP). `StatBonus` is the additive record carried by items, set tiers,
//! class level-ups and timed effects. Current HP never appears in a bonus.

use strum::{Display, EnumIter, EnumString};

/// Named numeric attributes.
///
/// `MaxHp` is the only resource attribute that bonuses may raise; current HP
/// is tracked on [`Stats::hp`] and is not addressable through this enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatKind {
    Attack,
    Defense,
    Speed,
    Luck,
    Wisdom,
    Charisma,
    MaxHp,
    MagicPower,
}

/// A character's stat record.
///
/// Used both for the stored base layer and for the computed effective
/// snapshot returned by [`crate::stats::StatAggregator`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Stats {
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub luck: i32,
    pub wisdom: i32,
    pub charisma: i32,
    pub max_hp: i32,
    /// Current hit points. Carried through aggregation unchanged.
    pub hp: i32,
    /// Zero for classes without spellcasting.
    pub magic_power: i32,
}

impl Stats {
    /// Returns the value of a single attribute.
    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
            StatKind::Luck => self.luck,
            StatKind::Wisdom => self.wisdom,
            StatKind::Charisma => self.charisma,
            StatKind::MaxHp => self.max_hp,
            StatKind::MagicPower => self.magic_power,
        }
    }

    fn slot_mut(&mut self, kind: StatKind) -> &mut i32 {
        match kind {
            StatKind::Attack => &mut self.attack,
            StatKind::Defense => &mut self.defense,
            StatKind::Speed => &mut self.speed,
            StatKind::Luck => &mut self.luck,
            StatKind::Wisdom => &mut self.wisdom,
            StatKind::Charisma => &mut self.charisma,
            StatKind::MaxHp => &mut self.max_hp,
            StatKind::MagicPower => &mut self.magic_power,
        }
    }

    /// Adds `value` to one attribute.
    pub fn add(&mut self, kind: StatKind, value: i32) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(value);
    }

    /// Adds every attribute of a bonus record. Current HP is untouched.
    pub fn apply_bonus(&mut self, bonus: &StatBonus) {
        self.attack = self.attack.saturating_add(bonus.attack);
        self.defense = self.defense.saturating_add(bonus.defense);
        self.speed = self.speed.saturating_add(bonus.speed);
        self.luck = self.luck.saturating_add(bonus.luck);
        self.wisdom = self.wisdom.saturating_add(bonus.wisdom);
        self.charisma = self.charisma.saturating_add(bonus.charisma);
        self.max_hp = self.max_hp.saturating_add(bonus.max_hp);
        self.magic_power = self.magic_power.saturating_add(bonus.magic_power);
    }

    /// Creates base stats at full health from a bonus-shaped template.
    pub fn from_template(template: &StatBonus) -> Self {
        let mut stats = Self::default();
        stats.apply_bonus(template);
        stats.hp = stats.max_hp;
        stats
    }

    /// Clamps current HP into `[0, max_hp]`.
    pub fn clamp_hp(&mut self) {
        self.hp = self.hp.clamp(0, self.max_hp.max(0));
    }
}

/// Additive stat record granted by items, set tiers, level-ups and classes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBonus {
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub luck: i32,
    pub wisdom: i32,
    pub charisma: i32,
    pub max_hp: i32,
    pub magic_power: i32,
}

impl StatBonus {
    /// Creates an empty bonus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bonus touching a single attribute.
    pub fn single(kind: StatKind, value: i32) -> Self {
        Self::new().with(kind, value)
    }

    /// Adds to one attribute (builder pattern).
    #[must_use]
    pub fn with(mut self, kind: StatKind, value: i32) -> Self {
        self.add(kind, value);
        self
    }

    /// Returns the value of a single attribute.
    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
            StatKind::Luck => self.luck,
            StatKind::Wisdom => self.wisdom,
            StatKind::Charisma => self.charisma,
            StatKind::MaxHp => self.max_hp,
            StatKind::MagicPower => self.magic_power,
        }
    }

    /// Adds `value` to one attribute.
    pub fn add(&mut self, kind: StatKind, value: i32) {
        let slot = match kind {
            StatKind::Attack => &mut self.attack,
            StatKind::Defense => &mut self.defense,
            StatKind::Speed => &mut self.speed,
            StatKind::Luck => &mut self.luck,
            StatKind::Wisdom => &mut self.wisdom,
            StatKind::Charisma => &mut self.charisma,
            StatKind::MaxHp => &mut self.max_hp,
            StatKind::MagicPower => &mut self.magic_power,
        };
        *slot = slot.saturating_add(value);
    }

    /// Sums another bonus into this one.
    pub fn merge(&mut self, other: &StatBonus) {
        self.attack = self.attack.saturating_add(other.attack);
        self.defense = self.defense.saturating_add(other.defense);
        self.speed = self.speed.saturating_add(other.speed);
        self.luck = self.luck.saturating_add(other.luck);
        self.wisdom = self.wisdom.saturating_add(other.wisdom);
        self.charisma = self.charisma.saturating_add(other.charisma);
        self.max_hp = self.max_hp.saturating_add(other.max_hp);
        self.magic_power = self.magic_power.saturating_add(other.magic_power);
    }

    /// Returns true if every attribute is zero.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn bonus_never_touches_current_hp() {
        let mut stats = Stats::from_template(&StatBonus::new().with(StatKind::MaxHp, 50));
        stats.hp = 20;

        stats.apply_bonus(&StatBonus::new().with(StatKind::MaxHp, 30).with(StatKind::Luck, 4));

        assert_eq!(stats.max_hp, 80);
        assert_eq!(stats.hp, 20);
        assert_eq!(stats.luck, 4);
    }

    #[test]
    fn stat_kind_parses_snake_case() {
        assert_eq!(StatKind::from_str("max_hp").unwrap(), StatKind::MaxHp);
        assert_eq!(StatKind::MagicPower.to_string(), "magic_power");
    }
}
