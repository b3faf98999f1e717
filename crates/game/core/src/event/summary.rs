use std::fmt;

use crate::state::{HeroId, ItemId};

/// One observable state change, for presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EffectSummary {
    Damaged {
        hero: HeroId,
        amount: u32,
        hp: i32,
        died: bool,
    },
    Healed {
        hero: HeroId,
        amount: u32,
        hp: i32,
    },
    Revived {
        hero: HeroId,
        hp: i32,
    },
    Experience {
        hero: HeroId,
        amount: u64,
    },
    LevelUp {
        hero: HeroId,
        level: u32,
    },
    Gold {
        delta: i64,
        total: u64,
    },
    Loot {
        id: ItemId,
        name: String,
    },
    StatusApplied {
        hero: HeroId,
        effect: String,
    },
    StatusExpired {
        hero: HeroId,
        effect: String,
    },
    Cleansed {
        hero: HeroId,
        removed: usize,
    },
    /// Damage dealt outward (abilities, bombs); enemies are not modeled here.
    DamageDealt {
        source: HeroId,
        amount: u32,
    },
    Note(String),
}

impl fmt::Display for EffectSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Damaged { hero, amount, hp, died } => {
                write!(f, "{hero} takes {amount} damage ({hp} HP)")?;
                if *died {
                    f.write_str(" and falls")?;
                }
                Ok(())
            }
            Self::Healed { hero, amount, hp } => write!(f, "{hero} heals {amount} ({hp} HP)"),
            Self::Revived { hero, hp } => write!(f, "{hero} is revived with {hp} HP"),
            Self::Experience { hero, amount } => write!(f, "{hero} gains {amount} XP"),
            Self::LevelUp { hero, level } => write!(f, "{hero} reaches level {level}"),
            Self::Gold { delta, total } if *delta >= 0 => write!(f, "+{delta} gold ({total})"),
            Self::Gold { delta, total } => write!(f, "{delta} gold ({total})"),
            Self::Loot { name, .. } => write!(f, "found {name}"),
            Self::StatusApplied { hero, effect } => write!(f, "{hero} gains {effect}"),
            Self::StatusExpired { hero, effect } => write!(f, "{effect} wears off {hero}"),
            Self::Cleansed { hero, removed } => write!(f, "{hero} is cleansed of {removed} effect(s)"),
            Self::DamageDealt { source, amount } => write!(f, "{source} deals {amount} damage"),
            Self::Note(text) => f.write_str(text),
        }
    }
}
