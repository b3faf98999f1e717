/// Game configuration constants and tunable parameters.
///
/// A single value of this type is injected into every resolution entry point,
/// so balance changes never require touching resolution logic.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Success-chance and requirement tuning for event choices.
    pub events: EventBalance,
    /// Defense-to-block curve parameters.
    pub defense: crate::combat::DefenseCurveConfig,
    /// Leveling and boss cadence.
    pub progression: ProgressionConfig,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of heroes in a party roster.
    pub const MAX_PARTY_SIZE: usize = 4;

    pub fn new() -> Self {
        Self::default()
    }
}

/// Balance knobs for choice requirements and probabilistic choices.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EventBalance {
    /// Base success chance used when a probabilistic choice declares none.
    pub default_success_chance: f64,
    /// Lower clamp for a computed success probability.
    pub min_success: f64,
    /// Upper clamp for a computed success probability.
    pub max_success: f64,
    /// Probability added per point of the choice's modifier stat.
    pub stat_bonus_per_point: f64,
    /// Fractional growth of stat requirement thresholds per depth below the first.
    pub stat_requirement_scaling_per_floor: f64,
}

impl EventBalance {
    pub const DEFAULT_SUCCESS_CHANCE: f64 = 0.5;
    pub const DEFAULT_MIN_SUCCESS: f64 = 0.05;
    pub const DEFAULT_MAX_SUCCESS: f64 = 0.95;
    pub const DEFAULT_STAT_BONUS_PER_POINT: f64 = 0.002;
    pub const DEFAULT_STAT_REQUIREMENT_SCALING: f64 = 0.05;
}

impl Default for EventBalance {
    fn default() -> Self {
        Self {
            default_success_chance: Self::DEFAULT_SUCCESS_CHANCE,
            min_success: Self::DEFAULT_MIN_SUCCESS,
            max_success: Self::DEFAULT_MAX_SUCCESS,
            stat_bonus_per_point: Self::DEFAULT_STAT_BONUS_PER_POINT,
            stat_requirement_scaling_per_floor: Self::DEFAULT_STAT_REQUIREMENT_SCALING,
        }
    }
}

/// Leveling thresholds and boss cadence.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressionConfig {
    /// XP needed for the next level is `level * xp_per_level`.
    pub xp_per_level: u64,
    /// Heroes stop gaining levels here.
    pub max_level: u32,
    /// Every N-th depth hosts a floor boss.
    pub floor_boss_interval: u32,
    /// Every N-th floor ends in a zone boss.
    pub zone_boss_interval: u32,
}

impl ProgressionConfig {
    pub const DEFAULT_XP_PER_LEVEL: u64 = 100;
    pub const DEFAULT_MAX_LEVEL: u32 = 100;
    pub const DEFAULT_FLOOR_BOSS_INTERVAL: u32 = 10;
    pub const DEFAULT_ZONE_BOSS_INTERVAL: u32 = 5;

    /// XP required to advance from `level` to `level + 1`.
    pub fn xp_threshold(&self, level: u32) -> u64 {
        u64::from(level.max(1)) * self.xp_per_level
    }

    /// Returns true if the event at `depth` should be a floor boss.
    pub fn is_boss_depth(&self, depth: u32) -> bool {
        self.floor_boss_interval > 0 && depth > 0 && depth % self.floor_boss_interval == 0
    }

    /// Returns true if `floor` closes a zone with a zone boss.
    pub fn is_zone_boss_floor(&self, floor: u32) -> bool {
        self.zone_boss_interval > 0 && floor > 0 && floor % self.zone_boss_interval == 0
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            xp_per_level: Self::DEFAULT_XP_PER_LEVEL,
            max_level: Self::DEFAULT_MAX_LEVEL,
            floor_boss_interval: Self::DEFAULT_FLOOR_BOSS_INTERVAL,
            zone_boss_interval: Self::DEFAULT_ZONE_BOSS_INTERVAL,
        }
    }
}
