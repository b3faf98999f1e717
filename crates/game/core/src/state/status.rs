//! Timed effects attached to heroes.
//!
//! Effects store `expires_at_depth` so depth transitions can skip several
//! counters at once. Effects are removed when `expires_at_depth <= depth`
//! unless permanent.

use crate::stats::StatKind;

/// Classification of a timed effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimedEffectKind {
    Buff,
    Debuff,
    Status,
}

/// A buff, debuff or status on a hero.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedEffect {
    pub id: String,
    pub name: String,
    pub kind: TimedEffectKind,
    pub stat: Option<StatKind>,
    pub modifier: i32,
    /// HP restored on each depth transition while active.
    pub regen_per_depth: u32,
    pub duration: u32,
    pub applied_at_depth: u32,
    pub expires_at_depth: u32,
    pub permanent: bool,
}

impl TimedEffect {
    /// Sentinel expiry used for permanent effects.
    pub const PERMANENT_EXPIRY: u32 = u32::MAX;

    /// Returns true if the effect still applies at `depth`.
    pub fn is_active_at(&self, depth: u32) -> bool {
        self.permanent || self.expires_at_depth > depth
    }

    /// Stat modifier carried by the effect, if any.
    pub fn stat_modifier(&self) -> Option<(StatKind, i32)> {
        self.stat.map(|stat| (stat, self.modifier))
    }
}

/// Template describing a timed effect to apply.
///
/// Converted into a [`TimedEffect`] by [`crate::timed::TimedEffectLedger::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedEffectSpec {
    pub id: String,
    pub name: String,
    pub kind: TimedEffectKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stat: Option<StatKind>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifier: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub regen_per_depth: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub permanent: bool,
}

impl TimedEffectSpec {
    /// Spec for a stat buff/debuff lasting `duration` depths.
    pub fn stat(
        id: impl Into<String>,
        kind: TimedEffectKind,
        stat: StatKind,
        modifier: i32,
        duration: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind,
            stat: Some(stat),
            modifier,
            regen_per_depth: 0,
            duration,
            permanent: false,
        }
    }

    /// Spec for a regeneration status.
    pub fn regeneration(id: impl Into<String>, per_depth: u32, duration: u32) -> Self {
        Self {
            id: id.into(),
            name: String::from("Regeneration"),
            kind: TimedEffectKind::Status,
            stat: None,
            modifier: 0,
            regen_per_depth: per_depth,
            duration,
            permanent: false,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn permanent(mut self) -> Self {
        self.permanent = true;
        self
    }
}
