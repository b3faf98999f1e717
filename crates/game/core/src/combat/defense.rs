//! Defense curve: maps a defense stat to the fraction of incoming damage blocked.
//!
//! # Formula
//!
//! ```text
//! mid        = max_defense × midpoint_defense_ratio
//! n          = family(defense)            (n(mid) = 0.5 for every family)
//! shaped     = n ^ (1 / curve_modifier)
//! block      = clamp(min_block + (max_block − min_block) × shaped, min_block, max_block)
//! ```
//!
//! Families:
//!
//! | family                 | n(d)                                   |
//! |------------------------|----------------------------------------|
//! | linear                 | d / (2·mid)                            |
//! | diminishing hyperbolic | d / (d + mid)                          |
//! | logarithmic            | ½ · ln(1 + d/k) / ln(1 + mid/k)        |
//! | exponential decay      | 1 − exp(−d · ln 2 / mid)               |
//!
//! For the logarithmic family `k = mid² / (max_defense − 2·mid)` whenever
//! `max_defense > 2·mid`, which makes `n(max_defense) = 1` exactly; otherwise
//! `k = mid`.

use strum::{Display, EnumIter};

/// Shape of the normalized defense curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CurveKind {
    Linear,
    DiminishingHyperbolic,
    #[default]
    Logarithmic,
    ExponentialDecay,
}

/// Defense curve parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DefenseCurveConfig {
    pub curve: CurveKind,
    pub min_block_percent: f64,
    pub max_block_percent: f64,
    /// Theoretical best-in-slot defense.
    pub max_defense: f64,
    /// Fraction of `max_defense` at which half of the block range is reached.
    pub midpoint_defense_ratio: f64,
    /// Steepness exponent; the normalized value is raised to `1 / curve_modifier`.
    pub curve_modifier: f64,
}

impl DefenseCurveConfig {
    pub const DEFAULT_MIN_BLOCK: f64 = 0.0;
    pub const DEFAULT_MAX_BLOCK: f64 = 0.95;
    pub const DEFAULT_MAX_DEFENSE: f64 = 33_760.0;
    pub const DEFAULT_MIDPOINT_RATIO: f64 = 0.4;
    pub const DEFAULT_CURVE_MODIFIER: f64 = 1.0;

    /// Same parameters with a different curve family.
    #[must_use]
    pub fn with_curve(mut self, curve: CurveKind) -> Self {
        self.curve = curve;
        self
    }
}

impl Default for DefenseCurveConfig {
    fn default() -> Self {
        Self {
            curve: CurveKind::default(),
            min_block_percent: Self::DEFAULT_MIN_BLOCK,
            max_block_percent: Self::DEFAULT_MAX_BLOCK,
            max_defense: Self::DEFAULT_MAX_DEFENSE,
            midpoint_defense_ratio: Self::DEFAULT_MIDPOINT_RATIO,
            curve_modifier: Self::DEFAULT_CURVE_MODIFIER,
        }
    }
}

/// Evaluates a [`DefenseCurveConfig`].
#[derive(Clone, Copy, Debug)]
pub struct DefenseCurve<'a> {
    config: &'a DefenseCurveConfig,
}

impl<'a> DefenseCurve<'a> {
    pub fn new(config: &'a DefenseCurveConfig) -> Self {
        Self { config }
    }

    fn midpoint(&self) -> f64 {
        (self.config.max_defense * self.config.midpoint_defense_ratio).max(f64::MIN_POSITIVE)
    }

    fn log_scale(&self) -> f64 {
        let mid = self.midpoint();
        let headroom = self.config.max_defense - 2.0 * mid;
        if headroom > 0.0 { mid * mid / headroom } else { mid }
    }

    fn modifier(&self) -> f64 {
        if self.config.curve_modifier > 0.0 {
            self.config.curve_modifier
        } else {
            1.0
        }
    }

    /// Normalized curve value in `[0, 1]` before shaping.
    pub fn normalized(&self, defense: f64) -> f64 {
        if defense <= 0.0 {
            return 0.0;
        }
        let mid = self.midpoint();
        let n = match self.config.curve {
            CurveKind::Linear => defense / (2.0 * mid),
            CurveKind::DiminishingHyperbolic => defense / (defense + mid),
            CurveKind::Logarithmic => {
                let k = self.log_scale();
                0.5 * (defense / k).ln_1p() / (mid / k).ln_1p()
            }
            CurveKind::ExponentialDecay => -(-defense * core::f64::consts::LN_2 / mid).exp_m1(),
        };
        n.clamp(0.0, 1.0)
    }

    /// Fraction of damage blocked at `defense`, within `[min_block, max_block]`.
    pub fn block_fraction(&self, defense: f64) -> f64 {
        let min = self.config.min_block_percent;
        let max = self.config.max_block_percent;
        if defense <= 0.0 {
            return min;
        }
        let shaped = self.normalized(defense).powf(1.0 / self.modifier());
        (min + (max - min) * shaped).clamp(min, max)
    }

    /// Defense needed to reach `block` (closed-form inverse; balance tooling).
    ///
    /// Returns `0.0` at or below `min_block` and `f64::INFINITY` when the family
    /// never reaches the requested fraction.
    pub fn defense_for_block_fraction(&self, block: f64) -> f64 {
        let min = self.config.min_block_percent;
        let max = self.config.max_block_percent;
        if block <= min || max <= min {
            return 0.0;
        }
        let shaped = ((block - min) / (max - min)).min(1.0);
        let n = shaped.powf(self.modifier());
        let mid = self.midpoint();
        match self.config.curve {
            CurveKind::Linear => 2.0 * mid * n,
            CurveKind::DiminishingHyperbolic => {
                if n >= 1.0 {
                    f64::INFINITY
                } else {
                    mid * n / (1.0 - n)
                }
            }
            CurveKind::Logarithmic => {
                let k = self.log_scale();
                k * (2.0 * n * (mid / k).ln_1p()).exp_m1()
            }
            CurveKind::ExponentialDecay => {
                if n >= 1.0 {
                    f64::INFINITY
                } else {
                    -(-n).ln_1p() * mid / core::f64::consts::LN_2
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    fn config(curve: CurveKind) -> DefenseCurveConfig {
        DefenseCurveConfig::default().with_curve(curve)
    }

    #[test]
    fn zero_defense_blocks_minimum() {
        for curve in CurveKind::iter() {
            let mut cfg = config(curve);
            cfg.min_block_percent = 0.05;
            let curve_fn = DefenseCurve::new(&cfg);
            assert_eq!(curve_fn.block_fraction(0.0), 0.05);
            assert_eq!(curve_fn.block_fraction(-10.0), 0.05);
        }
    }

    #[test]
    fn every_family_hits_half_range_at_midpoint() {
        for curve in CurveKind::iter() {
            let cfg = config(curve);
            let mid = cfg.max_defense * cfg.midpoint_defense_ratio;
            let block = DefenseCurve::new(&cfg).block_fraction(mid);
            assert!((block - 0.475).abs() < 1e-9, "{curve}: {block}");
        }
    }

    #[test]
    fn logarithmic_reaches_max_at_max_defense() {
        let cfg = config(CurveKind::Logarithmic);
        let block = DefenseCurve::new(&cfg).block_fraction(cfg.max_defense);
        assert!((block - cfg.max_block_percent).abs() < 1e-9);
    }

    #[test]
    fn logarithmic_block_at_forty_defense() {
        let cfg = config(CurveKind::Logarithmic);
        // mid = 13504, k = 13504² / (33760 − 27008) = 27008
        let expected = 0.95 * 0.5 * (40.0_f64 / 27_008.0).ln_1p() / 0.5_f64.ln_1p();
        let block = DefenseCurve::new(&cfg).block_fraction(40.0);
        assert!((block - expected).abs() < 1e-12);
    }

    #[test]
    fn curve_modifier_steepens_early_gains() {
        let mut cfg = config(CurveKind::DiminishingHyperbolic);
        let flat = DefenseCurve::new(&cfg).block_fraction(1_000.0);
        cfg.curve_modifier = 2.0;
        let steep = DefenseCurve::new(&cfg).block_fraction(1_000.0);
        assert!(steep > flat);
    }

    #[test]
    fn linear_reaches_max_block_at_twice_the_midpoint() {
        let cfg = config(CurveKind::Linear);
        let curve_fn = DefenseCurve::new(&cfg);
        let saturation = 2.0 * cfg.max_defense * cfg.midpoint_defense_ratio;
        assert!((curve_fn.block_fraction(saturation) - cfg.max_block_percent).abs() < 1e-12);
        assert_eq!(curve_fn.block_fraction(cfg.max_defense), cfg.max_block_percent);
        assert!((curve_fn.defense_for_block_fraction(cfg.max_block_percent) - saturation).abs() < 1e-6);
    }

    fn any_curve() -> impl Strategy<Value = CurveKind> {
        prop_oneof![
            Just(CurveKind::Linear),
            Just(CurveKind::DiminishingHyperbolic),
            Just(CurveKind::Logarithmic),
            Just(CurveKind::ExponentialDecay),
        ]
    }

    proptest! {
        #[test]
        fn block_is_monotonic_and_bounded(
            curve in any_curve(),
            a in 0.0f64..40_000.0,
            b in 0.0f64..40_000.0,
            modifier in 0.5f64..3.0,
        ) {
            let mut cfg = config(curve);
            cfg.min_block_percent = 0.02;
            cfg.curve_modifier = modifier;
            let curve_fn = DefenseCurve::new(&cfg);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let block_lo = curve_fn.block_fraction(lo);
            let block_hi = curve_fn.block_fraction(hi);
            prop_assert!(block_lo <= block_hi);
            prop_assert!(block_lo >= cfg.min_block_percent);
            prop_assert!(block_hi <= cfg.max_block_percent);
        }

        #[test]
        fn inverse_round_trips(
            curve in any_curve(),
            share in 0.0001f64..0.9999,
            modifier in 0.5f64..3.0,
        ) {
            let mut cfg = config(curve);
            cfg.curve_modifier = modifier;
            let curve_fn = DefenseCurve::new(&cfg);
            // linear saturates at 2·mid; the others stay invertible up to max_defense
            let span = match curve {
                CurveKind::Linear => 2.0 * cfg.max_defense * cfg.midpoint_defense_ratio,
                _ => cfg.max_defense,
            };
            let defense = (share * span).max(1.0);
            let block = curve_fn.block_fraction(defense);
            let recovered = curve_fn.defense_for_block_fraction(block);
            prop_assert!((recovered - defense).abs() <= defense * 1e-6 + 1e-6,
                "{curve}: {defense} -> {block} -> {recovered}");
        }
    }
}
