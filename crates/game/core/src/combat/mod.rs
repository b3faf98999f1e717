//! Combat math.
//!
//! This module provides pure functions for mitigation and HP bookkeeping.
//!
//! # Core Functions
//!
//! - `DefenseCurve::block_fraction`: Defense → blocked fraction
//! - `DefenseCurve::defense_for_block_fraction`: Inverse, for balance tooling
//! - `mitigated_damage`: Damage after the curve (or raw for true damage)
//! - `apply_damage` / `apply_heal` / `apply_revive`: Clamped HP changes

pub mod damage;
pub mod defense;

pub use damage::{HpChange, apply_damage, apply_heal, apply_revive, mitigated_damage};
pub use defense::{CurveKind, DefenseCurve, DefenseCurveConfig};
