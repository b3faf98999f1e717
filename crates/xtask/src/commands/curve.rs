//! Print block fractions for the defense curve families
//!
//! Helps tune `[defense]` in config.toml: shows how much of a hit each
//! defense value blocks and which defense reaches a target block fraction.

use anyhow::{Result, ensure};
use clap::Parser;
use console::style;
use serde::Serialize;
use strum::IntoEnumIterator;

use descent_core::{CurveKind, DefenseCurve, DefenseCurveConfig};

use crate::utils::percent;

/// Print defense curve tables
#[derive(Parser)]
pub struct Curve {
    /// Curve family to print (all families if omitted)
    #[arg(short, long, value_enum)]
    kind: Option<KindArg>,

    /// Defense values to sample
    #[arg(short, long, value_delimiter = ',', default_values_t = vec![0.0, 10.0, 40.0, 100.0, 1_000.0, 5_000.0, 13_504.0, 20_000.0, 33_760.0])]
    defense: Vec<f64>,

    /// Block fraction to invert into a defense value (e.g. 0.5)
    #[arg(short, long)]
    target: Option<f64>,

    /// Theoretical best-in-slot defense
    #[arg(long, default_value_t = DefenseCurveConfig::DEFAULT_MAX_DEFENSE)]
    max_defense: f64,

    /// Fraction of max defense that reaches half the block range
    #[arg(long, default_value_t = DefenseCurveConfig::DEFAULT_MIDPOINT_RATIO)]
    ratio: f64,

    /// Block fraction at max defense
    #[arg(long, default_value_t = DefenseCurveConfig::DEFAULT_MAX_BLOCK)]
    max_block: f64,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum KindArg {
    Linear,
    Hyperbolic,
    Logarithmic,
    Exponential,
}

impl From<KindArg> for CurveKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Linear => CurveKind::Linear,
            KindArg::Hyperbolic => CurveKind::DiminishingHyperbolic,
            KindArg::Logarithmic => CurveKind::Logarithmic,
            KindArg::Exponential => CurveKind::ExponentialDecay,
        }
    }
}

#[derive(Serialize)]
struct CurveTable {
    kind: String,
    rows: Vec<(f64, f64)>,
    target: Option<(f64, f64)>,
}

impl Curve {
    pub fn execute(self) -> Result<()> {
        ensure!(self.max_defense > 0.0, "--max-defense must be positive");
        ensure!(
            self.ratio > 0.0 && self.ratio < 0.5,
            "--ratio must lie in (0, 0.5) for the log family to stay defined"
        );
        if let Some(target) = self.target {
            ensure!((0.0..=self.max_block).contains(&target), "--target must lie in [0, --max-block]");
        }

        let base = DefenseCurveConfig {
            max_defense: self.max_defense,
            midpoint_defense_ratio: self.ratio,
            max_block_percent: self.max_block,
            ..DefenseCurveConfig::default()
        };
        let kinds: Vec<CurveKind> = match self.kind {
            Some(kind) => vec![kind.into()],
            None => CurveKind::iter().collect(),
        };

        let tables: Vec<CurveTable> = kinds
            .into_iter()
            .map(|kind| {
                let config = base.clone().with_curve(kind);
                let curve = DefenseCurve::new(&config);
                CurveTable {
                    kind: kind.to_string(),
                    rows: self.defense.iter().map(|&d| (d, curve.block_fraction(d))).collect(),
                    target: self.target.map(|t| (t, curve.defense_for_block_fraction(t))),
                }
            })
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&tables)?);
            return Ok(());
        }

        for table in &tables {
            println!("{}", style(&table.kind).bold().cyan());
            println!("  {:>10}  {:>8}  {:>14}", "defense", "block", "100-dmg hit");
            for &(defense, block) in &table.rows {
                println!(
                    "  {:>10.0}  {}  {:>14.2}",
                    defense,
                    percent(block),
                    100.0 * (1.0 - block)
                );
            }
            if let Some((target, defense)) = table.target {
                println!(
                    "  {} {} blocked at defense {}",
                    style("→").green(),
                    percent(target).trim(),
                    style(format!("{defense:.1}")).bold()
                );
            }
            println!();
        }
        Ok(())
    }
}
