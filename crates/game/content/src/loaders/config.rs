//! Game configuration loader.

use std::path::Path;

use anyhow::Context;
use descent_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing sections and keys fall back to their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parses TOML text into a [`GameConfig`].
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content).context("Failed to parse config TOML")?;
        let events = &config.events;
        if events.min_success > events.max_success {
            anyhow::bail!(
                "events.min_success ({}) exceeds events.max_success ({})",
                events.min_success,
                events.max_success
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use descent_core::CurveKind;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            [events]
            stat_bonus_per_point = 0.004

            [defense]
            curve = "linear"
            "#,
        )
        .unwrap();

        assert_eq!(config.events.stat_bonus_per_point, 0.004);
        assert_eq!(config.events.max_success, 0.95);
        assert_eq!(config.defense.curve, CurveKind::Linear);
        assert_eq!(config.progression.xp_per_level, 100);
    }

    #[test]
    fn inverted_success_bounds_are_rejected() {
        let err = ConfigLoader::parse("[events]\nmin_success = 0.9\nmax_success = 0.1\n").unwrap_err();
        assert!(err.to_string().contains("min_success"));
    }
}
