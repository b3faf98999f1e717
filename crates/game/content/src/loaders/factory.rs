//! Content factory for building registries from data files.

use std::path::{Path, PathBuf};

use descent_core::ability::AbilityRegistry;
use descent_core::unique::UniqueEffectRegistry;
use descent_core::{ClassRegistry, DungeonEvent, GameConfig, Registries, SetBonusTable};

use crate::loaders::{
    AbilityLoader, ClassLoader, ConfigLoader, EventLoader, LoadResult, SetBonusLoader,
    UniqueEffectLoader,
};

/// Everything a session needs from the data directory.
#[derive(Clone, Debug)]
pub struct Content {
    pub config: GameConfig,
    pub registries: Registries,
    pub events: Vec<DungeonEvent>,
}

impl Content {
    pub fn event(&self, id: &str) -> Option<&DungeonEvent> {
        self.events.iter().find(|e| e.id == id)
    }
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml     (optional, defaults otherwise)
/// ├── events.ron
/// ├── abilities.ron
/// ├── classes.ron
/// ├── sets.ron        (optional)
/// └── uniques.ron     (optional)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, or defaults when absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load dungeon events from `events.ron`.
    pub fn load_events(&self) -> LoadResult<Vec<DungeonEvent>> {
        EventLoader::load(&self.data_dir.join("events.ron"))
    }

    /// Load ability definitions from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<AbilityRegistry> {
        AbilityLoader::load(&self.data_dir.join("abilities.ron"))
    }

    /// Load hero classes from `classes.ron`.
    pub fn load_classes(&self) -> LoadResult<ClassRegistry> {
        ClassLoader::load(&self.data_dir.join("classes.ron"))
    }

    /// Load set and material bonuses from `sets.ron`, or an empty table.
    pub fn load_sets(&self) -> LoadResult<SetBonusTable> {
        let path = self.data_dir.join("sets.ron");
        if path.exists() {
            SetBonusLoader::load(&path)
        } else {
            Ok(SetBonusTable::default())
        }
    }

    /// Load unique effects from `uniques.ron`, or an empty registry.
    pub fn load_uniques(&self) -> LoadResult<UniqueEffectRegistry> {
        let path = self.data_dir.join("uniques.ron");
        if path.exists() {
            UniqueEffectLoader::load(&path)
        } else {
            Ok(UniqueEffectRegistry::default())
        }
    }

    /// Load every registry into one bundle.
    pub fn load_registries(&self) -> LoadResult<Registries> {
        Ok(Registries::new()
            .with_sets(self.load_sets()?)
            .with_classes(self.load_classes()?)
            .with_abilities(self.load_abilities()?)
            .with_uniques(self.load_uniques()?))
    }

    /// Load the whole data directory.
    pub fn load(&self) -> LoadResult<Content> {
        Ok(Content {
            config: self.load_config()?,
            registries: self.load_registries()?,
            events: self.load_events()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_optional_files_fall_back_to_empty_tables() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
        assert_eq!(factory.load_sets().unwrap(), SetBonusTable::default());
        assert!(factory.load_uniques().unwrap().is_empty());
        assert!(factory.load_events().is_err());
    }
}
