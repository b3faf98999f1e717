//! Ability definition loader.

use std::path::Path;

use descent_core::ability::{AbilityDefinition, AbilityRegistry};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_ron};

/// Ability catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalog {
    pub abilities: Vec<AbilityDefinition>,
}

/// Loader for ability definitions from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    pub fn load(path: &Path) -> LoadResult<AbilityRegistry> {
        let catalog: AbilityCatalog = read_ron(path, "ability catalog")?;
        let count = catalog.abilities.len();
        let registry = AbilityRegistry::from_definitions(catalog.abilities);
        if registry.len() != count {
            anyhow::bail!("ability catalog {} contains duplicate ids", path.display());
        }
        Ok(registry)
    }
}
