//! Unique-effect spec loader.

use std::path::Path;

use descent_core::unique::{UniqueEffectRegistry, UniqueEffectSpec};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_ron};

/// Unique-effect catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniqueEffectCatalog {
    pub uniques: Vec<UniqueEffectSpec>,
}

/// Loader for unique-effect specs from RON files.
pub struct UniqueEffectLoader;

impl UniqueEffectLoader {
    /// Loads the specs and builds the registry with every binding applied.
    pub fn load(path: &Path) -> LoadResult<UniqueEffectRegistry> {
        let catalog: UniqueEffectCatalog = read_ron(path, "unique effect catalog")?;
        for spec in &catalog.uniques {
            if spec.triggers.is_empty() {
                tracing::warn!(effect = %spec.id, "unique effect listens to no trigger");
            }
        }
        Ok(UniqueEffectRegistry::from_specs(catalog.uniques))
    }
}
