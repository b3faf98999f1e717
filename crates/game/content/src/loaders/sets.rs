//! Set and material bonus loader.

use std::path::Path;

use descent_core::SetBonusTable;
use descent_core::stats::{MaterialBonus, SetBonusDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_ron};

/// Bonus table structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SetBonusCatalog {
    pub sets: Vec<SetBonusDefinition>,
    pub materials: Vec<MaterialBonus>,
}

/// Loader for set and material bonuses from RON files.
pub struct SetBonusLoader;

impl SetBonusLoader {
    pub fn load(path: &Path) -> LoadResult<SetBonusTable> {
        let catalog: SetBonusCatalog = read_ron(path, "set bonus catalog")?;
        Ok(SetBonusTable::from_parts(catalog.sets, catalog.materials))
    }
}
