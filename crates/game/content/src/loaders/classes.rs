//! Hero class loader.

use std::path::Path;

use descent_core::{ClassDefinition, ClassRegistry};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_ron};

/// Class catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCatalog {
    pub classes: Vec<ClassDefinition>,
}

/// Loader for hero classes from RON files.
pub struct ClassLoader;

impl ClassLoader {
    pub fn load(path: &Path) -> LoadResult<ClassRegistry> {
        let catalog: ClassCatalog = read_ron(path, "class catalog")?;
        Ok(ClassRegistry::from_definitions(catalog.classes))
    }
}
