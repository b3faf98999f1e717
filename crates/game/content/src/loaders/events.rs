//! Dungeon event catalog loader.

use std::collections::HashSet;
use std::path::Path;

use descent_core::DungeonEvent;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_ron};

/// Event catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCatalog {
    pub events: Vec<DungeonEvent>,
}

/// Loader for dungeon events from RON files.
pub struct EventLoader;

impl EventLoader {
    /// Load every event from a RON catalog.
    ///
    /// Rejects duplicate event ids and events without choices.
    pub fn load(path: &Path) -> LoadResult<Vec<DungeonEvent>> {
        let catalog: EventCatalog = read_ron(path, "event catalog")?;
        Self::validate(&catalog.events)?;
        tracing::debug!(count = catalog.events.len(), path = %path.display(), "loaded events");
        Ok(catalog.events)
    }

    fn validate(events: &[DungeonEvent]) -> LoadResult<()> {
        let mut seen = HashSet::new();
        for event in events {
            if !seen.insert(event.id.as_str()) {
                anyhow::bail!("duplicate event id '{}'", event.id);
            }
            if event.choices.is_empty() {
                anyhow::bail!("event '{}' has no choices", event.id);
            }
        }
        Ok(())
    }
}
