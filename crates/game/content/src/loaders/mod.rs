//! Content loaders for reading game data from files.
//!
//! Every RON catalog wraps its list in a named field (`(events: [...])`) so
//! files stay self-describing.

pub mod abilities;
pub mod classes;
pub mod config;
pub mod events;
pub mod factory;
pub mod sets;
pub mod uniques;

pub use abilities::AbilityLoader;
pub use classes::ClassLoader;
pub use config::ConfigLoader;
pub use events::EventLoader;
pub use factory::{Content, ContentFactory};
pub use sets::SetBonusLoader;
pub use uniques::UniqueEffectLoader;

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}

/// Reads and parses a RON file.
pub(crate) fn read_ron<T: DeserializeOwned>(path: &Path, what: &str) -> LoadResult<T> {
    let content = read_file(path)?;
    ron::from_str(&content).with_context(|| format!("Failed to parse {what} RON at {}", path.display()))
}
