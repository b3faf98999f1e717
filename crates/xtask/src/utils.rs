//! Utility functions for xtask commands

use std::path::PathBuf;

use anyhow::{Result, anyhow};

/// Environment variable overriding the content directory.
pub const DATA_DIR_ENV: &str = "DESCENT_DATA_DIR";

/// Resolves the content directory: explicit flag, then environment, then the
/// data bundled with the content crate.
pub fn content_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    let dir = explicit
        .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../game/content/data"));

    if !dir.is_dir() {
        return Err(anyhow!(
            "Content directory does not exist: {:?}\n\
             Pass --data-dir or set {DATA_DIR_ENV}.",
            dir
        ));
    }
    Ok(dir)
}

/// Formats a fraction in `[0, 1]` as a percentage.
pub fn percent(value: f64) -> String {
    format!("{:6.2}%", value * 100.0)
}
