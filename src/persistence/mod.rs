//! File-backed storage with soft failure
//!
//! Nothing here may block gameplay: reads and writes never surface errors to
//! the caller. Failures are logged and the game falls back to in-memory
//! defaults.

use std::fs;
use std::path::{Path, PathBuf};

/// Default save file under the platform data directory, falling back to the
/// working directory when the platform has none
pub fn default_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bonewalk")
        .join("highscore.json")
}

/// Read the whole file. A missing file is the normal first-run case; every
/// other failure is logged. Both return None.
pub fn read(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(contents) => Some(contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            log::warn!("failed to read {}: {}", path.display(), e);
            None
        }
    }
}

/// Write the file, creating parent directories first. Failures are logged
/// and swallowed.
pub fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            log::warn!("failed to create save directory {}: {}", parent.display(), e);
            return;
        }
    }
    if let Err(e) = fs::write(path, contents) {
        log::warn!("failed to write {}: {}", path.display(), e);
    }
}
