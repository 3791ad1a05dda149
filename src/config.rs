//! Configuration and data directory management.
//!
//! Tunerank keeps its files in the platform-standard data directory:
//! - Linux: `~/.local/share/tunerank/`
//! - macOS: `~/Library/Application Support/tunerank/`
//! - Windows: `%APPDATA%\tunerank\`
//!
//! Inside it: `ratings.json` (the rating log), `vibes.json` (the vibe
//! palette) and `covers/` (album art, written by the cover service).

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Filename of the rating log.
pub const RATINGS_FILE: &str = "ratings.json";
/// Filename of the vibe palette.
pub const VIBES_FILE: &str = "vibes.json";

/// Returns the tunerank data directory, creating it if necessary.
///
/// # Errors
///
/// Fails if the platform data directory cannot be determined or the
/// subdirectory cannot be created.
pub fn data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir()
        .ok_or_else(|| anyhow::anyhow!("could not determine system data directory"))?;

    let dir = base.join("tunerank");
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create data directory at {}", dir.display()))?;

    Ok(dir)
}

/// Path to the rating log in the standard data directory.
pub fn ratings_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(RATINGS_FILE))
}

/// Path to the vibe palette in the standard data directory.
pub fn vibes_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(VIBES_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_path_ends_with_filename() {
        let path = ratings_path().expect("should resolve ratings path");
        assert!(path.is_absolute());
        assert!(path.to_string_lossy().ends_with(RATINGS_FILE));
    }

    #[test]
    fn data_dir_is_created() {
        let dir = data_dir().expect("should resolve data dir");
        assert!(dir.exists());
        assert!(dir.is_dir());
        assert_eq!(dir.file_name().unwrap(), "tunerank");
    }

    #[test]
    fn paths_are_consistent_across_calls() {
        assert_eq!(vibes_path().unwrap(), vibes_path().unwrap());
    }
}
