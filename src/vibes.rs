//! Vibe palette persistence.
//!
//! Vibes are user-chosen mood tags. The palette maps each name to a CSS
//! color string for display; aggregation only ever looks at the names.
//! Stored as a flat JSON object in `vibes.json`.

use anyhow::{Context, Result};
use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name → CSS color. BTreeMap keeps the serialized file stable.
pub type Palette = BTreeMap<String, String>;

/// Handle on the vibe palette file.
pub struct VibePalette {
    path: PathBuf,
}

impl VibePalette {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the palette; a missing file is an empty palette.
    pub fn load(&self) -> Result<Palette> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("vibes file {} absent, starting empty", self.path.display());
                return Ok(Palette::new());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to read vibes file {}", self.path.display())
                })
            }
        };

        serde_json::from_str(&raw)
            .with_context(|| format!("vibes file {} is corrupt", self.path.display()))
    }

    /// Adds or recolors a vibe and persists the palette (temp file plus
    /// rename, same discipline as the rating store).
    pub fn save_vibe(&mut self, name: &str, color: &str) -> Result<()> {
        let mut palette = self.load()?;
        palette.insert(name.to_string(), color.to_string());

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let json = serde_json::to_string_pretty(&palette).expect("palette always serializes");

        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to stage vibes file {}", self.path.display()))?;
        tmp.write_all(json.as_bytes())
            .context("failed to write vibes data")?;
        tmp.persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("failed to persist vibes file {}", self.path.display()))?;

        debug!("saved vibe {name:?} -> {color:?}");
        Ok(())
    }
}
