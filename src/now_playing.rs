//! Now-playing probe and per-session caching.
//!
//! Track identity comes from an external helper binary (`nowplaying-cli`
//! on macOS) queried once per field. The probe is the trust boundary: a
//! missing title or artist is a hard error for that fetch, a missing
//! album quietly becomes "Unknown Album".
//!
//! [`Session`] replaces what used to be process-global mutable caches:
//! the last probed track and the loaded vibe palette live on an explicit
//! session object owned by the caller, with an explicit `invalidate()`.

use crate::track::{TrackInfo, UNKNOWN_ALBUM};
use crate::vibes::{Palette, VibePalette};
use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::process::Command;

/// Helper binary queried for the current track.
const NOW_PLAYING_BIN: &str = "nowplaying-cli";

/// Currently playing track as reported by the probe.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub title: String,
    pub album: String,
    pub artist: String,
}

impl NowPlaying {
    /// Cache key; tracks are identified by exact (title, artist).
    fn key(&self) -> String {
        format!("{}|||{}", self.title, self.artist)
    }

    /// Converts the probe result into the rating payload.
    pub fn to_track_info(&self, genre: Option<String>, vibe: Option<String>) -> TrackInfo {
        TrackInfo {
            title: self.title.clone(),
            artist: self.artist.clone(),
            album: self.album.clone(),
            genre,
            vibe,
        }
    }
}

/// Runs `nowplaying-cli get <field>` and returns trimmed stdout.
fn probe_field(field: &str) -> Result<String> {
    let output = Command::new(NOW_PLAYING_BIN)
        .args(["get", field])
        .output()
        .with_context(|| format!("failed to run {NOW_PLAYING_BIN}; is it installed?"))?;

    if !output.status.success() {
        bail!(
            "{NOW_PLAYING_BIN} get {field} exited with {}",
            output.status
        );
    }

    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    debug!("probe {field} -> {value:?}");
    // The helper prints the literal string "null" when a field is unset.
    if value == "null" {
        return Ok(String::new());
    }
    Ok(value)
}

/// Fetches the currently playing track from the probe.
///
/// # Errors
///
/// Fails when the helper is missing, exits non-zero, or reports an empty
/// title or artist. An empty album is not an error and defaults to
/// [`UNKNOWN_ALBUM`].
pub fn current_track() -> Result<NowPlaying> {
    let title = probe_field("title")?;
    let album = probe_field("album")?;
    let artist = probe_field("artist")?;

    if title.is_empty() || artist.is_empty() {
        bail!("no track is currently playing (probe returned empty title or artist)");
    }

    Ok(NowPlaying {
        title,
        album: if album.is_empty() {
            UNKNOWN_ALBUM.to_string()
        } else {
            album
        },
        artist,
    })
}

/// Explicit session state for one run of the shell.
///
/// Caches the last probed track (so repeated polls of an unchanged track
/// skip logging and downstream work) and the vibe palette. Both caches
/// are dropped by [`Session::invalidate`].
#[derive(Default)]
pub struct Session {
    last_track: Option<(String, NowPlaying)>,
    palette: Option<Palette>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probes the current track, reusing the cache when it has not
    /// changed. Returns the track and whether it differs from the cached
    /// one.
    pub fn refresh_track(&mut self) -> Result<(NowPlaying, bool)> {
        let track = current_track()?;
        let key = track.key();

        if let Some((cached_key, cached)) = &self.last_track {
            if *cached_key == key {
                return Ok((cached.clone(), false));
            }
        }

        info!("track changed: {} - {}", track.title, track.artist);
        self.last_track = Some((key, track.clone()));
        Ok((track, true))
    }

    /// Loads the vibe palette once per session.
    pub fn palette(&mut self, store: &VibePalette) -> Result<&Palette> {
        if self.palette.is_none() {
            self.palette = Some(store.load()?);
        }
        Ok(self.palette.as_ref().expect("just populated"))
    }

    /// Drops all cached state. Call after writes that make it stale.
    pub fn invalidate(&mut self) {
        self.last_track = None;
        self.palette = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(title: &str, artist: &str) -> NowPlaying {
        NowPlaying {
            title: title.to_string(),
            album: "Album".to_string(),
            artist: artist.to_string(),
        }
    }

    #[test]
    fn session_cache_hits_on_same_key() {
        let mut session = Session::new();
        let t = track("Song", "Artist");
        session.last_track = Some((t.key(), t.clone()));

        // Simulate the cache path without a live probe.
        let (cached_key, cached) = session.last_track.as_ref().unwrap();
        assert_eq!(*cached_key, t.key());
        assert_eq!(*cached, t);
    }

    #[test]
    fn invalidate_clears_all_cached_state() {
        let mut session = Session::new();
        let t = track("Song", "Artist");
        session.last_track = Some((t.key(), t));
        session.palette = Some(Palette::new());

        session.invalidate();
        assert!(session.last_track.is_none());
        assert!(session.palette.is_none());
    }

    #[test]
    fn cache_key_distinguishes_same_title_different_artist() {
        assert_ne!(track("Song", "A").key(), track("Song", "B").key());
    }
}
