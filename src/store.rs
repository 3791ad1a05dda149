//! Durable rating log.
//!
//! The store is a single JSON file `{ "tracks": [...] }`, loaded fully on
//! every read and rewritten fully on every write. That is fine for a
//! single-user log that grows by one event per listen; what matters is
//! that a crash mid-write cannot corrupt it, so every save goes through a
//! temp file in the same directory followed by an atomic rename.
//!
//! All mutation goes through [`RatingStore`] methods taking `&mut self`,
//! which makes the single-writer assumption a compile-time invariant
//! instead of an accident of the desktop event loop.

use crate::error::RatingError;
use crate::track::{RatingEvent, TrackInfo, TrackRecord, RATING_MAX, RATING_MIN};
use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Minimum time between two ratings of the same (title, artist) pair.
pub const COOLDOWN_MINUTES: i64 = 5;

/// On-disk shape of the rating log.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StoreData {
    pub tracks: Vec<TrackRecord>,
}

/// Handle on the rating log file.
pub struct RatingStore {
    path: PathBuf,
}

impl RatingStore {
    /// Opens a store backed by the given file. The file does not need to
    /// exist yet; a missing file reads as an empty store.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the full rating log.
    ///
    /// - Missing file: empty store.
    /// - Legacy format (top-level array, written by pre-1.0 builds): the
    ///   file is reported and treated as empty. It held no `tracks`
    ///   payload we can recover, so there is nothing to migrate, but the
    ///   outcome must be visible rather than a silent branch.
    /// - Present but malformed JSON: [`RatingError::CorruptStore`]. Never
    ///   swallowed, since treating a corrupt file as empty would overwrite
    ///   the user's data on the next save.
    pub fn load(&self) -> Result<StoreData, RatingError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("ratings file {} absent, starting empty", self.path.display());
                return Ok(StoreData::default());
            }
            Err(source) => {
                return Err(RatingError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let value: serde_json::Value =
            serde_json::from_str(&raw).map_err(|source| RatingError::CorruptStore {
                path: self.path.clone(),
                source,
            })?;

        if value.is_array() {
            warn!(
                "ratings file {} uses the legacy array format; ignoring its contents",
                self.path.display()
            );
            return Ok(StoreData::default());
        }

        serde_json::from_value(value).map_err(|source| RatingError::CorruptStore {
            path: self.path.clone(),
            source,
        })
    }

    /// Persists the full rating log transactionally: serialize into a
    /// temp file next to the target, then rename over it.
    pub fn save(&self, data: &StoreData) -> Result<(), RatingError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let io_err = |source| RatingError::Io {
            path: self.path.clone(),
            source,
        };

        let json = serde_json::to_string_pretty(data).expect("store data always serializes");

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(json.as_bytes()).map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;

        debug!(
            "persisted {} track record(s) to {}",
            data.tracks.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Records a rating for a track, creating the record on first rating.
    ///
    /// Validates the rating range and the per-track cooldown before any
    /// mutation, then appends the event, updates the genre if one was
    /// supplied (last write wins) and persists the whole log.
    pub fn save_rating(&mut self, track: &TrackInfo, rating: i64) -> Result<(), RatingError> {
        if rating < i64::from(RATING_MIN) || rating > i64::from(RATING_MAX) {
            return Err(RatingError::InvalidRating(rating));
        }
        let rating = rating as u8;

        let mut data = self.load()?;
        let now = Utc::now();

        if let Some(last) = last_rating_within_cooldown(&data, &track.title, &track.artist, now) {
            let elapsed = now - parse_timestamp(&last.timestamp).unwrap_or(now);
            let remaining = Duration::minutes(COOLDOWN_MINUTES) - elapsed;
            return Err(RatingError::Cooldown {
                title: track.title.clone(),
                remaining_secs: remaining.num_seconds().max(0),
            });
        }

        let event = RatingEvent {
            rating,
            vibes: track.vibe.iter().cloned().collect(),
            timestamp: now.to_rfc3339(),
        };

        match data
            .tracks
            .iter_mut()
            .find(|t| t.title == track.title && t.artist == track.artist)
        {
            Some(record) => {
                record.ratings.push(event);
                if let Some(genre) = &track.genre {
                    record.genre = Some(genre.clone());
                }
            }
            None => data.tracks.push(TrackRecord {
                title: track.title.clone(),
                artist: track.artist.clone(),
                album: track.album.clone(),
                genre: track.genre.clone(),
                ratings: vec![event],
                flag: None,
                favorite: false,
                cover_path: None,
            }),
        }

        self.save(&data)?;
        info!(
            "saved rating {}/10 for \"{}\" by {}",
            rating, track.title, track.artist
        );
        Ok(())
    }

    /// The most recent rating event for a track if it is still inside the
    /// cooldown window, so the shell can warn before attempting a write.
    pub fn recent_rating(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Option<RatingEvent>, RatingError> {
        let data = self.load()?;
        Ok(last_rating_within_cooldown(&data, title, artist, Utc::now()).cloned())
    }
}

/// Last rating event of the exact (title, artist) record, if it happened
/// within the cooldown window ending at `now`.
fn last_rating_within_cooldown<'a>(
    data: &'a StoreData,
    title: &str,
    artist: &str,
    now: DateTime<Utc>,
) -> Option<&'a RatingEvent> {
    let record = data
        .tracks
        .iter()
        .find(|t| t.title == title && t.artist == artist)?;

    let last = record.ratings.last()?;
    let rated_at = parse_timestamp(&last.timestamp)?;

    if now - rated_at < Duration::minutes(COOLDOWN_MINUTES) {
        Some(last)
    } else {
        None
    }
}

/// Unparseable timestamps are treated as long expired rather than
/// blocking the user from rating forever.
fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(ts) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            warn!("ignoring unparseable rating timestamp {ts:?}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, RatingStore) {
        let dir = TempDir::new().unwrap();
        let store = RatingStore::new(dir.path().join("ratings.json"));
        (dir, store)
    }

    fn info(title: &str, artist: &str) -> TrackInfo {
        TrackInfo {
            title: title.to_string(),
            artist: artist.to_string(),
            album: "Album1".to_string(),
            genre: None,
            vibe: None,
        }
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let (_dir, store) = temp_store();
        let data = store.load().unwrap();
        assert!(data.tracks.is_empty());
    }

    #[test]
    fn first_rating_creates_record_atomically() {
        let (_dir, mut store) = temp_store();
        store.save_rating(&info("Song1", "ArtistX"), 8).unwrap();

        let data = store.load().unwrap();
        assert_eq!(data.tracks.len(), 1);
        assert_eq!(data.tracks[0].ratings.len(), 1);
        assert_eq!(data.tracks[0].ratings[0].rating, 8);
    }

    #[test]
    fn out_of_range_ratings_are_rejected_not_clamped() {
        let (_dir, mut store) = temp_store();
        for bad in [0, 11, -3, 100] {
            let err = store.save_rating(&info("Song1", "ArtistX"), bad).unwrap_err();
            assert!(matches!(err, RatingError::InvalidRating(r) if r == bad));
        }
        // Nothing was written.
        assert!(store.load().unwrap().tracks.is_empty());
    }

    #[test]
    fn rerating_within_cooldown_is_rejected_without_append() {
        let (_dir, mut store) = temp_store();
        store.save_rating(&info("Song1", "ArtistX"), 8).unwrap();

        let err = store.save_rating(&info("Song1", "ArtistX"), 9).unwrap_err();
        assert!(matches!(err, RatingError::Cooldown { .. }));

        let data = store.load().unwrap();
        assert_eq!(data.tracks[0].ratings.len(), 1, "no second event appended");
    }

    #[test]
    fn rating_after_cooldown_appends() {
        let (_dir, mut store) = temp_store();
        store.save_rating(&info("Song1", "ArtistX"), 8).unwrap();

        // Backdate the stored event past the cooldown window.
        let mut data = store.load().unwrap();
        let old = (Utc::now() - Duration::minutes(COOLDOWN_MINUTES + 1)).to_rfc3339();
        data.tracks[0].ratings[0].timestamp = old;
        store.save(&data).unwrap();

        store.save_rating(&info("Song1", "ArtistX"), 6).unwrap();
        assert_eq!(store.load().unwrap().tracks[0].ratings.len(), 2);
    }

    #[test]
    fn cooldown_is_per_exact_title_artist_pair() {
        let (_dir, mut store) = temp_store();
        store.save_rating(&info("Song1", "ArtistX"), 8).unwrap();
        // Different title, same artist: no cooldown.
        store.save_rating(&info("Song2", "ArtistX"), 7).unwrap();
        // Same title, artist differs by case only: still a distinct record.
        store.save_rating(&info("Song1", "artistx"), 5).unwrap();

        assert_eq!(store.load().unwrap().tracks.len(), 3);
    }

    #[test]
    fn genre_is_last_write_wins() {
        let (_dir, mut store) = temp_store();
        let mut first = info("Song1", "ArtistX");
        first.genre = Some("Rock".to_string());
        store.save_rating(&first, 8).unwrap();

        let mut data = store.load().unwrap();
        data.tracks[0].ratings[0].timestamp =
            (Utc::now() - Duration::minutes(10)).to_rfc3339();
        store.save(&data).unwrap();

        let mut second = info("Song1", "ArtistX");
        second.genre = Some("Jazz".to_string());
        store.save_rating(&second, 6).unwrap();

        assert_eq!(store.load().unwrap().tracks[0].genre.as_deref(), Some("Jazz"));
    }

    #[test]
    fn genre_survives_rating_without_one() {
        let (_dir, mut store) = temp_store();
        let mut first = info("Song1", "ArtistX");
        first.genre = Some("Rock".to_string());
        store.save_rating(&first, 8).unwrap();

        let mut data = store.load().unwrap();
        data.tracks[0].ratings[0].timestamp =
            (Utc::now() - Duration::minutes(10)).to_rfc3339();
        store.save(&data).unwrap();

        store.save_rating(&info("Song1", "ArtistX"), 6).unwrap();
        assert_eq!(store.load().unwrap().tracks[0].genre.as_deref(), Some("Rock"));
    }

    #[test]
    fn vibe_lands_on_the_new_event() {
        let (_dir, mut store) = temp_store();
        let mut track = info("Song1", "ArtistX");
        track.vibe = Some("Calm".to_string());
        store.save_rating(&track, 9).unwrap();

        let data = store.load().unwrap();
        assert_eq!(data.tracks[0].ratings[0].vibes, vec!["Calm".to_string()]);
    }

    #[test]
    fn legacy_array_format_reads_as_empty() {
        let (_dir, store) = temp_store();
        fs::write(
            store.path.clone(),
            r#"[{"title": "Old Song", "rating": 7}]"#,
        )
        .unwrap();

        let data = store.load().unwrap();
        assert!(data.tracks.is_empty());
    }

    #[test]
    fn corrupt_file_propagates_instead_of_reading_empty() {
        let (_dir, store) = temp_store();
        fs::write(store.path.clone(), "{ not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, RatingError::CorruptStore { .. }));
    }

    #[test]
    fn recent_rating_visible_inside_cooldown_only() {
        let (_dir, mut store) = temp_store();
        store.save_rating(&info("Song1", "ArtistX"), 8).unwrap();
        assert!(store.recent_rating("Song1", "ArtistX").unwrap().is_some());
        assert!(store.recent_rating("Song2", "ArtistX").unwrap().is_none());

        let mut data = store.load().unwrap();
        data.tracks[0].ratings[0].timestamp =
            (Utc::now() - Duration::minutes(10)).to_rfc3339();
        store.save(&data).unwrap();
        assert!(store.recent_rating("Song1", "ArtistX").unwrap().is_none());
    }
}
