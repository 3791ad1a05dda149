//! Data model for the rating log.
//!
//! A [`TrackRecord`] is created on the first successful rating of a
//! (title, artist) pair and accumulates [`RatingEvent`]s from then on.
//! Records are identified by the *exact* (title, artist) strings as
//! reported by the now-playing probe. No trimming or case-folding is
//! applied to the key: two renderings of the same track that differ in
//! whitespace are distinct records, and merging them silently would be
//! worse than the occasional duplicate entry.

use serde::{Deserialize, Serialize};

/// Lower bound of the rating scale.
pub const RATING_MIN: u8 = 1;
/// Upper bound of the rating scale.
pub const RATING_MAX: u8 = 10;

/// Album name used when the now-playing probe reports none.
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// A single rating the user submitted for a track.
///
/// `vibes` holds zero or one mood tags in practice; it is a list in the
/// stored format and stays one here so old files keep deserializing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingEvent {
    /// Rating value, always within `RATING_MIN..=RATING_MAX` once stored.
    pub rating: u8,
    /// Mood tags attached to this rating.
    #[serde(default)]
    pub vibes: Vec<String>,
    /// RFC 3339 timestamp assigned at write time.
    pub timestamp: String,
}

impl RatingEvent {
    /// First vibe of this event, if any.
    pub fn vibe(&self) -> Option<&str> {
        self.vibes.first().map(String::as_str)
    }
}

/// Everything we know about one rated (title, artist) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackRecord {
    pub title: String,
    /// Raw artist credit string; may encode several artists
    /// ("ArtistX & ArtistY"). Split lazily by the artist leaderboard.
    pub artist: String,
    pub album: String,
    /// Last genre the user supplied while rating. Last write wins.
    #[serde(default)]
    pub genre: Option<String>,
    /// Chronological, append-only. Never empty once the record exists.
    pub ratings: Vec<RatingEvent>,
    /// UI passthrough, untouched by aggregation.
    #[serde(default)]
    pub flag: Option<String>,
    /// UI passthrough, untouched by aggregation.
    #[serde(default)]
    pub favorite: bool,
    /// Cover image path recorded by the cover service, if it ever saved one
    /// for this track. Album leaderboards prefer this over the derived name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_path: Option<String>,
}

impl TrackRecord {
    /// Most recent rating event. Safe because `ratings` is never empty.
    pub fn last_rating(&self) -> Option<&RatingEvent> {
        self.ratings.last()
    }

    /// Mood shown for this track: the vibe of the *last* rating event only.
    /// An earlier event's vibe is deliberately ignored when the latest
    /// event has none.
    pub fn current_mood(&self) -> Option<&str> {
        self.last_rating().and_then(RatingEvent::vibe)
    }
}

/// Identity of the track currently being rated, as handed to the store by
/// the shell. Carries the optional genre and vibe the user picked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackInfo {
    pub title: String,
    pub artist: String,
    pub album: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub vibe: Option<String>,
}
