//! Leaderboard construction.
//!
//! Every leaderboard follows the same pipeline over a store snapshot:
//!
//! 1. emit (group key, value) pairs per entity type,
//! 2. group by key, keeping all values in first-seen order,
//! 3. compute the global average over every emitted value of *this*
//!    leaderboard type,
//! 4. per group: arithmetic average, Bayesian weighted rating, count,
//! 5. sort descending by weighted rating, then count, then average.
//!
//! Tracks, albums, genres and vibes aggregate raw rating values; the
//! artist board redistributes each track's events across its parsed
//! artists at the credit-split value. Because group membership differs,
//! each board recomputes its own global average instead of sharing one.
//!
//! Builders never fail: an empty store yields an empty board. Validation
//! happened at write time; a loaded snapshot is trusted.

use crate::artist::parse_artists;
use crate::cover;
use crate::score::{global_average, per_artist_rating, weighted_rating, MIN_RATINGS_DEFAULT};
use crate::store::StoreData;
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

/// One row of the track leaderboard.
#[derive(Debug, Clone, Serialize)]
pub struct TrackEntry {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: Option<String>,
    /// Vibe of the most recent rating event, if that event carried one.
    pub mood: Option<String>,
    pub flag: Option<String>,
    pub favorite: bool,
    pub cover_path: String,
    pub avg_rating: f64,
    pub weighted_rating: f64,
    pub count: u32,
}

/// One row of the artist leaderboard.
#[derive(Debug, Clone, Serialize)]
pub struct ArtistEntry {
    pub artist: String,
    pub avg_rating: f64,
    pub weighted_rating: f64,
    pub count: u32,
}

/// One row of the album leaderboard.
#[derive(Debug, Clone, Serialize)]
pub struct AlbumEntry {
    pub album: String,
    pub artist: String,
    pub cover_path: String,
    pub avg_rating: f64,
    pub weighted_rating: f64,
    pub count: u32,
}

/// One row of the genre leaderboard.
#[derive(Debug, Clone, Serialize)]
pub struct GenreEntry {
    pub genre: String,
    pub avg_rating: f64,
    pub weighted_rating: f64,
    pub count: u32,
}

/// One row of the vibe leaderboard.
#[derive(Debug, Clone, Serialize)]
pub struct VibeEntry {
    pub vibe: String,
    pub avg_rating: f64,
    pub weighted_rating: f64,
    pub count: u32,
}

/// Aggregate of one group after step 4 of the pipeline.
struct Aggregate {
    avg_rating: f64,
    weighted_rating: f64,
    count: u32,
}

/// Groups values by string key, preserving first-seen key order so the
/// final sort is deterministic across runs given identical input order.
struct Groups {
    order: Vec<(String, Vec<f64>)>,
    index: HashMap<String, usize>,
}

impl Groups {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn push(&mut self, key: &str, value: f64) {
        match self.index.get(key).copied() {
            Some(i) => self.order[i].1.push(value),
            None => {
                self.index.insert(key.to_string(), self.order.len());
                self.order.push((key.to_string(), vec![value]));
            }
        }
    }

    /// Runs steps 3-4: one global average over everything emitted, then
    /// per-group aggregates, in first-seen order.
    fn aggregate(self) -> Vec<(String, Aggregate)> {
        let global_avg = global_average(self.order.iter().map(|(_, v)| v));

        self.order
            .into_iter()
            .map(|(key, values)| {
                let count = values.len() as u32;
                let avg = values.iter().sum::<f64>() / f64::from(count);
                let weighted = weighted_rating(avg, count, global_avg, MIN_RATINGS_DEFAULT);
                (
                    key,
                    Aggregate {
                        avg_rating: avg,
                        weighted_rating: weighted,
                        count,
                    },
                )
            })
            .collect()
    }
}

/// Descending by weighted rating, ties broken by count, then average.
/// Stable sort, so ties beyond all three keys keep emission order.
fn sort_entries<T>(entries: &mut [T], key: impl Fn(&T) -> (f64, u32, f64)) {
    entries.sort_by(|a, b| {
        let (aw, ac, aa) = key(a);
        let (bw, bc, ba) = key(b);
        bw.total_cmp(&aw)
            .then(bc.cmp(&ac))
            .then(ba.total_cmp(&aa))
    });
}

/// Builds the track leaderboard. One group per record; raw values.
pub fn track_leaderboard(data: &StoreData) -> Vec<TrackEntry> {
    let global_avg = global_average(
        data.tracks
            .iter()
            .map(|t| t.ratings.iter().map(|r| f64::from(r.rating)).collect())
            .collect::<Vec<Vec<f64>>>()
            .iter(),
    );

    let mut entries: Vec<TrackEntry> = data
        .tracks
        .iter()
        .map(|track| {
            let count = track.ratings.len() as u32;
            let avg = track
                .ratings
                .iter()
                .map(|r| f64::from(r.rating))
                .sum::<f64>()
                / f64::from(count);

            TrackEntry {
                title: track.title.clone(),
                artist: track.artist.clone(),
                album: track.album.clone(),
                genre: track.genre.clone(),
                mood: track.current_mood().map(str::to_string),
                flag: track.flag.clone(),
                favorite: track.favorite,
                cover_path: track
                    .cover_path
                    .clone()
                    .unwrap_or_else(|| cover::cover_path(&track.album)),
                avg_rating: avg,
                weighted_rating: weighted_rating(avg, count, global_avg, MIN_RATINGS_DEFAULT),
                count,
            }
        })
        .collect();

    sort_entries(&mut entries, |e| (e.weighted_rating, e.count, e.avg_rating));
    debug!("built track leaderboard with {} entries", entries.len());
    entries
}

/// Builds the artist leaderboard.
///
/// Each record's credit string is parsed into individual artists; every
/// rating event contributes its credit-split value to *each* of them, so
/// a duo's 6/10 lands as 5.5 on both members.
pub fn artist_leaderboard(data: &StoreData) -> Vec<ArtistEntry> {
    let mut groups = Groups::new();

    for track in &data.tracks {
        let artists = parse_artists(&track.artist);
        let artist_count = artists.len();

        for event in &track.ratings {
            let split = per_artist_rating(f64::from(event.rating), artist_count);
            for artist in &artists {
                groups.push(artist, split);
            }
        }
    }

    let mut entries: Vec<ArtistEntry> = groups
        .aggregate()
        .into_iter()
        .map(|(artist, agg)| ArtistEntry {
            artist,
            avg_rating: agg.avg_rating,
            weighted_rating: agg.weighted_rating,
            count: agg.count,
        })
        .collect();

    sort_entries(&mut entries, |e| (e.weighted_rating, e.count, e.avg_rating));
    debug!("built artist leaderboard with {} entries", entries.len());
    entries
}

/// Builds the album leaderboard, keyed by the exact (album, artist) pair
/// so same-named albums by different artists stay apart. Raw values.
pub fn album_leaderboard(data: &StoreData) -> Vec<AlbumEntry> {
    let mut groups = Groups::new();
    // Display fields and recorded cover per group key, first record wins.
    let mut meta: HashMap<String, (String, String, Option<String>)> = HashMap::new();

    for track in &data.tracks {
        let key = format!("{}|||{}", track.album, track.artist);

        let entry = meta
            .entry(key.clone())
            .or_insert_with(|| (track.album.clone(), track.artist.clone(), None));
        if entry.2.is_none() {
            entry.2 = track.cover_path.clone();
        }

        for event in &track.ratings {
            groups.push(&key, f64::from(event.rating));
        }
    }

    let mut entries: Vec<AlbumEntry> = groups
        .aggregate()
        .into_iter()
        .map(|(key, agg)| {
            let (album, artist, recorded_cover) =
                meta.remove(&key).expect("meta tracked for every group");
            let cover_path = recorded_cover.unwrap_or_else(|| cover::cover_path(&album));
            AlbumEntry {
                album,
                artist,
                cover_path,
                avg_rating: agg.avg_rating,
                weighted_rating: agg.weighted_rating,
                count: agg.count,
            }
        })
        .collect();

    sort_entries(&mut entries, |e| (e.weighted_rating, e.count, e.avg_rating));
    debug!("built album leaderboard with {} entries", entries.len());
    entries
}

/// Builds the genre leaderboard. Records without a genre are skipped;
/// that is missing grouping data, not an error. Raw values.
pub fn genre_leaderboard(data: &StoreData) -> Vec<GenreEntry> {
    let mut groups = Groups::new();

    for track in &data.tracks {
        let Some(genre) = &track.genre else { continue };
        for event in &track.ratings {
            groups.push(genre, f64::from(event.rating));
        }
    }

    let mut entries: Vec<GenreEntry> = groups
        .aggregate()
        .into_iter()
        .map(|(genre, agg)| GenreEntry {
            genre,
            avg_rating: agg.avg_rating,
            weighted_rating: agg.weighted_rating,
            count: agg.count,
        })
        .collect();

    sort_entries(&mut entries, |e| (e.weighted_rating, e.count, e.avg_rating));
    debug!("built genre leaderboard with {} entries", entries.len());
    entries
}

/// Builds the vibe leaderboard. Each event contributes its raw rating to
/// every vibe it carries; events without vibes are skipped.
pub fn vibe_leaderboard(data: &StoreData) -> Vec<VibeEntry> {
    let mut groups = Groups::new();

    for track in &data.tracks {
        for event in &track.ratings {
            for vibe in &event.vibes {
                groups.push(vibe, f64::from(event.rating));
            }
        }
    }

    let mut entries: Vec<VibeEntry> = groups
        .aggregate()
        .into_iter()
        .map(|(vibe, agg)| VibeEntry {
            vibe,
            avg_rating: agg.avg_rating,
            weighted_rating: agg.weighted_rating,
            count: agg.count,
        })
        .collect();

    sort_entries(&mut entries, |e| (e.weighted_rating, e.count, e.avg_rating));
    debug!("built vibe leaderboard with {} entries", entries.len());
    entries
}

/// Vibe names ordered by most recent use, unique, newest first.
pub fn recent_vibes(data: &StoreData, limit: usize) -> Vec<String> {
    let mut stamped: Vec<(&str, &str)> = Vec::new();
    for track in &data.tracks {
        for event in &track.ratings {
            for vibe in &event.vibes {
                stamped.push((vibe, &event.timestamp));
            }
        }
    }

    // RFC 3339 timestamps in UTC sort correctly as strings.
    stamped.sort_by(|a, b| b.1.cmp(a.1));

    let mut seen = std::collections::HashSet::new();
    stamped
        .into_iter()
        .filter(|(vibe, _)| seen.insert(*vibe))
        .map(|(vibe, _)| vibe.to_string())
        .take(limit)
        .collect()
}
