//! Track rating and leaderboard engine.
//!
//! Core modules:
//! - [`store`] - Append-only rating log (JSON, transactional rewrite)
//! - [`artist`] - Artist credit string parsing
//! - [`score`] - Credit splitting and Bayesian weighted ratings
//! - [`leaderboard`] - Grouped, weighted, sorted leaderboards
//!
//! ### Supporting modules
//!
//! - [`track`] - Data model (records, rating events)
//! - [`error`] - Structured rating failures
//! - [`config`] - Data directory and file locations
//! - [`cover`] - Cover filename derivation (shared with the cover service)
//! - [`vibes`] - Mood tag palette
//! - [`now_playing`] - Now-playing probe and session caching
//!
//! ## Quick start
//!
//! ```no_run
//! use tunerank::store::RatingStore;
//! use tunerank::track::TrackInfo;
//! use tunerank::{config, leaderboard};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut store = RatingStore::new(config::ratings_path()?);
//!
//! store.save_rating(
//!     &TrackInfo {
//!         title: "Song1".into(),
//!         artist: "ArtistX & ArtistY".into(),
//!         album: "Album1".into(),
//!         genre: Some("Rock".into()),
//!         vibe: Some("Calm".into()),
//!     },
//!     8,
//! )?;
//!
//! let data = store.load()?;
//! for entry in leaderboard::artist_leaderboard(&data) {
//!     println!("{:5.2}  {}", entry.weighted_rating, entry.artist);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## How the numbers work
//!
//! Ratings are 1-10, one per track per 5-minute cooldown. Leaderboards
//! sort by a Bayesian weighted rating
//! (`count/(count+3) * avg + 3/(count+3) * global_avg`), which pulls
//! sparsely rated entries toward the population mean. On the artist
//! board, a track's rating is first diluted by half a point per extra
//! credited artist (floor 1), so collaborations don't hand out full
//! credit to everyone.
//!
//! ## Error handling
//!
//! Library calls return `Result`; user-facing rejections (bad rating
//! value, cooldown) are [`error::RatingError`] variants, and a corrupt
//! ratings file is reported rather than silently replaced.

pub mod artist;
pub mod config;
pub mod cover;
pub mod error;
pub mod leaderboard;
pub mod now_playing;
pub mod score;
pub mod store;
pub mod track;
pub mod vibes;
