//! # Tunerank
//!
//! Rate whatever is playing, then see which tracks, artists, albums,
//! genres and vibes actually hold up. Ratings live in an append-only
//! JSON log; leaderboards use Bayesian weighting so a single 10/10 never
//! beats a consistently rated favorite.
//!
//! ## Usage
//!
//! ```bash
//! # Rate the current track
//! tunerank rate 8 --vibe Calm --genre Rock
//!
//! # What's playing?
//! tunerank now
//!
//! # Leaderboards
//! tunerank top tracks
//! tunerank top artists --limit 10
//!
//! # Mood tags
//! tunerank vibes add Calm "#88c0d0"
//! tunerank vibes recent
//! ```

mod cli;

use anyhow::Result;
use clap::Parser;
use log::info;
use tunerank::error::RatingError;
use tunerank::leaderboard;
use tunerank::now_playing::Session;
use tunerank::store::RatingStore;
use tunerank::track::{TrackInfo, UNKNOWN_ALBUM};
use tunerank::vibes::VibePalette;
use tunerank::{config, now_playing};

/// Routes CLI commands to library calls.
///
/// Logging is controlled via `RUST_LOG`, e.g.
/// `RUST_LOG=tunerank=debug tunerank top artists`.
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    match args.command {
        cli::Command::Now => {
            let track = now_playing::current_track()?;
            println!("{} - {}", track.title, track.artist);
            println!("  album: {}", track.album);

            let store = RatingStore::new(config::ratings_path()?);
            if let Some(recent) = store.recent_rating(&track.title, &track.artist)? {
                println!(
                    "  rated {}/10 at {} (cooldown active)",
                    recent.rating, recent.timestamp
                );
            }
        }
        cli::Command::Rate {
            rating,
            vibe,
            genre,
            title,
            artist,
            album,
        } => {
            let track = match (title, artist) {
                (Some(title), Some(artist)) => TrackInfo {
                    title,
                    artist,
                    album: album.unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
                    genre,
                    vibe,
                },
                _ => {
                    let mut session = Session::new();
                    let (playing, changed) = session.refresh_track()?;
                    if changed {
                        info!("rating freshly probed track");
                    }
                    playing.to_track_info(genre, vibe)
                }
            };

            let mut store = RatingStore::new(config::ratings_path()?);
            match store.save_rating(&track, rating) {
                Ok(()) => println!("Saved {}/10 for \"{}\" - {}", rating, track.title, track.artist),
                // Business rules get a friendly line, not an error trace.
                Err(e @ (RatingError::InvalidRating(_) | RatingError::Cooldown { .. })) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
        cli::Command::Top { board, limit } => {
            let store = RatingStore::new(config::ratings_path()?);
            let data = store.load()?;
            print_board(&data, board, limit);
        }
        cli::Command::Vibes { action } => match action {
            cli::VibeAction::List => {
                let palette = VibePalette::new(config::vibes_path()?).load()?;
                if palette.is_empty() {
                    println!("No vibes defined yet. Add one with: tunerank vibes add <name> <color>");
                }
                for (name, color) in &palette {
                    println!("{name:<20} {color}");
                }
            }
            cli::VibeAction::Add { name, color } => {
                let mut palette = VibePalette::new(config::vibes_path()?);
                palette.save_vibe(&name, &color)?;
                println!("Saved vibe {name} ({color})");
            }
            cli::VibeAction::Recent { limit } => {
                let store = RatingStore::new(config::ratings_path()?);
                let data = store.load()?;
                for vibe in leaderboard::recent_vibes(&data, limit) {
                    println!("{vibe}");
                }
            }
        },
    }

    Ok(())
}

/// Prints one leaderboard as an aligned table.
fn print_board(data: &tunerank::store::StoreData, board: cli::Board, limit: usize) {
    match board {
        cli::Board::Tracks => {
            for e in leaderboard::track_leaderboard(data).iter().take(limit) {
                println!(
                    "{:5.2}  {:4.2}/10 x{:<3} {} - {}{}",
                    e.weighted_rating,
                    e.avg_rating,
                    e.count,
                    e.title,
                    e.artist,
                    e.mood
                        .as_deref()
                        .map(|m| format!("  [{m}]"))
                        .unwrap_or_default(),
                );
            }
        }
        cli::Board::Artists => {
            for e in leaderboard::artist_leaderboard(data).iter().take(limit) {
                println!(
                    "{:5.2}  {:4.2}/10 x{:<3} {}",
                    e.weighted_rating, e.avg_rating, e.count, e.artist
                );
            }
        }
        cli::Board::Albums => {
            for e in leaderboard::album_leaderboard(data).iter().take(limit) {
                println!(
                    "{:5.2}  {:4.2}/10 x{:<3} {} - {}",
                    e.weighted_rating, e.avg_rating, e.count, e.album, e.artist
                );
            }
        }
        cli::Board::Genres => {
            for e in leaderboard::genre_leaderboard(data).iter().take(limit) {
                println!(
                    "{:5.2}  {:4.2}/10 x{:<3} {}",
                    e.weighted_rating, e.avg_rating, e.count, e.genre
                );
            }
        }
        cli::Board::Vibes => {
            for e in leaderboard::vibe_leaderboard(data).iter().take(limit) {
                println!(
                    "{:5.2}  {:4.2}/10 x{:<3} {}",
                    e.weighted_rating, e.avg_rating, e.count, e.vibe
                );
            }
        }
    }
}
