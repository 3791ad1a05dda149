//! Command-line interface definitions.
//!
//! Thin clap layer over the library. All aggregation, validation and
//! persistence semantics live in the library modules; the CLI only
//! parses arguments and routes.

use clap::{Parser, Subcommand, ValueEnum};

/// Which leaderboard to build.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum Board {
    /// Per-track leaderboard (raw ratings)
    Tracks,
    /// Per-artist leaderboard (credit-split ratings)
    Artists,
    /// Per-album leaderboard, keyed by (album, artist)
    Albums,
    /// Per-genre leaderboard
    Genres,
    /// Per-vibe leaderboard
    Vibes,
}

#[derive(Parser)]
#[command(name = "tunerank")]
#[command(about = "Tunerank - Rate what you're listening to & build trustworthy leaderboards")]
#[command(version)]
pub struct Args {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the currently playing track
    ///
    /// Queries the local now-playing helper and prints title, artist and
    /// album, plus a note if the track was rated within the cooldown
    /// window.
    Now,

    /// Rate the currently playing track (1-10)
    ///
    /// Rejects values outside 1-10 and re-ratings of the same track
    /// within 5 minutes. An optional vibe tags the rating with a mood;
    /// an optional genre is remembered on the track (last write wins).
    Rate {
        /// Rating value, 1-10
        rating: i64,

        /// Mood tag to attach to this rating (e.g. "Calm")
        #[arg(short = 'V', long)]
        vibe: Option<String>,

        /// Genre to record on the track
        #[arg(short, long)]
        genre: Option<String>,

        /// Rate an explicit title instead of the currently playing track
        #[arg(long, requires = "artist")]
        title: Option<String>,

        /// Artist for --title
        #[arg(long, requires = "title")]
        artist: Option<String>,

        /// Album for --title
        #[arg(long)]
        album: Option<String>,
    },

    /// Print a leaderboard
    ///
    /// Rows are sorted by the Bayesian weighted rating, so entities with
    /// many ratings keep their true average while one-hit wonders are
    /// pulled toward the population mean.
    Top {
        /// Which leaderboard to build
        board: Board,

        /// Maximum number of rows to print
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Manage vibes (mood tags)
    Vibes {
        #[command(subcommand)]
        action: VibeAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum VibeAction {
    /// List the vibe palette (name and display color)
    List,

    /// Add a vibe to the palette, or recolor an existing one
    Add {
        /// Vibe name (e.g. "Calm")
        name: String,
        /// CSS color string (e.g. "#88c0d0")
        color: String,
    },

    /// Show the most recently used vibes
    Recent {
        /// How many vibes to show
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },
}
