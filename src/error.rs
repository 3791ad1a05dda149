//! Error taxonomy for the rating pipeline.

use std::path::PathBuf;

/// Everything that can go wrong while saving or loading ratings.
///
/// `InvalidRating` and `Cooldown` are business rules surfaced to the user,
/// not system failures; the shell prints them and carries on. The
/// remaining variants are genuine errors and propagate.
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    /// Rating outside the 1-10 scale. Rejected before any store mutation,
    /// never clamped.
    #[error("rating must be between 1 and 10, got {0}")]
    InvalidRating(i64),

    /// Same (title, artist) rated again within the cooldown window.
    #[error("\"{title}\" was already rated recently; try again in {remaining_secs}s")]
    Cooldown { title: String, remaining_secs: i64 },

    /// The ratings file exists but does not parse. Deliberately *not*
    /// swallowed: falling back to an empty store here would destroy the
    /// user's data on the next write.
    #[error("ratings file {} is corrupt: {source}", path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to access ratings file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
