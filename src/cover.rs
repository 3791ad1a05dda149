//! Cover filename derivation.
//!
//! Cover images are saved by an external cover service under `covers/`,
//! named after the album. The key derivation here must match that service
//! byte for byte, so leaderboard entries can point at a cover without
//! checking the filesystem.

use md5::{Digest, Md5};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Directory the cover service writes into, relative to the data dir.
pub const COVERS_DIR: &str = "covers";

/// Maximum length of the readable part of a cover filename.
const SAFE_PREFIX_LEN: usize = 50;

/// Sanitizes an arbitrary string into a stable filename stem.
///
/// Diacritics are stripped via NFD decomposition, anything outside ASCII
/// alphanumerics becomes `_`, the result is lowercased and truncated to 50
/// characters. The first 8 hex chars of the MD5 of the *original* string
/// are appended so truncated or fully non-Latin names (e.g. Cyrillic album
/// titles, which sanitize to all underscores) stay distinct.
///
/// ```
/// use tunerank::cover::sanitize_filename;
///
/// let name = sanitize_filename("Café Bleu");
/// assert!(name.starts_with("cafe_bleu_"));
/// ```
pub fn sanitize_filename(s: &str) -> String {
    let digest = Md5::digest(s.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    let hash_prefix = &hex[..8];

    let safe: String = s
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .to_lowercase()
        .chars()
        .take(SAFE_PREFIX_LEN)
        .collect();

    format!("{safe}_{hash_prefix}")
}

/// Relative path of the cover image for an album, per the cover service
/// convention: `covers/<sanitize(album)>.png`.
pub fn cover_path(album: &str) -> String {
    format!("{COVERS_DIR}/{}.png", sanitize_filename(album))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_diacritics_and_lowercases() {
        let name = sanitize_filename("Café Bleu");
        assert!(name.starts_with("cafe_bleu_"), "got {name}");
    }

    #[test]
    fn replaces_non_alphanumerics_with_underscore() {
        let name = sanitize_filename("OK Computer (1997)");
        assert!(name.starts_with("ok_computer__1997__"), "got {name}");
    }

    #[test]
    fn hash_suffix_is_eight_hex_chars() {
        let name = sanitize_filename("Album");
        let suffix = name.rsplit('_').next().unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn non_latin_names_stay_distinct() {
        // Both sanitize to underscores; the hash suffix disambiguates.
        let a = sanitize_filename("Альбом один");
        let b = sanitize_filename("Альбом два");
        assert_ne!(a, b);
    }

    #[test]
    fn long_names_truncate_before_hash() {
        let long = "a".repeat(200);
        let name = sanitize_filename(&long);
        // 50-char prefix + '_' + 8-char hash
        assert_eq!(name.len(), 50 + 1 + 8);
    }

    #[test]
    fn derivation_is_deterministic() {
        assert_eq!(sanitize_filename("Same Album"), sanitize_filename("Same Album"));
    }

    #[test]
    fn cover_path_has_covers_prefix_and_png_suffix() {
        let path = cover_path("Album1");
        assert!(path.starts_with("covers/"));
        assert!(path.ends_with(".png"));
    }
}
