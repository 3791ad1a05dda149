//! Splitting a free-text artist credit into individual artist names.
//!
//! Credit strings come straight from whatever the media player reports, so
//! "Artist A feat. Artist B", "A & B", "A x B", "A / B" and "A, B" all
//! show up in the wild. The catch is that commas also appear *inside*
//! artist names ("Tyler, The Creator"), so the separators are tried in a
//! fixed order and only the first one that produces a split is applied.

use lazy_static::lazy_static;
use regex::Regex;

/// A separator pattern plus the minimum number of segments a split must
/// produce before it is accepted.
struct Separator {
    pattern: Regex,
    min_parts: usize,
}

lazy_static! {
    /// Separator patterns in order of preference. The featuring-style
    /// separators come first so that a credit like
    /// "A feat. B, C" is split on "feat." and never reaches the comma
    /// rule. " x " is intentionally case-sensitive: "X" between spaces is
    /// far more likely to be part of a name than a collaboration marker.
    ///
    /// The comma is the most ambiguous separator: a single comma usually
    /// belongs to the name itself ("Tyler, The Creator"), while a real
    /// comma-separated credit list carries at least two. The comma rule
    /// therefore only accepts splits into three or more segments.
    static ref SEPARATORS: Vec<Separator> = vec![
        Separator { pattern: Regex::new(r"(?i)\s+feat\.\s+").unwrap(), min_parts: 2 },
        Separator { pattern: Regex::new(r"(?i)\s+ft\.\s+").unwrap(), min_parts: 2 },
        Separator { pattern: Regex::new(r"(?i)\s+featuring\s+").unwrap(), min_parts: 2 },
        Separator { pattern: Regex::new(r"\s+&\s+").unwrap(), min_parts: 2 },
        Separator { pattern: Regex::new(r"\s+x\s+").unwrap(), min_parts: 2 },
        Separator { pattern: Regex::new(r"\s+/\s+").unwrap(), min_parts: 2 },
        Separator { pattern: Regex::new(r",\s+").unwrap(), min_parts: 3 },
    ];
}

/// Splits an artist credit string into individual artist names.
///
/// Each separator is tried against the whole current split set; the first
/// one that yields an accepted split wins and no further separators are
/// applied. Segments are trimmed and empty segments dropped. An empty or
/// whitespace-only input yields an empty vector. A lone comma never
/// splits; comma lists need two or more commas.
///
/// # Examples
///
/// ```
/// use tunerank::artist::parse_artists;
///
/// assert_eq!(parse_artists("Tyler, The Creator"), vec!["Tyler, The Creator"]);
/// assert_eq!(parse_artists("A feat. B"), vec!["A", "B"]);
/// ```
pub fn parse_artists(credit: &str) -> Vec<String> {
    let trimmed = credit.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut artists = vec![trimmed.to_string()];

    for separator in SEPARATORS.iter() {
        let mut split_any = false;
        let mut next: Vec<String> = Vec::new();

        for artist in &artists {
            let parts: Vec<&str> = separator.pattern.split(artist).collect();
            if parts.len() >= separator.min_parts {
                split_any = true;
                next.extend(
                    parts
                        .iter()
                        .map(|p| p.trim())
                        .filter(|p| !p.is_empty())
                        .map(str::to_string),
                );
            } else {
                next.push(artist.clone());
            }
        }

        if split_any {
            artists = next;
            // First matching separator wins; never combine patterns.
            break;
        }
    }

    artists
        .into_iter()
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_inside_name_is_not_split() {
        // No earlier separator matches, and the lone comma is treated as
        // part of the name rather than a credit list.
        assert_eq!(
            parse_artists("Tyler, The Creator"),
            vec!["Tyler, The Creator".to_string()]
        );
    }

    #[test]
    fn feat_splits_two_artists() {
        assert_eq!(
            parse_artists("Artist A feat. Artist B"),
            vec!["Artist A".to_string(), "Artist B".to_string()]
        );
    }

    #[test]
    fn feat_is_case_insensitive() {
        assert_eq!(
            parse_artists("Artist A FEAT. Artist B"),
            vec!["Artist A".to_string(), "Artist B".to_string()]
        );
        assert_eq!(
            parse_artists("Artist A Ft. Artist B"),
            vec!["Artist A".to_string(), "Artist B".to_string()]
        );
    }

    #[test]
    fn ampersand_splits_repeatedly() {
        assert_eq!(
            parse_artists("A & B & C"),
            vec!["A".to_string(), "B".to_string(), "C".to_string()]
        );
    }

    #[test]
    fn first_matching_separator_wins() {
        // "feat." splits first; the ampersand inside the second segment is
        // left alone because patterns are never combined.
        assert_eq!(
            parse_artists("A feat. B & C"),
            vec!["A".to_string(), "B & C".to_string()]
        );
    }

    #[test]
    fn collaboration_x_is_lowercase_only() {
        assert_eq!(
            parse_artists("A x B"),
            vec!["A".to_string(), "B".to_string()]
        );
        // Uppercase "X" between spaces stays a single credit.
        assert_eq!(parse_artists("A X B"), vec!["A X B".to_string()]);
    }

    #[test]
    fn slash_splits() {
        assert_eq!(
            parse_artists("AC/DC / Airbourne"),
            // Only " / " with surrounding spaces separates; "AC/DC" keeps
            // its slash.
            vec!["AC/DC".to_string(), "Airbourne".to_string()]
        );
    }

    #[test]
    fn comma_with_space_splits_plain_lists() {
        assert_eq!(
            parse_artists("A, B, C"),
            vec!["A".to_string(), "B".to_string(), "C".to_string()]
        );
    }

    #[test]
    fn single_comma_is_part_of_the_name() {
        assert_eq!(parse_artists("A, B"), vec!["A, B".to_string()]);
    }

    #[test]
    fn empty_and_whitespace_yield_nothing() {
        assert!(parse_artists("").is_empty());
        assert!(parse_artists("   ").is_empty());
    }

    #[test]
    fn segments_are_trimmed() {
        assert_eq!(
            parse_artists("  Artist A   &   Artist B  "),
            vec!["Artist A".to_string(), "Artist B".to_string()]
        );
    }
}
