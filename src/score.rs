//! Credit splitting and Bayesian rating aggregation.
//!
//! Two small pieces of arithmetic carry the whole leaderboard system:
//!
//! - [`per_artist_rating`] dilutes a track's rating across its credited
//!   artists, so a 10/10 collaboration doesn't hand every participant a
//!   full 10.
//! - [`weighted_rating`] is a Bayesian average: groups with few ratings
//!   are pulled toward the population mean so a single lucky 10/10 can't
//!   top the chart, while well-sampled groups keep their true average.

/// Confidence threshold for the Bayesian average. At `count ==
/// MIN_RATINGS_DEFAULT` a group's own average and the global average
/// carry equal-ish weight; chosen empirically.
pub const MIN_RATINGS_DEFAULT: u32 = 3;

/// Midpoint of the 1-10 scale, used as the global average when no
/// ratings exist at all.
pub const SCALE_MIDPOINT: f64 = 5.5;

/// Rating credited to each artist of a multi-artist track.
///
/// Each artist beyond the first costs half a point, floored at 1 so the
/// contribution never hits zero or goes negative. Single-artist tracks
/// pass through unchanged.
///
/// ```
/// use tunerank::score::per_artist_rating;
///
/// assert_eq!(per_artist_rating(8.0, 1), 8.0);
/// assert_eq!(per_artist_rating(8.0, 3), 7.0);
/// assert_eq!(per_artist_rating(2.0, 5), 1.0);
/// ```
pub fn per_artist_rating(track_rating: f64, artist_count: usize) -> f64 {
    if artist_count <= 1 {
        return track_rating;
    }
    let modifier = (artist_count as f64 - 1.0) * 0.5;
    (track_rating - modifier).max(1.0)
}

/// Bayesian weighted rating.
///
/// `weight = count / (count + min_ratings)`, result is
/// `weight * avg + (1 - weight) * global_avg`. The result always lies
/// between `avg` and `global_avg`, and moves toward `avg` as `count`
/// grows. Returns 0.0 for an empty group; callers only aggregate
/// non-empty groups, so that case never reaches a leaderboard.
pub fn weighted_rating(avg: f64, count: u32, global_avg: f64, min_ratings: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }

    let weight = f64::from(count) / f64::from(count + min_ratings);
    weight * avg + (1.0 - weight) * global_avg
}

/// Mean of every individual value across all groups of one leaderboard
/// type. Defaults to [`SCALE_MIDPOINT`] when no values exist anywhere.
///
/// Recomputed per leaderboard type: the artist chart averages credit-split
/// values, the track chart raw ones, so they do not share a global mean.
pub fn global_average<'a, I>(groups: I) -> f64
where
    I: IntoIterator<Item = &'a Vec<f64>>,
{
    let mut sum = 0.0;
    let mut count = 0u64;

    for ratings in groups {
        for &rating in ratings {
            sum += rating;
            count += 1;
        }
    }

    if count == 0 {
        SCALE_MIDPOINT
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_artist_keeps_full_rating() {
        for r in 1..=10 {
            assert_eq!(per_artist_rating(f64::from(r), 1), f64::from(r));
        }
    }

    #[test]
    fn split_rating_never_exceeds_raw_and_never_drops_below_one() {
        for r in 1..=10 {
            for n in 2..=8 {
                let split = per_artist_rating(f64::from(r), n);
                assert!(split <= f64::from(r), "split {split} > raw {r}");
                assert!(split >= 1.0, "split {split} < 1 for r={r} n={n}");
            }
        }
    }

    #[test]
    fn split_subtracts_half_point_per_extra_artist() {
        assert_eq!(per_artist_rating(6.0, 2), 5.5);
        assert_eq!(per_artist_rating(8.0, 3), 7.0);
    }

    #[test]
    fn weighted_rating_is_bounded_by_avg_and_global() {
        let cases = [(9.0, 1, 5.5), (2.0, 4, 6.0), (7.0, 100, 5.0), (5.0, 3, 5.0)];
        for (avg, count, global) in cases {
            let w = weighted_rating(avg, count, global, MIN_RATINGS_DEFAULT);
            let (lo, hi) = if avg < global { (avg, global) } else { (global, avg) };
            assert!(w >= lo && w <= hi, "weighted {w} outside [{lo}, {hi}]");
        }
    }

    #[test]
    fn more_ratings_pull_weighted_toward_avg() {
        let avg = 9.0;
        let global = 5.5;
        let mut last_distance = f64::INFINITY;
        for count in [1, 2, 3, 5, 10, 50] {
            let w = weighted_rating(avg, count, global, MIN_RATINGS_DEFAULT);
            let distance = (avg - w).abs();
            assert!(
                distance < last_distance,
                "count {count} did not move weighted rating closer to avg"
            );
            last_distance = distance;
        }
    }

    #[test]
    fn zero_count_degenerates_to_zero() {
        assert_eq!(weighted_rating(8.0, 0, 5.5, MIN_RATINGS_DEFAULT), 0.0);
    }

    #[test]
    fn global_average_over_all_values() {
        let groups = vec![vec![8.0, 6.0], vec![4.0]];
        assert_eq!(global_average(groups.iter()), 6.0);
    }

    #[test]
    fn global_average_defaults_to_scale_midpoint() {
        let groups: Vec<Vec<f64>> = Vec::new();
        assert_eq!(global_average(groups.iter()), SCALE_MIDPOINT);

        let empty_groups = vec![Vec::new(), Vec::new()];
        assert_eq!(global_average(empty_groups.iter()), SCALE_MIDPOINT);
    }
}
