use std::collections::BTreeSet;

use log::{info, warn};

use super::SalesRecord;

/// Drops rows with a missing genre, a missing or non-numeric year, or
/// non-positive global sales.
pub fn remove_invalid_entries(records: Vec<SalesRecord>) -> Vec<SalesRecord> {
    let initial = records.len();
    let cleaned: Vec<SalesRecord> = records
        .into_iter()
        .filter(|r| r.genre().is_some())
        .filter(|r| r.year.is_some_and(f64::is_finite))
        .filter(|r| r.global_sales > 0.0)
        .collect();

    let removed = initial - cleaned.len();
    if removed > 0 {
        info!("Removed {removed} invalid entries ({initial} -> {})", cleaned.len());
    }
    cleaned
}

/// Keeps rows released within `[start_year, end_year]`; either bound may be open.
///
/// Rows without a year are kept only when both bounds are open.
pub fn filter_time_window(
    records: Vec<SalesRecord>,
    start_year: Option<i32>,
    end_year: Option<i32>,
) -> Vec<SalesRecord> {
    if start_year.is_none() && end_year.is_none() {
        return records;
    }

    records
        .into_iter()
        .filter(|r| match r.year {
            Some(year) => {
                start_year.is_none_or(|start| year >= f64::from(start))
                    && end_year.is_none_or(|end| year <= f64::from(end))
            }
            None => false,
        })
        .collect()
}

/// Keeps only rows whose genre is in `genres` (case-sensitive).
///
/// Requested genres that never occur are reported with `warn!`.
pub fn select_genres<S: AsRef<str>>(records: Vec<SalesRecord>, genres: &[S]) -> Vec<SalesRecord> {
    let available: BTreeSet<&str> = records.iter().filter_map(SalesRecord::genre).collect();
    let absent: Vec<&str> = genres
        .iter()
        .map(AsRef::as_ref)
        .filter(|g| !available.contains(g))
        .collect();

    if !absent.is_empty() {
        warn!("Genres not present in the data: {absent:?}; available: {available:?}");
    }

    records
        .into_iter()
        .filter(|r| r.genre().is_some_and(|g| genres.iter().any(|want| want.as_ref() == g)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{RAW_CSV, write_temp};
    use crate::data::load_raw_data;

    fn raw() -> Vec<SalesRecord> {
        let file = write_temp(RAW_CSV);
        load_raw_data(file.path()).unwrap()
    }

    fn names(records: &[SalesRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn drops_missing_genre_year_and_zero_sales() {
        let cleaned = remove_invalid_entries(raw());
        assert_eq!(cleaned.len(), 7);
        let kept = names(&cleaned);
        assert!(!kept.contains(&"Mystery Box"));
        assert!(!kept.contains(&"No Genre"));
        assert!(!kept.contains(&"Ghost Sales"));
    }

    #[test]
    fn time_window_is_inclusive() {
        let windowed = filter_time_window(remove_invalid_entries(raw()), Some(2004), Some(2016));
        let kept = names(&windowed);
        assert!(kept.contains(&"Blade Quest"));
        assert!(kept.contains(&"Sky Pilot"));
        assert!(!kept.contains(&"Old Timer"));
        assert!(!kept.contains(&"Run Gun"));
    }

    #[test]
    fn time_window_with_single_bound() {
        let since = filter_time_window(remove_invalid_entries(raw()), Some(2009), None);
        assert!(since.iter().all(|r| r.year.is_some_and(|y| y >= 2009.0)));

        let until = filter_time_window(remove_invalid_entries(raw()), None, Some(2001));
        assert_eq!(names(&until), vec!["Old Timer", "Run Gun"]);
    }

    #[test]
    fn open_window_keeps_everything() {
        assert_eq!(filter_time_window(raw(), None, None).len(), 10);
    }

    #[test]
    fn selects_requested_genres_only() {
        let selected = select_genres(raw(), &["Simulation", "Puzzle"]);
        assert_eq!(selected.len(), 3);
        assert!(selected.iter().all(|r| r.genre() == Some("Simulation")));
    }
}
