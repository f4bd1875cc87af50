// Property-based tests for the venue directory rules
// Area grouping, past/upcoming classification and search patterns

use chrono::{DateTime, Duration, TimeZone, Utc};
use common::directory::{escape_like, group_by_area, split_shows, substring_pattern};
use common::models::{ArtistShow, VenueSummary};
use proptest::prelude::*;
use std::collections::HashSet;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap()
}

fn venue_strategy() -> impl Strategy<Value = VenueSummary> {
    (
        1..10_000i32,
        "[A-Za-z ]{1,20}",
        prop::sample::select(vec!["San Francisco", "New York", "Austin"]),
        prop::sample::select(vec!["CA", "NY", "TX"]),
        0..5i64,
    )
        .prop_map(|(id, name, city, state, upcoming)| VenueSummary {
            id,
            name,
            city: city.to_string(),
            state: state.to_string(),
            num_upcoming_shows: upcoming,
        })
}

fn show_at(offset_minutes: i64) -> ArtistShow {
    ArtistShow {
        artist_id: 1,
        artist_name: "Guns N Petals".to_string(),
        artist_image_link: None,
        start_time: base_time() + Duration::minutes(offset_minutes),
    }
}

// Every venue lands in exactly one area, and no area repeats
proptest! {
    #[test]
    fn grouping_is_a_partition(venues in prop::collection::vec(venue_strategy(), 0..40)) {
        let areas = group_by_area(venues.clone());

        let total: usize = areas.iter().map(|a| a.venues.len()).sum();
        prop_assert_eq!(total, venues.len());

        let keys: HashSet<(String, String)> =
            areas.iter().map(|a| (a.city.clone(), a.state.clone())).collect();
        prop_assert_eq!(keys.len(), areas.len());

        for area in &areas {
            prop_assert!(!area.venues.is_empty());
        }
    }

    #[test]
    fn grouping_keeps_per_venue_counts(venues in prop::collection::vec(venue_strategy(), 1..40)) {
        let areas = group_by_area(venues.clone());

        let first = &venues[0];
        let area = areas
            .iter()
            .find(|a| a.city == first.city && a.state == first.state)
            .unwrap();
        prop_assert_eq!(area.venues[0].id, first.id);
        prop_assert_eq!(area.venues[0].num_upcoming_shows, first.num_upcoming_shows);
    }

    #[test]
    fn split_never_loses_or_duplicates(offsets in prop::collection::vec(-10_000i64..10_000, 0..50)) {
        let shows: Vec<ArtistShow> = offsets.iter().map(|o| show_at(*o)).collect();
        let at_now = offsets.iter().filter(|o| **o == 0).count();

        let (past, upcoming) = split_shows(shows.clone(), base_time());

        prop_assert_eq!(past.len() + upcoming.len() + at_now, shows.len());
        prop_assert!(past.iter().all(|s| s.start_time < base_time()));
        prop_assert!(upcoming.iter().all(|s| s.start_time > base_time()));
    }

    #[test]
    fn escaped_terms_have_no_bare_wildcards(term in ".{0,30}") {
        let escaped = escape_like(&term);

        let mut chars = escaped.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                let next = chars.next();
                prop_assert!(matches!(next, Some('\\' | '%' | '_')));
            } else {
                prop_assert!(c != '%' && c != '_');
            }
        }
    }
}

#[test]
fn substring_pattern_wraps_trimmed_term() {
    assert_eq!(substring_pattern("  Hop "), "%Hop%");
    assert_eq!(substring_pattern("100%"), "%100\\%%");
    assert_eq!(substring_pattern(""), "%%");
}

#[test]
fn show_at_exactly_now_is_neither_past_nor_upcoming() {
    let (past, upcoming) = split_shows(vec![show_at(0)], base_time());
    assert!(past.is_empty());
    assert!(upcoming.is_empty());
}
