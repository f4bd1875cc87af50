// Query/aggregation rules shared by every BookingStore implementation
// Area grouping, past/upcoming split and name-search patterns

use crate::models::{Area, AreaVenue, Scheduled, VenueSummary};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Group venues by their (city, state) pair
///
/// Areas keep the order in which their first venue appears, and venues keep
/// their input order inside an area. Each venue lands in exactly one area.
pub fn group_by_area(venues: impl IntoIterator<Item = VenueSummary>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for venue in venues {
        let key = (venue.city.clone(), venue.state.clone());
        let slot = *index.entry(key).or_insert_with(|| {
            areas.push(Area {
                city: venue.city.clone(),
                state: venue.state.clone(),
                venues: Vec::new(),
            });
            areas.len() - 1
        });

        areas[slot].venues.push(AreaVenue {
            id: venue.id,
            name: venue.name,
            num_upcoming_shows: venue.num_upcoming_shows,
        });
    }

    areas
}

/// Split shows into (past, upcoming) relative to `now`
///
/// Past means `start_time < now`, upcoming means `start_time > now`.
/// A show starting exactly at `now` belongs to neither list.
pub fn split_shows<T: Scheduled>(
    shows: impl IntoIterator<Item = T>,
    now: DateTime<Utc>,
) -> (Vec<T>, Vec<T>) {
    let mut past = Vec::new();
    let mut upcoming = Vec::new();

    for show in shows {
        let start = show.start_time();
        if start < now {
            past.push(show);
        } else if start > now {
            upcoming.push(show);
        }
    }

    (past, upcoming)
}

/// Escape LIKE wildcards so the term matches literally
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// ILIKE pattern for a case-insensitive substring match
pub fn substring_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArtistShow;
    use chrono::{Duration, TimeZone};

    fn summary(id: i32, name: &str, city: &str, state: &str, upcoming: i64) -> VenueSummary {
        VenueSummary {
            id,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            num_upcoming_shows: upcoming,
        }
    }

    fn show(id: i32, start_time: DateTime<Utc>) -> ArtistShow {
        ArtistShow {
            artist_id: id,
            artist_name: format!("Artist {}", id),
            artist_image_link: None,
            start_time,
        }
    }

    #[test]
    fn test_group_by_area_merges_same_city_state() {
        let areas = group_by_area(vec![
            summary(1, "The Musical Hop", "San Francisco", "CA", 0),
            summary(2, "The Dueling Pianos Bar", "New York", "NY", 2),
            summary(3, "Park Square Live Music & Coffee", "San Francisco", "CA", 1),
        ]);

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].city, "San Francisco");
        assert_eq!(areas[0].venues.len(), 2);
        assert_eq!(areas[0].venues[1].id, 3);
        assert_eq!(areas[0].venues[1].num_upcoming_shows, 1);
        assert_eq!(areas[1].state, "NY");
        assert_eq!(areas[1].venues[0].num_upcoming_shows, 2);
    }

    #[test]
    fn test_group_by_area_same_city_different_state() {
        let areas = group_by_area(vec![
            summary(1, "A", "Portland", "OR", 0),
            summary(2, "B", "Portland", "ME", 0),
        ]);
        assert_eq!(areas.len(), 2);
    }

    #[test]
    fn test_group_by_area_empty() {
        assert!(group_by_area(Vec::new()).is_empty());
    }

    #[test]
    fn test_split_shows() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let (past, upcoming) = split_shows(
            vec![
                show(1, now - Duration::days(3)),
                show(2, now + Duration::hours(1)),
                show(3, now - Duration::seconds(1)),
                show(4, now + Duration::days(30)),
            ],
            now,
        );

        assert_eq!(past.iter().map(|s| s.artist_id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(upcoming.iter().map(|s| s.artist_id).collect::<Vec<_>>(), vec![2, 4]);
    }

    #[test]
    fn test_split_shows_excludes_show_starting_now() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let (past, upcoming) = split_shows(vec![show(1, now)], now);
        assert!(past.is_empty());
        assert!(upcoming.is_empty());
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("hop"), "hop");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\x"), "c:\\\\x");
    }

    #[test]
    fn test_substring_pattern_trims() {
        assert_eq!(substring_pattern("  Hop "), "%Hop%");
        assert_eq!(substring_pattern(""), "%%");
    }
}
