use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// Entities
// ============================================================================

/// Venue is a location hosting shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Venue {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Artist is a performer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Artist {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

// ============================================================================
// Insert payloads (validated form submissions)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewShow {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTime<Utc>,
}

// ============================================================================
// Read models
// ============================================================================

/// Venue row used to build the by-area listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

/// Venue entry inside an area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaVenue {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// All venues sharing one (city, state) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<AreaVenue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
}

/// A show seen from its venue: enriched with the performing artist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ArtistShow {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// A show seen from its artist: enriched with the hosting venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct VenueShow {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Row of the /shows listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ShowListing {
    pub id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Name search result: the match count plus the raw rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> SearchResults<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Anything with a start time that can be classified as past or upcoming
pub trait Scheduled {
    fn start_time(&self) -> DateTime<Utc>;
}

impl Scheduled for ArtistShow {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

impl Scheduled for VenueShow {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_search_results_count_matches_rows() {
        let results = SearchResults::new(vec![
            ArtistSummary { id: 1, name: "Guns N Petals".into() },
            ArtistSummary { id: 2, name: "Matt Quevedo".into() },
        ]);
        assert_eq!(results.count, 2);
        assert_eq!(results.data.len(), 2);
    }

    #[test]
    fn test_venue_detail_serializes_flat() {
        let detail = VenueDetail {
            venue: Venue {
                id: 1,
                name: "The Musical Hop".into(),
                city: "San Francisco".into(),
                state: "CA".into(),
                address: "1015 Folsom Street".into(),
                phone: Some("123-123-1234".into()),
                genres: vec!["Jazz".into(), "Swing".into()],
                facebook_link: None,
                image_link: None,
                website: None,
                seeking_talent: true,
                seeking_description: None,
            },
            past_shows: vec![ArtistShow {
                artist_id: 4,
                artist_name: "Guns N Petals".into(),
                artist_image_link: None,
                start_time: Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap(),
            }],
            upcoming_shows: vec![],
            past_shows_count: 1,
            upcoming_shows_count: 0,
        };

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["name"], "The Musical Hop");
        assert_eq!(value["genres"][1], "Swing");
        assert_eq!(value["past_shows"][0]["artist_name"], "Guns N Petals");
        assert_eq!(value["past_shows"][0]["start_time"], "2019-05-21T21:30:00Z");
        assert_eq!(value["upcoming_shows_count"], 0);
    }
}
