// BookingStore trait and its PostgreSQL implementation
// Handlers depend on the trait only; repositories stay behind it

use crate::db::repositories::{ArtistRepository, ShowRepository, VenueRepository};
use crate::db::DbPool;
use crate::directory::{group_by_area, split_shows};
use crate::errors::DatabaseError;
use crate::models::{
    Area, Artist, ArtistDetail, ArtistSummary, NewArtist, NewShow, NewVenue, SearchResults,
    ShowListing, Venue, VenueDetail,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::instrument;

/// Every read and write the booking pages need
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Verify the backing store answers
    async fn health_check(&self) -> Result<(), DatabaseError>;

    /// Venues grouped by (city, state), each with its own upcoming-show count
    async fn venue_areas(&self, now: DateTime<Utc>) -> Result<Vec<Area>, DatabaseError>;

    async fn search_venues(&self, term: &str) -> Result<SearchResults<Venue>, DatabaseError>;

    async fn find_venue(&self, id: i32) -> Result<Option<Venue>, DatabaseError>;

    /// Venue with its shows split into past and upcoming relative to `now`
    async fn venue_detail(
        &self,
        id: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<VenueDetail>, DatabaseError>;

    async fn create_venue(&self, venue: NewVenue) -> Result<i32, DatabaseError>;

    /// Returns false when the venue does not exist
    async fn update_venue(&self, id: i32, venue: NewVenue) -> Result<bool, DatabaseError>;

    /// Returns false when the venue does not exist
    async fn delete_venue(&self, id: i32) -> Result<bool, DatabaseError>;

    async fn list_artists(&self) -> Result<Vec<ArtistSummary>, DatabaseError>;

    async fn search_artists(&self, term: &str) -> Result<SearchResults<Artist>, DatabaseError>;

    async fn find_artist(&self, id: i32) -> Result<Option<Artist>, DatabaseError>;

    /// Artist with their shows split into past and upcoming relative to `now`
    async fn artist_detail(
        &self,
        id: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<ArtistDetail>, DatabaseError>;

    async fn create_artist(&self, artist: NewArtist) -> Result<i32, DatabaseError>;

    async fn update_artist(&self, id: i32, artist: NewArtist) -> Result<bool, DatabaseError>;

    async fn delete_artist(&self, id: i32) -> Result<bool, DatabaseError>;

    async fn list_shows(&self) -> Result<Vec<ShowListing>, DatabaseError>;

    async fn create_show(&self, show: NewShow) -> Result<i32, DatabaseError>;
}

/// PostgreSQL-backed BookingStore
pub struct PgBookingStore {
    pool: DbPool,
    venues: VenueRepository,
    artists: ArtistRepository,
    shows: ShowRepository,
}

impl PgBookingStore {
    pub fn new(pool: DbPool) -> Self {
        Self {
            venues: VenueRepository::new(pool.clone()),
            artists: ArtistRepository::new(pool.clone()),
            shows: ShowRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.pool.health_check().await
    }

    #[instrument(skip(self))]
    async fn venue_areas(&self, now: DateTime<Utc>) -> Result<Vec<Area>, DatabaseError> {
        let summaries = self.venues.find_summaries(now).await?;
        Ok(group_by_area(summaries))
    }

    async fn search_venues(&self, term: &str) -> Result<SearchResults<Venue>, DatabaseError> {
        let venues = self.venues.search_by_name(term).await?;
        Ok(SearchResults::new(venues))
    }

    async fn find_venue(&self, id: i32) -> Result<Option<Venue>, DatabaseError> {
        self.venues.find_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn venue_detail(
        &self,
        id: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<VenueDetail>, DatabaseError> {
        let Some(venue) = self.venues.find_by_id(id).await? else {
            return Ok(None);
        };

        let shows = self.venues.find_shows(id).await?;
        let (past_shows, upcoming_shows) = split_shows(shows, now);

        Ok(Some(VenueDetail {
            venue,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }))
    }

    async fn create_venue(&self, venue: NewVenue) -> Result<i32, DatabaseError> {
        self.venues.create(&venue).await
    }

    async fn update_venue(&self, id: i32, venue: NewVenue) -> Result<bool, DatabaseError> {
        self.venues.update(id, &venue).await
    }

    async fn delete_venue(&self, id: i32) -> Result<bool, DatabaseError> {
        self.venues.delete(id).await
    }

    async fn list_artists(&self) -> Result<Vec<ArtistSummary>, DatabaseError> {
        self.artists.list_all().await
    }

    async fn search_artists(&self, term: &str) -> Result<SearchResults<Artist>, DatabaseError> {
        let artists = self.artists.search_by_name(term).await?;
        Ok(SearchResults::new(artists))
    }

    async fn find_artist(&self, id: i32) -> Result<Option<Artist>, DatabaseError> {
        self.artists.find_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn artist_detail(
        &self,
        id: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<ArtistDetail>, DatabaseError> {
        let Some(artist) = self.artists.find_by_id(id).await? else {
            return Ok(None);
        };

        let shows = self.artists.find_shows(id).await?;
        let (past_shows, upcoming_shows) = split_shows(shows, now);

        Ok(Some(ArtistDetail {
            artist,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }))
    }

    async fn create_artist(&self, artist: NewArtist) -> Result<i32, DatabaseError> {
        self.artists.create(&artist).await
    }

    async fn update_artist(&self, id: i32, artist: NewArtist) -> Result<bool, DatabaseError> {
        self.artists.update(id, &artist).await
    }

    async fn delete_artist(&self, id: i32) -> Result<bool, DatabaseError> {
        self.artists.delete(id).await
    }

    async fn list_shows(&self) -> Result<Vec<ShowListing>, DatabaseError> {
        self.shows.list_all().await
    }

    async fn create_show(&self, show: NewShow) -> Result<i32, DatabaseError> {
        self.shows.create(&show).await
    }
}
