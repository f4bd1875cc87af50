// Venue repository implementation

use super::queries::venue_queries::SELECT_ALL_COLUMNS;
use crate::db::DbPool;
use crate::directory::substring_pattern;
use crate::errors::DatabaseError;
use crate::models::{ArtistShow, NewVenue, Venue, VenueSummary};
use chrono::{DateTime, Utc};
use tracing::instrument;

/// Repository for venue-related database operations
pub struct VenueRepository {
    pool: DbPool,
}

impl VenueRepository {
    /// Create a new VenueRepository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Every venue with the number of its own shows starting after `now`
    ///
    /// Rows come ordered by state, city, then id so areas render stably.
    #[instrument(skip(self))]
    pub async fn find_summaries(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<VenueSummary>, DatabaseError> {
        let venues = sqlx::query_as::<_, VenueSummary>(
            r#"
            SELECT v.id, v.name, v.city, v.state,
                   COUNT(s.id) FILTER (WHERE s.start_time > $1) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            GROUP BY v.id
            ORDER BY v.state, v.city, v.id
            "#,
        )
        .bind(now)
        .fetch_all(self.pool.pool())
        .await?;

        tracing::debug!(count = venues.len(), "Found venue summaries");
        Ok(venues)
    }

    /// Case-insensitive substring search on venue name
    #[instrument(skip(self))]
    pub async fn search_by_name(&self, term: &str) -> Result<Vec<Venue>, DatabaseError> {
        let query = format!(
            "SELECT {} FROM venues WHERE name ILIKE $1 ORDER BY name, id",
            SELECT_ALL_COLUMNS
        );

        let venues = sqlx::query_as::<_, Venue>(&query)
            .bind(substring_pattern(term))
            .fetch_all(self.pool.pool())
            .await?;

        tracing::debug!(count = venues.len(), "Venue search finished");
        Ok(venues)
    }

    /// Find a venue by ID
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Venue>, DatabaseError> {
        let query = format!("SELECT {} FROM venues WHERE id = $1", SELECT_ALL_COLUMNS);

        let venue = sqlx::query_as::<_, Venue>(&query)
            .bind(id)
            .fetch_optional(self.pool.pool())
            .await?;

        Ok(venue)
    }

    /// All shows hosted by a venue, with the performing artist, oldest first
    #[instrument(skip(self))]
    pub async fn find_shows(&self, venue_id: i32) -> Result<Vec<ArtistShow>, DatabaseError> {
        let shows = sqlx::query_as::<_, ArtistShow>(
            r#"
            SELECT a.id AS artist_id, a.name AS artist_name,
                   a.image_link AS artist_image_link, s.start_time
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = $1
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(venue_id)
        .fetch_all(self.pool.pool())
        .await?;

        Ok(shows)
    }

    /// Insert a venue inside a transaction and return its id
    #[instrument(skip(self, venue), fields(venue_name = %venue.name))]
    pub async fn create(&self, venue: &NewVenue) -> Result<i32, DatabaseError> {
        let mut tx = self.pool.pool().begin().await?;

        let inserted = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO venues (
                name, city, state, address, phone, genres, facebook_link,
                image_link, website, seeking_talent, seeking_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.address)
        .bind(&venue.phone)
        .bind(&venue.genres)
        .bind(&venue.facebook_link)
        .bind(&venue.image_link)
        .bind(&venue.website)
        .bind(venue.seeking_talent)
        .bind(&venue.seeking_description)
        .fetch_one(&mut *tx)
        .await;

        let id = match inserted {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(error = %e, "Venue insert failed, rolling back");
                tx.rollback().await?;
                return Err(e.into());
            }
        };

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::info!(venue_id = id, venue_name = %venue.name, "Venue created");
        Ok(id)
    }

    /// Overwrite a venue's fields; returns false when the venue does not exist
    #[instrument(skip(self, venue))]
    pub async fn update(&self, id: i32, venue: &NewVenue) -> Result<bool, DatabaseError> {
        let mut tx = self.pool.pool().begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE venues
            SET name = $2, city = $3, state = $4, address = $5, phone = $6,
                genres = $7, facebook_link = $8, image_link = $9, website = $10,
                seeking_talent = $11, seeking_description = $12
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.address)
        .bind(&venue.phone)
        .bind(&venue.genres)
        .bind(&venue.facebook_link)
        .bind(&venue.image_link)
        .bind(&venue.website)
        .bind(venue.seeking_talent)
        .bind(&venue.seeking_description)
        .execute(&mut *tx)
        .await;

        let rows = match updated {
            Ok(result) => result.rows_affected(),
            Err(e) => {
                tracing::error!(error = %e, venue_id = id, "Venue update failed, rolling back");
                tx.rollback().await?;
                return Err(e.into());
            }
        };

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::info!(venue_id = id, found = rows > 0, "Venue updated");
        Ok(rows > 0)
    }

    /// Delete a venue together with the shows it hosts
    ///
    /// Returns false when no venue had this id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<bool, DatabaseError> {
        let mut tx = self.pool.pool().begin().await?;

        let shows = sqlx::query("DELETE FROM shows WHERE venue_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await;
        let shows = match shows {
            Ok(result) => result.rows_affected(),
            Err(e) => {
                tx.rollback().await?;
                return Err(e.into());
            }
        };

        let venues = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await;
        let venues = match venues {
            Ok(result) => result.rows_affected(),
            Err(e) => {
                tx.rollback().await?;
                return Err(e.into());
            }
        };

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::info!(venue_id = id, shows_removed = shows, "Venue deleted");
        Ok(venues > 0)
    }
}
