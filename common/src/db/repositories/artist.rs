// Artist repository implementation

use super::queries::artist_queries::SELECT_ALL_COLUMNS;
use crate::db::DbPool;
use crate::directory::substring_pattern;
use crate::errors::DatabaseError;
use crate::models::{Artist, ArtistSummary, NewArtist, VenueShow};
use tracing::instrument;

/// Repository for artist-related database operations
pub struct ArtistRepository {
    pool: DbPool,
}

impl ArtistRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<ArtistSummary>, DatabaseError> {
        let artists = sqlx::query_as::<_, ArtistSummary>(
            "SELECT id, name FROM artists ORDER BY name, id",
        )
        .fetch_all(self.pool.pool())
        .await?;

        tracing::debug!(count = artists.len(), "Listed artists");
        Ok(artists)
    }

    /// Case-insensitive substring search on artist name
    #[instrument(skip(self))]
    pub async fn search_by_name(&self, term: &str) -> Result<Vec<Artist>, DatabaseError> {
        let query = format!(
            "SELECT {} FROM artists WHERE name ILIKE $1 ORDER BY name, id",
            SELECT_ALL_COLUMNS
        );

        let artists = sqlx::query_as::<_, Artist>(&query)
            .bind(substring_pattern(term))
            .fetch_all(self.pool.pool())
            .await?;

        tracing::debug!(count = artists.len(), "Artist search finished");
        Ok(artists)
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Artist>, DatabaseError> {
        let query = format!("SELECT {} FROM artists WHERE id = $1", SELECT_ALL_COLUMNS);

        let artist = sqlx::query_as::<_, Artist>(&query)
            .bind(id)
            .fetch_optional(self.pool.pool())
            .await?;

        Ok(artist)
    }

    /// All shows played by an artist, with the hosting venue, oldest first
    #[instrument(skip(self))]
    pub async fn find_shows(&self, artist_id: i32) -> Result<Vec<VenueShow>, DatabaseError> {
        let shows = sqlx::query_as::<_, VenueShow>(
            r#"
            SELECT v.id AS venue_id, v.name AS venue_name,
                   v.image_link AS venue_image_link, s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            WHERE s.artist_id = $1
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(artist_id)
        .fetch_all(self.pool.pool())
        .await?;

        Ok(shows)
    }

    /// Insert an artist inside a transaction and return its id
    #[instrument(skip(self, artist), fields(artist_name = %artist.name))]
    pub async fn create(&self, artist: &NewArtist) -> Result<i32, DatabaseError> {
        let mut tx = self.pool.pool().begin().await?;

        let inserted = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO artists (
                name, city, state, phone, genres, facebook_link,
                image_link, website, seeking_venue, seeking_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&artist.name)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(&artist.genres)
        .bind(&artist.facebook_link)
        .bind(&artist.image_link)
        .bind(&artist.website)
        .bind(artist.seeking_venue)
        .bind(&artist.seeking_description)
        .fetch_one(&mut *tx)
        .await;

        let id = match inserted {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(error = %e, "Artist insert failed, rolling back");
                tx.rollback().await?;
                return Err(e.into());
            }
        };

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::info!(artist_id = id, artist_name = %artist.name, "Artist created");
        Ok(id)
    }

    #[instrument(skip(self, artist))]
    pub async fn update(&self, id: i32, artist: &NewArtist) -> Result<bool, DatabaseError> {
        let mut tx = self.pool.pool().begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE artists
            SET name = $2, city = $3, state = $4, phone = $5, genres = $6,
                facebook_link = $7, image_link = $8, website = $9,
                seeking_venue = $10, seeking_description = $11
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&artist.name)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(&artist.genres)
        .bind(&artist.facebook_link)
        .bind(&artist.image_link)
        .bind(&artist.website)
        .bind(artist.seeking_venue)
        .bind(&artist.seeking_description)
        .execute(&mut *tx)
        .await;

        let rows = match updated {
            Ok(result) => result.rows_affected(),
            Err(e) => {
                tracing::error!(error = %e, artist_id = id, "Artist update failed, rolling back");
                tx.rollback().await?;
                return Err(e.into());
            }
        };

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::info!(artist_id = id, found = rows > 0, "Artist updated");
        Ok(rows > 0)
    }

    /// Delete an artist together with the shows they play
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<bool, DatabaseError> {
        let mut tx = self.pool.pool().begin().await?;

        let shows = sqlx::query("DELETE FROM shows WHERE artist_id = $1")
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

        let artists = sqlx::query("DELETE FROM artists WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await;
        let artists = match artists {
            Ok(result) => result.rows_affected(),
            Err(e) => {
                tx.rollback().await?;
                return Err(e.into());
            }
        };

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::info!(artist_id = id, shows_removed = shows, "Artist deleted");
        Ok(artists > 0)
    }
}
