// Show repository implementation

use super::queries::show_queries::SELECT_LISTING;
use crate::db::DbPool;
use crate::errors::DatabaseError;
use crate::models::{NewShow, ShowListing};
use tracing::instrument;

/// Repository for show-related database operations
pub struct ShowRepository {
    pool: DbPool,
}

impl ShowRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Every show with its venue and artist, soonest first
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<ShowListing>, DatabaseError> {
        let query = format!("SELECT {} ORDER BY s.start_time, s.id", SELECT_LISTING);

        let shows = sqlx::query_as::<_, ShowListing>(&query)
            .fetch_all(self.pool.pool())
            .await?;

        tracing::debug!(count = shows.len(), "Listed shows");
        Ok(shows)
    }

    /// Insert a show inside a transaction and return its id
    ///
    /// # Errors
    /// `DatabaseError::ForeignKeyViolation` when the artist or venue does not exist
    #[instrument(skip(self, show), fields(artist_id = show.artist_id, venue_id = show.venue_id))]
    pub async fn create(&self, show: &NewShow) -> Result<i32, DatabaseError> {
        let mut tx = self.pool.pool().begin().await?;

        let inserted = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO shows (artist_id, venue_id, start_time)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(show.artist_id)
        .bind(show.venue_id)
        .bind(show.start_time)
        .fetch_one(&mut *tx)
        .await;

        let id = match inserted {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(error = %e, "Show insert failed, rolling back");
                tx.rollback().await?;
                return Err(e.into());
            }
        };

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::info!(show_id = id, start_time = %show.start_time, "Show created");
        Ok(id)
    }
}
