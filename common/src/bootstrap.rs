// Bootstrap utilities for binary initialization

use crate::config::Settings;
use crate::db::DbPool;
use crate::storage::{BookingStore, PgBookingStore};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Initialize database pool and, when configured, apply migrations
///
/// # Errors
/// Returns error if the pool cannot connect or a migration fails
#[tracing::instrument(skip(settings))]
pub async fn init_database_pool(settings: &Settings) -> Result<DbPool> {
    info!("Initializing database pool");

    let db_pool = DbPool::new(&settings.database)
        .await
        .context("Failed to initialize database pool")?;

    if settings.database.run_migrations {
        db_pool
            .migrate()
            .await
            .context("Failed to apply database migrations")?;
    } else {
        info!("Database migrations skipped by configuration");
    }

    info!("Database pool initialized");
    Ok(db_pool)
}

/// Wrap the pool in the PostgreSQL BookingStore
pub fn init_booking_store(db_pool: DbPool) -> Arc<dyn BookingStore> {
    info!("Booking store initialized");
    Arc::new(PgBookingStore::new(db_pool))
}
