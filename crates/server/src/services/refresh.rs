use std::sync::Arc;
use std::time::Duration;

use imdb::{ImdbClient, ImdbError};
use sqlx::SqlitePool;
use thiserror::Error;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::repositories::MediaRepository;

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("failed to scrape popular media: {0}")]
    Scrape(#[from] ImdbError),

    #[error("failed to replace media catalog: {0}")]
    Store(#[from] sqlx::Error),
}

/// Periodic job that rebuilds the popularity catalog from the IMDB
/// charts. A stale catalog is treated as worse than a restart, so any
/// failure ends the loop and the caller exits the process.
pub struct RefreshJob {
    db: SqlitePool,
    imdb: Arc<ImdbClient>,
    interval: Duration,
}

impl RefreshJob {
    pub fn new(db: SqlitePool, imdb: Arc<ImdbClient>, interval: Duration) -> Self {
        Self { db, imdb, interval }
    }

    /// One full scrape-and-replace cycle.
    pub async fn refresh(&self) -> Result<(), RefreshError> {
        tracing::info!("refreshing popular media by scraping imdb and updating the catalog");
        let media = self.imdb.scrape_popular().await?;
        tracing::info!(media_count = media.len(), "scraped popular media, replacing catalog");
        MediaRepository::replace_all(&self.db, &media).await?;
        let catalog_size = MediaRepository::count(&self.db).await?;
        tracing::info!(catalog_size, "done refreshing popular media");
        Ok(())
    }

    /// Refresh once immediately, then on a fixed timer until the token
    /// is cancelled. Cancellation mid-refresh drops the in-flight work;
    /// a partially applied catalog replace rolls back with its
    /// transaction.
    pub async fn run(self, cancel: CancellationToken) -> Result<(), RefreshError> {
        let mut timer = tokio::time::interval(self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately and drives the startup
        // refresh.
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("media refresh loop stopped");
                    return Ok(());
                }
                result = self.tick_and_refresh(&mut timer) => result?,
            }
        }
    }

    async fn tick_and_refresh(
        &self,
        timer: &mut tokio::time::Interval,
    ) -> Result<(), RefreshError> {
        timer.tick().await;
        self.refresh().await
    }
}
