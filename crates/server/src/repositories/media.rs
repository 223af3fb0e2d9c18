use imdb::Media;
use sqlx::SqlitePool;

/// A catalog row as read back by tests.
#[cfg(test)]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MediaRow {
    pub id: String,
    pub title: String,
    pub year: i64,
    pub rank: i64,
    pub media_type: String,
    pub url: String,
    pub rating: f64,
    /// Server-side write timestamp, stamped on every catalog replace.
    pub metadata_updated_at: chrono::DateTime<chrono::Utc>,
}

pub struct MediaRepository;

impl MediaRepository {
    /// Replace the entire catalog with the given snapshot.
    ///
    /// Runs as a single transaction: delete everything, insert every
    /// record with a fresh `metadata_updated_at`. Any failure rolls the
    /// whole replacement back, leaving the prior catalog intact.
    pub async fn replace_all(pool: &SqlitePool, media: &[Media]) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM media").execute(&mut *tx).await?;

        for item in media {
            sqlx::query(
                r#"
                INSERT INTO media (id, title, year, rank, media_type, url, rating, metadata_updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, CURRENT_TIMESTAMP)
                "#,
            )
            .bind(&item.id)
            .bind(&item.title)
            .bind(item.year)
            .bind(item.rank)
            .bind(item.media_type.as_str())
            .bind(&item.url)
            .bind(item.rating)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await
    }

    /// Whether a record with the given id is currently in the catalog.
    pub async fn exists(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM media WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.is_some())
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM media")
            .fetch_one(pool)
            .await?;

        Ok(sqlx::Row::get(&row, "count"))
    }
}

#[cfg(test)]
impl MediaRepository {
    pub async fn get_by_id(pool: &SqlitePool, id: &str) -> Result<Option<MediaRow>, sqlx::Error> {
        sqlx::query_as::<_, MediaRow>(
            r#"
            SELECT id, title, year, rank, media_type, url, rating, metadata_updated_at
            FROM media
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
