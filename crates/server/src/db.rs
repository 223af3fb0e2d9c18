use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

const CREATE_MEDIA_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS media (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        year INTEGER,
        rank INTEGER,
        media_type TEXT CHECK( media_type IN ('movie', 'tv') ) NOT NULL,
        url TEXT NOT NULL,
        rating REAL NOT NULL,
        metadata_updated_at TIMESTAMP NOT NULL
    )
"#;

const CREATE_MEDIA_TYPE_INDEX: &str = "CREATE INDEX IF NOT EXISTS media_type ON media(media_type)";

/// Idempotently create the media table and its index.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_MEDIA_TABLE).execute(pool).await?;
    sqlx::query(CREATE_MEDIA_TYPE_INDEX).execute(pool).await?;
    Ok(())
}

pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    init_schema(&pool).await?;

    Ok(pool)
}
