use std::sync::Arc;

use imdb::ImdbClient;
use reqwest::Client;
use sqlx::SqlitePool;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
    pub imdb: Arc<ImdbClient>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config) -> Self {
        let http_client = Client::new();
        let imdb = Arc::new(ImdbClient::new(http_client));
        Self {
            db,
            config: Arc::new(config),
            imdb,
        }
    }

    /// Build state around an existing client, e.g. one pointed at a
    /// fixture server in tests.
    pub fn with_imdb(db: SqlitePool, config: Config, imdb: Arc<ImdbClient>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            imdb,
        }
    }
}
