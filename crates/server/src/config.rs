use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Runtime configuration, assembled by the cli crate from flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Shared secret expected verbatim in the `Authorization` header.
    pub auth_token: String,
    /// Interval between popular-media scrapes.
    pub refresh_interval: Duration,
}
