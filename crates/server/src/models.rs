use serde::Deserialize;

/// Payload autobrr posts to the media-check webhook.
///
/// Only `Title` and `Year` drive the decision; the remaining fields are
/// release metadata passed through for logging.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MediaCheckRequest {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub episode: Option<String>,
    #[serde(default)]
    pub filter_name: Option<String>,
    #[serde(default)]
    pub indexer: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub torrent_name: Option<String>,
    #[serde(default, rename = "Type")]
    pub release_type: Option<String>,
}
