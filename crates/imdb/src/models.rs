use serde::{Deserialize, Serialize};

/// Media classification as stored in the `media_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

/// One entry scraped from an IMDB chart or search result page.
///
/// `rank` and `rating` degrade to `-1` when the page does not carry a
/// usable value; `year` is mandatory and parsing fails without it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    /// IMDB title id, e.g. `tt1234567`.
    pub id: String,
    pub title: String,
    pub year: i64,
    pub rank: i64,
    pub rating: f64,
    pub media_type: MediaType,
    /// Absolute URL of the title page the entry links to.
    pub url: String,
}
