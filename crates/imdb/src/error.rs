use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImdbError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Per-item parse failure for a single chart or search result entry.
///
/// During a bulk scrape these are logged and the item is dropped; they
/// never abort the scrape as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no rank found in meter label")]
    MissingRank,

    #[error("could not fetch url from element")]
    MissingUrl,

    #[error("could not fetch id from url: {url}")]
    MissingId { url: String },

    #[error("failed to parse media year")]
    InvalidYear,
}
