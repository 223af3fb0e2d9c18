use reqwest::Client;
use url::Url;

use crate::models::Media;
use crate::parse::{parse_chart_page, parse_search_page};
use crate::Result;

const BASE_URL: &str = "https://www.imdb.com";

const POPULAR_MOVIES_PATH: &str = "/chart/moviemeter/";
const POPULAR_TV_PATH: &str = "/chart/tvmeter/";

/// Scraping client for IMDB popularity charts and title search.
pub struct ImdbClient {
    client: Client,
    base_url: Url,
}

impl ImdbClient {
    pub fn new(client: Client) -> Self {
        let base_url = Url::parse(BASE_URL).expect("invalid base url");
        Self { client, base_url }
    }

    /// Create a client against a custom base URL. Used by tests to point
    /// at a local fixture server.
    pub fn with_base_url(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    async fn fetch_html(&self, url: &Url) -> Result<String> {
        tracing::debug!(%url, "visiting page");
        let response = self.client.get(url.clone()).send().await?;
        Ok(response.error_for_status()?.text().await?)
    }

    /// Scrape the popular-movies and popular-TV charts, in that order.
    ///
    /// Individual items that fail to parse are logged and skipped; a
    /// page fetch failure aborts the whole scrape and discards any
    /// records already collected from the earlier page.
    pub async fn scrape_popular(&self) -> Result<Vec<Media>> {
        let mut media = Vec::new();
        for path in [POPULAR_MOVIES_PATH, POPULAR_TV_PATH] {
            let url = self.base_url.join(path)?;
            let html = self.fetch_html(&url).await?;
            media.extend(parse_chart_page(&html, &url));
        }
        Ok(media)
    }

    /// Resolve a title and release year to an IMDB id via live search.
    ///
    /// The search is scoped to releases within the given year; only the
    /// first result is considered. `Ok(None)` means no match, which is
    /// an expected outcome rather than an error.
    pub async fn find_id(&self, title: &str, year: i32) -> Result<Option<String>> {
        let path = format!(
            "/search/title/?title={}&release_date={year}-01-01,{year}-12-31",
            urlencoding::encode(title),
        );
        let url = self.base_url.join(&path)?;
        let html = self.fetch_html(&url).await?;
        Ok(parse_search_page(&html, &url).map(|media| media.id))
    }
}
