//! HTML parsing for IMDB chart pages and title search results.
//!
//! The page-level functions are pure so they can be tested against
//! fixture HTML without any network access; [`crate::ImdbClient`] only
//! adds the fetching on top.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::ParseError;
use crate::models::{Media, MediaType};

static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(\.\d+)?").expect("invalid number pattern"));

static TITLE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"title/([A-Za-z0-9]+)").expect("invalid title id pattern"));

static LIST_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".ipc-metadata-list").expect("invalid list selector"));

static CHART_ITEM_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".cli-children").expect("invalid chart item selector"));

static SEARCH_ITEM_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".ipc-metadata-list-summary-item").expect("invalid search item selector")
});

static RANK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".cli-meter-title-header").expect("invalid rank selector"));

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".ipc-title").expect("invalid title selector"));

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("invalid link selector"));

static YEAR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".cli-title-metadata .cli-title-metadata-item:first-child")
        .expect("invalid year selector")
});

static RATING_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".cli-ratings-container .ipc-rating-star").expect("invalid rating selector")
});

static TYPE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".cli-title-type-data").expect("invalid type selector"));

/// First numeric token (`integer[.fraction]`) in the text, if any.
///
/// `None` covers both "no text" and "no numeric token"; whether that is
/// fatal is up to the caller. Rank and rating degrade to a sentinel,
/// the release year does not.
pub fn first_number(text: &str) -> Option<f64> {
    NUMBER_PATTERN.find(text).and_then(|m| m.as_str().parse().ok())
}

fn child_text(item: ElementRef<'_>, selector: &Selector) -> Option<String> {
    item.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// Parse a single chart or search result item into a [`Media`] record.
///
/// `base` is the URL of the page the item came from and is used to
/// resolve the relative title link.
pub fn parse_media(
    item: ElementRef<'_>,
    base: &Url,
    rank_required: bool,
) -> Result<Media, ParseError> {
    let rank_text = child_text(item, &RANK_SELECTOR).unwrap_or_default();
    let rank = match first_number(&rank_text) {
        Some(rank) => rank as i64,
        None if rank_required => return Err(ParseError::MissingRank),
        None => -1,
    };

    let title_element = item.select(&TITLE_SELECTOR).next();
    let title = title_element
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let href = title_element
        .and_then(|el| el.select(&LINK_SELECTOR).next())
        .and_then(|a| a.value().attr("href"))
        .filter(|href| !href.is_empty())
        .ok_or(ParseError::MissingUrl)?;
    let url = base.join(href).map_err(|_| ParseError::MissingUrl)?;

    let id = TITLE_ID_PATTERN
        .captures(url.as_str())
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ParseError::MissingId {
            url: url.to_string(),
        })?;

    let year = child_text(item, &YEAR_SELECTOR)
        .as_deref()
        .and_then(first_number)
        .ok_or(ParseError::InvalidYear)? as i64;

    let rating = child_text(item, &RATING_SELECTOR)
        .as_deref()
        .and_then(first_number)
        .unwrap_or(-1.0);

    let media_type = match child_text(item, &TYPE_SELECTOR).as_deref() {
        Some("TV Series") => MediaType::Tv,
        _ => MediaType::Movie,
    };

    Ok(Media {
        id,
        title,
        year,
        rank,
        rating,
        media_type,
        url: url.to_string(),
    })
}

/// Parse a popularity chart page into records, in document order.
///
/// Every matching result list on the page contributes items. Items that
/// fail to parse are logged with their raw text and skipped.
pub fn parse_chart_page(html: &str, base: &Url) -> Vec<Media> {
    let document = Html::parse_document(html);
    let mut media = Vec::new();

    for list in document.select(&LIST_SELECTOR) {
        for item in list.select(&CHART_ITEM_SELECTOR) {
            match parse_media(item, base, true) {
                Ok(record) => {
                    tracing::debug!(id = %record.id, title = %record.title, "parsed media");
                    media.push(record);
                }
                Err(error) => {
                    let raw = item.text().collect::<String>();
                    tracing::error!(%error, raw_media = %raw.trim(), "failed to parse media");
                }
            }
        }
    }

    media
}

/// Parse the first result of a title search page, if there is one.
///
/// A missing result list, a missing first item, or a first item that
/// fails to parse all mean "not found" rather than an error.
pub fn parse_search_page(html: &str, base: &Url) -> Option<Media> {
    let document = Html::parse_document(html);
    let list = document.select(&LIST_SELECTOR).next()?;
    let item = list.select(&SEARCH_ITEM_SELECTOR).next()?;

    match parse_media(item, base, false) {
        Ok(record) => Some(record),
        Err(error) => {
            let raw = item.text().collect::<String>();
            tracing::error!(%error, raw_media = %raw.trim(), "failed to parse search result");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.imdb.com/chart/moviemeter/").unwrap()
    }

    fn parse_item(html: &str, rank_required: bool) -> Result<Media, ParseError> {
        let document = Html::parse_fragment(html);
        let item = document
            .select(&CHART_ITEM_SELECTOR)
            .next()
            .expect("fixture has no .cli-children item");
        parse_media(item, &base(), rank_required)
    }

    const FULL_ITEM: &str = r#"
        <li class="cli-children">
            <div class="cli-meter-title-header">#1 most popular</div>
            <div class="ipc-title"><a href="/title/tt1160419/">1. Dune</a></div>
            <div class="cli-title-metadata">
                <span class="cli-title-metadata-item">2021</span>
                <span class="cli-title-metadata-item">2h 35m</span>
            </div>
            <div class="cli-ratings-container"><span class="ipc-rating-star">8.0 (900K)</span></div>
        </li>
    "#;

    #[test]
    fn first_number_takes_leading_token() {
        assert_eq!(first_number("#1,234 movies"), Some(1.0));
        assert_eq!(first_number("8.4 rating"), Some(8.4));
        assert_eq!(first_number("2021"), Some(2021.0));
        assert_eq!(first_number(""), None);
        assert_eq!(first_number("no numbers here"), None);
    }

    #[test]
    fn parses_full_chart_item() {
        let media = parse_item(FULL_ITEM, true).unwrap();
        assert_eq!(media.id, "tt1160419");
        assert_eq!(media.title, "1. Dune");
        assert_eq!(media.year, 2021);
        assert_eq!(media.rank, 1);
        assert_eq!(media.rating, 8.0);
        assert_eq!(media.media_type, MediaType::Movie);
        assert_eq!(media.url, "https://www.imdb.com/title/tt1160419/");
    }

    #[test]
    fn missing_rank_is_fatal_only_when_required() {
        let item = r#"
            <li class="cli-children">
                <div class="ipc-title"><a href="/title/tt0903747/">Breaking Bad</a></div>
                <div class="cli-title-metadata">
                    <span class="cli-title-metadata-item">2008</span>
                </div>
            </li>
        "#;
        assert_eq!(parse_item(item, true), Err(ParseError::MissingRank));

        let media = parse_item(item, false).unwrap();
        assert_eq!(media.rank, -1);
        assert_eq!(media.id, "tt0903747");
    }

    #[test]
    fn missing_link_fails() {
        let item = r#"
            <li class="cli-children">
                <div class="cli-meter-title-header">#3</div>
                <div class="ipc-title">Orphaned title</div>
            </li>
        "#;
        assert_eq!(parse_item(item, true), Err(ParseError::MissingUrl));
    }

    #[test]
    fn url_without_title_segment_fails() {
        let item = r#"
            <li class="cli-children">
                <div class="cli-meter-title-header">#3</div>
                <div class="ipc-title"><a href="/video/vi12345/">Trailer</a></div>
                <div class="cli-title-metadata">
                    <span class="cli-title-metadata-item">2020</span>
                </div>
            </li>
        "#;
        assert!(matches!(
            parse_item(item, true),
            Err(ParseError::MissingId { .. })
        ));
    }

    #[test]
    fn missing_year_is_always_fatal() {
        let item = r#"
            <li class="cli-children">
                <div class="cli-meter-title-header">#2</div>
                <div class="ipc-title"><a href="/title/tt0111161/">Shawshank</a></div>
            </li>
        "#;
        assert_eq!(parse_item(item, true), Err(ParseError::InvalidYear));
        assert_eq!(parse_item(item, false), Err(ParseError::InvalidYear));
    }

    #[test]
    fn missing_rating_degrades_to_sentinel() {
        let item = r#"
            <li class="cli-children">
                <div class="cli-meter-title-header">#5</div>
                <div class="ipc-title"><a href="/title/tt9999999/">Unrated</a></div>
                <div class="cli-title-metadata">
                    <span class="cli-title-metadata-item">2024</span>
                </div>
                <div class="cli-ratings-container"><span class="ipc-rating-star"></span></div>
            </li>
        "#;
        let media = parse_item(item, true).unwrap();
        assert_eq!(media.rating, -1.0);
    }

    #[test]
    fn only_exact_tv_series_label_classifies_as_tv() {
        let template = |label: &str| {
            format!(
                r#"
                <li class="cli-children">
                    <div class="cli-meter-title-header">#1</div>
                    <div class="ipc-title"><a href="/title/tt0903747/">Breaking Bad</a></div>
                    <div class="cli-title-metadata">
                        <span class="cli-title-metadata-item">2008</span>
                    </div>
                    <span class="cli-title-type-data">{label}</span>
                </li>
                "#
            )
        };
        let tv = parse_item(&template("TV Series"), true).unwrap();
        assert_eq!(tv.media_type, MediaType::Tv);

        let mini = parse_item(&template("TV Mini Series"), true).unwrap();
        assert_eq!(mini.media_type, MediaType::Movie);

        let empty = parse_item(&template(""), true).unwrap();
        assert_eq!(empty.media_type, MediaType::Movie);
    }

    #[test]
    fn chart_page_skips_broken_items_and_keeps_order() {
        let html = r#"
            <ul class="ipc-metadata-list">
                <li class="cli-children">
                    <div class="cli-meter-title-header">#1</div>
                    <div class="ipc-title"><a href="/title/tt0000001/">First</a></div>
                    <div class="cli-title-metadata">
                        <span class="cli-title-metadata-item">2020</span>
                    </div>
                </li>
                <li class="cli-children">
                    <div class="ipc-title"><a href="/title/tt0000002/">No rank, dropped</a></div>
                    <div class="cli-title-metadata">
                        <span class="cli-title-metadata-item">2021</span>
                    </div>
                </li>
                <li class="cli-children">
                    <div class="cli-meter-title-header">#3</div>
                    <div class="ipc-title"><a href="/title/tt0000003/">Third</a></div>
                    <div class="cli-title-metadata">
                        <span class="cli-title-metadata-item">2022</span>
                    </div>
                </li>
            </ul>
        "#;
        let media = parse_chart_page(html, &base());
        let ids: Vec<&str> = media.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["tt0000001", "tt0000003"]);
    }

    #[test]
    fn chart_page_collects_items_from_every_list() {
        let html = r#"
            <ul class="ipc-metadata-list">
                <li class="cli-children">
                    <div class="cli-meter-title-header">#1</div>
                    <div class="ipc-title"><a href="/title/tt0000001/">First list</a></div>
                    <div class="cli-title-metadata">
                        <span class="cli-title-metadata-item">2020</span>
                    </div>
                </li>
            </ul>
            <ul class="ipc-metadata-list">
                <li class="cli-children">
                    <div class="cli-meter-title-header">#2</div>
                    <div class="ipc-title"><a href="/title/tt0000002/">Second list</a></div>
                    <div class="cli-title-metadata">
                        <span class="cli-title-metadata-item">2021</span>
                    </div>
                </li>
            </ul>
        "#;
        let media = parse_chart_page(html, &base());
        let ids: Vec<&str> = media.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["tt0000001", "tt0000002"]);
    }

    #[test]
    fn search_page_without_results_is_none() {
        let html = r#"<ul class="ipc-metadata-list"></ul>"#;
        assert!(parse_search_page(html, &base()).is_none());

        let html = "<html><body><p>No results found</p></body></html>";
        assert!(parse_search_page(html, &base()).is_none());
    }

    #[test]
    fn search_page_takes_first_result_without_rank() {
        let html = r#"
            <ul class="ipc-metadata-list">
                <li class="ipc-metadata-list-summary-item">
                    <div class="ipc-title"><a href="/title/tt1160419/">Dune</a></div>
                    <div class="cli-title-metadata">
                        <span class="cli-title-metadata-item">2021</span>
                    </div>
                </li>
                <li class="ipc-metadata-list-summary-item">
                    <div class="ipc-title"><a href="/title/tt0087182/">Dune (1984)</a></div>
                    <div class="cli-title-metadata">
                        <span class="cli-title-metadata-item">1984</span>
                    </div>
                </li>
            </ul>
        "#;
        let media = parse_search_page(html, &base()).unwrap();
        assert_eq!(media.id, "tt1160419");
        assert_eq!(media.rank, -1);
    }
}
