use super::types::{detail_url, ApiConfig, FetchError, SearchHit};
use super::{DetailPageSource, TitleSearch};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info};

const FIND_URL: &str = "https://www.imdb.com/find/";

static TITLE_ID_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"/title/(tt\d+)").unwrap());
static YEAR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b((?:19|20)\d{2})\b").unwrap());

// Result rows across the current and the legacy find page layouts
const RESULT_ROW_SELECTORS: &[&str] = &[
    "li.find-title-result",
    "li.ipc-metadata-list-summary-item",
    "tr.findResult",
];

const RESULT_LINK_SELECTORS: &[&str] = &[
    "a.ipc-metadata-list-summary-item__t",
    "td.result_text a",
    "a[href*='/title/tt']",
];

/// Fixed pause before every scrape request
struct Throttle {
    delay: Duration,
}

impl Throttle {
    fn new(delay: Duration) -> Self {
        Self { delay }
    }

    fn pause(&self) {
        if !self.delay.is_zero() {
            debug!("Politeness delay: waiting {:?}", self.delay);
            std::thread::sleep(self.delay);
        }
    }
}

/// IMDb website client: title search and detail pages
pub struct ImdbClient {
    client: Client,
    throttle: Throttle,
}

impl ImdbClient {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            throttle: Throttle::new(config.politeness_delay()),
        })
    }

    fn get_page(&self, url: &str, query: &[(&str, &str)]) -> Result<String, FetchError> {
        self.throttle.pause();

        debug!("Requesting: {} {:?}", url, query);

        let response = self
            .client
            .get(url)
            .query(query)
            .header("Accept-Language", "en-US,en;q=0.8")
            .send()?;
        let status = response.status();

        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text()?)
    }

    fn parse_find_page(html: &str) -> Vec<SearchHit> {
        let document = Html::parse_document(html);
        let mut hits = Vec::new();
        let mut seen = HashSet::new();

        for row_selector in RESULT_ROW_SELECTORS {
            let Ok(row_selector) = Selector::parse(row_selector) else {
                continue;
            };

            for row in document.select(&row_selector) {
                if let Some(hit) = parse_result_row(row) {
                    if seen.insert(hit.external_id.clone()) {
                        hits.push(hit);
                    }
                }
            }

            if !hits.is_empty() {
                break;
            }
        }

        debug!(count = hits.len(), "Parsed find page");
        hits
    }
}

fn parse_result_row(row: ElementRef<'_>) -> Option<SearchHit> {
    let link = RESULT_LINK_SELECTORS
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .find_map(|selector| row.select(&selector).next())?;

    let href = link.value().attr("href")?;
    let external_id = TITLE_ID_REGEX.captures(href)?.get(1)?.as_str().to_string();

    let title = collapse_text(link.text());
    if title.is_empty() {
        return None;
    }

    let context = collapse_text(row.text());
    let year = context
        .strip_prefix(title.as_str())
        .unwrap_or(&context)
        .split_whitespace()
        .find_map(|token| {
            YEAR_REGEX
                .captures(token)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse().ok())
        });

    Some(SearchHit::new(external_id, title, year).with_context(context))
}

fn collapse_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

impl TitleSearch for ImdbClient {
    fn find_titles(&self, query: &str) -> Result<Vec<SearchHit>, FetchError> {
        info!("Searching IMDb for '{}'", query);
        let html = self.get_page(FIND_URL, &[("q", query), ("s", "tt"), ("ttype", "ft")])?;
        Ok(Self::parse_find_page(&html))
    }
}

impl DetailPageSource for ImdbClient {
    fn fetch_detail_page(&self, external_id: &str) -> Result<String, FetchError> {
        info!("Fetching detail page for {}", external_id);
        self.get_page(&detail_url(external_id), &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_client_creation() {
        let client = ImdbClient::new(&ApiConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_parse_find_page_current_layout() {
        let html = r#"<html><body><ul>
            <li class="ipc-metadata-list-summary-item find-title-result">
                <div><a class="ipc-metadata-list-summary-item__t" href="/title/tt0113277/?ref_=fn_tt_tt_1">Heat</a>
                <ul><li><span class="ipc-metadata-list-summary-item__li">1995</span></li></ul>
                <ul><li><span>Al Pacino, Robert De Niro</span></li></ul></div>
            </li>
            <li class="ipc-metadata-list-summary-item find-title-result">
                <div><a class="ipc-metadata-list-summary-item__t" href="/title/tt0093164/">Heat</a>
                <ul><li><span>1986</span></li></ul></div>
            </li>
        </ul></body></html>"#;

        let hits = ImdbClient::parse_find_page(html);

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].external_id, "tt0113277");
        assert_eq!(hits[0].title, "Heat");
        assert_eq!(hits[0].year, Some(1995));
        assert!(hits[0].context.contains("Al Pacino"));
        assert_eq!(hits[1].year, Some(1986));
    }

    #[test]
    fn test_parse_find_page_legacy_layout() {
        let html = r#"<table>
            <tr class="findResult odd"><td class="result_text">
                <a href="/title/tt0079944/">Stalker</a> (1979)
            </td></tr>
        </table>"#;

        let hits = ImdbClient::parse_find_page(html);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].external_id, "tt0079944");
        assert_eq!(hits[0].year, Some(1979));
    }

    #[test]
    fn test_parse_find_page_year_in_title_not_used() {
        let html = r#"<ul><li class="find-title-result">
            <a class="ipc-metadata-list-summary-item__t" href="/title/tt1190080/">2012</a>
            <span>2009</span>
        </li></ul>"#;

        let hits = ImdbClient::parse_find_page(html);

        assert_eq!(hits[0].title, "2012");
        assert_eq!(hits[0].year, Some(2009));
    }

    #[test]
    fn test_parse_find_page_no_results() {
        let hits = ImdbClient::parse_find_page("<html><body>No results</body></html>");
        assert!(hits.is_empty());
    }

    #[test]
    fn test_throttle_waits() {
        let throttle = Throttle::new(Duration::from_millis(50));

        let start = Instant::now();
        throttle.pause();
        throttle.pause();

        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[test]
    fn test_throttle_zero_delay() {
        let throttle = Throttle::new(Duration::ZERO);

        let start = Instant::now();
        throttle.pause();

        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
