use super::types::{ApiConfig, FetchError, MovieRecord, SearchHit};
use super::MetadataApi;
use chrono::{Datelike, NaiveDate};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info};

const API_BASE_URL: &str = "https://www.omdbapi.com/";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<SearchItem>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Type", default)]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct TitleResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Released")]
    released: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

/// OMDb JSON API client
pub struct OmdbClient {
    client: Client,
    config: ApiConfig,
}

impl OmdbClient {
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn get(&self, params: &[(&str, &str)]) -> Result<String, FetchError> {
        if !self.config.has_omdb_key() {
            return Err(FetchError::NotConfigured(super::ENV_OMDB_API_KEY.to_string()));
        }

        let mut query = vec![("apikey", self.config.omdb_api_key.as_str())];
        query.extend_from_slice(params);

        debug!(params = ?params, "Requesting OMDb");

        let response = self.client.get(API_BASE_URL).query(&query).send()?;
        let status = response.status();

        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text()?)
    }

    fn parse_search_response(body: &str) -> Result<Vec<SearchHit>, FetchError> {
        let parsed: SearchResponse = serde_json::from_str(body)?;

        if parsed.response != "True" {
            let message = parsed.error.unwrap_or_default();
            if is_not_found_message(&message) {
                return Ok(Vec::new());
            }
            return Err(FetchError::Provider(message));
        }

        Ok(parsed
            .search
            .into_iter()
            .filter(|item| item.kind.is_empty() || item.kind == "movie")
            .map(|item| {
                let year = parse_year(&item.year);
                SearchHit::new(item.imdb_id, item.title, year).with_context(item.year)
            })
            .collect())
    }

    fn parse_title_response(body: &str) -> Result<Option<MovieRecord>, FetchError> {
        let parsed: TitleResponse = serde_json::from_str(body)?;

        if parsed.response != "True" {
            let message = parsed.error.unwrap_or_default();
            if is_not_found_message(&message) {
                return Ok(None);
            }
            return Err(FetchError::Provider(message));
        }

        let (Some(imdb_id), Some(title)) = (parsed.imdb_id, parsed.title) else {
            return Err(FetchError::Parse("record is missing imdbID or Title".to_string()));
        };

        let year = parsed
            .year
            .as_deref()
            .and_then(parse_year)
            .or_else(|| parsed.released.as_deref().and_then(parse_released_year));

        let directors = parsed
            .director
            .as_deref()
            .map(split_people)
            .unwrap_or_default();

        Ok(Some(MovieRecord::new(imdb_id, title, year).with_directors(directors)))
    }
}

impl MetadataApi for OmdbClient {
    fn search(&self, title: &str) -> Result<Vec<SearchHit>, FetchError> {
        info!("Searching OMDb for '{}'", title);
        let body = self.get(&[("s", title), ("type", "movie")])?;
        Self::parse_search_response(&body)
    }

    fn lookup(&self, external_id: &str) -> Result<Option<MovieRecord>, FetchError> {
        info!("Looking up {} on OMDb", external_id);
        let body = self.get(&[("i", external_id)])?;
        Self::parse_title_response(&body)
    }
}

fn is_not_found_message(message: &str) -> bool {
    let lowered = message.to_lowercase();
    lowered.contains("not found") || lowered.contains("incorrect imdb id")
}

/// First four-digit run of a year field such as "1994" or "2010–2014"
fn parse_year(value: &str) -> Option<u16> {
    let digits: String = value
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.len() == 4 {
        digits.parse().ok()
    } else {
        None
    }
}

/// "14 Oct 1994" style release date
fn parse_released_year(value: &str) -> Option<u16> {
    NaiveDate::parse_from_str(value.trim(), "%d %b %Y")
        .ok()
        .and_then(|date| u16::try_from(date.year()).ok())
}

/// Split "Lana Wachowski, Lilly Wachowski" and drop "N/A"
fn split_people(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|name| name.trim())
        .filter(|name| !name.is_empty() && *name != "N/A")
        .map(str::to_string)
        .collect()
}
