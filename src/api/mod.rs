mod imdb;
mod omdb;
mod types;

pub use imdb::ImdbClient;
pub use omdb::OmdbClient;
pub use types::{detail_url, ApiConfig, FetchError, MovieRecord, SearchHit};

use std::env;

/// Environment variable names for provider configuration
pub const ENV_OMDB_API_KEY: &str = "OMDB_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "MOVIE_SORTER_TIMEOUT_SECS";
pub const ENV_DELAY_MS: &str = "MOVIE_SORTER_DELAY_MS";

/// Structured search and lookup API
pub trait MetadataApi {
    /// Search by title. Results carry ids and titles but usually no directors.
    fn search(&self, title: &str) -> Result<Vec<SearchHit>, FetchError>;

    /// Fetch the full record for an id. `Ok(None)` means the id is unknown.
    fn lookup(&self, external_id: &str) -> Result<Option<MovieRecord>, FetchError>;
}

/// Website title search
pub trait TitleSearch {
    fn find_titles(&self, query: &str) -> Result<Vec<SearchHit>, FetchError>;
}

/// Raw detail page, used only for director enrichment
pub trait DetailPageSource {
    fn fetch_detail_page(&self, external_id: &str) -> Result<String, FetchError>;
}

/// Load provider configuration from environment variables
///
/// - `OMDB_API_KEY`: key for the structured search API (stage skipped when empty)
/// - `MOVIE_SORTER_TIMEOUT_SECS`: per-request timeout
/// - `MOVIE_SORTER_DELAY_MS`: politeness delay before scrape requests
///
/// These can be set in a `.env` file in the working directory.
pub fn config_from_env() -> ApiConfig {
    let defaults = ApiConfig::default();

    let timeout_secs = env::var(ENV_TIMEOUT_SECS)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.timeout_secs);
    let politeness_delay_ms = env::var(ENV_DELAY_MS)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.politeness_delay_ms);

    ApiConfig {
        omdb_api_key: env::var(ENV_OMDB_API_KEY).unwrap_or_default(),
        timeout_secs,
        politeness_delay_ms,
        ..defaults
    }
}
