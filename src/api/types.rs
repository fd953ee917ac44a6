use std::time::Duration;
use thiserror::Error;

/// Movie metadata fetched from a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRecord {
    pub external_id: String,
    pub title: String,
    pub year: Option<u16>,
    pub directors: Vec<String>,
}

impl MovieRecord {
    pub fn new(external_id: impl Into<String>, title: impl Into<String>, year: Option<u16>) -> Self {
        Self {
            external_id: external_id.into(),
            title: title.into(),
            year,
            directors: Vec::new(),
        }
    }

    pub fn with_directors(mut self, directors: Vec<String>) -> Self {
        self.directors = directors;
        self
    }

    pub fn has_directors(&self) -> bool {
        self.directors.iter().any(|d| !d.trim().is_empty())
    }

    /// Human-verifiable detail page for this record
    pub fn detail_url(&self) -> String {
        detail_url(&self.external_id)
    }
}

pub fn detail_url(external_id: &str) -> String {
    format!("https://www.imdb.com/title/{}/", external_id)
}

/// A single search result before the full record is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub external_id: String,
    pub title: String,
    pub year: Option<u16>,
    /// Surrounding text of the result (type, year, cast), used for year corroboration
    pub context: String,
}

impl SearchHit {
    pub fn new(external_id: impl Into<String>, title: impl Into<String>, year: Option<u16>) -> Self {
        Self {
            external_id: external_id.into(),
            title: title.into(),
            year,
            context: String::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn into_record(self) -> MovieRecord {
        MovieRecord::new(self.external_id, self.title, self.year)
    }
}

/// HTTP provider configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub omdb_api_key: String,
    pub timeout_secs: u64,
    /// Delay before each detail-page or scrape request
    pub politeness_delay_ms: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            omdb_api_key: String::new(),
            timeout_secs: 15,
            politeness_delay_ms: 500,
            user_agent: format!(
                "Mozilla/5.0 (compatible; movie-sorter/{})",
                env!("CARGO_PKG_VERSION")
            ),
        }
    }
}

impl ApiConfig {
    pub fn new(omdb_api_key: impl Into<String>) -> Self {
        Self {
            omdb_api_key: omdb_api_key.into(),
            ..Default::default()
        }
    }

    pub fn has_omdb_key(&self) -> bool {
        !self.omdb_api_key.is_empty()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms)
    }
}

/// Failure of a single external call. Never fatal to the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Provider reported: {0}")]
    Provider(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_detail_url() {
        let record = MovieRecord::new("tt0133093", "The Matrix", Some(1999));
        assert_eq!(record.detail_url(), "https://www.imdb.com/title/tt0133093/");
    }

    #[test]
    fn test_record_has_directors() {
        let record = MovieRecord::new("tt1", "Test", None);
        assert!(!record.has_directors());

        let record = record.with_directors(vec!["  ".to_string()]);
        assert!(!record.has_directors());

        let record = MovieRecord::new("tt1", "Test", None).with_directors(vec!["Jane Doe".to_string()]);
        assert!(record.has_directors());
    }

    #[test]
    fn test_hit_into_record() {
        let hit = SearchHit::new("tt2", "Heat", Some(1995)).with_context("1995 Al Pacino");
        let record = hit.into_record();
        assert_eq!(record.external_id, "tt2");
        assert_eq!(record.year, Some(1995));
        assert!(record.directors.is_empty());
    }

    #[test]
    fn test_api_config_default() {
        let config = ApiConfig::default();

        assert!(!config.has_omdb_key());
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.politeness_delay(), Duration::from_millis(500));
        assert!(config.user_agent.contains("movie-sorter"));
    }

    #[test]
    fn test_api_config_new() {
        let config = ApiConfig::new("abc123");
        assert!(config.has_omdb_key());
        assert_eq!(config.omdb_api_key, "abc123");
    }

    #[test]
    fn test_fetch_error_display() {
        assert!(FetchError::Status(503).to_string().contains("503"));
        assert!(FetchError::Timeout.to_string().contains("timed out"));
        assert!(FetchError::NotConfigured("OMDB_API_KEY".into())
            .to_string()
            .contains("OMDB_API_KEY"));
    }
}
