use crate::api::{FetchError, MovieRecord};
use crate::parser::parse_folder_name;
use std::fmt;

/// What to resolve: a parsed title or an explicit provider id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupRequest {
    Search { title: String, year: Option<u16> },
    ById { external_id: String },
}

impl LookupRequest {
    /// Interpret operator input: `tt1234567` is an id, anything else a
    /// title with an optional year ("Heat 1995")
    pub fn from_operator_input(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if is_external_id(input) {
            return Some(LookupRequest::ById {
                external_id: input.to_string(),
            });
        }

        let request = match parse_folder_name(input) {
            Ok(query) => LookupRequest::Search {
                title: query.title_guess,
                year: query.year_guess,
            },
            Err(_) => LookupRequest::Search {
                title: input.to_string(),
                year: None,
            },
        };
        Some(request)
    }
}

impl fmt::Display for LookupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupRequest::Search {
                title,
                year: Some(year),
            } => write!(f, "'{}' ({})", title, year),
            LookupRequest::Search { title, year: None } => write!(f, "'{}'", title),
            LookupRequest::ById { external_id } => write!(f, "id {}", external_id),
        }
    }
}

pub fn is_external_id(value: &str) -> bool {
    value.len() > 2
        && value.starts_with("tt")
        && value[2..].chars().all(|c| c.is_ascii_digit())
}

/// Resolution stage, in fallback order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    TitleSearch,
    ApiSearch,
    ApiLookup,
    DetailPage,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::TitleSearch => "Website title search",
            Stage::ApiSearch => "API search",
            Stage::ApiLookup => "API lookup",
            Stage::DetailPage => "Detail page",
        };
        f.write_str(name)
    }
}

/// Why a stage produced nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    NoMatch,
    Fetch(FetchError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFailure {
    pub stage: Stage,
    pub failure: LookupFailure,
}

impl StageFailure {
    pub fn no_match(stage: Stage) -> Self {
        Self {
            stage,
            failure: LookupFailure::NoMatch,
        }
    }

    pub fn fetch(stage: Stage, error: FetchError) -> Self {
        Self {
            stage,
            failure: LookupFailure::Fetch(error),
        }
    }
}

impl fmt::Display for StageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            LookupFailure::NoMatch => write!(f, "{}: no match", self.stage),
            LookupFailure::Fetch(e) => write!(f, "{}: {}", self.stage, e),
        }
    }
}

/// Result of a resolution. Not finding anything is an outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found {
        record: MovieRecord,
        stage: Stage,
        failures: Vec<StageFailure>,
    },
    NotFound {
        failures: Vec<StageFailure>,
    },
}

impl LookupOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found { .. })
    }

    pub fn record(&self) -> Option<&MovieRecord> {
        match self {
            LookupOutcome::Found { record, .. } => Some(record),
            LookupOutcome::NotFound { .. } => None,
        }
    }

    pub fn into_record(self) -> Option<MovieRecord> {
        match self {
            LookupOutcome::Found { record, .. } => Some(record),
            LookupOutcome::NotFound { .. } => None,
        }
    }

    pub fn failures(&self) -> &[StageFailure] {
        match self {
            LookupOutcome::Found { failures, .. } | LookupOutcome::NotFound { failures } => failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_input_id() {
        let request = LookupRequest::from_operator_input(" tt0133093 ").unwrap();
        assert_eq!(
            request,
            LookupRequest::ById {
                external_id: "tt0133093".to_string()
            }
        );
    }

    #[test]
    fn test_operator_input_title_with_year() {
        let request = LookupRequest::from_operator_input("The Matrix 1999").unwrap();
        assert_eq!(
            request,
            LookupRequest::Search {
                title: "The Matrix".to_string(),
                year: Some(1999)
            }
        );
    }

    #[test]
    fn test_operator_input_empty() {
        assert!(LookupRequest::from_operator_input("   ").is_none());
    }

    #[test]
    fn test_operator_input_short_title_kept_verbatim() {
        let request = LookupRequest::from_operator_input("M").unwrap();
        assert_eq!(
            request,
            LookupRequest::Search {
                title: "M".to_string(),
                year: None
            }
        );
    }

    #[test]
    fn test_is_external_id() {
        assert!(is_external_id("tt0000001"));
        assert!(!is_external_id("tt"));
        assert!(!is_external_id("ttanic"));
        assert!(!is_external_id("0133093"));
    }

    #[test]
    fn test_stage_failure_display() {
        let failure = StageFailure::fetch(Stage::ApiSearch, FetchError::Timeout);
        assert_eq!(failure.to_string(), "API search: Request timed out");
        assert_eq!(
            StageFailure::no_match(Stage::TitleSearch).to_string(),
            "Website title search: no match"
        );
    }

    #[test]
    fn test_outcome_accessors() {
        let outcome = LookupOutcome::NotFound {
            failures: vec![StageFailure::no_match(Stage::ApiSearch)],
        };
        assert!(!outcome.is_found());
        assert!(outcome.record().is_none());
        assert_eq!(outcome.failures().len(), 1);
    }
}
