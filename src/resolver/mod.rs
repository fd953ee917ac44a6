mod directors;
mod types;

pub use directors::{parse_detail_record, parse_directors};
pub use types::*;

use crate::api::{DetailPageSource, FetchError, MetadataApi, MovieRecord, SearchHit, TitleSearch};
use tracing::{debug, info, warn};

/// Number of search candidates whose full record is checked for a year match
pub const MAX_YEAR_CANDIDATES: usize = 10;

/// A pluggable metadata resolution strategy
pub trait Resolve {
    fn resolve(&self, request: &LookupRequest) -> LookupOutcome;
}

/// Ordered fallback: website title search, structured API search, then
/// director enrichment from the detail page
#[derive(Default)]
pub struct FallbackResolver {
    title_search: Option<Box<dyn TitleSearch>>,
    api: Option<Box<dyn MetadataApi>>,
    details: Option<Box<dyn DetailPageSource>>,
}

impl FallbackResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title_search(mut self, search: impl TitleSearch + 'static) -> Self {
        self.title_search = Some(Box::new(search));
        self
    }

    pub fn with_api(mut self, api: impl MetadataApi + 'static) -> Self {
        self.api = Some(Box::new(api));
        self
    }

    pub fn with_detail_pages(mut self, details: impl DetailPageSource + 'static) -> Self {
        self.details = Some(Box::new(details));
        self
    }

    fn search_website(
        &self,
        title: &str,
        year: Option<u16>,
        failures: &mut Vec<StageFailure>,
    ) -> Option<MovieRecord> {
        let search = self.title_search.as_ref()?;

        let query = match year {
            Some(year) => format!("{} {}", title, year),
            None => title.to_string(),
        };

        match search.find_titles(&query) {
            Ok(hits) => match pick_title_match(&hits, title, year) {
                Some(hit) => {
                    debug!(id = %hit.external_id, "Website search matched");
                    Some(hit.clone().into_record())
                }
                None => {
                    debug!(count = hits.len(), "No website result matched");
                    failures.push(StageFailure::no_match(Stage::TitleSearch));
                    None
                }
            },
            Err(e) => {
                record_fetch_error(Stage::TitleSearch, e, failures);
                None
            }
        }
    }

    fn search_api(
        &self,
        title: &str,
        year: Option<u16>,
        failures: &mut Vec<StageFailure>,
    ) -> Option<MovieRecord> {
        let api = self.api.as_ref()?;

        let hits = match api.search(title) {
            Ok(hits) if !hits.is_empty() => hits,
            Ok(_) => {
                failures.push(StageFailure::no_match(Stage::ApiSearch));
                return None;
            }
            Err(e) => {
                record_fetch_error(Stage::ApiSearch, e, failures);
                return None;
            }
        };

        let Some(year) = year else {
            let first = &hits[0];
            let record = match api.lookup(&first.external_id) {
                Ok(Some(record)) => record,
                Ok(None) => first.clone().into_record(),
                Err(e) => {
                    record_fetch_error(Stage::ApiLookup, e, failures);
                    first.clone().into_record()
                }
            };
            return Some(record);
        };

        for hit in hits.iter().take(MAX_YEAR_CANDIDATES) {
            match api.lookup(&hit.external_id) {
                Ok(Some(record)) if record.year == Some(year) => {
                    debug!(id = %record.external_id, "API candidate matched year {}", year);
                    return Some(record);
                }
                Ok(_) => continue,
                Err(e) => record_fetch_error(Stage::ApiLookup, e, failures),
            }
        }

        failures.push(StageFailure::no_match(Stage::ApiSearch));
        None
    }

    fn lookup_by_id(&self, external_id: &str, failures: &mut Vec<StageFailure>) -> Option<MovieRecord> {
        if let Some(api) = self.api.as_ref() {
            match api.lookup(external_id) {
                Ok(Some(record)) => return Some(record),
                Ok(None) => failures.push(StageFailure::no_match(Stage::ApiLookup)),
                Err(e) => record_fetch_error(Stage::ApiLookup, e, failures),
            }
        }

        // Without the API the detail page's structured data is the record
        let details = self.details.as_ref()?;
        match details.fetch_detail_page(external_id) {
            Ok(html) => {
                let record = parse_detail_record(external_id, &html);
                if record.is_none() {
                    failures.push(StageFailure::no_match(Stage::DetailPage));
                }
                record
            }
            Err(e) => {
                record_fetch_error(Stage::DetailPage, e, failures);
                None
            }
        }
    }

    fn enrich_directors(&self, record: &mut MovieRecord, failures: &mut Vec<StageFailure>) {
        if record.has_directors() {
            return;
        }

        let Some(details) = self.details.as_ref() else {
            return;
        };

        match details.fetch_detail_page(&record.external_id) {
            Ok(html) => {
                let directors = parse_directors(&html);
                if directors.is_empty() {
                    debug!(id = %record.external_id, "Detail page named no directors");
                    failures.push(StageFailure::no_match(Stage::DetailPage));
                } else {
                    info!(id = %record.external_id, "Enriched directors: {}", directors.join(", "));
                    record.directors = directors;
                }
            }
            Err(e) => record_fetch_error(Stage::DetailPage, e, failures),
        }
    }
}

impl Resolve for FallbackResolver {
    fn resolve(&self, request: &LookupRequest) -> LookupOutcome {
        let mut failures = Vec::new();

        let found = match request {
            LookupRequest::ById { external_id } => self
                .lookup_by_id(external_id, &mut failures)
                .map(|record| (record, Stage::ApiLookup)),
            LookupRequest::Search { title, year } => self
                .search_website(title, *year, &mut failures)
                .map(|record| (record, Stage::TitleSearch))
                .or_else(|| {
                    self.search_api(title, *year, &mut failures)
                        .map(|record| (record, Stage::ApiSearch))
                }),
        };

        match found {
            Some((mut record, stage)) => {
                self.enrich_directors(&mut record, &mut failures);
                LookupOutcome::Found {
                    record,
                    stage,
                    failures,
                }
            }
            None => {
                info!("No match for {}", request);
                LookupOutcome::NotFound { failures }
            }
        }
    }
}

fn record_fetch_error(stage: Stage, error: FetchError, failures: &mut Vec<StageFailure>) {
    warn!("{} failed: {}", stage, error);
    failures.push(StageFailure::fetch(stage, error));
}

/// First hit whose title matches exactly or nearly, corroborated by the year when given
fn pick_title_match<'a>(hits: &'a [SearchHit], title: &str, year: Option<u16>) -> Option<&'a SearchHit> {
    let wanted = normalize_title(title);
    if wanted.is_empty() {
        return None;
    }

    hits.iter().find(|hit| {
        let candidate = normalize_title(&hit.title);
        let title_matches = !candidate.is_empty()
            && (candidate == wanted || candidate.contains(&wanted) || wanted.contains(&candidate));

        let year_matches = match year {
            Some(year) => hit.year == Some(year) || hit.context.contains(&year.to_string()),
            None => true,
        };

        title_matches && year_matches
    })
}

fn normalize_title(title: &str) -> String {
    let replaced: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}
