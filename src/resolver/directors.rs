//! Director extraction from a title detail page.
//!
//! The embedded JSON-LD block is preferred. When it is missing or has no
//! director entry, the principal-credit listing is located by its label.

use crate::api::MovieRecord;
use chrono::{Datelike, NaiveDate};
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::{debug, trace};

const JSON_LD_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

// Current layout, then the legacy credit summary
const CREDIT_ROW_SELECTORS: &[(&str, &str, &str)] = &[
    (
        r#"li[data-testid="title-pc-principal-credit"]"#,
        ".ipc-metadata-list-item__label",
        "a.ipc-metadata-list-item__list-content-item",
    ),
    ("div.credit_summary_item", "h4", "a"),
];

/// Directors named on a detail page, in page order
pub fn parse_directors(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let from_json = json_ld_blocks(&document)
        .iter()
        .map(|block| people(block.get("director")))
        .find(|names| !names.is_empty());

    if let Some(names) = from_json {
        debug!(count = names.len(), "Directors from structured data");
        return names;
    }

    let names = principal_credit_directors(&document);
    debug!(count = names.len(), "Directors from credit listing");
    names
}

/// Full record from the structured data block, used when the lookup API is unavailable
pub fn parse_detail_record(external_id: &str, html: &str) -> Option<MovieRecord> {
    let document = Html::parse_document(html);

    json_ld_blocks(&document).into_iter().find_map(|block| {
        let title = block.get("name").and_then(Value::as_str)?;
        let year = block
            .get("datePublished")
            .and_then(Value::as_str)
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
            .and_then(|date| u16::try_from(date.year()).ok());
        let directors = people(block.get("director"));

        Some(MovieRecord::new(external_id, decode_entities(title), year).with_directors(directors))
    })
}

fn json_ld_blocks(document: &Html) -> Vec<Value> {
    let Ok(selector) = Selector::parse(JSON_LD_SELECTOR) else {
        return Vec::new();
    };

    let mut blocks = Vec::new();
    for script in document.select(&selector) {
        let raw: String = script.text().collect();
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => blocks.extend(items),
            Ok(value) => blocks.push(value),
            Err(e) => trace!("Skipping unparsable JSON-LD block: {}", e),
        }
    }
    blocks
}

/// `director` may be a single Person, a list of Persons, or a bare string
fn people(value: Option<&Value>) -> Vec<String> {
    let name_of = |v: &Value| match v {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("name").and_then(Value::as_str).map(str::to_string),
        _ => None,
    };

    let names: Vec<String> = match value {
        Some(Value::Array(items)) => items.iter().filter_map(name_of).collect(),
        Some(other) => name_of(other).into_iter().collect(),
        None => Vec::new(),
    };

    dedupe(names.iter().map(|n| decode_entities(n)))
}

fn principal_credit_directors(document: &Html) -> Vec<String> {
    for (row, label, link) in CREDIT_ROW_SELECTORS {
        let (Ok(row), Ok(label), Ok(link)) =
            (Selector::parse(row), Selector::parse(label), Selector::parse(link))
        else {
            continue;
        };

        for credit in document.select(&row) {
            if !is_director_row(credit, &label) {
                continue;
            }

            let names = dedupe(credit.select(&link).map(|a| {
                a.text()
                    .flat_map(str::split_whitespace)
                    .collect::<Vec<_>>()
                    .join(" ")
            }));

            if !names.is_empty() {
                return names;
            }
        }
    }

    Vec::new()
}

fn is_director_row(credit: ElementRef<'_>, label: &Selector) -> bool {
    let text: String = match credit.select(label).next() {
        Some(label) => label.text().collect(),
        None => credit.text().take(1).collect(),
    };
    text.trim().to_lowercase().starts_with("director")
}

fn dedupe(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let name = name.trim().to_string();
        if !name.is_empty() && !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

fn decode_entities(text: &str) -> String {
    text.replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
