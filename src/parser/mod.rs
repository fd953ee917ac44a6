mod types;

pub use types::*;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

// "2024 The Other Place 1080p" -> year first, title after
static LEADING_YEAR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^((?:19|20)\d{2})\s+(\S.*)$").unwrap());

// First standalone year in [1900, 2099]
static YEAR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b((?:19|20)\d{2})\b").unwrap());

// Bracketed release tags such as [YTS.MX] or [rarbg]
static BRACKET_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

// Resolution markers: 480p, 720p, 1080p, 2160p, 1080i
static RESOLUTION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3,4}[pi]$").unwrap());

static EXTENSION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+)\.([A-Za-z0-9]{1,5})$").unwrap());

// Folders this tool creates: "1995 - Heat"
static TITLE_FOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^((?:19|20)\d{2}) - (.+)$").unwrap());

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Scene-release tokens removed from titles, compared lowercase
const NOISE_TOKENS: &[&str] = &[
    // resolution / quality
    "4k", "uhd", "hdr", "hdr10", "hd", "sd",
    // codecs
    "x264", "x265", "h264", "h265", "hevc", "avc", "xvid", "divx", "aac",
    "aac2", "ac3", "dts", "dd5", "ddp5", "10bit", "8bit",
    // sources
    "bluray", "blu-ray", "brrip", "bdrip", "dvdrip", "hdrip", "webrip", "web-dl", "webdl", "web",
    "hdtv", "remux", "dvd", "dvdr", "dvd5", "dvd9", "pal", "ntsc",
    // release groups and tags
    "yify", "yts", "rarbg", "softsub", "@lubokvideo", "vedett", "avamovie", "fw", "dream",
];

/// Parse a video file name into a search query
///
/// The extension is stripped before parsing.
pub fn parse_filename(name: &str) -> Result<ParsedQuery, ParseError> {
    parse_name(name, strip_extension(name))
}

/// Parse a folder name (no extension handling) into a search query
pub fn parse_folder_name(name: &str) -> Result<ParsedQuery, ParseError> {
    parse_name(name, name)
}

/// Read back a `"{year} - {title}"` folder name. The title is taken as is,
/// without noise removal; sanitized `_` become spaces.
pub fn parse_title_folder(name: &str) -> Option<ParsedQuery> {
    let captures = TITLE_FOLDER_REGEX.captures(name)?;
    let year: u16 = captures.get(1)?.as_str().parse().ok()?;
    let title = captures.get(2)?.as_str().replace('_', " ");
    let title = WHITESPACE_REGEX.replace_all(title.trim(), " ").to_string();

    if title.chars().count() < 2 {
        return None;
    }

    debug!(name = %name, title = %title, year, "Parsed title folder");
    Some(ParsedQuery::new(title, Some(year)))
}

fn parse_name(original: &str, stem: &str) -> Result<ParsedQuery, ParseError> {
    let normalized = normalize_separators(stem);
    trace!(name = %original, normalized = %normalized, "Parsing name");

    let (raw_title, year) = match split_leading_year(&normalized) {
        Some((year, rest)) => (rest.to_string(), Some(year)),
        None => split_at_year(&normalized),
    };

    let title = clean_title(&raw_title);

    if title.chars().count() < 2 {
        debug!(name = %original, "No usable title after cleanup");
        return Err(ParseError::EmptyTitle(original.to_string()));
    }

    debug!(name = %original, title = %title, year = ?year, "Parsed name");

    Ok(ParsedQuery::new(title, year))
}

/// Strip a file extension: 1-5 alphanumeric characters with at least one letter
fn strip_extension(name: &str) -> &str {
    match EXTENSION_REGEX.captures(name) {
        Some(captures) => {
            let extension = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
            if extension.chars().any(|c| c.is_ascii_alphabetic()) {
                captures.get(1).map(|m| m.as_str()).unwrap_or(name)
            } else {
                name
            }
        }
        None => name,
    }
}

fn normalize_separators(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if c == '.' || c == '_' { ' ' } else { c })
        .collect();
    WHITESPACE_REGEX.replace_all(replaced.trim(), " ").to_string()
}

fn split_leading_year(name: &str) -> Option<(u16, &str)> {
    let captures = LEADING_YEAR_REGEX.captures(name)?;
    let year: u16 = captures.get(1)?.as_str().parse().ok()?;
    let rest = captures.get(2)?.as_str();
    Some((year, rest))
}

/// Everything from the first year token onward is release noise
fn split_at_year(name: &str) -> (String, Option<u16>) {
    match YEAR_REGEX.captures(name) {
        Some(captures) => {
            let Some(token) = captures.get(1) else {
                return (name.to_string(), None);
            };
            let year = token.as_str().parse().ok();
            (name[..token.start()].to_string(), year)
        }
        None => (name.to_string(), None),
    }
}

fn clean_title(raw: &str) -> String {
    let without_brackets = BRACKET_TAG_REGEX.replace_all(raw, " ");

    let kept: Vec<&str> = without_brackets
        .split_whitespace()
        .filter(|token| !is_noise_token(token))
        .collect();

    let joined = kept.join(" ");
    joined
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '(' | ')' | '[' | ']' | ','))
        .to_string()
}

fn is_noise_token(token: &str) -> bool {
    let lowered = token
        .trim_matches(|c: char| matches!(c, '(' | ')' | '[' | ']'))
        .to_lowercase();

    if lowered.is_empty() {
        return false;
    }

    if is_single_noise(&lowered) {
        return true;
    }

    // Compound tags like x264-RARBG
    lowered.contains('-')
        && lowered
            .split('-')
            .all(|part| !part.is_empty() && is_single_noise(part))
}

fn is_single_noise(token: &str) -> bool {
    NOISE_TOKENS.contains(&token) || RESOLUTION_REGEX.is_match(token)
}
