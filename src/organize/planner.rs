use crate::api::MovieRecord;
use crate::scanner::MediaItem;
use std::path::{Path, PathBuf};

/// Folder used when a record names no director
pub const UNKNOWN_DIRECTOR: &str = "Unknown";

const FORBIDDEN_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Where an item goes. `target_filename` is `None` for DVD folders, whose
/// contents are merged into `target_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizePlan {
    pub target_dir: PathBuf,
    pub target_filename: Option<String>,
}

impl OrganizePlan {
    pub fn target_path(&self) -> PathBuf {
        match &self.target_filename {
            Some(name) => self.target_dir.join(name),
            None => self.target_dir.clone(),
        }
    }
}

/// Make a string safe as a single path component
pub fn sanitize_component(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if FORBIDDEN_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    replaced
        .trim()
        .trim_end_matches(['.', ' '])
        .to_string()
}

pub fn director_folder_name(record: &MovieRecord) -> String {
    let joined = sanitize_component(&record.directors.join(", "));
    if joined.is_empty() {
        UNKNOWN_DIRECTOR.to_string()
    } else {
        joined
    }
}

/// `"{year} - {title}"`, or the bare title when the year is unknown
pub fn title_folder_name(record: &MovieRecord) -> String {
    let title = sanitize_component(&record.title);
    match record.year {
        Some(year) => format!("{} - {}", year, title),
        None => title,
    }
}

pub fn canonical_dir(root: &Path, record: &MovieRecord) -> PathBuf {
    root.join(director_folder_name(record))
        .join(title_folder_name(record))
}

/// Original extension including the dot, or empty
pub fn original_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

pub fn plan(root: &Path, item: &MediaItem, record: &MovieRecord) -> OrganizePlan {
    let target_dir = canonical_dir(root, record);

    let target_filename = if item.is_dvd_folder {
        None
    } else {
        Some(format!(
            "{}{}",
            sanitize_component(&record.title),
            original_extension(&item.path)
        ))
    };

    OrganizePlan {
        target_dir,
        target_filename,
    }
}
