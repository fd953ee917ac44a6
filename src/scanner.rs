use crate::cleaner::is_video;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// Child directory names that mark a DVD folder
pub const DVD_MARKERS: &[&str] = &["VIDEO_TS", "AUDIO_TS", "JACKET", "AUXDATA", "CERTIFICATE"];

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory: {0}")]
    IoError(#[from] std::io::Error),
}

/// One unit of work: a video file or a whole DVD folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub path: PathBuf,
    pub is_dvd_folder: bool,
    pub original_name: String,
}

impl MediaItem {
    pub fn file(path: PathBuf) -> Self {
        Self::new(path, false)
    }

    pub fn dvd_folder(path: PathBuf) -> Self {
        Self::new(path, true)
    }

    fn new(path: PathBuf, is_dvd_folder: bool) -> Self {
        let original_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            path,
            is_dvd_folder,
            original_name,
        }
    }

    /// Directory the item currently sits in as far as organizing goes
    pub fn location(&self) -> &Path {
        if self.is_dvd_folder {
            &self.path
        } else {
            self.path.parent().unwrap_or(&self.path)
        }
    }
}

/// DVD folders first, then loose video files; both sorted by path
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub dvd_folders: Vec<MediaItem>,
    pub files: Vec<MediaItem>,
}

impl ScanResult {
    pub fn is_empty(&self) -> bool {
        self.dvd_folders.is_empty() && self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dvd_folders.len() + self.files.len()
    }

    /// All items in processing order
    pub fn into_items(self) -> Vec<MediaItem> {
        let mut items = self.dvd_folders;
        items.extend(self.files);
        items
    }
}

pub fn validate_root(root: &Path) -> Result<(), ScannerError> {
    if !root.exists() {
        return Err(ScannerError::PathNotFound(root.to_path_buf()));
    }

    if !root.is_dir() {
        return Err(ScannerError::NotADirectory(root.to_path_buf()));
    }

    std::fs::read_dir(root).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ScannerError::PermissionDenied(root.to_path_buf())
        } else {
            ScannerError::IoError(e)
        }
    })?;

    Ok(())
}

pub fn is_dvd_folder(path: &Path) -> bool {
    DVD_MARKERS
        .iter()
        .any(|marker| path.join(marker).is_dir())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// Recursively collect media items below `root`. DVD folders are claimed
/// whole and never descended into.
pub fn scan_media(root: &Path) -> Result<ScanResult, ScannerError> {
    debug!(path = ?root, "Scanning for media");

    validate_root(root)?;

    let mut result = ScanResult::default();
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry));

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        trace!(entry = ?entry.path(), "Examining entry");

        if entry.file_type().is_dir() {
            if is_dvd_folder(entry.path()) {
                debug!(path = ?entry.path(), "Found DVD folder");
                result.dvd_folders.push(MediaItem::dvd_folder(entry.into_path()));
                walker.skip_current_dir();
            }
            continue;
        }

        if entry.file_type().is_file() && is_video(entry.path()) {
            debug!(path = ?entry.path(), "Found video file");
            result.files.push(MediaItem::file(entry.into_path()));
        }
    }

    debug!(
        dvd = result.dvd_folders.len(),
        files = result.files.len(),
        "Scan complete"
    );

    Ok(result)
}
