use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "m4v", "mov", "wmv", "mpg", "mpeg", "ts", "m2ts", "flv", "webm", "divx",
    "ogm",
];

pub const SUBTITLE_EXTENSIONS: &[&str] = &["srt", "sub", "idx", "ass", "ssa", "vtt", "smi"];

pub const DVD_EXTENSIONS: &[&str] = &["vob", "ifo", "bup", "iso", "img"];

pub const JUNK_EXTENSIONS: &[&str] = &[
    "nfo", "jpg", "jpeg", "png", "gif", "bmp", "txt", "xml", "db", "url", "lnk", "exe", "html",
    "htm", "website", "sfv", "md5", "log", "nzb", "torrent",
];

/// Junk recognized by full name rather than extension
pub const JUNK_FILE_NAMES: &[&str] = &[".DS_Store", "Thumbs.db"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    Media,
    Junk,
    Unknown,
}

/// Lowercased extension without the dot
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty())
}

fn has_extension(path: &Path, list: &[&str]) -> bool {
    extension_of(path).is_some_and(|ext| list.contains(&ext.as_str()))
}

pub fn is_video(path: &Path) -> bool {
    has_extension(path, VIDEO_EXTENSIONS)
}

pub fn is_subtitle(path: &Path) -> bool {
    has_extension(path, SUBTITLE_EXTENSIONS)
}

pub fn is_media(path: &Path) -> bool {
    is_video(path) || is_subtitle(path) || has_extension(path, DVD_EXTENSIONS)
}

/// Run-scoped cleaning state shared by every item
#[derive(Debug, Clone)]
pub struct CleanSession {
    junk_extensions: HashSet<String>,
    prompt_unknown: bool,
}

impl CleanSession {
    /// Session that asks about unknown files
    pub fn new() -> Self {
        Self {
            junk_extensions: JUNK_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            prompt_unknown: true,
        }
    }

    /// Session that keeps unknown files without asking
    pub fn automatic() -> Self {
        Self {
            prompt_unknown: false,
            ..Self::new()
        }
    }

    pub fn is_known_junk(&self, extension: &str) -> bool {
        self.junk_extensions.contains(&extension.to_lowercase())
    }

    /// Returns true when the extension was not already known
    pub fn add_junk_extension(&mut self, extension: &str) -> bool {
        self.junk_extensions.insert(extension.to_lowercase())
    }

    pub fn prompts_for_unknown(&self) -> bool {
        self.prompt_unknown
    }

    pub fn stop_prompting(&mut self) {
        self.prompt_unknown = false;
    }

    pub fn classify(&self, path: &Path) -> FileClass {
        if is_media(path) {
            return FileClass::Media;
        }

        let by_name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .is_some_and(|name| JUNK_FILE_NAMES.iter().any(|junk| junk.eq_ignore_ascii_case(&name)));
        if by_name {
            return FileClass::Junk;
        }

        match extension_of(path) {
            Some(ext) if self.is_known_junk(&ext) => FileClass::Junk,
            _ => FileClass::Unknown,
        }
    }
}

impl Default for CleanSession {
    fn default() -> Self {
        Self::new()
    }
}

/// What one cleaning pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub deleted: Vec<PathBuf>,
    pub kept_unknown: Vec<PathBuf>,
    pub removed_dirs: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

impl CleanReport {
    pub fn merge(&mut self, other: CleanReport) {
        self.deleted.extend(other.deleted);
        self.kept_unknown.extend(other.kept_unknown);
        self.removed_dirs.extend(other.removed_dirs);
        self.failed.extend(other.failed);
    }

    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.removed_dirs.is_empty()
    }
}
