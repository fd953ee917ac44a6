use crate::scanner::MediaItem;
use std::path::{Component, Path};

/// Comparable form of a location: `.` components dropped, trailing
/// separators ignored, case folded
pub fn normalize_location(path: &Path) -> String {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy().to_lowercase())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn same_location(a: &Path, b: &Path) -> bool {
    normalize_location(a) == normalize_location(b)
}

/// True when the item already lives in its canonical directory
pub fn is_already_organized(item: &MediaItem, canonical_dir: &Path) -> bool {
    same_location(item.location(), canonical_dir)
}
