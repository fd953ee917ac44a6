//! Canonical layout: `root / Director / "Year - Title" / "Title.ext"`.

mod detector;
mod mover;
mod planner;

pub use detector::{is_already_organized, normalize_location, same_location};
pub use mover::{
    duplicate_name, find_sidecars, merge_directory, move_file, prune_empty_ancestors,
    resolve_conflict, ConflictPolicy, MoveError, MoveReport,
};
pub use planner::{
    canonical_dir, director_folder_name, plan, sanitize_component, title_folder_name,
    OrganizePlan, UNKNOWN_DIRECTOR,
};
