use crate::cleaner::{is_directory_empty, is_subtitle, remove_empty_dirs};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum MoveError {
    #[error("Source not found: {0}")]
    SourceMissing(PathBuf),

    #[error("Target {target} lies inside source {source_dir}")]
    TargetInsideSource { source_dir: PathBuf, target: PathBuf },

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to move {from} -> {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What to do when the destination file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Move under `"{stem} (duplicate N){ext}"`
    #[default]
    Suffix,
    /// Leave the incoming file where it is
    KeepSource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveReport {
    pub moved: Vec<(PathBuf, PathBuf)>,
    /// Destinations that received a duplicate suffix
    pub renamed: Vec<PathBuf>,
    pub left_in_place: Vec<PathBuf>,
}

impl MoveReport {
    pub fn merge(&mut self, other: MoveReport) {
        self.moved.extend(other.moved);
        self.renamed.extend(other.renamed);
        self.left_in_place.extend(other.left_in_place);
    }
}

/// `dir/name.ext` -> `dir/name (duplicate N).ext`
pub fn duplicate_name(path: &Path, n: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) if path.is_dir() => format!("{}.{} (duplicate {})", stem, ext.to_string_lossy(), n),
        Some(ext) => format!("{} (duplicate {}).{}", stem, n, ext.to_string_lossy()),
        None => format!("{} (duplicate {})", stem, n),
    };
    path.with_file_name(name)
}

/// First free duplicate name for an occupied destination
pub fn resolve_conflict(target: &Path) -> PathBuf {
    let mut n = 1;
    loop {
        let candidate = duplicate_name(target, n);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

fn create_dir(path: &Path) -> Result<(), MoveError> {
    fs::create_dir_all(path).map_err(|source| MoveError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn move_path(from: &Path, to: &Path) -> Result<(), MoveError> {
    let err = |source| MoveError::Move {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        // Rename cannot cross filesystems
        Err(e) if from.is_file() => {
            debug!("Rename failed ({}), copying instead", e);
            fs::copy(from, to).map_err(err)?;
            fs::remove_file(from).map_err(err)
        }
        Err(e) => Err(err(e)),
    }
}

/// Move one file, applying the conflict policy if `to` is taken.
/// Returns where the file ended up, or `None` when it was left in place.
fn place_file(
    from: &Path,
    to: &Path,
    policy: ConflictPolicy,
    report: &mut MoveReport,
) -> Result<Option<PathBuf>, MoveError> {
    let destination = if to.exists() {
        match policy {
            ConflictPolicy::Suffix => {
                let renamed = resolve_conflict(to);
                warn!(
                    "{} already exists, moving as {}",
                    to.display(),
                    renamed.display()
                );
                report.renamed.push(renamed.clone());
                renamed
            }
            ConflictPolicy::KeepSource => {
                warn!("{} already exists, leaving {} in place", to.display(), from.display());
                report.left_in_place.push(from.to_path_buf());
                return Ok(None);
            }
        }
    } else {
        to.to_path_buf()
    };

    move_path(from, &destination)?;
    info!("Moved: {} -> {}", from.display(), destination.display());
    report.moved.push((from.to_path_buf(), destination.clone()));
    Ok(Some(destination))
}

/// Subtitle files next to `video` whose names start with the video's stem
pub fn find_sidecars(video: &Path) -> Vec<PathBuf> {
    let (Some(parent), Some(stem)) = (video.parent(), video.file_stem()) else {
        return Vec::new();
    };
    let prefix = format!("{}.", stem.to_string_lossy());

    let Ok(entries) = fs::read_dir(parent) else {
        return Vec::new();
    };

    let mut sidecars: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path != video && path.is_file() && is_subtitle(path))
        .filter(|path| {
            path.file_name()
                .is_some_and(|name| name.to_string_lossy().starts_with(&prefix))
        })
        .collect();
    sidecars.sort();
    sidecars
}

/// Move a single video into `target_dir` as `target_filename`, taking
/// matching subtitle sidecars along under the stem the video finally got.
/// Sidecars stay put when the video does.
pub fn move_file(
    source: &Path,
    target_dir: &Path,
    target_filename: &str,
    policy: ConflictPolicy,
) -> Result<MoveReport, MoveError> {
    if !source.is_file() {
        return Err(MoveError::SourceMissing(source.to_path_buf()));
    }

    let sidecars = find_sidecars(source);
    let old_stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    create_dir(target_dir)?;

    let mut report = MoveReport::default();
    let Some(placed) = place_file(source, &target_dir.join(target_filename), policy, &mut report)?
    else {
        if !sidecars.is_empty() {
            debug!("{} sidecars stay with {}", sidecars.len(), source.display());
        }
        return Ok(report);
    };

    let new_stem = placed
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| target_filename.to_string());

    for sidecar in sidecars {
        let name = sidecar
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let suffix = &name[old_stem.len()..];
        let destination = target_dir.join(format!("{}{}", new_stem, suffix));

        debug!("Sidecar {} travels with {}", name, placed.display());
        place_file(&sidecar, &destination, policy, &mut report)?;
    }

    Ok(report)
}

/// Move the contents of `source` into `target`, merging existing
/// directories and never overwriting a file. `source` is removed when it
/// ends up empty.
pub fn merge_directory(
    source: &Path,
    target: &Path,
    policy: ConflictPolicy,
) -> Result<MoveReport, MoveError> {
    if !source.is_dir() {
        return Err(MoveError::SourceMissing(source.to_path_buf()));
    }

    if target.starts_with(source) {
        return Err(MoveError::TargetInsideSource {
            source_dir: source.to_path_buf(),
            target: target.to_path_buf(),
        });
    }

    let mut report = MoveReport::default();
    merge_into(source, target, policy, &mut report)?;

    remove_empty_dirs(source);
    if is_directory_empty(source) {
        match fs::remove_dir(source) {
            Ok(()) => debug!("Removed merged folder: {}", source.display()),
            Err(e) => warn!("Failed to remove {}: {}", source.display(), e),
        }
    }

    Ok(report)
}

fn merge_into(
    source: &Path,
    target: &Path,
    policy: ConflictPolicy,
    report: &mut MoveReport,
) -> Result<(), MoveError> {
    create_dir(target)?;

    let read_err = |source_err| MoveError::ReadDir {
        path: source.to_path_buf(),
        source: source_err,
    };
    let mut entries: Vec<PathBuf> = fs::read_dir(source)
        .map_err(read_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()
        .map_err(read_err)?;
    entries.sort();

    for entry in entries {
        let Some(name) = entry.file_name() else {
            continue;
        };
        let destination = target.join(name);

        if entry.is_dir() {
            if destination.exists() && !destination.is_dir() {
                // A file sits where the directory should go
                match policy {
                    ConflictPolicy::Suffix => {
                        let renamed = resolve_conflict(&destination);
                        report.renamed.push(renamed.clone());
                        merge_into(&entry, &renamed, policy, report)?;
                    }
                    ConflictPolicy::KeepSource => {
                        warn!("{} is a file, leaving {} in place", destination.display(), entry.display());
                        report.left_in_place.push(entry);
                    }
                }
            } else {
                merge_into(&entry, &destination, policy, report)?;
            }
        } else {
            place_file(&entry, &destination, policy, report)?;
        }
    }

    Ok(())
}

/// Remove `start` and its ancestors while they are empty, stopping at `root`
pub fn prune_empty_ancestors(start: &Path, root: &Path) -> Vec<PathBuf> {
    let mut removed = Vec::new();
    let mut current = start.to_path_buf();

    while current != root && current.starts_with(root) && is_directory_empty(&current) {
        if let Err(e) = fs::remove_dir(&current) {
            warn!("Failed to remove {}: {}", current.display(), e);
            break;
        }
        debug!("Pruned empty directory: {}", current.display());
        removed.push(current.clone());

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }

    removed
}
