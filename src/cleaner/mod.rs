//! Clutter removal for organized directories.
//!
//! Media files are never deleted. Known junk goes without asking; anything
//! unrecognized is put to the operator, whose `all` answer extends the
//! session's junk set for the rest of the run.

mod types;

pub use types::*;

use crate::prompt::Prompter;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Delete junk below `dir`, ask about unknown files, then drop empty subdirectories
pub fn clean_directory(
    dir: &Path,
    session: &mut CleanSession,
    prompter: &mut dyn Prompter,
) -> CleanReport {
    let mut report = CleanReport::default();

    if !dir.is_dir() {
        debug!(path = ?dir, "Nothing to clean");
        return report;
    }

    let files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Cannot read entry while cleaning: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect();

    for path in files {
        handle_file(path, session, prompter, &mut report);
    }

    report.removed_dirs = remove_empty_dirs(dir);
    report
}

/// Clean only the files directly in `dir` that belong to a moved video,
/// i.e. whose names start with `"{stem}."`. Nothing else in `dir` is touched.
pub fn clean_leftovers(
    dir: &Path,
    stem: &str,
    session: &mut CleanSession,
    prompter: &mut dyn Prompter,
) -> CleanReport {
    let mut report = CleanReport::default();
    let prefix = format!("{}.", stem);

    let Ok(entries) = fs::read_dir(dir) else {
        debug!(path = ?dir, "Nothing to clean");
        return report;
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .is_some_and(|name| name.to_string_lossy().starts_with(&prefix))
        })
        .collect();
    files.sort();

    for path in files {
        handle_file(path, session, prompter, &mut report);
    }

    report
}

fn handle_file(
    path: PathBuf,
    session: &mut CleanSession,
    prompter: &mut dyn Prompter,
    report: &mut CleanReport,
) {
    match session.classify(&path) {
        FileClass::Media => {}
        FileClass::Junk => delete_file(&path, report),
        FileClass::Unknown => {
            if ask_delete_unknown(&path, session, prompter) {
                delete_file(&path, report);
            } else {
                report.kept_unknown.push(path);
            }
        }
    }
}

fn ask_delete_unknown(path: &Path, session: &mut CleanSession, prompter: &mut dyn Prompter) -> bool {
    if !session.prompts_for_unknown() {
        return false;
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let question = format!("Delete unknown file '{}'? (y/n/all): ", name);

    loop {
        let answer = match prompter.ask(&question) {
            Ok(answer) => answer.to_lowercase(),
            Err(e) => {
                warn!("Prompt unavailable, keeping unknown files: {}", e);
                session.stop_prompting();
                return false;
            }
        };

        match answer.as_str() {
            "y" | "yes" => return true,
            "n" | "no" | "" => return false,
            "all" | "a" => {
                match extension_of(path) {
                    Some(ext) => {
                        if session.add_junk_extension(&ext) {
                            info!("Treating .{} as junk for the rest of the run", ext);
                        }
                    }
                    None => debug!("No extension to remember for {}", name),
                }
                return true;
            }
            _ => continue,
        }
    }
}

fn delete_file(path: &Path, report: &mut CleanReport) {
    match fs::remove_file(path) {
        Ok(()) => {
            info!("Deleted: {}", path.display());
            report.deleted.push(path.to_path_buf());
        }
        Err(e) => {
            warn!("Failed to delete {}: {}", path.display(), e);
            report.failed.push(path.to_path_buf());
        }
    }
}

/// Remove every empty directory below `dir`, deepest first; `dir` itself stays
pub fn remove_empty_dirs(dir: &Path) -> Vec<PathBuf> {
    let mut removed = Vec::new();

    let dirs: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .contents_first(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.into_path())
        .collect();

    for path in dirs {
        if is_directory_empty(&path) {
            match fs::remove_dir(&path) {
                Ok(()) => {
                    debug!("Removed empty directory: {}", path.display());
                    removed.push(path);
                }
                Err(e) => warn!("Failed to remove {}: {}", path.display(), e),
            }
        }
    }

    removed
}

pub fn is_directory_empty(path: &Path) -> bool {
    fs::read_dir(path)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_junk_deleted_without_prompt() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("Heat.mkv"));
        touch(&dir.path().join("Heat.nfo"));
        touch(&dir.path().join("Extras/cover.jpg"));
        touch(&dir.path().join(".DS_Store"));

        let mut session = CleanSession::new();
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

        let report = clean_directory(dir.path(), &mut session, &mut prompter);

        assert!(prompter.questions().is_empty());
        assert_eq!(report.deleted.len(), 3);
        assert!(dir.path().join("Heat.mkv").exists());
        assert!(!dir.path().join("Heat.nfo").exists());
        assert!(!dir.path().join(".DS_Store").exists());
        assert!(!dir.path().join("Extras").exists());
        assert_eq!(report.removed_dirs, vec![dir.path().join("Extras")]);
    }

    #[test]
    fn test_media_never_deleted() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("Heat.mkv"));
        touch(&dir.path().join("Heat.en.srt"));
        touch(&dir.path().join("VIDEO_TS/VTS_01_1.VOB"));

        let mut session = CleanSession::new();
        session.add_junk_extension("mkv");
        session.add_junk_extension("srt");
        let mut prompter = ScriptedPrompter::new(["all", "y", "y"]);

        let report = clean_directory(dir.path(), &mut session, &mut prompter);

        assert!(report.deleted.is_empty());
        assert!(prompter.questions().is_empty());
        assert!(dir.path().join("Heat.mkv").exists());
        assert!(dir.path().join("Heat.en.srt").exists());
        assert!(dir.path().join("VIDEO_TS/VTS_01_1.VOB").exists());
    }

    #[test]
    fn test_unknown_answers() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("a.part"));
        touch(&dir.path().join("b.rar"));
        touch(&dir.path().join("c.rar"));
        touch(&dir.path().join("d.sample"));

        let mut session = CleanSession::new();
        // a.part -> y, b.rar -> all, c.rar silent, d.sample -> n
        let mut prompter = ScriptedPrompter::new(["y", "all", "n"]);

        let report = clean_directory(dir.path(), &mut session, &mut prompter);

        assert_eq!(prompter.questions().len(), 3);
        assert!(!dir.path().join("a.part").exists());
        assert!(!dir.path().join("b.rar").exists());
        assert!(!dir.path().join("c.rar").exists());
        assert!(dir.path().join("d.sample").exists());
        assert_eq!(report.kept_unknown, vec![dir.path().join("d.sample")]);
        assert!(session.is_known_junk("rar"));
        assert!(!session.is_known_junk("part"));
    }

    #[test]
    fn test_all_answer_carries_to_later_calls() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        touch(&first.path().join("x.rar"));
        touch(&second.path().join("y.rar"));

        let mut session = CleanSession::new();
        let mut prompter = ScriptedPrompter::new(["all"]);

        clean_directory(first.path(), &mut session, &mut prompter);
        clean_directory(second.path(), &mut session, &mut prompter);

        assert_eq!(prompter.questions().len(), 1);
        assert!(!second.path().join("y.rar").exists());
    }

    #[test]
    fn test_unrecognized_answer_reasks() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("x.rar"));

        let mut session = CleanSession::new();
        let mut prompter = ScriptedPrompter::new(["maybe", "n"]);

        clean_directory(dir.path(), &mut session, &mut prompter);

        assert_eq!(prompter.questions().len(), 2);
        assert!(dir.path().join("x.rar").exists());
    }

    #[test]
    fn test_automatic_keeps_unknown() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("x.rar"));
        touch(&dir.path().join("x.nfo"));

        let mut session = CleanSession::automatic();
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

        let report = clean_directory(dir.path(), &mut session, &mut prompter);

        assert!(prompter.questions().is_empty());
        assert!(dir.path().join("x.rar").exists());
        assert!(!dir.path().join("x.nfo").exists());
        assert_eq!(report.kept_unknown.len(), 1);
    }

    #[test]
    fn test_closed_input_stops_prompting() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("a.rar"));
        touch(&dir.path().join("b.zip"));

        let mut session = CleanSession::new();
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

        let report = clean_directory(dir.path(), &mut session, &mut prompter);

        assert_eq!(prompter.questions().len(), 1);
        assert_eq!(report.kept_unknown.len(), 2);
        assert!(!session.prompts_for_unknown());
    }

    #[test]
    fn test_leftovers_limited_to_stem() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("Heat.1995.nfo"));
        touch(&dir.path().join("Heat.1995.en.srt"));
        touch(&dir.path().join("Heat.1995.rar"));
        touch(&dir.path().join("letter.txt"));
        touch(&dir.path().join("Holiday 2019/beach.jpg"));

        let mut session = CleanSession::new();
        let mut prompter = ScriptedPrompter::new(["n"]);

        let report = clean_leftovers(dir.path(), "Heat.1995", &mut session, &mut prompter);

        assert_eq!(report.deleted, vec![dir.path().join("Heat.1995.nfo")]);
        assert_eq!(report.kept_unknown, vec![dir.path().join("Heat.1995.rar")]);
        assert_eq!(prompter.questions().len(), 1);
        assert!(dir.path().join("Heat.1995.en.srt").exists());
        assert!(dir.path().join("letter.txt").exists());
        assert!(dir.path().join("Holiday 2019/beach.jpg").exists());
        assert!(report.removed_dirs.is_empty());
    }

    #[test]
    fn test_remove_empty_dirs_nested() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b/c")).unwrap();
        touch(&dir.path().join("keep/file.mkv"));

        let removed = remove_empty_dirs(dir.path());

        assert_eq!(removed.len(), 3);
        assert!(!dir.path().join("a").exists());
        assert!(dir.path().join("keep").exists());
        assert!(dir.path().exists());
    }

    #[test]
    fn test_missing_directory_is_noop() {
        let dir = tempdir().unwrap();
        let mut session = CleanSession::new();
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

        let report = clean_directory(&dir.path().join("gone"), &mut session, &mut prompter);

        assert_eq!(report, CleanReport::default());
    }
}
