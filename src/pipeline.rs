//! Per-item processing: parse, resolve, confirm, plan, move, clean.

use crate::cleaner::{clean_directory, clean_leftovers, CleanReport, CleanSession};
use crate::confirm::{ConfirmPolicy, Decision, DisambiguationLoop, SkipReason};
use crate::error::AppError;
use crate::organize::{
    canonical_dir, is_already_organized, merge_directory, move_file, plan, prune_empty_ancestors,
    same_location, ConflictPolicy, MoveError, MoveReport, OrganizePlan,
};
use crate::parser::{parse_filename, parse_folder_name, parse_title_folder, ParsedQuery};
use crate::prompt::Prompter;
use crate::resolver::{LookupRequest, Resolve};
use crate::scanner::{scan_media, MediaItem};
use crate::ui::Ui;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const ALREADY_ORGANIZED_QUESTION: &str = "Already in place. Skip it? (y/n): ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub confirm: ConfirmPolicy,
    pub conflicts: ConflictPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Organized { target: PathBuf, report: MoveReport },
    AlreadyOrganized,
    Skipped { reason: String },
    Failed { error: String },
}

/// Counts for the end-of-run summary
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Local>,
    pub finished_at: Option<DateTime<Local>>,
    pub total_items: usize,
    pub organized: usize,
    pub already_organized: usize,
    pub skipped: usize,
    pub failed: usize,
    pub duplicates_renamed: usize,
    pub left_in_place: usize,
    pub files_cleaned: usize,
    pub dirs_removed: usize,
    pub stopped_early: bool,
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            started_at: Local::now(),
            finished_at: None,
            total_items: 0,
            organized: 0,
            already_organized: 0,
            skipped: 0,
            failed: 0,
            duplicates_renamed: 0,
            left_in_place: 0,
            files_cleaned: 0,
            dirs_removed: 0,
            stopped_early: false,
        }
    }

    pub fn record(&mut self, outcome: &ItemOutcome) {
        match outcome {
            ItemOutcome::Organized { report, .. } => {
                self.organized += 1;
                self.duplicates_renamed += report.renamed.len();
                self.left_in_place += report.left_in_place.len();
            }
            ItemOutcome::AlreadyOrganized => self.already_organized += 1,
            ItemOutcome::Skipped { .. } => self.skipped += 1,
            ItemOutcome::Failed { .. } => self.failed += 1,
        }
    }

    pub fn record_clean(&mut self, report: &CleanReport) {
        self.files_cleaned += report.deleted.len();
        self.dirs_removed += report.removed_dirs.len();
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Local::now());
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at.unwrap_or_else(Local::now) - self.started_at
    }

    pub fn processed(&self) -> usize {
        self.organized + self.already_organized + self.skipped + self.failed
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Pipeline {
    root: PathBuf,
    resolver: Box<dyn Resolve>,
    options: PipelineOptions,
    session: CleanSession,
    input_closed: bool,
}

impl Pipeline {
    pub fn new(root: impl Into<PathBuf>, resolver: Box<dyn Resolve>, options: PipelineOptions) -> Self {
        let session = match options.confirm {
            ConfirmPolicy::Interactive => CleanSession::new(),
            ConfirmPolicy::Automatic => CleanSession::automatic(),
        };

        Self {
            root: root.into(),
            resolver,
            options,
            session,
            input_closed: false,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn session(&self) -> &CleanSession {
        &self.session
    }

    /// Scan the root and process DVD folders, then loose files
    pub fn run(&mut self, prompter: &mut dyn Prompter, ui: &mut Ui) -> Result<RunSummary, AppError> {
        let mut summary = RunSummary::new();

        let scan = scan_media(&self.root)?;
        info!(
            dvd = scan.dvd_folders.len(),
            files = scan.files.len(),
            "Found media items"
        );

        if scan.is_empty() {
            ui.info("Source folder is empty, nothing to merge.");
            summary.finish();
            return Ok(summary);
        }

        summary.total_items = scan.len();
        let items = scan.into_items();
        let total = items.len();

        for (index, item) in items.iter().enumerate() {
            if self.input_closed {
                summary.stopped_early = true;
                warn!("Input closed, stopping before {}", item.path.display());
                break;
            }

            ui.blank();
            ui.progress(index + 1, total, &item.original_name);

            let outcome = self.process_item(item, prompter, ui, &mut summary);
            report_outcome(item, &outcome, ui);
            summary.record(&outcome);
        }

        summary.finish();
        Ok(summary)
    }

    /// Take one item through to a terminal outcome. Every failure is
    /// contained here.
    pub fn process_item(
        &mut self,
        item: &MediaItem,
        prompter: &mut dyn Prompter,
        ui: &mut Ui,
        summary: &mut RunSummary,
    ) -> ItemOutcome {
        let query = match parse_item(item, &self.root) {
            Ok(query) => query,
            Err(reason) => return ItemOutcome::Skipped { reason },
        };
        debug!("Parsed '{}' as {}", item.original_name, query);

        let request = LookupRequest::Search {
            title: query.title_guess,
            year: query.year_guess,
        };

        let decision = DisambiguationLoop::new(self.resolver.as_ref(), self.options.confirm)
            .run(request, prompter, ui);

        let record = match decision {
            Decision::Confirmed(record) => record,
            Decision::Skipped(reason) => {
                if reason == SkipReason::InputClosed {
                    self.input_closed = true;
                }
                return ItemOutcome::Skipped {
                    reason: reason.to_string(),
                };
            }
        };

        let canonical = canonical_dir(&self.root, &record);
        let plan = plan(&self.root, item, &record);

        if is_already_organized(item, &canonical) && self.keep_in_place(item, &plan, prompter) {
            info!("{} is already organized", item.path.display());
            return ItemOutcome::AlreadyOrganized;
        }

        let report = match self.execute(item, &plan) {
            Ok(report) => report,
            Err(e) => {
                warn!("Move failed for {}: {}", item.path.display(), e);
                return ItemOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        if report.moved.is_empty() {
            summary.left_in_place += report.left_in_place.len();
            return ItemOutcome::Skipped {
                reason: format!("{} already exists, left in place", plan.target_path().display()),
            };
        }

        self.tidy_up(item, &plan, prompter, summary);

        ItemOutcome::Organized {
            target: plan.target_path(),
            report,
        }
    }

    /// Whether an item sitting in its canonical folder stays untouched
    fn keep_in_place(&mut self, item: &MediaItem, plan: &OrganizePlan, prompter: &mut dyn Prompter) -> bool {
        // Nothing would change for a DVD folder or an already renamed file
        if item.is_dvd_folder || same_location(&item.path, &plan.target_path()) {
            return true;
        }

        if self.options.confirm == ConfirmPolicy::Automatic {
            return true;
        }

        loop {
            match prompter.ask(ALREADY_ORGANIZED_QUESTION) {
                Ok(answer) => match answer.to_lowercase().as_str() {
                    "" | "y" | "yes" => return true,
                    "n" | "no" => return false,
                    _ => continue,
                },
                Err(e) => {
                    warn!("Prompt unavailable: {}", e);
                    self.input_closed = true;
                    return true;
                }
            }
        }
    }

    fn execute(&self, item: &MediaItem, plan: &OrganizePlan) -> Result<MoveReport, MoveError> {
        match &plan.target_filename {
            Some(filename) => move_file(&item.path, &plan.target_dir, filename, self.options.conflicts),
            None => merge_directory(&item.path, &plan.target_dir, self.options.conflicts),
        }
    }

    /// Clean the target and what the item left behind, then prune empty
    /// ancestors. Outside the target only the item's own files are cleaned:
    /// the rest of a claimed DVD folder, or the moved video's namesakes.
    fn tidy_up(
        &mut self,
        item: &MediaItem,
        plan: &OrganizePlan,
        prompter: &mut dyn Prompter,
        summary: &mut RunSummary,
    ) {
        let target_report = clean_directory(&plan.target_dir, &mut self.session, prompter);
        summary.record_clean(&target_report);

        // A DVD folder that could not be fully merged still exists
        let vacated = if item.is_dvd_folder && item.path.exists() {
            let source_report = clean_directory(&item.path, &mut self.session, prompter);
            summary.record_clean(&source_report);
            item.path.clone()
        } else {
            let Some(parent) = item.path.parent() else {
                return;
            };
            if !item.is_dvd_folder {
                if let Some(stem) = item.path.file_stem() {
                    let source_report =
                        clean_leftovers(parent, &stem.to_string_lossy(), &mut self.session, prompter);
                    summary.record_clean(&source_report);
                }
            }
            parent.to_path_buf()
        };

        let pruned = prune_empty_ancestors(&vacated, &self.root);
        summary.dirs_removed += pruned.len();
    }
}

/// Parse an item's name. A `"{year} - {title}"` folder below the root was
/// written by an earlier run and is trusted over the bare file name.
fn parse_item(item: &MediaItem, root: &Path) -> Result<ParsedQuery, String> {
    let location = item.location();
    let title_folder = if location == root {
        None
    } else {
        location
            .file_name()
            .and_then(|name| parse_title_folder(&name.to_string_lossy()))
    };

    if let Some(query) = title_folder {
        debug!("Using title folder of '{}'", item.original_name);
        return Ok(query);
    }

    let parsed = if item.is_dvd_folder {
        parse_folder_name(&item.original_name)
    } else {
        parse_filename(&item.original_name)
    };

    parsed.map_err(|e| {
        warn!("Cannot parse '{}': {}", item.original_name, e);
        e.to_string()
    })
}

fn report_outcome(item: &MediaItem, outcome: &ItemOutcome, ui: &mut Ui) {
    match outcome {
        ItemOutcome::Organized { target, report } => {
            ui.list_done(&item.original_name, &target.display().to_string());
            for renamed in &report.renamed {
                ui.warning(&format!("Name taken, stored as {}", renamed.display()));
            }
            for kept in &report.left_in_place {
                ui.warning(&format!("Left in place (destination exists): {}", kept.display()));
            }
        }
        ItemOutcome::AlreadyOrganized => ui.dim("Already organized, nothing to do."),
        ItemOutcome::Skipped { reason } => ui.dim(&format!("Skipped: {}", reason)),
        ItemOutcome::Failed { error } => ui.error(&format!("Failed: {}", error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FetchError, MetadataApi, MovieRecord, SearchHit};
    use crate::prompt::ScriptedPrompter;
    use crate::resolver::{FallbackResolver, LookupOutcome, Stage};
    use crate::ui::UiConfig;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    /// Resolves by title only
    struct StaticResolver(HashMap<String, MovieRecord>);

    impl StaticResolver {
        fn new(records: &[(&str, MovieRecord)]) -> Box<Self> {
            Box::new(Self(
                records
                    .iter()
                    .map(|(title, record)| (title.to_string(), record.clone()))
                    .collect(),
            ))
        }
    }

    impl Resolve for StaticResolver {
        fn resolve(&self, request: &LookupRequest) -> LookupOutcome {
            let found = match request {
                LookupRequest::Search { title, .. } => self.0.get(title),
                LookupRequest::ById { external_id } => {
                    self.0.values().find(|r| &r.external_id == external_id)
                }
            };
            match found {
                Some(record) => LookupOutcome::Found {
                    record: record.clone(),
                    stage: Stage::TitleSearch,
                    failures: Vec::new(),
                },
                None => LookupOutcome::NotFound {
                    failures: Vec::new(),
                },
            }
        }
    }

    /// Search API knowing two films called "Heat"
    struct TwoHeats;

    impl TwoHeats {
        fn records() -> Vec<MovieRecord> {
            vec![
                MovieRecord::new("tt0091183", "Heat", Some(1986))
                    .with_directors(vec!["Dick Richards".into()]),
                MovieRecord::new("tt0113277", "Heat", Some(1995))
                    .with_directors(vec!["Michael Mann".into()]),
            ]
        }
    }

    impl MetadataApi for TwoHeats {
        fn search(&self, _title: &str) -> Result<Vec<SearchHit>, FetchError> {
            Ok(Self::records()
                .into_iter()
                .map(|r| SearchHit::new(r.external_id, r.title, r.year))
                .collect())
        }

        fn lookup(&self, external_id: &str) -> Result<Option<MovieRecord>, FetchError> {
            Ok(Self::records()
                .into_iter()
                .find(|r| r.external_id == external_id))
        }
    }

    fn quiet_ui() -> Ui {
        let config = UiConfig {
            colors_enabled: false,
            verbose: true,
        };
        Ui::with_writer(config, Box::new(std::io::sink()))
    }

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "x").unwrap();
    }

    fn other_place() -> MovieRecord {
        MovieRecord::new("tt9000001", "The Other Place", Some(2024))
            .with_directors(vec!["Jane Doe".into()])
    }

    fn solaris() -> MovieRecord {
        MovieRecord::new("tt0069293", "Solaris", Some(1972))
            .with_directors(vec!["Andrei Tarkovsky".into()])
    }

    fn automatic() -> PipelineOptions {
        PipelineOptions {
            confirm: ConfirmPolicy::Automatic,
            conflicts: ConflictPolicy::Suffix,
        }
    }

    #[test]
    fn test_single_file_organized() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("2024 The Other Place 1080p BluRay x264.mkv"));

        let resolver = StaticResolver::new(&[("The Other Place", other_place())]);
        let mut pipeline = Pipeline::new(root, resolver, PipelineOptions::default());
        let mut prompter = ScriptedPrompter::new(["y"]);

        let summary = pipeline.run(&mut prompter, &mut quiet_ui()).unwrap();

        assert_eq!(summary.organized, 1);
        assert!(root
            .join("Jane Doe/2024 - The Other Place/The Other Place.mkv")
            .exists());
        assert!(!root.join("2024 The Other Place 1080p BluRay x264.mkv").exists());
    }

    #[test]
    fn test_dvd_folder_contents_merged() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("Solaris.1972.PAL/VIDEO_TS/VTS_01_1.VOB"));
        touch(&root.join("Solaris.1972.PAL/VIDEO_TS/VIDEO_TS.IFO"));
        touch(&root.join("Solaris.1972.PAL/release.nfo"));

        let resolver = StaticResolver::new(&[("Solaris", solaris())]);
        let mut pipeline = Pipeline::new(root, resolver, automatic());
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

        let summary = pipeline.run(&mut prompter, &mut quiet_ui()).unwrap();

        let target = root.join("Andrei Tarkovsky/1972 - Solaris");
        assert_eq!(summary.organized, 1);
        assert!(target.join("VIDEO_TS/VTS_01_1.VOB").exists());
        assert!(target.join("VIDEO_TS/VIDEO_TS.IFO").exists());
        assert!(!target.join("release.nfo").exists());
        assert!(!root.join("Solaris.1972.PAL").exists());
        assert_eq!(summary.files_cleaned, 1);
    }

    #[test]
    fn test_second_run_makes_no_changes() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("downloads/The.Other.Place.2024.720p.WEB.mp4"));

        let records = [("The Other Place", other_place())];
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

        let mut first = Pipeline::new(root, StaticResolver::new(&records), automatic());
        let summary = first.run(&mut prompter, &mut quiet_ui()).unwrap();
        assert_eq!(summary.organized, 1);
        assert!(!root.join("downloads").exists());

        let before = fs::read_dir(root.join("Jane Doe/2024 - The Other Place"))
            .unwrap()
            .count();

        let mut second = Pipeline::new(root, StaticResolver::new(&records), automatic());
        let summary = second.run(&mut prompter, &mut quiet_ui()).unwrap();

        assert_eq!(summary.organized, 0);
        assert_eq!(summary.already_organized, 1);
        assert_eq!(summary.files_cleaned, 0);
        assert_eq!(
            fs::read_dir(root.join("Jane Doe/2024 - The Other Place"))
                .unwrap()
                .count(),
            before
        );
    }

    #[test]
    fn test_second_run_keeps_year_from_title_folder() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("Heat.1995.1080p.mkv"));
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

        let resolver = Box::new(FallbackResolver::new().with_api(TwoHeats));
        let summary = Pipeline::new(root, resolver, automatic())
            .run(&mut prompter, &mut quiet_ui())
            .unwrap();
        assert_eq!(summary.organized, 1);
        assert!(root.join("Michael Mann/1995 - Heat/Heat.mkv").exists());

        let resolver = Box::new(FallbackResolver::new().with_api(TwoHeats));
        let summary = Pipeline::new(root, resolver, automatic())
            .run(&mut prompter, &mut quiet_ui())
            .unwrap();

        assert_eq!(summary.organized, 0);
        assert_eq!(summary.already_organized, 1);
        assert!(root.join("Michael Mann/1995 - Heat/Heat.mkv").exists());
        assert!(!root.join("Dick Richards").exists());
    }

    #[test]
    fn test_colliding_file_left_in_place_with_subtitle() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("Jane Doe/2024 - The Other Place/The Other Place.mkv"));
        touch(&root.join("new/The.Other.Place.2024.mkv"));
        touch(&root.join("new/The.Other.Place.2024.en.srt"));

        let resolver = StaticResolver::new(&[("The Other Place", other_place())]);
        let options = PipelineOptions {
            confirm: ConfirmPolicy::Automatic,
            conflicts: ConflictPolicy::KeepSource,
        };
        let mut pipeline = Pipeline::new(root, resolver, options);
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

        let summary = pipeline.run(&mut prompter, &mut quiet_ui()).unwrap();

        assert_eq!(summary.organized, 0);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.left_in_place, 1);
        assert!(root.join("new/The.Other.Place.2024.mkv").exists());
        assert!(root.join("new/The.Other.Place.2024.en.srt").exists());
        assert!(!root
            .join("Jane Doe/2024 - The Other Place/The Other Place.en.srt")
            .exists());
    }

    #[test]
    fn test_unrelated_files_beside_source_survive() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("Photos/The.Other.Place.2024.mkv"));
        touch(&root.join("Photos/The.Other.Place.2024.nfo"));
        touch(&root.join("Photos/letter.txt"));
        touch(&root.join("Photos/Holiday 2019/beach.jpg"));

        let resolver = StaticResolver::new(&[("The Other Place", other_place())]);
        let mut pipeline = Pipeline::new(root, resolver, automatic());
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

        let summary = pipeline.run(&mut prompter, &mut quiet_ui()).unwrap();

        assert_eq!(summary.organized, 1);
        assert_eq!(summary.files_cleaned, 1);
        assert!(!root.join("Photos/The.Other.Place.2024.nfo").exists());
        assert!(root.join("Photos/letter.txt").exists());
        assert!(root.join("Photos/Holiday 2019/beach.jpg").exists());
    }

    #[test]
    fn test_colliding_file_gets_suffix() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("Jane Doe/2024 - The Other Place/The Other Place.mkv"));
        touch(&root.join("new/The.Other.Place.2024.mkv"));

        let resolver = StaticResolver::new(&[("The Other Place", other_place())]);
        let mut pipeline = Pipeline::new(root, resolver, automatic());
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

        let summary = pipeline.run(&mut prompter, &mut quiet_ui()).unwrap();

        let target = root.join("Jane Doe/2024 - The Other Place");
        assert!(target.join("The Other Place.mkv").exists());
        assert!(target.join("The Other Place (duplicate 1).mkv").exists());
        assert_eq!(summary.duplicates_renamed, 1);
    }

    #[test]
    fn test_unparsable_item_skipped() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("1080p.mkv"));

        let mut pipeline = Pipeline::new(root, StaticResolver::new(&[]), automatic());
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

        let summary = pipeline.run(&mut prompter, &mut quiet_ui()).unwrap();

        assert_eq!(summary.skipped, 1);
        assert!(root.join("1080p.mkv").exists());
    }

    #[test]
    fn test_declined_item_untouched() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("The.Other.Place.2024.mkv"));

        let resolver = StaticResolver::new(&[("The Other Place", other_place())]);
        let mut pipeline = Pipeline::new(root, resolver, PipelineOptions::default());
        let mut prompter = ScriptedPrompter::new(["n", ""]);

        let summary = pipeline.run(&mut prompter, &mut quiet_ui()).unwrap();

        assert_eq!(summary.skipped, 1);
        assert!(root.join("The.Other.Place.2024.mkv").exists());
        assert!(!root.join("Jane Doe").exists());
    }

    #[test]
    fn test_closed_input_stops_run() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("A.Film.2001.mkv"));
        touch(&root.join("B.Film.2002.mkv"));

        let resolver = StaticResolver::new(&[
            ("A Film", MovieRecord::new("tt1", "A Film", Some(2001))),
            ("B Film", MovieRecord::new("tt2", "B Film", Some(2002))),
        ]);
        let mut pipeline = Pipeline::new(root, resolver, PipelineOptions::default());
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

        let summary = pipeline.run(&mut prompter, &mut quiet_ui()).unwrap();

        assert_eq!(summary.skipped, 1);
        assert!(summary.stopped_early);
        assert_eq!(prompter.questions().len(), 1);
    }

    #[test]
    fn test_empty_root_has_nothing_to_do() {
        let dir = tempdir().unwrap();
        let mut pipeline = Pipeline::new(dir.path(), StaticResolver::new(&[]), PipelineOptions::default());
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

        let summary = pipeline.run(&mut prompter, &mut quiet_ui()).unwrap();

        assert_eq!(summary.total_items, 0);
        assert!(prompter.questions().is_empty());
    }

    #[test]
    fn test_missing_root_is_error() {
        let dir = tempdir().unwrap();
        let mut pipeline = Pipeline::new(dir.path().join("gone"), StaticResolver::new(&[]), automatic());
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

        let result = pipeline.run(&mut prompter, &mut quiet_ui());

        assert!(matches!(result, Err(AppError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_unknown_junk_answer_applies_to_later_items() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("a/A.Film.2001.mkv"));
        touch(&root.join("a/A.Film.2001.rar"));
        touch(&root.join("b/B.Film.2002.mkv"));
        touch(&root.join("b/B.Film.2002.rar"));

        let resolver = StaticResolver::new(&[
            ("A Film", MovieRecord::new("tt1", "A Film", Some(2001))),
            ("B Film", MovieRecord::new("tt2", "B Film", Some(2002))),
        ]);
        let mut pipeline = Pipeline::new(root, resolver, PipelineOptions::default());
        // confirm A, delete-all .rar, confirm B
        let mut prompter = ScriptedPrompter::new(["y", "all", "y"]);

        let summary = pipeline.run(&mut prompter, &mut quiet_ui()).unwrap();

        assert_eq!(summary.organized, 2);
        assert_eq!(prompter.questions().len(), 3);
        assert!(pipeline.session().is_known_junk("rar"));
        assert!(!root.join("a").exists());
        assert!(!root.join("b").exists());
        assert!(root.join("Unknown/2002 - B Film/B Film.mkv").exists());
    }
}
