pub mod api;
pub mod cleaner;
pub mod cli;
pub mod confirm;
pub mod error;
pub mod logging;
pub mod organize;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod resolver;
pub mod scanner;
pub mod ui;

pub use cleaner::{clean_directory, CleanReport, CleanSession};
pub use confirm::{ConfirmPolicy, Decision, DisambiguationLoop};
pub use error::{AppError, ExitCode};
pub use organize::{ConflictPolicy, OrganizePlan};
pub use parser::{parse_filename, parse_folder_name, ParseError, ParsedQuery};
pub use pipeline::{ItemOutcome, Pipeline, PipelineOptions, RunSummary};
pub use prompt::{ConsolePrompter, Prompter, ScriptedPrompter};
pub use resolver::{FallbackResolver, LookupOutcome, LookupRequest, Resolve};
pub use scanner::{scan_media, MediaItem, ScanResult, ScannerError};
