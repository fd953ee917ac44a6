use clap::Parser;
use movie_sorter::api::{config_from_env, ApiConfig, FetchError, ImdbClient, OmdbClient};
use movie_sorter::cli::Args;
use movie_sorter::confirm::ConfirmPolicy;
use movie_sorter::error::{AppError, ExitCode};
use movie_sorter::logging;
use movie_sorter::organize::ConflictPolicy;
use movie_sorter::output::display_summary;
use movie_sorter::pipeline::{Pipeline, PipelineOptions};
use movie_sorter::prompt::{clean_path_input, ConsolePrompter, Prompter};
use movie_sorter::resolver::FallbackResolver;
use movie_sorter::scanner::validate_root;
use movie_sorter::ui::{Ui, UiConfig};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, error, info};

const ROOT_QUESTION: &str = "Enter the folder that holds your movies: ";

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version come through here too
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            std::process::exit(code.into());
        }
    };

    logging::init(args.verbose);

    let mut ui = Ui::new(UiConfig::new(args.verbose > 0));

    if let Err(e) = run(args, &mut ui) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }

    let _ = std::io::stdout().flush();
    std::process::exit(ExitCode::Success.into());
}

fn run(args: Args, ui: &mut Ui) -> Result<(), AppError> {
    ui.print_header(env!("CARGO_PKG_VERSION"));

    let mut prompter = ConsolePrompter::new();

    let root = match &args.root {
        Some(root) => clean_path_input(&root.to_string_lossy()),
        None => ask_for_root(&mut prompter)?,
    };
    validate_root(&root)?;

    info!("Sorting {}", root.display());

    let options = PipelineOptions {
        confirm: if args.auto {
            ConfirmPolicy::Automatic
        } else {
            ConfirmPolicy::Interactive
        },
        conflicts: if args.keep_conflicts {
            ConflictPolicy::KeepSource
        } else {
            ConflictPolicy::Suffix
        },
    };
    debug!(?options, "Pipeline options");

    let resolver = build_resolver(&config_from_env())?;
    let mut pipeline = Pipeline::new(root, Box::new(resolver), options);

    let summary = pipeline.run(&mut prompter, ui)?;

    display_summary(&summary, &mut std::io::stdout())
        .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;

    Ok(())
}

fn ask_for_root(prompter: &mut dyn Prompter) -> Result<PathBuf, AppError> {
    let answer = prompter.ask(ROOT_QUESTION)?;
    if answer.is_empty() {
        return Err(AppError::NoRootGiven);
    }
    Ok(clean_path_input(&answer))
}

fn build_resolver(config: &ApiConfig) -> Result<FallbackResolver, AppError> {
    let client_error = |e: FetchError| AppError::Other(format!("Failed to create HTTP client: {}", e));

    let website = ImdbClient::new(config).map_err(client_error)?;
    let pages = ImdbClient::new(config).map_err(client_error)?;

    let mut resolver = FallbackResolver::new()
        .with_title_search(website)
        .with_detail_pages(pages);

    if config.has_omdb_key() {
        resolver = resolver.with_api(OmdbClient::new(config.clone()).map_err(client_error)?);
    } else {
        info!("OMDB_API_KEY not set, structured API search disabled");
    }

    Ok(resolver)
}
