use tracing::Level;
use tracing_subscriber::EnvFilter;

// HTML parsing crates are chatty at debug/trace
const QUIET_DEPENDENCIES: &[&str] = &["html5ever=warn", "selectors=warn", "hyper_util=info"];

/// Map `-v` count to a log level
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn build_filter(verbosity: u8) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env().add_directive(level_for(verbosity).into());

    if verbosity >= 2 {
        for directive in QUIET_DEPENDENCIES {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }
    }

    filter
}

/// Install the stderr subscriber; `RUST_LOG` adds to the verbosity level
pub fn init(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbosity))
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .init();
}
