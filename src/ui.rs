//! UI module for styled terminal output.
//!
//! Provides colored output in normal mode and plain tracing in verbose mode.
//! Candidate records and errors are shown in both modes; info and warning
//! messages go to the log when verbose.

use crate::api::MovieRecord;
use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use tracing::{info, warn};

/// ASCII art header lines for the application (for gradient coloring)
const HEADER_LINE_1: &str = r"                          _                                  _";
const HEADER_LINE_2: &str = r" _ __ ___    ___  __   __(_)  ___          ___   ___   _ __ | |_   ___   _ __";
const HEADER_LINE_3: &str = r"| '_ ` _ \  / _ \ \ \ / /| | / _ \  _____ / __| / _ \ | '__|| __| / _ \ | '__|";
const HEADER_LINE_4: &str = r"| | | | | || (_) | \ V / | ||  __/ |_____|\__ \| (_) || |   | |_ |  __/ | |";
const HEADER_LINE_5: &str = r"|_| |_| |_| \___/   \_/  |_| \___|        |___/ \___/ |_|    \__| \___| |_|";

/// Plain ASCII header (non-colored)
const ASCII_HEADER_PLAIN: &str = r"
                          _                                  _
 _ __ ___    ___  __   __(_)  ___          ___   ___   _ __ | |_   ___   _ __
| '_ ` _ \  / _ \ \ \ / /| | / _ \  _____ / __| / _ \ | '__|| __| / _ \ | '__|
| | | | | || (_) | \ V / | ||  __/ |_____|\__ \| (_) || |   | |_ |  __/ | |
|_| |_| |_| \___/   \_/  |_| \___|        |___/ \___/ |_|    \__| \___| |_|
";

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors_enabled: bool,
    pub verbose: bool,
}

impl UiConfig {
    /// Create UI config from environment and args
    pub fn new(verbose: bool) -> Self {
        let colors_enabled = should_use_colors();
        Self {
            colors_enabled,
            verbose,
        }
    }
}

/// Check if we should use colors in output
fn should_use_colors() -> bool {
    // Check NO_COLOR env (standard: https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check FORCE_COLOR env
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Check if stderr is a terminal
    io::stderr().is_terminal()
}

/// Styled output writer
pub struct Ui {
    config: UiConfig,
    writer: Box<dyn Write>,
}

impl Ui {
    /// Create a new UI with stderr output
    pub fn new(config: UiConfig) -> Self {
        // Set colored crate's global color setting
        if !config.colors_enabled {
            colored::control::set_override(false);
        }

        Self {
            config,
            writer: Box::new(io::stderr()),
        }
    }

    /// Create UI with custom writer (for testing)
    pub fn with_writer(config: UiConfig, writer: Box<dyn Write>) -> Self {
        if !config.colors_enabled {
            colored::control::set_override(false);
        }

        Self { config, writer }
    }

    /// Print the application header
    pub fn print_header(&mut self, version: &str) {
        if self.config.verbose {
            // Minimal header in verbose mode
            let _ = writeln!(self.writer, "movie-sorter v{}", version);
            let _ = writeln!(self.writer);
            return;
        }

        if self.config.colors_enabled {
            // Gradient effect: cyan -> blue -> magenta
            let _ = writeln!(self.writer);
            let _ = writeln!(self.writer, "{}", HEADER_LINE_1.bright_cyan().bold());
            let _ = writeln!(self.writer, "{}", HEADER_LINE_2.cyan().bold());
            let _ = writeln!(self.writer, "{}", HEADER_LINE_3.blue().bold());
            let _ = writeln!(self.writer, "{}", HEADER_LINE_4.bright_magenta());
            let _ = writeln!(self.writer, "{}", HEADER_LINE_5.magenta());
            let _ = writeln!(
                self.writer,
                "{}",
                format!("{:>78}", format!("v{}", version)).dimmed()
            );
        } else {
            let _ = writeln!(self.writer, "{}", ASCII_HEADER_PLAIN);
            let _ = writeln!(self.writer, "{:>78}", format!("v{}", version));
        }
        let _ = writeln!(self.writer);
    }

    /// Print an info message; verbose mode logs it instead
    pub fn info(&mut self, msg: &str) {
        if self.config.verbose {
            info!("{}", msg);
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.cyan());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    /// Print a warning message; verbose mode logs it instead
    pub fn warning(&mut self, msg: &str) {
        if self.config.verbose {
            warn!("{}", msg);
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), msg.yellow());
        } else {
            let _ = writeln!(self.writer, "! {}", msg);
        }
    }

    /// Print an error message
    pub fn error(&mut self, msg: &str) {
        // Errors shown in both modes
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✗".red().bold(), msg.red());
        } else {
            let _ = writeln!(self.writer, "X {}", msg);
        }
    }

    /// Show a resolved record awaiting confirmation
    pub fn candidate(&mut self, record: &MovieRecord) {
        let year = record
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "unknown year".to_string());
        let heading = format!("{} ({})", record.title, year);
        let directors = if record.has_directors() {
            record.directors.join(", ")
        } else {
            "Unknown".to_string()
        };
        let url = record.detail_url();

        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "  {}", heading.bold());
            let _ = writeln!(self.writer, "  {} {}", "Directed by:".dimmed(), directors);
            let _ = writeln!(self.writer, "  {}", url.underline().blue());
        } else {
            let _ = writeln!(self.writer, "  {}", heading);
            let _ = writeln!(self.writer, "  Directed by: {}", directors);
            let _ = writeln!(self.writer, "  {}", url);
        }
        let _ = self.writer.flush();
    }

    /// Print a dim/muted message
    pub fn dim(&mut self, msg: &str) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    /// Print progress: [current/total] message
    pub fn progress(&mut self, current: usize, total: usize, msg: &str) {
        if self.config.verbose {
            return;
        }
        let counter = format!("[{}/{}]", current, total);
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", counter.cyan(), msg);
        } else {
            let _ = writeln!(self.writer, "{} {}", counter, msg);
        }
    }

    /// Print a blank line
    pub fn blank(&mut self) {
        if self.config.verbose {
            return;
        }
        let _ = writeln!(self.writer);
    }

    /// Print a completed list item with checkmark
    pub fn list_done(&mut self, from: &str, to: &str) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(
                self.writer,
                "  {} {} {} {}",
                "✓".green(),
                from.dimmed(),
                "→".green(),
                to
            );
        } else {
            let _ = writeln!(self.writer, "  * {} -> {}", from, to);
        }
    }
}
