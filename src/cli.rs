use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "movie-sorter")]
#[command(author, version, about, long_about = None)]
#[command(about = "Sort movie files and DVD folders into Director/Year - Title folders")]
pub struct Args {
    /// Folder holding the movies to sort (asked for when omitted)
    pub root: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Accept every match without asking; unmatched items are skipped
    #[arg(short, long)]
    pub auto: bool,

    /// Leave a file in place instead of storing it with a duplicate suffix
    #[arg(short, long)]
    pub keep_conflicts: bool,
}
