pub mod commands;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "freshet")]
#[command(
    about = "Turns new RSS/Atom feed entries into mail notifications",
    long_about = None
)]
pub struct Cli {
    /// Path to the YAML configuration file
    pub config: PathBuf,

    /// Path to the JSON cache of already-seen entry ids
    pub cache: PathBuf,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,

    /// Fetch and print reports without updating the cache or sending mail
    #[arg(long)]
    pub dry_run: bool,
}
