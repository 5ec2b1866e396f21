use std::path::PathBuf;

use clap::Parser;

use crate::models::{FindOptions, Strictness};

#[derive(Parser, Debug)]
#[command(
    name = "lockpair",
    about = "Discover dependency manifests and pair them with their lock files",
    version
)]
pub struct Cli {
    /// Project path to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Config file [default: ./.lockpair/config.toml, fallback ~/.config/lockpair/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// 0: all groups, 1: lock files and pairs only, 2: pairs only
    #[arg(long, default_value_t = 0, value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=2))]
    pub strict: u8,

    /// Only look for lock files
    #[arg(long)]
    pub lockfile: bool,

    /// Extra exclusion glob, relative to PATH (repeatable)
    #[arg(short = 'e', long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Show format details and debug logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the groups
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn find_options(&self) -> FindOptions {
        FindOptions {
            lock_file_only: self.lockfile,
            strictness: Strictness::from_level(self.strict),
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Table,
}
