//! `lockpair` — discover dependency manifests and pair them with their lock files.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load the format registry and exclusions ([`config::load_config`]).
//! 3. Walk the project tree ([`file::Finder::find_files`]).
//! 4. Group manifests with lock files ([`file::Finder::group_paths`]) and apply
//!    `--strict`.
//! 5. Render the requested report ([`report`]).
//! 6. Exit `0`, or `1` when nothing was found.

mod cli;
mod config;
mod file;
mod models;
mod report;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, ReportFormat};
use config::load_config;
use file::Finder;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "lockpair=debug" } else { "lockpair=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = load_config(&cli.path, cli.config.as_deref())?;
    let formats = config.compile_formats()?;

    let mut exclusions = config.exclude.clone();
    exclusions.extend(cli.exclude.iter().cloned());

    let finder = Finder::new(formats, &exclusions)?;
    let options = cli.find_options();

    let spinner = if !cli.quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message(format!("Scanning {}", cli.path.display()));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let groups = finder.find_groups(&cli.path, &options);

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let groups = groups?;

    if groups.is_empty() {
        eprintln!(
            "No supported manifest or lock files found in {}",
            cli.path.display()
        );
        std::process::exit(1);
    }

    match cli.report {
        ReportFormat::Terminal if cli.quiet => {
            for group in &groups {
                group.print()?;
            }
        }
        ReportFormat::Terminal => {
            report::terminal::render(
                &groups,
                &cli.path,
                cli.verbose,
                &mut io::stdout().lock(),
                &mut io::stderr().lock(),
            )?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&groups.into_vec())?);
        }
        ReportFormat::Table => {
            report::table::render(&groups);
        }
    }

    Ok(())
}
