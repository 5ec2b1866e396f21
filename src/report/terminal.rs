use std::io::Write;
use std::path::Path;

use anyhow::Result;
use colored::*;

use crate::file::Groups;
use crate::models::GroupSummary;

/// Render the groups in their plain listing format.
///
/// `out` only ever receives [`crate::file::group::Group::write_to`] output so that scripts
/// can parse it; the header, format details and summary go to `err`.
pub fn render<O: Write, E: Write>(
    groups: &Groups,
    path: &Path,
    verbose: bool,
    out: &mut O,
    err: &mut E,
) -> Result<()> {
    writeln!(
        err,
        "\n {} v{}",
        "lockpair".bold(),
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(err, " Scanning: {}\n", path.display())?;

    for group in groups {
        if verbose {
            let format = group.format();
            match format.documentation_url() {
                Some(url) => writeln!(err, "{} {}", format!("[{}]", format.name()).cyan(), url.dimmed())?,
                None => writeln!(err, "{}", format!("[{}]", format.name()).cyan())?,
            }
            // keep the two streams interleaved when both are a terminal
            err.flush()?;
        }
        group.write_to(out)?;
        out.flush()?;
    }

    let summary = GroupSummary::from_groups(groups);
    writeln!(
        err,
        "\n Groups: {}  {}: {}  {}: {}  {}: {}",
        summary.total,
        "Pairs".green(),
        summary.pairs,
        "Manifest only".yellow(),
        summary.manifests_only,
        "Lock files only".yellow(),
        summary.lock_files_only,
    )?;

    Ok(())
}
