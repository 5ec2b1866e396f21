use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::format::CompiledFormat;
use super::group::Group;
use super::groups::Groups;
use super::matcher::split_path;
use crate::models::FindOptions;

/// Paths skipped unless the config says otherwise. Matched against the path
/// relative to the scan root.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    "**/node_modules/**",
    "**/vendor/**",
    "**/.git/**",
    "**/obj/**",
    "**/bower_components/**",
    "**/.venv/**",
    "**/target/**",
];

/// Walks a project tree and groups the manifest and lock files it finds.
pub struct Finder {
    formats: Vec<Arc<CompiledFormat>>,
    exclusions: GlobSet,
}

impl Finder {
    /// Create a finder over `formats` (in dispatch order) skipping paths matching
    /// any of the `exclusions` globs.
    pub fn new(formats: Vec<Arc<CompiledFormat>>, exclusions: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclusions {
            let glob = Glob::new(pattern)
                .with_context(|| format!("invalid exclusion pattern '{}'", pattern))?;
            builder.add(glob);
        }

        Ok(Finder {
            formats,
            exclusions: builder.build()?,
        })
    }

    /// Every regular file under `root`, in a stable order (entries sorted by name).
    pub fn find_files(&self, root: &Path) -> Result<Vec<String>> {
        if !root.is_dir() {
            anyhow::bail!("{} is not a directory", root.display());
        }

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !(e.file_type().is_dir() && self.is_excluded_dir(root, e.path())));

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable entry: {}", err);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if self.exclusions.is_match(relative) {
                continue;
            }

            match entry.path().to_str() {
                Some(path) => files.push(path.to_string()),
                None => warn!("skipping non UTF-8 path {}", entry.path().display()),
            }
        }

        info!(root = %root.display(), files = files.len(), "walk finished");
        Ok(files)
    }

    /// Whether everything below `dir` is excluded, so the walk can skip it.
    fn is_excluded_dir(&self, root: &Path, dir: &Path) -> bool {
        let relative = dir.strip_prefix(root).unwrap_or(dir);
        if relative.as_os_str().is_empty() {
            return false;
        }
        // `**/name/**` only matches paths below `name`
        self.exclusions.is_match(relative.join("_"))
    }

    /// Group `paths` in a single pass. The first format claiming a basename wins;
    /// manifests are tried before lock files. Unclaimed paths are dropped.
    pub fn group_paths<S: AsRef<str>>(&self, paths: &[S], lock_file_only: bool) -> Groups {
        let mut groups = Groups::new();

        for path in paths {
            let path = path.as_ref();
            let (_, file_name) = split_path(path);
            if file_name.is_empty() {
                continue;
            }

            if !lock_file_only {
                if let Some(format) = self.formats.iter().find(|f| f.matches_manifest(file_name)) {
                    if !groups.match_path(format, path, false) {
                        if let Some(group) = Group::with_manifest(path, Arc::clone(format)) {
                            debug!(path, format = format.name(), "new group from manifest");
                            groups.add(group);
                        }
                    }
                    continue;
                }
            }

            if let Some(format) = self.formats.iter().find(|f| f.matches_lock_file(file_name)) {
                if !groups.match_path(format, path, true) {
                    if let Some(group) = Group::with_lock_file(path, Arc::clone(format)) {
                        debug!(path, format = format.name(), "new group from lock file");
                        groups.add(group);
                    }
                }
            }
        }

        groups
    }

    /// Walk `root`, group what was found, then apply the strictness filter.
    pub fn find_groups(&self, root: &Path, options: &FindOptions) -> Result<Groups> {
        let files = self.find_files(root)?;
        let groups = self.group_paths(&files, options.lock_file_only);
        let found = groups.len();
        let groups = groups.filter_by_strictness(options.strictness);

        info!(
            found,
            kept = groups.len(),
            files = groups.all_files().len(),
            strictness = %options.strictness,
            "grouping finished"
        );
        Ok(groups)
    }
}
