//! Decides whether a discovered path belongs to an existing [`Group`].
//!
//! Two checks are combined:
//! - directory co-location: a candidate only joins a group living in the exact same
//!   directory (compared verbatim, no normalisation);
//! - naming correlation: for ecosystems whose lock file name encodes the manifest
//!   name, the two names must agree (see [`LockNaming`]). Every other lock file
//!   correlates with any manifest.

use super::group::Group;

/// A lock file naming convention that ties a lock file to its manifest by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockNaming {
    /// `.<manifest><suffix>`, e.g. `.requirements.txt.pip.debricked.lock`.
    DotPrefixed { suffix: &'static str },
    /// `<stem><suffix>` next to `<stem><manifest_extension>`,
    /// e.g. `package-lock.json` next to `package.json`.
    Dashed {
        suffix: &'static str,
        manifest_extension: &'static str,
    },
}

pub const PIP: LockNaming = LockNaming::DotPrefixed {
    suffix: ".pip.debricked.lock",
};

pub const NPM: LockNaming = LockNaming::Dashed {
    suffix: "-lock.json",
    manifest_extension: ".json",
};

/// Conventions in dispatch order. The first one whose suffix the lock file carries decides.
pub const NAMING_CONVENTIONS: &[LockNaming] = &[PIP, NPM];

impl LockNaming {
    /// `None` when `lock_file` does not follow this convention, otherwise whether
    /// the two basenames correlate.
    pub fn correlate(&self, manifest_file: &str, lock_file: &str) -> Option<bool> {
        match *self {
            LockNaming::DotPrefixed { .. } => self
                .encoded_manifest(lock_file)
                .map(|encoded| encoded == manifest_file),
            LockNaming::Dashed {
                suffix,
                manifest_extension,
            } => {
                let lock_stem = lock_file.strip_suffix(suffix)?;
                let manifest_stem = manifest_file
                    .strip_suffix(manifest_extension)
                    .unwrap_or(manifest_file);
                Some(lock_stem == manifest_stem)
            }
        }
    }

    /// The manifest basename spelled out inside a path-dependent lock file name.
    pub fn encoded_manifest<'a>(&self, lock_file: &'a str) -> Option<&'a str> {
        match *self {
            LockNaming::DotPrefixed { suffix } => {
                let stem = lock_file.strip_suffix(suffix)?;
                Some(stem.strip_prefix('.').unwrap_or(stem))
            }
            LockNaming::Dashed { .. } => None,
        }
    }

    /// Whether the lock file name must agree exactly with one manifest basename.
    pub fn is_path_dependent(&self) -> bool {
        matches!(self, LockNaming::DotPrefixed { .. })
    }
}

/// Whether the basenames `manifest_file` and `lock_file` may belong together.
///
/// Lock files outside every known convention match any manifest. Pairing those
/// relies on directory co-location alone.
pub fn match_file(manifest_file: &str, lock_file: &str) -> bool {
    NAMING_CONVENTIONS
        .iter()
        .find_map(|naming| naming.correlate(manifest_file, lock_file))
        .unwrap_or(true)
}

/// Split `path` right after its last separator into `(dir, base)`.
///
/// `dir` keeps the trailing separator and is empty when `path` has none.
pub fn split_path(path: &str) -> (&str, &str) {
    match path.rfind(std::path::is_separator) {
        Some(idx) => path.split_at(idx + 1),
        None => ("", path),
    }
}

impl Group {
    /// Whether the lock file `lock_file` (a basename) found in `dir` belongs to this group.
    pub(crate) fn match_lock_file(&self, lock_file: &str, dir: &str) -> bool {
        let Some(manifest) = self.manifest_file() else {
            return false;
        };
        let (group_dir, manifest_file) = split_path(manifest);
        if group_dir != dir {
            return false;
        }

        match_file(manifest_file, lock_file)
    }

    /// Whether the manifest `manifest_file` (a basename) found in `dir` completes
    /// this manifestless group.
    pub(crate) fn match_manifest_file(&self, manifest_file: &str, dir: &str) -> bool {
        if self.has_file() {
            return false;
        }
        let Some(first_lock) = self.lock_files().first() else {
            return false;
        };
        let (group_dir, lock_file) = split_path(first_lock);
        if group_dir != dir {
            return false;
        }

        match_file(manifest_file, lock_file)
    }

    /// Extra constraint for path-dependent conventions: the name encoded in the
    /// lock file must equal the manifest basename exactly.
    pub(crate) fn check_file_path_dependant_cases(
        &self,
        manifest_file_match: bool,
        lock_file_match: bool,
        file_name: &str,
    ) -> bool {
        let path_dependent = NAMING_CONVENTIONS.iter().filter(|n| n.is_path_dependent());

        if lock_file_match {
            for naming in path_dependent {
                if let Some(encoded) = naming.encoded_manifest(file_name) {
                    return match self.manifest_file() {
                        Some(manifest) => split_path(manifest).1 == encoded,
                        None => false,
                    };
                }
            }
        } else if manifest_file_match {
            for naming in path_dependent {
                let encoded = self
                    .lock_files()
                    .iter()
                    .find_map(|lock| naming.encoded_manifest(split_path(lock).1));
                if let Some(encoded) = encoded {
                    return encoded == file_name;
                }
            }
        }

        true
    }
}
