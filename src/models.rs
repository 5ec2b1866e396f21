/// Which groups survive a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Every group, paired or not.
    #[default]
    Lenient,
    /// Groups holding at least one lock file.
    LockFilesAndPairs,
    /// Groups holding both a manifest and a lock file.
    PairsOnly,
}

impl Strictness {
    /// Map the numeric `--strict` level. Anything above 2 is treated as 2.
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Strictness::Lenient,
            1 => Strictness::LockFilesAndPairs,
            _ => Strictness::PairsOnly,
        }
    }
}

impl std::fmt::Display for Strictness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strictness::Lenient => write!(f, "lenient"),
            Strictness::LockFilesAndPairs => write!(f, "lock files and pairs"),
            Strictness::PairsOnly => write!(f, "pairs only"),
        }
    }
}

/// Options of a single [`crate::file::Finder::find_groups`] run.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// Only look for lock files; manifests are ignored.
    pub lock_file_only: bool,
    pub strictness: Strictness,
}

/// Counts shown at the end of a terminal report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSummary {
    pub total: usize,
    pub pairs: usize,
    pub manifests_only: usize,
    pub lock_files_only: usize,
}

impl GroupSummary {
    pub fn from_groups(groups: &crate::file::Groups) -> Self {
        let mut summary = GroupSummary {
            total: groups.len(),
            ..Default::default()
        };
        for group in groups {
            match (group.has_file(), group.has_lock_files()) {
                (true, true) => summary.pairs += 1,
                (true, false) => summary.manifests_only += 1,
                _ => summary.lock_files_only += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strictness_levels() {
        assert_eq!(Strictness::from_level(0), Strictness::Lenient);
        assert_eq!(Strictness::from_level(1), Strictness::LockFilesAndPairs);
        assert_eq!(Strictness::from_level(2), Strictness::PairsOnly);
        assert_eq!(Strictness::from_level(9), Strictness::PairsOnly);
    }
}
