use std::sync::Arc;

use tracing::debug;

use super::format::CompiledFormat;
use super::group::Group;
use super::matcher::split_path;
use crate::models::Strictness;

/// The groups produced by one grouping pass, in creation order.
#[derive(Debug, Clone, Default)]
pub struct Groups {
    groups: Vec<Group>,
}

impl Groups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, group: Group) {
        self.groups.push(group);
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    pub fn into_vec(self) -> Vec<Group> {
        self.groups
    }

    /// Every file of every group, group by group.
    pub fn all_files(&self) -> Vec<&str> {
        self.groups.iter().flat_map(Group::all_files).collect()
    }

    /// Try to attach `path` to an existing group of the same `format`.
    ///
    /// `lock_file` tells whether the path was recognised as a lock file or as a
    /// manifest. The path joins the first group that accepts it; `false` means
    /// none did and the caller should start a new group.
    pub fn match_path(&mut self, format: &Arc<CompiledFormat>, path: &str, lock_file: bool) -> bool {
        let (dir, file_name) = split_path(path);

        for group in self
            .groups
            .iter_mut()
            .filter(|g| g.format().name() == format.name())
        {
            let (lock_file_match, manifest_file_match) = if lock_file {
                (group.match_lock_file(file_name, dir), false)
            } else {
                (false, group.match_manifest_file(file_name, dir))
            };

            if !group.check_file_path_dependant_cases(manifest_file_match, lock_file_match, file_name) {
                continue;
            }

            if lock_file_match {
                debug!(path, manifest = ?group.manifest_file(), "attached lock file");
                group.attach_lock_file(path);
                return true;
            }
            if manifest_file_match {
                debug!(path, lock_files = group.lock_files().len(), "bound manifest");
                group.bind_manifest(path);
                return true;
            }
        }

        false
    }

    /// Drop the groups that do not satisfy `strictness`.
    pub fn filter_by_strictness(self, strictness: Strictness) -> Groups {
        let groups = self
            .groups
            .into_iter()
            .filter(|g| match strictness {
                Strictness::Lenient => true,
                Strictness::LockFilesAndPairs => g.has_lock_files(),
                Strictness::PairsOnly => g.has_file() && g.has_lock_files(),
            })
            .collect();
        Groups { groups }
    }
}

impl<'a> IntoIterator for &'a Groups {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
