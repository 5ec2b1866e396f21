use std::io::{self, Write};
use std::sync::Arc;

use serde::Serialize;

use super::format::CompiledFormat;

/// A manifest file bound to the lock files derived from it.
///
/// A group always holds a manifest, at least one lock file, or both: the only
/// constructors take one non-empty path. Lock files keep discovery order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    manifest_file: String,
    #[serde(skip)]
    format: Arc<CompiledFormat>,
    lock_files: Vec<String>,
}

impl Group {
    /// Start a group from a manifest path. `None` for an empty path.
    pub fn with_manifest(manifest_file: impl Into<String>, format: Arc<CompiledFormat>) -> Option<Self> {
        let manifest_file = manifest_file.into();
        if manifest_file.is_empty() {
            return None;
        }
        Some(Group {
            manifest_file,
            format,
            lock_files: Vec::new(),
        })
    }

    /// Start a manifestless group from a lock file path. `None` for an empty path.
    pub fn with_lock_file(lock_file: impl Into<String>, format: Arc<CompiledFormat>) -> Option<Self> {
        let lock_file = lock_file.into();
        if lock_file.is_empty() {
            return None;
        }
        Some(Group {
            manifest_file: String::new(),
            format,
            lock_files: vec![lock_file],
        })
    }

    pub fn manifest_file(&self) -> Option<&str> {
        if self.has_file() {
            Some(&self.manifest_file)
        } else {
            None
        }
    }

    pub fn lock_files(&self) -> &[String] {
        &self.lock_files
    }

    pub fn format(&self) -> &CompiledFormat {
        &self.format
    }

    pub fn has_file(&self) -> bool {
        !self.manifest_file.is_empty()
    }

    pub fn has_lock_files(&self) -> bool {
        !self.lock_files.is_empty()
    }

    /// Manifest first (when present), then every lock file in stored order.
    pub fn all_files(&self) -> Vec<&str> {
        self.manifest_file()
            .into_iter()
            .chain(self.lock_files.iter().map(String::as_str))
            .collect()
    }

    /// Display lines: the manifest followed by ` * `-prefixed lock files, or the
    /// bare lock files when there is no manifest.
    pub fn lines(&self) -> Vec<String> {
        let has_file = self.has_file();
        let mut lines = Vec::with_capacity(self.lock_files.len() + 1);
        if has_file {
            lines.push(self.manifest_file.clone());
        }
        for lock_file in &self.lock_files {
            if has_file {
                lines.push(format!(" * {}", lock_file));
            } else {
                lines.push(lock_file.clone());
            }
        }
        lines
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    /// Print [`Group::lines`] to stdout.
    pub fn print(&self) -> io::Result<()> {
        self.write_to(&mut io::stdout().lock())
    }

    pub(crate) fn attach_lock_file(&mut self, lock_file: impl Into<String>) {
        self.lock_files.push(lock_file.into());
    }

    /// Bind the manifest of a manifestless group. A bound manifest is never replaced.
    pub(crate) fn bind_manifest(&mut self, manifest_file: impl Into<String>) {
        let manifest_file = manifest_file.into();
        if !self.has_file() && !manifest_file.is_empty() {
            self.manifest_file = manifest_file;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::format::Format;

    fn format() -> Arc<CompiledFormat> {
        Arc::new(
            Format {
                name: "test".to_string(),
                manifest: None,
                lock_files: vec![],
                documentation_url: None,
            }
            .compile()
            .unwrap(),
        )
    }

    fn bound_group() -> Group {
        let mut group = Group::with_manifest("m", format()).unwrap();
        group.attach_lock_file("a");
        group.attach_lock_file("b");
        group.attach_lock_file("c");
        group
    }

    #[test]
    fn test_constructed_groups_are_valid() {
        let manifest_only = Group::with_manifest("package.json", format()).unwrap();
        assert!(manifest_only.has_file());
        assert!(!manifest_only.has_lock_files());

        let lock_only = Group::with_lock_file("yarn.lock", format()).unwrap();
        assert!(!lock_only.has_file());
        assert!(lock_only.has_lock_files());
        assert_eq!(lock_only.manifest_file(), None);
    }

    #[test]
    fn test_empty_paths_build_no_group() {
        assert!(Group::with_manifest("", format()).is_none());
        assert!(Group::with_lock_file("", format()).is_none());
    }

    #[test]
    fn test_all_files_manifest_first() {
        assert_eq!(bound_group().all_files(), vec!["m", "a", "b", "c"]);
    }

    #[test]
    fn test_all_files_without_manifest() {
        let mut group = Group::with_lock_file("x", format()).unwrap();
        group.attach_lock_file("y");
        assert_eq!(group.all_files(), vec!["x", "y"]);
    }

    #[test]
    fn test_lock_files_are_not_deduplicated() {
        let mut group = Group::with_manifest("m", format()).unwrap();
        group.attach_lock_file("a");
        group.attach_lock_file("a");
        assert_eq!(group.lock_files(), ["a", "a"]);
    }

    #[test]
    fn test_bind_manifest_only_once() {
        let mut group = Group::with_lock_file("/p/package-lock.json", format()).unwrap();
        group.bind_manifest("/p/package.json");
        group.bind_manifest("/p/other.json");
        assert_eq!(group.manifest_file(), Some("/p/package.json"));

        let mut manifestless = Group::with_lock_file("/p/yarn.lock", format()).unwrap();
        manifestless.bind_manifest("");
        assert!(!manifestless.has_file());
    }

    #[test]
    fn test_print_with_manifest() {
        let mut group = Group::with_manifest("/p/package.json", format()).unwrap();
        group.attach_lock_file("/p/package-lock.json");
        group.attach_lock_file("/p/yarn.lock");

        let mut out = Vec::new();
        group.write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "/p/package.json\n * /p/package-lock.json\n * /p/yarn.lock\n"
        );
    }

    #[test]
    fn test_print_without_manifest() {
        let mut group = Group::with_lock_file("/p/x.lock", format()).unwrap();
        group.attach_lock_file("/p/y.lock");
        assert_eq!(group.lines(), vec!["/p/x.lock", "/p/y.lock"]);
    }

    #[test]
    fn test_json_shape() {
        let mut group = Group::with_lock_file("/p/yarn.lock", format()).unwrap();
        group.attach_lock_file("/p/other.lock");
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "manifestFile": "",
                "lockFiles": ["/p/yarn.lock", "/p/other.lock"]
            })
        );
    }
}
