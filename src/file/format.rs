use std::sync::Arc;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

/// One ecosystem's file naming rules, as written in the config file.
///
/// Every pattern is a regex matched against a file's basename, never its full path.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Format {
    /// Ecosystem name (e.g. `"npm"`).
    pub name: String,
    /// Manifest pattern. Ecosystems that only produce lock files leave this out.
    #[serde(default)]
    pub manifest: Option<String>,
    /// Lock file patterns.
    #[serde(default)]
    pub lock_files: Vec<String>,
    #[serde(default)]
    pub documentation_url: Option<String>,
}

impl Format {
    fn new(name: &str, manifest: Option<&str>, lock_files: &[&str], docs: &str) -> Self {
        Format {
            name: name.to_string(),
            manifest: manifest.map(str::to_string),
            lock_files: lock_files.iter().map(|s| s.to_string()).collect(),
            documentation_url: Some(docs.to_string()),
        }
    }

    /// Compile every pattern of this format.
    pub fn compile(&self) -> Result<CompiledFormat> {
        let manifest = self
            .manifest
            .as_deref()
            .map(|pattern| compile_pattern(&self.name, pattern))
            .transpose()?;

        let lock_files = self
            .lock_files
            .iter()
            .map(|pattern| compile_pattern(&self.name, pattern))
            .collect::<Result<Vec<_>>>()?;

        Ok(CompiledFormat {
            name: self.name.clone(),
            manifest,
            lock_files,
            documentation_url: self.documentation_url.clone(),
        })
    }
}

fn compile_pattern(format: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .with_context(|| format!("invalid pattern '{}' in format '{}'", pattern, format))
}

/// Built-in format registry, in dispatch order.
pub fn builtin_formats() -> Vec<Format> {
    vec![
        Format::new(
            "pip",
            Some(r"^requirements.*\.txt$"),
            &[r"\.pip\.debricked\.lock$"],
            "https://pip.pypa.io/en/stable/reference/requirements-file-format/",
        ),
        Format::new(
            "npm",
            Some(r"^package\.json$"),
            &[r"^package-lock\.json$", r"^yarn\.lock$", r"^npm-shrinkwrap\.json$"],
            "https://docs.npmjs.com/cli/configuring-npm/package-lock-json",
        ),
        Format::new(
            "composer",
            Some(r"^composer\.json$"),
            &[r"^composer\.lock$"],
            "https://getcomposer.org/doc/01-basic-usage.md",
        ),
        Format::new(
            "gomod",
            Some(r"^go\.mod$"),
            &[r"^go\.sum$"],
            "https://go.dev/ref/mod",
        ),
        Format::new(
            "bundler",
            Some(r"^Gemfile$"),
            &[r"^Gemfile\.lock$"],
            "https://bundler.io/guides/gemfile.html",
        ),
        Format::new(
            "cargo",
            Some(r"^Cargo\.toml$"),
            &[r"^Cargo\.lock$"],
            "https://doc.rust-lang.org/cargo/guide/cargo-toml-vs-cargo-lock.html",
        ),
        Format::new(
            "maven",
            Some(r"^pom\.xml$"),
            &[r"\.maven\.debricked\.lock$"],
            "https://maven.apache.org/pom.html",
        ),
        Format::new(
            "gradle",
            Some(r"^build\.gradle(\.kts)?$"),
            &[r"\.gradle\.debricked\.lock$"],
            "https://docs.gradle.org/current/userguide/dependency_locking.html",
        ),
        Format::new(
            "nuget",
            Some(r"^.*\.csproj$"),
            &[r"^packages\.lock\.json$"],
            "https://learn.microsoft.com/en-us/nuget/consume-packages/package-references-in-project-files",
        ),
        Format::new(
            "pipenv",
            Some(r"^Pipfile$"),
            &[r"^Pipfile\.lock$"],
            "https://pipenv.pypa.io/en/latest/pipfile.html",
        ),
    ]
}

/// Compile a registry, keeping its order.
pub fn compile_all(formats: &[Format]) -> Result<Vec<Arc<CompiledFormat>>> {
    formats
        .iter()
        .map(|f| f.compile().map(Arc::new))
        .collect()
}

/// A [`Format`] with its patterns compiled. Groups hold it as an opaque handle.
#[derive(Debug)]
pub struct CompiledFormat {
    name: String,
    manifest: Option<Regex>,
    lock_files: Vec<Regex>,
    documentation_url: Option<String>,
}

impl CompiledFormat {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn documentation_url(&self) -> Option<&str> {
        self.documentation_url.as_deref()
    }

    /// Whether `file_name` (a basename) is a manifest of this ecosystem.
    pub fn matches_manifest(&self, file_name: &str) -> bool {
        self.manifest
            .as_ref()
            .is_some_and(|re| re.is_match(file_name))
    }

    /// Whether `file_name` (a basename) is a lock file of this ecosystem.
    pub fn matches_lock_file(&self, file_name: &str) -> bool {
        self.lock_files.iter().any(|re| re.is_match(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin(name: &str) -> CompiledFormat {
        builtin_formats()
            .into_iter()
            .find(|f| f.name == name)
            .unwrap()
            .compile()
            .unwrap()
    }

    #[test]
    fn test_builtin_registry_compiles() {
        let compiled = compile_all(&builtin_formats()).unwrap();
        assert_eq!(compiled.len(), builtin_formats().len());
        assert_eq!(compiled[0].name(), "pip");
        assert_eq!(compiled[1].name(), "npm");
    }

    #[test]
    fn test_pip_patterns() {
        let pip = builtin("pip");
        assert!(pip.matches_manifest("requirements.txt"));
        assert!(pip.matches_manifest("requirements-dev.txt"));
        assert!(!pip.matches_manifest("setup.py"));
        assert!(pip.matches_lock_file(".requirements.txt.pip.debricked.lock"));
        assert!(!pip.matches_lock_file("requirements.txt"));
    }

    #[test]
    fn test_npm_patterns() {
        let npm = builtin("npm");
        assert!(npm.matches_manifest("package.json"));
        assert!(!npm.matches_manifest("package-lock.json"));
        assert!(npm.matches_lock_file("package-lock.json"));
        assert!(npm.matches_lock_file("yarn.lock"));
        assert!(!npm.matches_lock_file("Gemfile.lock"));
    }

    #[test]
    fn test_lock_only_format_never_matches_manifest() {
        let format = Format {
            name: "lock-only".to_string(),
            manifest: None,
            lock_files: vec![r"^deps\.lock$".to_string()],
            documentation_url: None,
        }
        .compile()
        .unwrap();

        assert!(!format.matches_manifest("deps.lock"));
        assert!(format.matches_lock_file("deps.lock"));
        assert_eq!(format.documentation_url(), None);
    }

    #[test]
    fn test_invalid_pattern_names_format() {
        let err = Format {
            name: "broken".to_string(),
            manifest: Some("([".to_string()),
            lock_files: vec![],
            documentation_url: None,
        }
        .compile()
        .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("broken"));
        assert!(msg.contains("(["));
    }
}
