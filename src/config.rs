use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::file::finder::DEFAULT_EXCLUSIONS;
use crate::file::format::{builtin_formats, compile_all, CompiledFormat, Format};

/// Root configuration structure, deserialized from `.lockpair/config.toml`.
///
/// Both sections replace the built-in values when present.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Glob patterns, relative to the scan root, that are never scanned.
    #[serde(default = "default_exclusions")]
    pub exclude: Vec<String>,
    /// Format registry, in dispatch order.
    #[serde(default = "builtin_formats")]
    pub formats: Vec<Format>,
}

fn default_exclusions() -> Vec<String> {
    DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    /// Built-in registry and exclusions, used when no config file is found.
    fn default() -> Self {
        Config {
            exclude: default_exclusions(),
            formats: builtin_formats(),
        }
    }
}

impl Config {
    /// Compile the format registry into the handles passed to the finder.
    pub fn compile_formats(&self) -> Result<Vec<Arc<CompiledFormat>>> {
        if self.formats.is_empty() {
            anyhow::bail!("config defines no formats");
        }
        compile_all(&self.formats)
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.lockpair/config.toml`
/// 3. `~/.config/lockpair/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".lockpair").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("lockpair").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert!(cfg.exclude.contains(&"**/node_modules/**".to_string()));
        assert_eq!(cfg.compile_formats().unwrap().len(), builtin_formats().len());
    }

    #[test]
    fn test_project_config_replaces_formats() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".lockpair")).unwrap();
        fs::write(
            dir.path().join(".lockpair").join("config.toml"),
            r#"
[[formats]]
name = "npm"
manifest = '^package\.json$'
lock_files = ['^package-lock\.json$']
"#,
        )
        .unwrap();

        let cfg = load_config(dir.path(), None).unwrap();
        assert_eq!(cfg.formats.len(), 1);
        assert_eq!(cfg.formats[0].name, "npm");
        assert_eq!(cfg.exclude, default_exclusions());
    }

    #[test]
    fn test_override_path_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "exclude = [\"build/**\"]\n").unwrap();

        let cfg = load_config(dir.path(), Some(&path)).unwrap();
        assert_eq!(cfg.exclude, vec!["build/**".to_string()]);
        assert_eq!(cfg.formats, builtin_formats());
    }

    #[test]
    fn test_missing_override_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(dir.path(), Some(&missing)).is_err());
    }

    #[test]
    fn test_empty_registry_is_rejected() {
        let cfg: Config = toml::from_str("formats = []").unwrap();
        assert!(cfg.compile_formats().is_err());
    }
}
