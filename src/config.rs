use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Root configuration, deserialized from `.license-rater/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Registry endpoints and HTTP settings.
    pub registry: RegistryConfig,
    /// Spreadsheet export settings.
    pub export: ExportConfig,
}

/// Where and how license lookups are made.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// PyPI JSON API base, without a trailing slash.
    pub pypi_url: String,
    /// Maven Central search endpoint used to find the latest version of an artifact.
    pub maven_search_url: String,
    /// Maven repository root that serves POM files.
    pub maven_repo_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Skip the network entirely; every registry lookup resolves to `Unknown`.
    pub offline: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            pypi_url: "https://pypi.org/pypi".to_string(),
            maven_search_url: "https://search.maven.org/solrsearch/select".to_string(),
            maven_repo_url: "https://repo1.maven.org/maven2".to_string(),
            timeout_secs: 10,
            offline: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default spreadsheet path for `--export`.
    pub path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            path: PathBuf::from("license_report.csv"),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<base_dir>/.license-rater/config.toml`
/// 3. `~/.config/license-rater/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(base_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = base_dir.join(".license-rater").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-rater")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.registry.pypi_url, "https://pypi.org/pypi");
        assert_eq!(cfg.registry.timeout_secs, 10);
        assert!(!cfg.registry.offline);
        assert_eq!(cfg.export.path, PathBuf::from("license_report.csv"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "[registry]").unwrap();
        writeln!(f, "timeout_secs = 3").unwrap();

        let cfg = load_config(Path::new("."), Some(f.path())).unwrap();
        assert_eq!(cfg.registry.timeout_secs, 3);
        assert_eq!(cfg.registry.maven_repo_url, "https://repo1.maven.org/maven2");
        assert_eq!(cfg.export.path, PathBuf::from("license_report.csv"));
    }

    #[test]
    fn test_local_config_discovered() {
        let dir = tempfile::tempdir().unwrap();
        let conf_dir = dir.path().join(".license-rater");
        std::fs::create_dir(&conf_dir).unwrap();
        std::fs::write(
            conf_dir.join("config.toml"),
            "[export]\npath = \"out/licenses.csv\"\n",
        )
        .unwrap();

        let cfg = load_config(dir.path(), None).unwrap();
        assert_eq!(cfg.export.path, PathBuf::from("out/licenses.csv"));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "[registry]\ntimeout_secs = \"soon\"").unwrap();
        assert!(load_config(Path::new("."), Some(f.path())).is_err());
    }
}
