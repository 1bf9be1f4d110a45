use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;

pub const DEFAULT_CATALOG: &str = "builtin:home-safety";

#[derive(Debug, Error)]
#[error("config error: {0}")]
pub struct ConfigError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GaugeConfig {
    pub version: u32,
    #[serde(default = "default_catalog")]
    pub catalog: String,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_catalog() -> String {
    DEFAULT_CATALOG.to_string()
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            catalog: default_catalog(),
            output: OutputConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

pub fn load_config(path: &Path) -> Result<GaugeConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;
    let mut cfg: GaugeConfig = serde_yaml::from_str(&raw)
        .map_err(|e| ConfigError(format!("failed to parse YAML: {}", e)))?;
    if cfg.version != SUPPORTED_CONFIG_VERSION {
        return Err(ConfigError(format!(
            "unsupported config version {} (supported: {})",
            cfg.version, SUPPORTED_CONFIG_VERSION
        )));
    }
    if cfg.catalog.trim().is_empty() {
        return Err(ConfigError("config names no catalog".into()));
    }

    // Relative paths are relative to the config file, not the working dir.
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    if !cfg.catalog.starts_with(crate::catalog::loader::BUILTIN_PREFIX) {
        let candidate = base.join(&cfg.catalog);
        if Path::new(&cfg.catalog).is_relative() && candidate.exists() {
            cfg.catalog = candidate.to_string_lossy().into_owned();
        }
    }
    if let Some(out) = cfg.output.path.as_mut() {
        if out.is_relative() {
            *out = base.join(&*out);
        }
    }
    Ok(cfg)
}

pub fn write_sample_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(path, include_str!("../gauge.yaml"))
        .map_err(|e| ConfigError(format!("failed to write sample config: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "gauge.yaml", "version: 1\n");
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.catalog, DEFAULT_CATALOG);
        assert_eq!(cfg.output.format, OutputFormat::Text);
        assert!(cfg.output.path.is_none());
    }

    #[test]
    fn test_rejects_unsupported_version() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "gauge.yaml", "version: 2\n");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported config version 2"));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "gauge.yaml", "version: 1\ncatlog: x\n");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_paths_resolve_against_config_dir() {
        let dir = TempDir::new().unwrap();
        write(&dir, "mine.yaml", "name: mine\n");
        let path = write(
            &dir,
            "gauge.yaml",
            "version: 1\ncatalog: mine.yaml\noutput:\n  format: csv\n  path: out.csv\n",
        );
        let cfg = load_config(&path).unwrap();
        assert_eq!(PathBuf::from(&cfg.catalog), dir.path().join("mine.yaml"));
        assert_eq!(cfg.output.format, OutputFormat::Csv);
        assert_eq!(cfg.output.path, Some(dir.path().join("out.csv")));
    }

    #[test]
    fn test_sample_config_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gauge.yaml");
        write_sample_config(&path).unwrap();
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg, GaugeConfig::default());
    }
}
