//! Configuration file schema for codesniff.
//!
//! A config file tunes how the CLI scans a tree and how modules are weighted.
//! Every field is optional; a missing file means defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::detect::{Analyzer, ScoringModule};

/// Config file names searched for in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["codesniff.yaml", ".codesniff.yaml"];

/// Extensions scanned when the config does not list any.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "js", "ts", "jsx", "tsx", "py", "java", "cpp", "cc", "c", "h", "hpp", "rs", "go",
];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub name: String,
    /// File extensions to scan in directory mode (without the dot)
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Glob patterns for paths to skip (e.g., "**/vendor/**")
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Likelihood at or above which `analyze` exits non-zero
    #[serde(default)]
    pub threshold: Option<u32>,
    /// Per-module weight overrides keyed by module name
    #[serde(default)]
    pub weights: HashMap<String, f64>,
    /// Colored terminal output (default: true)
    #[serde(default)]
    pub color: Option<bool>,
    #[serde(default)]
    pub store: Option<StoreConfig>,
}

/// Where history and user records are kept.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StoreConfig {
    /// Path to the JSON store file (default: platform data directory)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config at `path`, or discover one in the working directory.
    /// Falls back to defaults when nothing is found.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(p) => Self::parse_file(p)
                .map_err(|e| anyhow::anyhow!("parsing config {}: {}", p.display(), e))?,
            None => match discover() {
                Some(p) => {
                    tracing::debug!(path = %p.display(), "using discovered config");
                    Self::parse_file(&p)
                        .map_err(|e| anyhow::anyhow!("parsing config {}: {}", p.display(), e))?
                }
                None => Self::default(),
            },
        };
        validate(&config)?;
        Ok(config)
    }

    /// Extensions to scan, falling back to [`DEFAULT_EXTENSIONS`].
    pub fn scan_extensions(&self) -> Vec<String> {
        if self.extensions.is_empty() {
            DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
        } else {
            self.extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect()
        }
    }

    /// Check if a path should be excluded based on excluded_paths patterns.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();

        for pattern in &self.excluded_paths {
            if let Ok(glob) = globset::Glob::new(pattern) {
                let matcher = glob.compile_matcher();
                if matcher.is_match(&*path_str) {
                    return true;
                }
            }
        }
        false
    }

    /// Returns whether colored output is enabled (defaults to true).
    pub fn use_color(&self) -> bool {
        self.color.unwrap_or(true)
    }

    /// Weight overrides resolved to modules. Unknown names are skipped;
    /// `validate` rejects them up front.
    pub fn module_weights(&self) -> HashMap<ScoringModule, f64> {
        self.weights
            .iter()
            .filter_map(|(name, w)| ScoringModule::parse(name).map(|m| (m, *w)))
            .collect()
    }

    /// Build an analyzer carrying this config's weights.
    pub fn analyzer(&self) -> Analyzer {
        Analyzer::new().with_weights(&self.module_weights())
    }

    /// Configured store path, if any.
    pub fn store_path(&self) -> Option<&Path> {
        self.store.as_ref().and_then(|s| s.path.as_deref())
    }
}

/// Look for a config file in the current directory.
pub fn discover() -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

/// Validate a config for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if let Some(threshold) = config.threshold {
        if threshold > 100 {
            anyhow::bail!("invalid threshold {}, must be between 0 and 100", threshold);
        }
    }

    for (name, weight) in &config.weights {
        if ScoringModule::parse(name).is_none() {
            let known: Vec<&str> = ScoringModule::ALL.iter().map(|m| m.as_str()).collect();
            anyhow::bail!(
                "unknown module {:?} in weights (known: {})",
                name,
                known.join(", ")
            );
        }
        if !weight.is_finite() || *weight <= 0.0 {
            anyhow::bail!("invalid weight {} for module {:?}, must be positive", weight, name);
        }
    }

    for pattern in &config.excluded_paths {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
version: "1"
name: "Team defaults"
extensions: [".js", "py"]
excluded_paths:
  - "**/vendor/**"
threshold: 60
weights:
  ai_artifacts: 2.0
color: false
store:
  path: "/tmp/codesniff-store.json"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.name, "Team defaults");
        assert_eq!(config.scan_extensions(), vec!["js", "py"]);
        assert_eq!(config.threshold, Some(60));
        assert!(!config.use_color());
        assert_eq!(
            config.store_path(),
            Some(Path::new("/tmp/codesniff-store.json"))
        );
        assert!(validate(&config).is_ok());

        let analyzer = config.analyzer();
        assert_eq!(analyzer.weight(ScoringModule::AiArtifacts), 2.0);
        assert_eq!(analyzer.weight(ScoringModule::Entropy), 1.0);
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.use_color());
        assert_eq!(config.scan_extensions().len(), DEFAULT_EXTENSIONS.len());
        assert!(config.store_path().is_none());
        assert_eq!(config.analyzer(), Analyzer::default());
    }

    #[test]
    fn test_validate_rejects_bad_weights() {
        let mut config = Config::default();
        config.weights.insert("naming".to_string(), 0.0);
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.weights.insert("not_a_module".to_string(), 1.0);
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("not_a_module"));
    }

    #[test]
    fn test_validate_rejects_threshold_and_glob() {
        let config = Config {
            threshold: Some(101),
            ..Default::default()
        };
        assert!(validate(&config).is_err());

        let config = Config {
            excluded_paths: vec!["[unclosed".to_string()],
            ..Default::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_excluded_paths() {
        let config = Config {
            excluded_paths: vec!["**/vendor/**".to_string()],
            ..Default::default()
        };
        assert!(config.is_path_excluded(Path::new("src/vendor/lib.js")));
        assert!(!config.is_path_excluded(Path::new("src/app.js")));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("codesniff.yaml");
        std::fs::write(&path, "threshold: 40\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.threshold, Some(40));

        std::fs::write(&path, "threshold: 400\n").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }
}
