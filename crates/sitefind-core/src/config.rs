//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Main configuration structure for sitefind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// Search settings.
    #[serde(default)]
    pub search: SearchConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Default language code.
    #[serde(default = "default_language")]
    pub default_language: String,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Output directory for generated assets.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// File name of the serialized index asset.
    #[serde(default = "default_index_name")]
    pub index_name: String,
}

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Whether search index generation is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Minimum token length kept by the indexer.
    #[serde(default = "default_min_term_len")]
    pub min_term_len: usize,
}

impl Config {
    /// Load configuration from a TOML file, with `SITEFIND_*` environment
    /// variable overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("SITEFIND").separator("__"))
            .build()?;

        let cfg: Config = settings.try_deserialize()?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(cfg)
    }

    /// Load configuration if the file exists, falling back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            index_name: default_index_name(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_term_len: default_min_term_len(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_output_dir() -> String {
    "public".to_string()
}

fn default_index_name() -> String {
    "search-index.json".to_string()
}

fn default_true() -> bool {
    true
}

fn default_min_term_len() -> usize {
    2
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::Builder;

    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert!(cfg.search.enabled);
        assert_eq!(cfg.search.min_term_len, 2);
        assert_eq!(cfg.build.output_dir, "public");
        assert_eq!(cfg.build.index_name, "search-index.json");
        assert_eq!(cfg.site.default_language, "en");
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[search]\nenabled = false\nmin_term_len = 3\n\n[build]\noutput_dir = \"dist\""
        )
        .unwrap();

        let cfg = Config::load(file.path()).unwrap();
        assert!(!cfg.search.enabled);
        assert_eq!(cfg.search.min_term_len, 3);
        assert_eq!(cfg.build.output_dir, "dist");
        // Untouched sections keep their defaults
        assert_eq!(cfg.build.index_name, "search-index.json");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let cfg = Config::load_or_default(Path::new("does-not-exist.toml")).unwrap();
        assert!(cfg.search.enabled);
    }
}
