use autodoc_core::SourceKind;
use autodoc_core::cache::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid include pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },
}

fn default_include() -> Vec<String> {
    ["**/*.c", "**/*.h", "**/*.cpp", "**/*.hpp", "**/*.pike", "**/*.pmod"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_cache_capacity() -> usize {
    DEFAULT_CAPACITY
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Comment convention of scanned sources.
    #[serde(default)]
    pub source_kind: SourceKind,
    /// Globs, relative to the scanned directory, selecting source files.
    #[serde(default = "default_include")]
    pub include: Vec<String>,
    /// Directory `browse` opens when none is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_kind: SourceKind::default(),
            include: default_include(),
            root: None,
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.include_patterns()?;

        // Expand shell variables and tilde in the loaded root
        config.root = config
            .root
            .map(|root| Self::expand_path(&root).unwrap_or(root));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/autodoc");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Compiled `include` globs.
    pub fn include_patterns(&self) -> Result<Vec<glob::Pattern>, ConfigError> {
        self.include
            .iter()
            .map(|pattern| {
                glob::Pattern::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect()
    }

    /// Files under `dir` matched by any `include` glob, sorted and deduplicated.
    ///
    /// Entries that cannot be read are skipped.
    pub fn scan(&self, dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
        let mut files = Vec::new();
        for pattern in &self.include {
            let full = dir.join(pattern);
            let matches = glob::glob(&full.to_string_lossy()).map_err(|source| {
                ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                }
            })?;
            files.extend(matches.filter_map(Result::ok).filter(|p| p.is_file()));
        }
        files.sort();
        files.dedup();
        Ok(files)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/autodoc/config.toml"));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.source_kind, SourceKind::LineComment);
        assert_eq!(config.cache_capacity, 64);
        assert!(config.include.contains(&"**/*.c".to_string()));
    }

    #[test]
    fn test_source_kind_spellings() {
        let config: Config = toml::from_str(r#"source_kind = "block""#).unwrap();
        assert_eq!(config.source_kind, SourceKind::BlockComment);

        let config: Config = toml::from_str(r#"source_kind = "line_comment""#).unwrap();
        assert_eq!(config.source_kind, SourceKind::LineComment);

        assert!(toml::from_str::<Config>(r#"source_kind = "hash""#).is_err());
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("AUTODOC_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$AUTODOC_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/subdir")));

        unsafe {
            env::remove_var("AUTODOC_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_relative_path() {
        let path = PathBuf::from("relative/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let test_config = Config {
            source_kind: SourceKind::BlockComment,
            include: vec!["src/*.c".to_string()],
            root: Some(PathBuf::from("/tmp/project")),
            cache_capacity: 8,
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_load_expands_root() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "root = \"~/code\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        let root = config.root.unwrap();
        assert!(!root.to_string_lossy().starts_with('~'));
        assert!(root.ends_with("code"));
    }

    #[test]
    fn test_load_rejects_invalid_pattern() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "include = [\"src/[*.c\"]\n").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { ref pattern, .. } if pattern == "src/[*.c"));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "cache_capacity = \"lots\"\n").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_scan_matches_include_globs() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir_all(root.join("src/nested")).unwrap();
        std::fs::write(root.join("src/a.c"), "//! @decl a").unwrap();
        std::fs::write(root.join("src/nested/b.h"), "//! @decl b").unwrap();
        std::fs::write(root.join("README.md"), "# readme").unwrap();

        let config = Config {
            include: vec!["**/*.c".to_string(), "**/*.h".to_string(), "src/*.c".to_string()],
            ..Config::default()
        };
        let files = config.scan(root).unwrap();

        assert_eq!(
            files,
            vec![root.join("src/a.c"), root.join("src/nested/b.h")]
        );
    }
}
