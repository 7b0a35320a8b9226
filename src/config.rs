use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration, loaded from `config.toml`.
///
/// Every section has built-in defaults, so the service runs with no file
/// present. `CONFIG_PATH` overrides the file location.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub database_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data/reviews.db"),
        }
    }
}

/// Root-word sets for the sentiment classifier.
///
/// Neutral has no roots of its own: it is the fallback when nothing matches.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub negative_roots: Vec<String>,
    pub positive_roots: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            negative_roots: vec!["ненавиж".to_string()],
            positive_roots: vec!["хорош".to_string(), "люблю".to_string()],
        }
    }
}

impl AppConfig {
    /// Load configuration from `config.toml` (or `CONFIG_PATH`), falling back
    /// to defaults when the file is absent.
    pub fn load() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from(Path::new(&path))
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        toml::from_str(&raw).with_context(|| format!("Failed to parse config file {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_populate_all_sections() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.storage.database_path, PathBuf::from("data/reviews.db"));
        assert_eq!(config.classifier.negative_roots, vec!["ненавиж"]);
        assert_eq!(config.classifier.positive_roots, vec!["хорош", "люблю"]);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9000

            [classifier]
            negative_roots = ["bad"]
            positive_roots = ["good"]
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.database_path, PathBuf::from("data/reviews.db"));
        assert_eq!(config.classifier.negative_roots, vec!["bad"]);
        assert_eq!(config.classifier.positive_roots, vec!["good"]);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load_from(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.server.port, 8000);
    }
}
